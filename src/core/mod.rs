// std
use std::fs::File;
use std::fs::OpenOptions;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::SystemTime;

// ext
use once_cell::sync::Lazy;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod error;
pub mod fill;
pub mod names;
pub mod orchestrator;
pub mod seed;

pub use self::orchestrator::run;
pub use self::orchestrator::RunReport;

pub static VERSION: &str = env!("CARGO_PKG_VERSION");

/// 1 MiB, the unit of the --size option
pub const MEGABYTE: u64 = 1024 * 1024;

pub static DBG_PRINTLN_FLAG: AtomicUsize = AtomicUsize::new(0);

pub static BOOT_TIME: Lazy<SystemTime> = Lazy::new(SystemTime::now);

pub static LOG_FILENAME: OnceCell<String> = OnceCell::new();

static LOG_FILE: OnceCell<Option<Mutex<File>>> = OnceCell::new();

pub fn enable_dbg_println() {
    DBG_PRINTLN_FLAG.store(1, Ordering::Relaxed);
}

pub fn dbg_println_enabled() -> bool {
    DBG_PRINTLN_FLAG.load(Ordering::Relaxed) != 0
}

pub fn default_log_filename() -> String {
    std::env::temp_dir()
        .join("filebucket.log")
        .to_string_lossy()
        .into_owned()
}

/// Returns the debug log file, opened in append mode on first use.
/// None if the file cannot be opened: debug output is then dropped.
pub fn get_log_file() -> Option<&'static Mutex<File>> {
    LOG_FILE
        .get_or_init(|| {
            let name = LOG_FILENAME.get_or_init(default_log_filename);
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(name)
                .ok()
                .map(Mutex::new)
        })
        .as_ref()
}

/// FILEBUCKET_DEBUG=1 (or any value but "0") turns the debug log on
/// without touching the command line.
pub fn check_env_flags() {
    match std::env::var("FILEBUCKET_DEBUG") {
        Ok(v) if v != "0" => enable_dbg_println(),
        _ => {}
    }
}
