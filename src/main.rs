// std
use std::process;

// ext
extern crate filebucket;

// crate
use filebucket::core;
use filebucket::core::cli;
use filebucket::dbg_println;

/// Program entry point
/// It parses the command line to build the configuration,
/// then runs the whole generation in the main thread.
fn main() {
    core::check_env_flags();

    let matches = cli::build_command().get_matches();

    let log = cli::log_settings_from_matches(&matches);
    if log.debug {
        core::enable_dbg_println();
    }
    let log_filename = log
        .log_filename
        .unwrap_or_else(core::default_log_filename);
    core::LOG_FILENAME.get_or_init(|| log_filename.clone());

    let config = cli::config_from_matches(&matches);

    dbg_println!("filebucket {}", core::VERSION);
    dbg_println!("LOG_FILENAME = \n{:?}", log_filename);

    match core::run(&config) {
        Ok(report) => {
            if config.verbose {
                for f in &report.files {
                    println!("{}", f.display());
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_config() {
                eprintln!("{}", cli::USAGE_HINT);
            }
            process::exit(1);
        }
    }
}
