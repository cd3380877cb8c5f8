#[macro_export]
#[doc(hidden)]
macro_rules! dbg_println {
    ($($arg:tt)*) => {{
        use std::io::Write;

        if $crate::core::dbg_println_enabled() {
            if let Some(f) = $crate::core::get_log_file() {
                let mut f = f.lock();
                let ts = $crate::core::BOOT_TIME.elapsed().map(|d| d.as_millis()).unwrap_or(0);
                let _ = writeln!(f, "[{}] {}:{} ", ts, file!(), line!());
                let _ = writeln!(f, $($arg)*);
            }
        }
    }};
}

#[macro_export]
#[doc(hidden)]
macro_rules! trace_block {
    ($trace_label:expr, $($arg:tt)*) => {

        $crate::dbg_println!("{} START", $trace_label);

        let now = std::time::SystemTime::now();

        $($arg)*

        $crate::dbg_println!("{} END [{} ms]", $trace_label, now.elapsed().map(|d| d.as_millis()).unwrap_or(0));
    };
}
