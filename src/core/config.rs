use std::path::PathBuf;

/// Resolved command line, built once and handed to `core::run`.
/// `size == 0` and `None` both mean "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub seed: Option<PathBuf>,
    pub size: i64,
    pub file: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub count: Option<i64>,
    pub kilobyte: bool,
    pub verbose: bool,
}

impl Config {
    pub fn batch_mode(&self) -> bool {
        self.count.is_some()
    }
}
