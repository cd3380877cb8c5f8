use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure is terminal for the current run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("size parameter is out of range: {0} (must be bigger than zero)")]
    InvalidSize(i64),

    #[error("the seed file does not exist: {}", .0.display())]
    SeedMissing(PathBuf),

    #[error("seed file is not 128KB: '{}' is {size} bytes", .path.display())]
    SeedWrongSize { path: PathBuf, size: u64 },

    #[error("can't read the seed file '{}': {source}", .path.display())]
    SeedRead { path: PathBuf, source: io::Error },

    #[error("can't open the target file '{}': {source}", .path.display())]
    TargetOpen { path: PathBuf, source: io::Error },

    #[error("can't write to the target file '{}': {source}", .path.display())]
    TargetWrite { path: PathBuf, source: io::Error },

    #[error("could not generate a unique file name after {attempts} attempts")]
    NameGenerationExhausted { attempts: usize },
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
