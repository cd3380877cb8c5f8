/// This module contains the file generation core
pub mod core;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
