use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::core::error::{Error, Result};

pub const FILL_SIZE: usize = 1024;

pub const FILL_BYTE: u8 = 0xff;

/// 1KB of 0xff
pub static FILL_BUFFER: [u8; FILL_SIZE] = [FILL_BYTE; FILL_SIZE];

/// Creates (or truncates) `path` with the 1KB fill pattern.
pub fn write_fill_file<P: AsRef<Path>>(path: P) -> Result<u64> {
    let path = path.as_ref();

    let mut file = File::create(path).map_err(|source| Error::TargetOpen {
        path: path.to_path_buf(),
        source,
    })?;

    file.write_all(&FILL_BUFFER)
        .and_then(|_| file.sync_all())
        .map_err(|source| Error::TargetWrite {
            path: path.to_path_buf(),
            source,
        })?;

    dbg_println!("'{}': {} bytes of {:#x}", path.display(), FILL_SIZE, FILL_BYTE);

    Ok(FILL_SIZE as u64)
}
