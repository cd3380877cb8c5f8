//
// Seeded files: a 128KB seed read once, written back to back until the
// target reaches the requested number of megabytes.
//
// size checks come first, then the seed, then the target is opened:
// a bad size or a bad seed never creates a target file.
//

use std::fs;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::path::PathBuf;

use crate::core::error::{Error, Result};
use crate::core::MEGABYTE;

/// exact size of a seed file
pub const SEED_SIZE: usize = 128 * 1024;

/// seed copies per megabyte
pub const CYCLES_PER_MEGABYTE: u64 = MEGABYTE / SEED_SIZE as u64;

/// Immutable in-memory copy of a seed file, always SEED_SIZE bytes.
#[derive(Debug, Clone)]
pub struct SeedBuffer {
    path: PathBuf,
    data: Vec<u8>,
}

impl SeedBuffer {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SeedBuffer> {
        let path = path.as_ref();

        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(_) => return Err(Error::SeedMissing(path.to_path_buf())),
        };
        if meta.len() != SEED_SIZE as u64 {
            return Err(Error::SeedWrongSize {
                path: path.to_path_buf(),
                size: meta.len(),
            });
        }

        let data = fs::read(path).map_err(|source| Error::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;

        // the file may have changed between stat and read
        if data.len() != SEED_SIZE {
            return Err(Error::SeedWrongSize {
                path: path.to_path_buf(),
                size: data.len() as u64,
            });
        }

        dbg_println!("seed '{}' loaded", path.display());

        Ok(SeedBuffer {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates (or truncates) `target` and writes the seed `cycles` times.
    /// A failed write leaves the partial file in place.
    pub fn write_to<P: AsRef<Path>>(&self, target: P, cycles: u64) -> Result<u64> {
        let target = target.as_ref();

        let mut file = File::create(target).map_err(|source| Error::TargetOpen {
            path: target.to_path_buf(),
            source,
        })?;

        let write_err = |source| Error::TargetWrite {
            path: target.to_path_buf(),
            source,
        };

        for _ in 0..cycles {
            file.write_all(&self.data).map_err(write_err)?;
        }
        file.sync_all().map_err(write_err)?;

        let written = cycles * SEED_SIZE as u64;
        dbg_println!(
            "'{}': {} cycles of '{}', {} bytes",
            target.display(),
            cycles,
            self.path().display(),
            written
        );

        Ok(written)
    }
}

/// Number of seed copies for `size_mb` megabytes.
pub fn cycles_for(size_mb: i64) -> Result<u64> {
    if size_mb < 1 {
        return Err(Error::InvalidSize(size_mb));
    }
    (size_mb as u64)
        .checked_mul(CYCLES_PER_MEGABYTE)
        .ok_or(Error::InvalidSize(size_mb))
}

/// Writes `size_mb` megabytes of repeated `seed_path` content to `path`.
/// Returns the number of bytes written.
pub fn write_seeded_file<P, S>(path: P, seed_path: S, size_mb: i64) -> Result<u64>
where
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    let cycles = cycles_for(size_mb)?;
    let seed = SeedBuffer::load(seed_path)?;
    seed.write_to(path, cycles)
}

#[cfg(test)]
mod tests {

    use super::*;

    fn make_seed(dir: &Path, name: &str, len: usize) -> PathBuf {
        let p = dir.join(name);
        let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        fs::write(&p, data).unwrap();
        p
    }

    #[test]
    fn one_megabyte_is_eight_seed_copies() {
        let dir = tempfile::tempdir().unwrap();
        let seed = make_seed(dir.path(), "seed.bin", SEED_SIZE);
        let out = dir.path().join("out.bin");

        let n = write_seeded_file(&out, &seed, 1).unwrap();
        assert_eq!(n, 1_048_576);

        let content = fs::read(&out).unwrap();
        let seed_data = fs::read(&seed).unwrap();
        assert_eq!(content.len(), 1_048_576);
        for chunk in content.chunks(SEED_SIZE) {
            assert_eq!(chunk, &seed_data[..]);
        }
    }

    #[test]
    fn zero_seed_two_megabytes() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.bin");
        fs::write(&seed, vec![0u8; SEED_SIZE]).unwrap();
        let out = dir.path().join("out.bin");

        write_seeded_file(&out, &seed, 2).unwrap();

        let content = fs::read(&out).unwrap();
        assert_eq!(content.len(), 2_097_152);
        assert!(content.iter().all(|b| *b == 0));
    }

    #[test]
    fn invalid_size_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let seed = make_seed(dir.path(), "seed.bin", SEED_SIZE);
        let out = dir.path().join("out.bin");

        for size in &[0, -1, -1024] {
            match write_seeded_file(&out, &seed, *size) {
                Err(Error::InvalidSize(s)) => assert_eq!(s, *size),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(!out.exists());
    }

    #[test]
    fn invalid_size_is_checked_before_seed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.bin");
        let out = dir.path().join("out.bin");

        assert!(matches!(
            write_seeded_file(&out, &missing, 0),
            Err(Error::InvalidSize(0))
        ));
    }

    #[test]
    fn missing_seed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.bin");
        let out = dir.path().join("out.bin");

        assert!(matches!(
            write_seeded_file(&out, &missing, 1),
            Err(Error::SeedMissing(_))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn wrong_seed_size_opens_no_target() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.bin");

        for len in &[0, SEED_SIZE - 1, SEED_SIZE + 1] {
            let seed = make_seed(dir.path(), "bad.bin", *len);
            match write_seeded_file(&out, &seed, 1) {
                Err(Error::SeedWrongSize { size, .. }) => assert_eq!(size, *len as u64),
                other => panic!("unexpected {:?}", other),
            }
            assert!(!out.exists());
        }
    }

    #[test]
    fn existing_target_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let seed = make_seed(dir.path(), "seed.bin", SEED_SIZE);
        let out = dir.path().join("out.bin");
        fs::write(&out, vec![7u8; 3 * MEGABYTE as usize]).unwrap();

        write_seeded_file(&out, &seed, 1).unwrap();
        assert_eq!(fs::metadata(&out).unwrap().len(), MEGABYTE);
    }

    #[test]
    fn unopenable_target() {
        let dir = tempfile::tempdir().unwrap();
        let seed = make_seed(dir.path(), "seed.bin", SEED_SIZE);
        let out = dir.path().join("no_such_dir").join("out.bin");

        assert!(matches!(
            write_seeded_file(&out, &seed, 1),
            Err(Error::TargetOpen { .. })
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn write_error_is_reported() {
        let full = Path::new("/dev/full");
        if fs::OpenOptions::new().write(true).open(full).is_err() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let seed = SeedBuffer::load(make_seed(dir.path(), "seed.bin", SEED_SIZE)).unwrap();

        assert!(matches!(
            seed.write_to(full, 1),
            Err(Error::TargetWrite { .. })
        ));
    }

    #[test]
    fn cycles() {
        assert_eq!(CYCLES_PER_MEGABYTE, 8);
        assert_eq!(cycles_for(1).unwrap(), 8);
        assert_eq!(cycles_for(3).unwrap(), 24);
        assert!(matches!(cycles_for(i64::MAX), Err(Error::InvalidSize(_))));
    }

    #[test]
    fn buffer_is_reusable() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = make_seed(dir.path(), "seed.bin", SEED_SIZE);
        let seed = SeedBuffer::load(&seed_path).unwrap();
        assert_eq!(seed.path(), seed_path.as_path());

        for name in &["a.bin", "b.bin"] {
            let out = dir.path().join(name);
            assert_eq!(seed.write_to(&out, 16).unwrap(), 2 * MEGABYTE);
            assert_eq!(fs::metadata(&out).unwrap().len(), 2 * MEGABYTE);
        }
    }
}
