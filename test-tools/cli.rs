use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const SEED_SIZE: usize = 128 * 1024;

fn filebucket(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_filebucket"))
        .args(args)
        .current_dir(dir)
        .env_remove("FILEBUCKET_DEBUG")
        .output()
        .expect("failed to run filebucket")
}

fn entries(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}

#[test]
fn seeded_file_two_megabytes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("seed.bin"), vec![0u8; SEED_SIZE]).unwrap();

    let out = filebucket(
        dir.path(),
        &["--seed", "seed.bin", "--size", "2", "--file", "out.bin"],
    );
    assert_eq!(out.status.code(), Some(0));

    let content = fs::read(dir.path().join("out.bin")).unwrap();
    assert_eq!(content.len(), 2_097_152);
    assert!(content.iter().all(|b| *b == 0));
}

#[test]
fn kilobyte_batch_with_prefix() {
    let dir = tempfile::tempdir().unwrap();

    let out = filebucket(dir.path(), &["--kilobyte", "--count", "3", "--prefix", "t_"]);
    assert_eq!(out.status.code(), Some(0));

    let names = entries(dir.path());
    assert_eq!(names.len(), 3);
    for n in &names {
        assert!(n.starts_with("t_"));
        assert_eq!(n.len(), 2 + 15);
        let content = fs::read(dir.path().join(n)).unwrap();
        assert_eq!(content.len(), 1024);
        assert!(content.iter().all(|b| *b == 0xff));
    }
}

#[test]
fn file_with_count_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();

    let out = filebucket(dir.path(), &["-k", "--file", "out.bin", "--count", "2"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("Error: "));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn missing_seed_and_size() {
    let dir = tempfile::tempdir().unwrap();

    let out = filebucket(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn wrong_seed_size_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("seed.bin"), vec![1u8; 1000]).unwrap();

    let out = filebucket(dir.path(), &["-d", "seed.bin", "-s", "1", "-f", "out.bin"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("out.bin").exists());
}

#[test]
fn zero_count_fails() {
    let dir = tempfile::tempdir().unwrap();

    let out = filebucket(dir.path(), &["-k", "-c", "0"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn random_name_when_no_file_given() {
    let dir = tempfile::tempdir().unwrap();

    let out = filebucket(dir.path(), &["-k", "-v"]);
    assert_eq!(out.status.code(), Some(0));

    let names = entries(dir.path());
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].len(), 15);
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), names[0]);
}

#[test]
fn config_error_prints_usage_hint() {
    let dir = tempfile::tempdir().unwrap();

    let out = filebucket(dir.path(), &["-k", "-p", "t_"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("Error: "));
    assert!(stderr.contains("--help"));
}

#[test]
fn unparsable_value_exits_with_parser_code() {
    let dir = tempfile::tempdir().unwrap();

    let out = filebucket(dir.path(), &["-k", "--count", "abc"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(entries(dir.path()).is_empty());
}
