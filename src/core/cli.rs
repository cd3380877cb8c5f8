// ext
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use std::path::PathBuf;

// crate
use crate::core::config::Config;
use crate::core::VERSION;

pub const USAGE_HINT: &str = "try 'filebucket --help' for the option rules";

pub const EXIT_CODES_NOTE: &str = "Exit status: 0 on success, 1 on an invalid option \
combination or a failed write, 2 when the argument parser rejects a value (e.g. --count abc).";

pub fn build_command() -> Command<'static> {
    Command::new("filebucket")
        .version(VERSION)
        .author("Ryan Gard <ryan.a.gard@outlook.com>")
        .about("create files on demand from a 128KB seed file, or 1KB filler files")
        .after_help(EXIT_CODES_NOTE)
        .arg(
            Arg::new("SEED")
                .short('d')
                .long("seed")
                .value_name("SEED")
                .action(ArgAction::Set)
                .help("the seed file from which the target file is created (required)"),
        )
        .arg(
            Arg::new("SIZE")
                .short('s')
                .long("size")
                .value_name("SIZE")
                .action(ArgAction::Set)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(i64))
                .help("the size of the target file in megabytes (required)"),
        )
        .arg(
            Arg::new("FILE")
                .short('f')
                .long("file")
                .value_name("FILE")
                .action(ArgAction::Set)
                .help("the target file path and name (only when NOT using the count option)"),
        )
        .arg(
            Arg::new("PREFIX")
                .short('p')
                .long("prefix")
                .value_name("PREFIX")
                .action(ArgAction::Set)
                .help("prefix of the random file names, may include a path (count option only)"),
        )
        .arg(
            Arg::new("SUFFIX")
                .short('u')
                .long("suffix")
                .value_name("SUFFIX")
                .action(ArgAction::Set)
                .help("suffix of the random file names (count option only)"),
        )
        .arg(
            Arg::new("COUNT")
                .short('c')
                .long("count")
                .value_name("COUNT")
                .action(ArgAction::Set)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(i64))
                .help("the number of files to write"),
        )
        .arg(
            Arg::new("KILOBYTE")
                .short('k')
                .long("kilobyte")
                .action(ArgAction::SetTrue)
                .help("create 1KB files (cannot be used with the --size or --seed options)"),
        )
        .arg(
            Arg::new("VERBOSE")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("print the name of each created file"),
        )
        .arg(
            Arg::new("DEBUG")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("enable debug logs (see --log-file)"),
        )
        .arg(
            Arg::new("LOG_FILENAME")
                .value_name("LOG_FILENAME")
                .long("log-file")
                .action(ArgAction::Set)
                .help("debug log file name (default <tmp>/filebucket.log)"),
        )
}

fn non_empty(matches: &ArgMatches, id: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .filter(|s| !s.is_empty())
        .cloned()
}

fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches.get_one::<bool>(id).copied().unwrap_or(false)
}

pub fn config_from_matches(matches: &ArgMatches) -> Config {
    Config {
        seed: non_empty(matches, "SEED").map(PathBuf::from),
        size: matches.get_one::<i64>("SIZE").copied().unwrap_or(0),
        file: non_empty(matches, "FILE"),
        prefix: non_empty(matches, "PREFIX"),
        suffix: non_empty(matches, "SUFFIX"),
        count: matches.get_one::<i64>("COUNT").copied(),
        kilobyte: flag(matches, "KILOBYTE"),
        verbose: flag(matches, "VERBOSE"),
    }
}

/// Debug log settings, applied once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub debug: bool,
    pub log_filename: Option<String>,
}

pub fn log_settings_from_matches(matches: &ArgMatches) -> LogSettings {
    LogSettings {
        debug: flag(matches, "DEBUG"),
        log_filename: non_empty(matches, "LOG_FILENAME"),
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn parse(args: &[&str]) -> Config {
        let matches = build_command()
            .try_get_matches_from(args.iter().copied())
            .unwrap();
        config_from_matches(&matches)
    }

    #[test]
    fn short_options() {
        let config = parse(&[
            "filebucket", "-d", "seed.bin", "-s", "3", "-c", "2", "-p", "t_", "-u", ".x",
        ]);
        assert_eq!(
            config,
            Config {
                seed: Some(PathBuf::from("seed.bin")),
                size: 3,
                count: Some(2),
                prefix: Some("t_".into()),
                suffix: Some(".x".into()),
                ..Config::default()
            }
        );
    }

    #[test]
    fn long_options() {
        let config = parse(&["filebucket", "--kilobyte", "--file", "out.bin", "--verbose"]);
        assert!(config.kilobyte);
        assert!(config.verbose);
        assert_eq!(config.file.as_deref(), Some("out.bin"));
        assert_eq!(config.size, 0);
        assert!(config.count.is_none());
        assert!(!config.batch_mode());
    }

    #[test]
    fn negative_values_reach_validation() {
        let config = parse(&["filebucket", "--size", "-1", "--count", "-2"]);
        assert_eq!(config.size, -1);
        assert_eq!(config.count, Some(-2));
    }

    #[test]
    fn empty_strings_are_not_given() {
        let config = parse(&["filebucket", "--file", "", "--seed", "", "--prefix", ""]);
        assert!(config.file.is_none());
        assert!(config.seed.is_none());
        assert!(config.prefix.is_none());
    }

    #[test]
    fn non_numeric_size_is_rejected() {
        assert!(build_command()
            .try_get_matches_from(vec!["filebucket", "--size", "big"])
            .is_err());
    }

    #[test]
    fn bad_value_is_a_parser_error() {
        let err = build_command()
            .try_get_matches_from(vec!["filebucket", "--count", "abc"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::ErrorKind::ValueValidation);
    }

    #[test]
    fn help_documents_exit_codes() {
        let mut help = Vec::new();
        build_command().write_help(&mut help).unwrap();
        let help = String::from_utf8(help).unwrap();
        assert!(help.contains("Exit status"));
    }

    #[test]
    fn log_settings() {
        let matches = build_command()
            .try_get_matches_from(vec!["filebucket", "--debug", "--log-file", "/tmp/x.log"])
            .unwrap();
        assert_eq!(
            log_settings_from_matches(&matches),
            LogSettings {
                debug: true,
                log_filename: Some("/tmp/x.log".into()),
            }
        );
    }
}
