//
// ValidatingConfig -> ResolvingTargets -> WritingFiles -> Done
//        \                   \                  \
//         `-------------------`------------------`--> Failed
//
// Nothing touches the disk before validation passes.
// The first failing target stops the run; files already written stay.
//

use std::convert::TryFrom;
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::fill::write_fill_file;
use crate::core::names::generate_names;
use crate::core::seed::{cycles_for, SeedBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    ValidatingConfig,
    ResolvingTargets,
    WritingFiles,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentMode {
    Seeded { seed: PathBuf, size_mb: i64 },
    FixedFill,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetSpec {
    pub path: PathBuf,
    pub mode: ContentMode,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunReport {
    pub files: Vec<PathBuf>,
    pub bytes_written: u64,
}

/// Checks option combinations, in the order the messages are reported.
pub fn validate(config: &Config) -> Result<ContentMode> {
    if config.file.is_some() && config.count.is_some() {
        return Err(Error::config(
            "a file name cannot be specified together with the count option",
        ));
    }

    if !config.batch_mode() && (config.prefix.is_some() || config.suffix.is_some()) {
        return Err(Error::config(
            "prefix and suffix can only be used with the count option",
        ));
    }

    if let Some(count) = config.count {
        if count < 1 {
            return Err(Error::config(format!(
                "count must be larger than 0 (got {})",
                count
            )));
        }
    }

    if config.kilobyte {
        if config.seed.is_some() {
            return Err(Error::config(
                "the seed cannot be specified along with the 1KB option",
            ));
        }
        if config.size != 0 {
            return Err(Error::config(
                "the size cannot be specified along with the 1KB option",
            ));
        }
        return Ok(ContentMode::FixedFill);
    }

    let seed = match &config.seed {
        Some(seed) => seed.clone(),
        None => return Err(Error::config("no seed file specified")),
    };

    if config.size == 0 {
        return Err(Error::config("size not specified or size set to zero"));
    }

    Ok(ContentMode::Seeded {
        seed,
        size_mb: config.size,
    })
}

/// Explicit file, `count` random names, or a single random name.
pub fn resolve_targets(config: &Config, mode: &ContentMode) -> Result<Vec<TargetSpec>> {
    let paths: Vec<PathBuf> = match (&config.file, config.count) {
        (Some(file), None) => vec![PathBuf::from(file)],
        (None, Some(count)) => {
            let count = usize::try_from(count)
                .map_err(|_| Error::config(format!("count out of range: {}", count)))?;
            let prefix = config.prefix.as_deref().unwrap_or("");
            let suffix = config.suffix.as_deref().unwrap_or("");
            generate_names(prefix, suffix, count)?
                .into_iter()
                .map(PathBuf::from)
                .collect()
        }
        (None, None) => generate_names("", "", 1)?
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        (Some(_), Some(_)) => {
            return Err(Error::config(
                "a file name cannot be specified together with the count option",
            ))
        }
    };

    Ok(paths
        .into_iter()
        .map(|path| TargetSpec {
            path,
            mode: mode.clone(),
        })
        .collect())
}

pub struct Orchestrator<'a> {
    config: &'a Config,
    state: RunState,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Orchestrator {
            config,
            state: RunState::ValidatingConfig,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn set_state(&mut self, state: RunState) {
        dbg_println!("orchestrator: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn run(&mut self) -> Result<RunReport> {
        let res = self.run_steps();
        match &res {
            Ok(report) => {
                dbg_println!(
                    "run done: {} file(s), {} bytes",
                    report.files.len(),
                    report.bytes_written
                );
                self.set_state(RunState::Done);
            }
            Err(e) => {
                dbg_println!("run failed: {}", e);
                self.set_state(RunState::Failed);
            }
        }
        res
    }

    fn run_steps(&mut self) -> Result<RunReport> {
        dbg_println!("config = {:?}", self.config);
        let mode = validate(self.config)?;

        self.set_state(RunState::ResolvingTargets);
        let targets = resolve_targets(self.config, &mode)?;
        for t in &targets {
            dbg_println!("target '{}'", t.path.display());
        }

        self.set_state(RunState::WritingFiles);
        let mut report = RunReport::default();
        trace_block!("write files", {
            self.write_files(&mode, &targets, &mut report)?;
        });
        Ok(report)
    }

    fn write_files(
        &self,
        mode: &ContentMode,
        targets: &[TargetSpec],
        report: &mut RunReport,
    ) -> Result<()> {
        match mode {
            ContentMode::FixedFill => {
                for t in targets {
                    report.bytes_written += write_fill_file(&t.path)?;
                    report.files.push(t.path.clone());
                }
            }
            ContentMode::Seeded { seed, size_mb } => {
                let cycles = cycles_for(*size_mb)?;
                let seed = SeedBuffer::load(seed)?;
                dbg_println!("{} cycles of '{}' per file", cycles, seed.path().display());
                for t in targets {
                    report.bytes_written += seed.write_to(&t.path, cycles)?;
                    report.files.push(t.path.clone());
                }
            }
        }
        Ok(())
    }
}

/// Runs a whole invocation for `config`.
pub fn run(config: &Config) -> Result<RunReport> {
    Orchestrator::new(config).run()
}
