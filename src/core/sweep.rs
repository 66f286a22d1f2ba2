//! Purpose: Sequential sweep over sibling `lint-*` executables.
//! Exports: `LinterHost`, `ExecutableHost`, `SweepOutcome`, `run_sweep`.
//! Role: Discovery, sequential launch, and aggregate exit-code folding.
//! Invariants: The runner never launches itself; identity is compared on
//! canonical (symlink-resolved) paths.
//! Invariants: A sweep finishes even when children fail; the aggregate is
//! the bitwise OR of every child exit code.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::Instant;

use tracing::{debug, warn};

use crate::core::error::{Error, ErrorKind};

pub const LINTER_PREFIX: &str = "lint-";
/// Synthetic code folded in when a linter cannot be started.
pub const LAUNCH_FAILURE_CODE: i32 = 127;
/// Synthetic code folded in when a child dies without an exit code.
pub const SIGNAL_EXIT_CODE: i32 = 128;

/// Host capabilities the sweep needs: enumerate executable siblings and
/// launch one child at a time with inherited streams.
pub trait LinterHost {
    /// Executable `lint-*` siblings, the runner itself excluded, sorted by
    /// file name.
    fn discover(&self) -> Result<Vec<PathBuf>, Error>;

    /// Launch one linter with no arguments and wait for its exit code.
    /// An `Err` means the child never started.
    fn launch(&mut self, linter: &Path) -> Result<i32, Error>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SweepOutcome {
    pub linters: usize,
    pub aggregate: i32,
}

/// Run every discovered linter in order, printing one diagnostic line per
/// failure and a trailing count/elapsed summary to `out`.
pub fn run_sweep(host: &mut dyn LinterHost, out: &mut dyn Write) -> Result<SweepOutcome, Error> {
    let started = Instant::now();
    let linters = host.discover()?;
    let mut aggregate = 0i32;

    for linter in &linters {
        let name = linter_name(linter);
        debug!(linter = %name, "launching linter");
        let code = match host.launch(linter) {
            Ok(code) => code,
            Err(err) => {
                warn!(linter = %name, error = %err, "linter failed to launch");
                LAUNCH_FAILURE_CODE
            }
        };
        if code != 0 {
            write_line(out, &format!("{name} exited with code {code}"))?;
            aggregate |= code;
        }
    }

    let elapsed = format_seconds(started.elapsed().as_secs_f64());
    write_line(out, &format!("{} linters in {elapsed}s", linters.len()))?;
    Ok(SweepOutcome {
        linters: linters.len(),
        aggregate,
    })
}

/// Discovery and launch backed by the real filesystem and process table.
pub struct ExecutableHost {
    dir: PathBuf,
    self_path: PathBuf,
}

impl ExecutableHost {
    /// Resolve the running executable (symlinks followed) and its directory.
    pub fn for_current_exe() -> Result<Self, Error> {
        let exe = env::current_exe().map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("cannot resolve the running executable")
                .with_source(err)
        })?;
        let self_path = fs::canonicalize(&exe).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("cannot canonicalize the running executable")
                .with_path(&exe)
                .with_source(err)
        })?;
        let dir = self_path
            .parent()
            .ok_or_else(|| {
                Error::new(ErrorKind::Internal)
                    .with_message("executable path has no parent directory")
                    .with_path(&self_path)
            })?
            .to_path_buf();
        Ok(Self { dir, self_path })
    }
}

impl LinterHost for ExecutableHost {
    fn discover(&self) -> Result<Vec<PathBuf>, Error> {
        let entries = fs::read_dir(&self.dir).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("cannot list the runner directory")
                .with_path(&self.dir)
                .with_source(err)
        })?;

        let mut linters = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("cannot read a runner directory entry")
                    .with_path(&self.dir)
                    .with_source(err)
            })?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !name.starts_with(LINTER_PREFIX) || !is_executable(&path) {
                continue;
            }
            match fs::canonicalize(&path) {
                Ok(canonical) if canonical == self.self_path => continue,
                Ok(_) => {}
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unresolvable entry");
                    continue;
                }
            }
            linters.push(path);
        }

        linters.sort();
        Ok(linters)
    }

    fn launch(&mut self, linter: &Path) -> Result<i32, Error> {
        // Inherited stdin/stdout/stderr; child output interleaves with ours.
        let status = Command::new(linter).status().map_err(|err| {
            Error::new(ErrorKind::Launch)
                .with_message("failed to spawn linter")
                .with_path(linter)
                .with_source(err)
        })?;
        Ok(exit_code(status))
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(SIGNAL_EXIT_CODE)
}

fn linter_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

fn write_line(out: &mut dyn Write, line: &str) -> Result<(), Error> {
    writeln!(out, "{line}").map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write sweep output")
            .with_source(err)
    })
}

/// Elapsed seconds to two significant figures.
fn format_seconds(seconds: f64) -> String {
    if seconds <= 0.0 {
        return "0.0".to_string();
    }
    let precision = (1.0 - seconds.log10().floor()).clamp(0.0, 6.0) as usize;
    format!("{seconds:.precision$}")
}
