//! Logging setup
//!
//! Terminal front-ends own the screen, so the GUI and TUI log to a file. The `list`
//! command logs to stderr, as do the others when their log file cannot be opened.
//! `RUST_LOG` directives take precedence over the `-q`/`-v` level.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// How much to log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "dogtable=error",
            Verbosity::Normal => "dogtable=info",
            Verbosity::Verbose => "dogtable=debug",
        }
    }
}

/// Default log file for interactive modes
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("dogtable.log")
}

/// Verbosity sets the baseline; `RUST_LOG` directives are applied after it, so a
/// `dogtable=trace` there overrides `-q` or `-v`.
fn build_filter(verbosity: Verbosity, env: Option<&str>) -> EnvFilter {
    let mut directives = verbosity.directive().to_string();
    if let Some(extra) = env.filter(|e| !e.trim().is_empty()) {
        directives.push(',');
        directives.push_str(extra);
    }
    EnvFilter::builder().parse_lossy(directives)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Start fresh each run
        .open(path)
}

/// Initialize the global subscriber. Calling it twice is harmless.
///
/// An unwritable log file is not fatal: logging falls back to stderr.
pub fn init(target: LogTarget, verbosity: Verbosity) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(verbosity, env.as_deref());

    let mut fallback = None;
    let (writer, ansi) = match target {
        LogTarget::Stderr => (BoxMakeWriter::new(io::stderr), true),
        LogTarget::File(path) => match open_log_file(&path) {
            Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
            Err(e) => {
                fallback = Some((path, e));
                (BoxMakeWriter::new(io::stderr), true)
            }
        },
    };

    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .with(filter)
        .try_init()
        .is_ok();
    if !installed {
        // A subscriber set earlier (tests, embedding) wins.
        debug!("global subscriber already set; keeping it");
    }

    if let Some((path, e)) = fallback {
        warn!(path = %path.display(), error = %e, "cannot open log file; logging to stderr");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_verbosity() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
    }

    #[test]
    fn directives_parse() {
        for v in [Verbosity::Quiet, Verbosity::Normal, Verbosity::Verbose] {
            assert!(v
                .directive()
                .parse::<tracing_subscriber::filter::Directive>()
                .is_ok());
        }
    }

    #[test]
    fn env_directives_override_verbosity() {
        let filter = build_filter(Verbosity::Normal, Some("dogtable=trace")).to_string();
        assert!(filter.contains("dogtable=trace"), "{}", filter);
        assert!(!filter.contains("dogtable=info"), "{}", filter);
    }

    #[test]
    fn env_directives_for_other_targets_are_kept() {
        let filter = build_filter(Verbosity::Quiet, Some("reqwest=debug")).to_string();
        assert!(filter.contains("reqwest=debug"), "{}", filter);
        assert!(filter.contains("dogtable=error"), "{}", filter);
    }

    #[test]
    fn blank_env_leaves_verbosity_alone() {
        let filter = build_filter(Verbosity::Verbose, Some("  ")).to_string();
        assert!(filter.contains("dogtable=debug"), "{}", filter);
        assert!(!filter.contains(','), "{}", filter);
    }

    #[test]
    fn unopenable_log_file_is_an_error_not_a_panic() {
        // A directory cannot be opened for writing.
        assert!(open_log_file(&std::env::temp_dir()).is_err());
    }

    #[test]
    fn init_with_unopenable_file_falls_back() {
        init(LogTarget::File(std::env::temp_dir()), Verbosity::Quiet);
        init(LogTarget::Stderr, Verbosity::Quiet);
    }
}
