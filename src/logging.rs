//! Tracing subscriber setup.
//!
//! The interactive screen owns stdout and stderr, so while it runs events are
//! only recorded when a log file is given. In batch mode stderr already carries
//! the runner's notes, so events join them there only when `RUST_LOG` asks.

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "todo=info";

/// Where log events end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
    Off,
}

/// Pick the sink for a run.
///
/// A log file always wins. Without one, the screen logs nowhere and the other
/// commands log to stderr only when `RUST_LOG` is set.
pub fn choose_sink(log_file: Option<&Path>, interactive: bool, rust_log_set: bool) -> LogSink {
    match log_file {
        Some(path) => LogSink::File(path.to_path_buf()),
        None if interactive || !rust_log_set => LogSink::Off,
        None => LogSink::Stderr,
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Install the global subscriber for `sink`.
pub fn init(sink: &LogSink) -> std::io::Result<()> {
    match sink {
        LogSink::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        LogSink::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    fmt::layer()
                        .with_ansi(std::io::stderr().is_terminal())
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogSink::Off => {}
    }
    Ok(())
}
