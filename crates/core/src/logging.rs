use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default log directory for embedding tools: `~/.symscope/logs`.
pub fn default_log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".symscope/logs")
}

/// Install the global subscriber. Call once, early, and hold the returned
/// guard for the lifetime of the process so buffered log lines get flushed.
pub fn init_logging(log_dir: &Path, component: &str, to_stderr: bool) -> WorkerGuard {
    let _ = std::fs::create_dir_all(log_dir);

    // Roll daily, with the component name as the prefix
    // This will create files like search.log.2026-08-25
    let file_appender = tracing_appender::rolling::daily(log_dir, component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}
