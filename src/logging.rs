use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TRIAGETUI_LOG";

/// Send tracing output to a daily log file. The terminal belongs to the TUI,
/// so nothing is written to stdout/stderr.
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes pending lines.
pub fn init(log_level: Option<&str>) -> Option<WorkerGuard> {
    let logs_dir = logs_directory()?;
    if std::fs::create_dir_all(&logs_dir).is_err() {
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "triagetui.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true),
        );

    // Already set (e.g. by a test harness) is fine
    let _ = tracing::subscriber::set_global_default(subscriber);

    Some(guard)
}

/// `{data_dir}/triagetui/logs`
pub fn logs_directory() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("triagetui").join("logs"))
}

/// CLI flag wins over TRIAGETUI_LOG, which wins over "warn"
fn env_filter(log_level: Option<&str>) -> EnvFilter {
    if let Some(filter) = log_level.and_then(|level| EnvFilter::try_new(level).ok()) {
        return filter;
    }
    if let Some(filter) = std::env::var(LOG_ENV)
        .ok()
        .and_then(|level| EnvFilter::try_new(level).ok())
    {
        return filter;
    }
    EnvFilter::new("warn")
}
