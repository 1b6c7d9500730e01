use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_PREFIX: &str = "launcher.log";

fn global_filter(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    Targets::new()
        .with_default(LevelFilter::WARN)
        .with_target("wm_", level)
}

/// Logs to stderr and to a daily rolling file in `log_dir`. Keep the returned
/// guard alive until exit or buffered file output is lost.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .with(global_filter(cfg!(debug_assertions)))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_filter_levels() {
        let quiet = global_filter(false);
        assert!(quiet.would_enable("wm_patch::applier", &Level::INFO));
        assert!(!quiet.would_enable("wm_patch::applier", &Level::DEBUG));
        assert!(!quiet.would_enable("hyper::client", &Level::INFO));
        assert!(quiet.would_enable("hyper::client", &Level::WARN));

        let verbose = global_filter(true);
        assert!(verbose.would_enable("wm_updater::registry", &Level::DEBUG));
    }
}
