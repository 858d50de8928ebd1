//! Optional local trace log of arbitration decisions for debugging hosts.

use crate::config::SessionConfig;
use anyhow::{Context, Result};
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_subscriber::fmt::time::UtcTime;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

#[must_use]
pub fn tracing_log_path() -> PathBuf {
    env::var("PROMPTSLOT_TRACE_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("promptslot_trace.jsonl"))
}

fn init_tracing_once(config: &SessionConfig, once: &OnceLock<()>) -> Result<()> {
    if !config.logging_enabled() || once.get().is_some() {
        return Ok(());
    }

    let path = tracing_log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open trace log {}", path.display()))?;
    let _ = once.get_or_init(|| {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(file)
            .with_current_span(false)
            .with_span_list(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
    Ok(())
}

/// Install the JSON trace subscriber once per process when logging is enabled.
/// Hosts that already own a global subscriber can skip this. Fails when the
/// trace log cannot be opened; a later call may retry.
pub fn init_tracing(config: &SessionConfig) -> Result<()> {
    init_tracing_once(config, &TRACING_INIT)
}
