//! Session configuration so hosts can expose prompt-slot settings on their own CLI.

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{ArgAction, Args};

const SESSION_SUBDIR: &str = "promptslot/sessions";

/// Prompt-slot settings. Flatten into a host `clap::Parser` with
/// `#[command(flatten)]`.
#[derive(Debug, Clone, Default, Args)]
pub struct SessionConfig {
    /// Directory holding one JSON file per session
    #[arg(long = "prompt-session-dir", env = "PROMPTSLOT_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// Session identifier; reuse it across reloads to restore the active prompt
    #[arg(long = "prompt-session-id", env = "PROMPTSLOT_SESSION_ID")]
    pub session_id: Option<String>,

    /// Write a JSON trace log of arbitration decisions
    #[arg(long = "logs", action = ArgAction::SetTrue)]
    pub logs: bool,

    /// Disable the trace log even when --logs is set
    #[arg(long = "no-logs", action = ArgAction::SetTrue)]
    pub no_logs: bool,
}

impl SessionConfig {
    /// Configured directory, else the per-user runtime dir, else cache dir,
    /// else the system temp dir.
    #[must_use]
    pub fn session_dir(&self) -> PathBuf {
        if let Some(dir) = &self.session_dir {
            return dir.clone();
        }
        dirs::runtime_dir()
            .or_else(dirs::cache_dir)
            .unwrap_or_else(env::temp_dir)
            .join(SESSION_SUBDIR)
    }

    /// Configured id (sanitized for use as a file stem), else one derived from
    /// the process id and start time. The generated id is fixed for the life
    /// of the process, so repeated calls and restarted sessions agree on it.
    #[must_use]
    pub fn session_id(&self) -> String {
        match self.session_id.as_deref().map(sanitize_session_id) {
            Some(id) if !id.is_empty() => id,
            _ => generated_session_id().to_string(),
        }
    }

    /// JSON file backing [`Self::session_id`] under [`Self::session_dir`].
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.session_dir().join(format!("{}.json", self.session_id()))
    }

    #[must_use]
    pub fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}

fn sanitize_session_id(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
        .collect()
}

fn generated_session_id() -> &'static str {
    static GENERATED: OnceLock<String> = OnceLock::new();
    GENERATED.get_or_init(|| {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        format!("{:x}-{millis:x}", std::process::id())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct HostCli {
        #[command(flatten)]
        prompt: SessionConfig,
    }

    fn parse(args: &[&str]) -> SessionConfig {
        let argv = std::iter::once("host").chain(args.iter().copied());
        HostCli::parse_from(argv).prompt
    }

    #[test]
    fn flags_flatten_into_host_cli() {
        let config = parse(&[
            "--prompt-session-dir",
            "/tmp/prompt-sessions",
            "--prompt-session-id",
            "tab-1",
            "--logs",
        ]);
        assert_eq!(config.session_dir(), PathBuf::from("/tmp/prompt-sessions"));
        assert_eq!(config.session_id(), "tab-1");
        assert_eq!(
            config.session_file(),
            PathBuf::from("/tmp/prompt-sessions/tab-1.json")
        );
        assert!(config.logging_enabled());
    }

    #[test]
    fn no_logs_wins_over_logs() {
        let config = parse(&["--logs", "--no-logs"]);
        assert!(!config.logging_enabled());
        assert!(!SessionConfig::default().logging_enabled());
    }

    #[test]
    fn session_id_is_sanitized_for_file_names() {
        let config = SessionConfig {
            session_id: Some(" ../tab 7/".to_string()),
            ..SessionConfig::default()
        };
        assert_eq!(config.session_id(), "tab7");
    }

    #[test]
    fn unusable_session_id_falls_back_to_generated() {
        let config = SessionConfig {
            session_id: Some("../..".to_string()),
            ..SessionConfig::default()
        };
        let id = config.session_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|ch| ch.is_ascii_hexdigit() || ch == '-'));
    }

    #[test]
    fn generated_session_id_is_stable_across_calls_and_configs() {
        let config = SessionConfig::default();
        let first = config.session_id();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(config.session_id(), first);
        assert_eq!(SessionConfig::default().session_id(), first);
        assert_eq!(
            config.session_file(),
            config.session_dir().join(format!("{first}.json"))
        );
    }

    #[test]
    fn default_session_dir_ends_with_subdir() {
        let config = SessionConfig::default();
        assert!(config.session_dir().ends_with(SESSION_SUBDIR));
    }
}
