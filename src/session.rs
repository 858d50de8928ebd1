//! Session-lifetime wiring of store, arbiter, and navigation reset.
//!
//! A [`PromptSession`] is built when the user session starts and consumed by
//! [`PromptSession::end`] when it finishes. Dropping it without `end` is a
//! reload: the persisted prompt is restored by the next `start` over the same
//! store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::arbiter::PromptArbiter;
use crate::config::SessionConfig;
use crate::navigation::NavigationReset;
use crate::slot::PersistentSlot;
use crate::store::{JsonFileStore, SessionStore};

#[derive(Debug)]
pub struct PromptSession {
    arbiter: Arc<PromptArbiter>,
    session_id: Option<String>,
    store_path: Option<PathBuf>,
}

impl PromptSession {
    /// Open the slot over `store` and register the navigation handler. The
    /// returned reset belongs to the router.
    pub fn start(store: impl SessionStore + 'static) -> Result<(Self, NavigationReset)> {
        let slot = PersistentSlot::open(store)?;
        let arbiter = Arc::new(PromptArbiter::new(slot));
        let reset = NavigationReset::new(&arbiter);
        tracing::info!(showing = arbiter.is_showing(), "prompt session started");
        let session = Self {
            arbiter,
            session_id: None,
            store_path: None,
        };
        Ok((session, reset))
    }

    /// Start over the configured session's JSON file.
    pub fn from_config(config: &SessionConfig) -> Result<(Self, NavigationReset)> {
        let session_id = config.session_id();
        let store = JsonFileStore::for_session(&config.session_dir(), &session_id);
        let store_path = store.path().to_path_buf();
        tracing::debug!(
            session_id = %session_id,
            path = %store_path.display(),
            "prompt session store"
        );
        let (mut session, reset) =
            Self::start(store).with_context(|| format!("start prompt session {session_id}"))?;
        session.session_id = Some(session_id);
        session.store_path = Some(store_path);
        Ok((session, reset))
    }

    /// Shared handle for callers that show/hide prompts and for the renderer.
    #[must_use]
    pub fn arbiter(&self) -> Arc<PromptArbiter> {
        Arc::clone(&self.arbiter)
    }

    /// Id to pass back on reload. Set only for sessions built by
    /// [`Self::from_config`].
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    #[must_use]
    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    /// End the session: the persisted prompt is discarded.
    pub fn end(self) -> Result<()> {
        self.arbiter.end_session()?;
        tracing::info!(session_id = self.session_id.as_deref(), "prompt session ended");
        Ok(())
    }
}
