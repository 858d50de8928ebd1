//! Session-scoped storage backends for the prompt slot.
//!
//! A store holds one opaque JSON document for the lifetime of a user session:
//! it survives reloads (a new [`crate::PersistentSlot`] opened over the same
//! store sees the last saved value) and is dropped when the session ends.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::lock::lock_or_recover;

/// Host-provided storage for one structured value per session.
pub trait SessionStore: Send + Sync {
    /// Last saved value, or `None` when nothing was saved this session.
    fn load(&self) -> Result<Option<Value>>;

    fn save(&self, value: &Value) -> Result<()>;

    /// Forget the stored value. Called when the session ends.
    fn clear(&self) -> Result<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn load(&self) -> Result<Option<Value>> {
        (**self).load()
    }

    fn save(&self, value: &Value) -> Result<()> {
        (**self).save(value)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// In-process store. Clones share one cell, so a clone handed to a fresh slot
/// behaves like a page reload within the same session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    cell: Arc<Mutex<Option<Value>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<Value>> {
        Ok(lock_or_recover(&self.cell, "memory store load").clone())
    }

    fn save(&self, value: &Value) -> Result<()> {
        *lock_or_recover(&self.cell, "memory store save") = Some(value.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *lock_or_recover(&self.cell, "memory store clear") = None;
        Ok(())
    }
}

/// One JSON document per session on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `session_id` under `session_dir` (`<dir>/<id>.json`).
    #[must_use]
    pub fn for_session(session_dir: &Path, session_id: &str) -> Self {
        Self::new(session_dir.join(format!("{session_id}.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fresh sibling of the live file for each call: `<name>.<pid>.<seq>.tmp`.
    /// Writers in other processes or threads never share one.
    fn staging_path(&self) -> PathBuf {
        static SEQ: AtomicU64 = AtomicU64::new(0);
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        name.push(format!(".{}.{seq}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> Result<Option<Value>> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("read session store {}", self.path.display()))
            }
        };
        if body.trim().is_empty() {
            return Ok(None);
        }
        let value = serde_json::from_str(&body)
            .with_context(|| format!("parse session store {}", self.path.display()))?;
        Ok(Some(value))
    }

    fn save(&self, value: &Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create session dir {}", parent.display()))?;
        }
        let body = serde_json::to_vec(value).context("encode session store value")?;
        // Rename over the live file so a concurrent reload never reads half a document.
        let staging = self.staging_path();
        if let Err(err) = fs::write(&staging, body) {
            let _ = fs::remove_file(&staging);
            return Err(err)
                .with_context(|| format!("write session store {}", staging.display()));
        }
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err)
                .with_context(|| format!("replace session store {}", self.path.display()));
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("remove session store {}", self.path.display()))
            }
        }
    }
}
