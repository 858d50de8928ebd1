//! Persistent single-value cell holding the current slot value.

use anyhow::{Context, Result};

use crate::prompt::SlotValue;
use crate::store::SessionStore;

/// Session-persisted slot with an in-memory live copy.
///
/// The live copy keeps action callbacks for the current page load; the store
/// only ever sees the serializable part of the value.
pub struct PersistentSlot {
    store: Box<dyn SessionStore>,
    live: SlotValue,
}

impl PersistentSlot {
    /// Open the slot, restoring whatever an earlier load in this session saved.
    pub fn open(store: impl SessionStore + 'static) -> Result<Self> {
        let store: Box<dyn SessionStore> = Box::new(store);
        let live = match store.load().context("load prompt slot")? {
            None => SlotValue::Empty,
            Some(raw) => match serde_json::from_value(raw) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(error = %err, "discarding undecodable prompt slot value");
                    SlotValue::Empty
                }
            },
        };
        tracing::debug!(restored = live.log_label(), "prompt slot opened");
        Ok(Self { store, live })
    }

    #[must_use]
    pub fn read(&self) -> SlotValue {
        self.live.clone()
    }

    pub(crate) fn peek(&self) -> &SlotValue {
        &self.live
    }

    /// Persist `value`, then make it the live value. On failure the live value
    /// is left as it was.
    pub fn write(&mut self, value: SlotValue) -> Result<()> {
        let raw = serde_json::to_value(&value).context("encode prompt slot value")?;
        self.store.save(&raw).context("save prompt slot")?;
        self.live = value;
        Ok(())
    }

    /// Drop the persisted value for good (session end).
    pub(crate) fn clear_store(&mut self) -> Result<()> {
        self.store.clear().context("clear prompt slot")?;
        self.live = SlotValue::Empty;
        Ok(())
    }
}

impl std::fmt::Debug for PersistentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentSlot")
            .field("live", &self.live)
            .finish_non_exhaustive()
    }
}
