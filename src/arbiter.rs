//! Replace-or-suppress policy over the prompt slot.
//!
//! At most one status prompt is active. A request to show a prompt wins only
//! when the slot is empty; a request to hide always wins. Suppressed requests
//! are dropped, not queued, and are not errors.

use std::sync::Mutex;

use anyhow::Result;

use crate::lock::lock_or_recover;
use crate::prompt::{Prompt, SlotValue};
use crate::slot::PersistentSlot;

/// What happened to a `show_status` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    /// The slot now holds the requested value.
    Applied,
    /// Another prompt was already showing; the request was discarded.
    Suppressed,
}

impl ShowOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Single-writer arbiter for the session's status prompt.
#[derive(Debug)]
pub struct PromptArbiter {
    slot: Mutex<PersistentSlot>,
}

impl PromptArbiter {
    #[must_use]
    pub fn new(slot: PersistentSlot) -> Self {
        Self {
            slot: Mutex::new(slot),
        }
    }

    /// Current prompt to render, or `Empty`.
    #[must_use]
    pub fn get_status(&self) -> SlotValue {
        lock_or_recover(&self.slot, "prompt arbiter get_status").read()
    }

    #[must_use]
    pub fn is_showing(&self) -> bool {
        !lock_or_recover(&self.slot, "prompt arbiter is_showing")
            .peek()
            .is_empty()
    }

    /// Show or hide the status prompt.
    ///
    /// Applied when the slot is empty or `request` is `Empty`; otherwise the
    /// active prompt stays and the request is dropped, even if it carries the
    /// same content. Errors come only from the session store.
    pub fn show_status(&self, request: SlotValue) -> Result<ShowOutcome> {
        self.arbitrate(request, "request").map(|(outcome, _)| outcome)
    }

    /// `show_status(Empty)` on behalf of the router. Returns whether a prompt
    /// was showing when the reset ran.
    pub(crate) fn reset_for_navigation(&self) -> Result<bool> {
        self.arbitrate(SlotValue::Empty, "navigation")
            .map(|(_, replaced)| replaced)
    }

    fn arbitrate(&self, request: SlotValue, origin: &str) -> Result<(ShowOutcome, bool)> {
        // Held across read-check-write so concurrent callers cannot both see Empty.
        let mut slot = lock_or_recover(&self.slot, "prompt arbiter show_status");
        let current = slot.peek();
        let replaced = !current.is_empty();
        if current.is_empty() || request.is_empty() {
            tracing::debug!(
                origin,
                from = current.log_label(),
                to = request.log_label(),
                "status prompt applied"
            );
            slot.write(request)?;
            return Ok((ShowOutcome::Applied, replaced));
        }

        tracing::debug!(
            origin,
            active = current.log_label(),
            requested = request.log_label(),
            "status prompt suppressed"
        );
        Ok((ShowOutcome::Suppressed, false))
    }

    pub fn show(&self, prompt: Prompt) -> Result<ShowOutcome> {
        self.show_status(SlotValue::Prompt(prompt))
    }

    pub fn hide(&self) -> Result<ShowOutcome> {
        self.show_status(SlotValue::Empty)
    }

    pub(crate) fn end_session(&self) -> Result<()> {
        lock_or_recover(&self.slot, "prompt arbiter end_session").clear_store()
    }
}
