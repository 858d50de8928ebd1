//! Single-slot status prompt arbitration for navigation-driven interfaces.
//!
//! At most one modal status prompt is active per session. Showing a prompt
//! succeeds only when none is active, hiding always succeeds, the active prompt
//! survives reloads through a session store, and every completed navigation
//! clears it.

pub mod arbiter;
pub mod config;
pub mod navigation;
pub mod prompt;
pub mod session;
pub mod slot;
pub mod store;
pub mod telemetry;

mod lock;

pub use arbiter::{PromptArbiter, ShowOutcome};
pub use config::SessionConfig;
pub use navigation::{
    navigation_queue, NavigationCompleted, NavigationEvents, NavigationQueue, NavigationReset,
};
pub use prompt::{ActionCallback, Prompt, PromptAction, PromptText, SlotValue};
pub use session::PromptSession;
pub use slot::PersistentSlot;
pub use store::{JsonFileStore, MemoryStore, SessionStore};
pub use telemetry::init_tracing;
