//! Status prompt payloads and the two-state slot value they occupy.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Title or body text: either shown as-is or resolved later by the renderer's
/// translation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptText {
    Literal(String),
    Translatable {
        key: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        variables: BTreeMap<String, serde_json::Value>,
    },
}

impl PromptText {
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self::Translatable {
            key: key.into(),
            variables: BTreeMap::new(),
        }
    }

    /// Attach one translation parameter. Literal text is returned unchanged.
    #[must_use]
    pub fn with_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        if let Self::Translatable { variables, .. } = &mut self {
            variables.insert(name.into(), value.into());
        }
        self
    }

    /// Short label for log lines; never includes translation parameters.
    #[must_use]
    pub fn log_label(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Translatable { key, .. } => key,
        }
    }
}

impl From<&str> for PromptText {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for PromptText {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

/// Zero-argument procedure run when the user picks an action.
///
/// Equality is identity: two callbacks match only when they share one
/// allocation.
#[derive(Clone)]
pub struct ActionCallback(Arc<dyn Fn() + Send + Sync>);

impl ActionCallback {
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for ActionCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActionCallback({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

impl PartialEq for ActionCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// One button on a prompt. Callbacks live only in process memory and are
/// never written to the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptAction {
    pub name: String,
    #[serde(skip)]
    pub callback: Option<ActionCallback>,
}

impl PromptAction {
    #[must_use]
    pub fn new(name: impl Into<String>, callback: ActionCallback) -> Self {
        Self {
            name: name.into(),
            callback: Some(callback),
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callback: None,
        }
    }
}

/// A modal interruption. Content is carried uninspected; an empty title or
/// text is the renderer's problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub title: PromptText,
    pub text: PromptText,
    #[serde(default)]
    pub actions: Vec<PromptAction>,
}

impl Prompt {
    #[must_use]
    pub fn new(title: impl Into<PromptText>, text: impl Into<PromptText>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_action(mut self, name: impl Into<String>, callback: ActionCallback) -> Self {
        self.actions.push(PromptAction::new(name, callback));
        self
    }

    #[must_use]
    pub fn with_named_action(mut self, name: impl Into<String>) -> Self {
        self.actions.push(PromptAction::named(name));
        self
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&PromptAction> {
        self.actions.iter().find(|action| action.name == name)
    }

    /// Run the first action called `name`. Returns `false` when no such action
    /// exists or its callback was lost to a reload.
    pub fn trigger(&self, name: &str) -> bool {
        match self.action(name).and_then(|action| action.callback.as_ref()) {
            Some(callback) => {
                callback.call();
                true
            }
            None => false,
        }
    }

    /// Re-attach a callback to an existing action, typically after the prompt
    /// was restored from the session store.
    pub fn bind_action(&mut self, name: &str, callback: ActionCallback) -> bool {
        match self.actions.iter_mut().find(|action| action.name == name) {
            Some(action) => {
                action.callback = Some(callback);
                true
            }
            None => false,
        }
    }
}

/// Contents of the prompt slot: nothing, or exactly one prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotValue {
    #[default]
    Empty,
    Prompt(Prompt),
}

impl SlotValue {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn as_prompt(&self) -> Option<&Prompt> {
        match self {
            Self::Empty => None,
            Self::Prompt(prompt) => Some(prompt),
        }
    }

    pub(crate) fn log_label(&self) -> &str {
        match self {
            Self::Empty => "<empty>",
            Self::Prompt(prompt) => prompt.title.log_label(),
        }
    }
}

impl From<Prompt> for SlotValue {
    fn from(prompt: Prompt) -> Self {
        Self::Prompt(prompt)
    }
}

impl From<Option<Prompt>> for SlotValue {
    fn from(prompt: Option<Prompt>) -> Self {
        prompt.map_or(Self::Empty, Self::Prompt)
    }
}
