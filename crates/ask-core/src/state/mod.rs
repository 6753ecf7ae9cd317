//! Persistent application state.
//!
//! This module manages everything ask keeps between invocations:
//! - The state document (`State`): credential, model, contexts, selection
//! - Loading and saving it (`StateStore`)
//! - Context lifecycle and history operations (`context_ops`)
//!
//! Callers load once, run one or more context operations in memory, then
//! save. Nothing in `context_ops` touches the filesystem.

mod context_ops;
mod store;

pub use store::StateStore;

use crate::config::DEFAULT_MODEL;
use crate::context::{Context, Message};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn no_contexts(contexts: &Option<BTreeMap<String, Context>>) -> bool {
    contexts.as_ref().is_none_or(BTreeMap::is_empty)
}

/// The whole persisted document.
///
/// `history` is the flat history written by versions that predate contexts.
/// It is kept as its own field rather than folded into a context, so such a
/// document stays readable and the fallback in [`HistoryTarget`] keeps working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Message>,
    /// Context records keyed by id. `None` when the document has no
    /// `contexts` field at all; an empty mapping is not written either.
    #[serde(default, skip_serializing_if = "no_contexts")]
    pub contexts: Option<BTreeMap<String, Context>>,
    /// Selected context id; empty means "none selected".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_context: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            history: Vec::new(),
            contexts: None,
            current_context: String::new(),
        }
    }
}

/// Where history mutations land after resolving the current context.
///
/// `Legacy` is chosen only when no context resolves (a stale selection);
/// documents with contexts always go through `Context`.
#[derive(Debug)]
pub enum HistoryTarget<'a> {
    Context(&'a mut Context),
    Legacy(&'a mut Vec<Message>),
}

impl HistoryTarget<'_> {
    pub fn push(self, message: Message) {
        match self {
            HistoryTarget::Context(ctx) => ctx.push(message),
            HistoryTarget::Legacy(history) => history.push(message),
        }
    }

    pub fn clear(self) {
        match self {
            HistoryTarget::Context(ctx) => ctx.clear(),
            HistoryTarget::Legacy(history) => history.clear(),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, HistoryTarget::Legacy(_))
    }
}
