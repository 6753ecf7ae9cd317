//! Context operations on an in-memory [`State`].
//!
//! Creating, selecting, resolving, mutating, listing and deleting contexts.
//! These are pure in-memory operations; persisting is the caller's job.

use super::{HistoryTarget, State};
use crate::context::{Context, DEFAULT_CONTEXT_NAME, Message, Role, generate_context_id};
use crate::error::{Error, Result};
use std::collections::BTreeMap;

impl State {
    /// Replace an absent context mapping with an empty one. Idempotent.
    pub fn ensure_contexts_initialized(&mut self) -> &mut BTreeMap<String, Context> {
        self.contexts.get_or_insert_with(BTreeMap::new)
    }

    /// Number of contexts (zero when the mapping is absent).
    pub fn context_count(&self) -> usize {
        self.contexts.as_ref().map_or(0, BTreeMap::len)
    }

    /// Look up a context by exact id.
    pub fn context(&self, id: &str) -> Option<&Context> {
        self.contexts.as_ref()?.get(id)
    }

    /// Create an empty context named `name` and select it.
    ///
    /// Fails with [`Error::DuplicateName`] if any context already has exactly
    /// this name. Returns the new id.
    pub fn create_context(&mut self, name: &str) -> Result<String> {
        let contexts = self.ensure_contexts_initialized();

        if contexts.values().any(|ctx| ctx.name == name) {
            return Err(Error::DuplicateName(name.to_string()));
        }

        let mut id = generate_context_id();
        while contexts.contains_key(&id) {
            id = generate_context_id();
        }

        contexts.insert(id.clone(), Context::new(id.clone(), name));
        self.current_context = id.clone();
        log::debug!("created context '{}' ({})", name, id);

        Ok(id)
    }

    /// Select the context with this exact id.
    pub fn switch_context(&mut self, id: &str) -> Result<()> {
        if !self.ensure_contexts_initialized().contains_key(id) {
            return Err(Error::NotFound(id.to_string()));
        }
        self.current_context = id.to_string();
        Ok(())
    }

    /// Resolve the current context, bootstrapping a selection if needed.
    ///
    /// Evaluated on every call:
    /// 1. With nothing selected, an empty mapping gets a fresh "default"
    ///    context; otherwise the context with the lexicographically smallest
    ///    id is selected.
    /// 2. The selected id is looked up.
    /// 3. A selected id with no matching context (edited or deleted outside
    ///    this process) yields `None`; it is not repaired.
    pub fn current_context(&mut self) -> Result<Option<&Context>> {
        let id = self.resolve_current_id()?;
        Ok(self.contexts.as_ref().and_then(|c| c.get(&id)))
    }

    fn resolve_current_id(&mut self) -> Result<String> {
        if self.current_context.is_empty() {
            let first = self.ensure_contexts_initialized().keys().next().cloned();
            match first {
                Some(id) => {
                    log::debug!("no context selected, picking {}", id);
                    self.current_context = id;
                }
                None => {
                    self.create_context(DEFAULT_CONTEXT_NAME)?;
                }
            }
        }
        Ok(self.current_context.clone())
    }

    /// Resolve where history mutations should land.
    ///
    /// Falls back to the legacy flat history when no context resolves.
    pub fn history_target(&mut self) -> Result<HistoryTarget<'_>> {
        let id = self.resolve_current_id()?;
        let ctx = self.contexts.as_mut().and_then(|c| c.get_mut(&id));
        Ok(match ctx {
            Some(ctx) => HistoryTarget::Context(ctx),
            None => {
                log::warn!(
                    "selected context {} does not exist, using legacy history",
                    id
                );
                HistoryTarget::Legacy(&mut self.history)
            }
        })
    }

    /// History of the current context, or an empty slice if none resolves.
    pub fn current_context_history(&mut self) -> Result<&[Message]> {
        Ok(self
            .current_context()?
            .map(|ctx| ctx.history.as_slice())
            .unwrap_or(&[]))
    }

    /// Append a message to the current context (or the legacy history).
    pub fn add_to_current_context(&mut self, role: Role, content: impl Into<String>) -> Result<()> {
        self.history_target()?.push(Message::new(role, content));
        Ok(())
    }

    /// Empty the current context's history (or the legacy history).
    pub fn clear_current_context(&mut self) -> Result<()> {
        self.history_target()?.clear();
        Ok(())
    }

    /// Remove the context with this exact id and return it.
    ///
    /// Deleting the selected context clears the selection; the next
    /// [`State::current_context`] call re-resolves.
    pub fn delete_context(&mut self, id: &str) -> Result<Context> {
        let removed = self
            .ensure_contexts_initialized()
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        if self.current_context == id {
            self.current_context.clear();
        }
        log::debug!("deleted context '{}' ({})", removed.name, id);

        Ok(removed)
    }

    /// All contexts, most recently updated first.
    pub fn list_contexts(&self) -> Vec<&Context> {
        let mut contexts: Vec<&Context> = self
            .contexts
            .as_ref()
            .map(|c| c.values().collect())
            .unwrap_or_default();
        // Stable sort over id order, so ties stay ordered by id.
        contexts.sort_by(|a, b| b.updated.cmp(&a.updated));
        contexts
    }

    /// Find a context by id, then by exact name.
    pub fn resolve_identifier(&self, identifier: &str) -> Result<&Context> {
        let contexts = self
            .contexts
            .as_ref()
            .ok_or_else(|| Error::NotFound(identifier.to_string()))?;

        contexts
            .get(identifier)
            .or_else(|| contexts.values().find(|ctx| ctx.name == identifier))
            .ok_or_else(|| Error::NotFound(identifier.to_string()))
    }

    /// Legacy flat history (documents predating contexts).
    pub fn legacy_history(&self) -> &[Message] {
        &self.history
    }
}
