//! Prompt execution: the default "send a prompt in the current context" flow.

use crate::api::CompletionClient;
use crate::context::{Message, Role};
use crate::error::Result;
use crate::output::{CommandEvent, OutputSink};
use crate::state::{State, StateStore};

/// A single prompt to send.
#[derive(Debug, Clone, Default)]
pub struct PromptRequest {
    pub prompt: String,
    /// Use this model instead of the configured one.
    pub model_override: Option<String>,
    /// Send only the prompt and leave stored history untouched.
    pub no_context: bool,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// Send `request` using the current context and record the exchange.
///
/// The current context is resolved first (creating "default" on a fresh
/// state) and the selection is saved. After a reply arrives, the prompt and
/// reply are appended to the current context and saved again. Save failures
/// are reported through `sink` and do not fail the call: the reply is still
/// returned.
pub async fn send_prompt<C: CompletionClient>(
    store: &StateStore,
    state: &mut State,
    client: &C,
    request: &PromptRequest,
    sink: &dyn OutputSink,
) -> Result<Message> {
    let had_contexts = state.context_count() > 0 || !state.current_context.is_empty();
    // Resolution selects (and may create) the context, so `current_context`
    // holds the resolved id afterwards.
    if state.history_target()?.is_legacy() {
        sink.emit_event(CommandEvent::LegacyHistoryFallback {
            stale_id: state.current_context.clone(),
        });
    } else {
        if !had_contexts {
            sink.emit_event(CommandEvent::DefaultContextCreated {
                id: state.current_context.clone(),
            });
        }
        if let Err(e) = store.save(state) {
            sink.emit_event(CommandEvent::StateSaveFailed {
                reason: e.to_string(),
            });
        }
    }

    let mut messages = Vec::new();
    if !request.no_context {
        messages.extend_from_slice(state.current_context_history()?);
    }
    messages.push(Message::user(request.prompt.as_str()));

    let model = request
        .model_override
        .clone()
        .unwrap_or_else(|| state.model.clone());

    sink.emit_event(CommandEvent::RequestSending {
        model: model.clone(),
        message_count: messages.len(),
    });
    let reply = client.complete(&model, &messages).await?;

    if !request.no_context {
        state.add_to_current_context(Role::User, request.prompt.as_str())?;
        state.add_to_current_context(Role::Assistant, reply.content.as_str())?;
        if let Err(e) = store.save(state) {
            sink.emit_event(CommandEvent::HistorySaveFailed {
                reason: e.to_string(),
            });
        }
    }

    Ok(reply)
}
