use crate::context::Message;

/// Semantic events emitted while running a command.
///
/// Core emits all variants unconditionally; clients decide which to display
/// and how to format them. Verbose-tier events are shown only when the client
/// has verbose mode enabled.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// No context existed, so "default" was created and selected (verbose-tier).
    DefaultContextCreated { id: String },
    /// The selected context id matches nothing; history goes to the legacy list (verbose-tier).
    LegacyHistoryFallback { stale_id: String },
    /// A completion request is about to be sent (verbose-tier).
    RequestSending {
        model: String,
        message_count: usize,
    },
    /// Saving the selected context before the request failed (always shown).
    StateSaveFailed { reason: String },
    /// The reply was printed but the conversation could not be persisted (always shown).
    HistorySaveFailed { reason: String },
}

impl CommandEvent {
    /// Whether the event should only be shown in verbose mode.
    pub fn is_verbose(&self) -> bool {
        !matches!(
            self,
            CommandEvent::StateSaveFailed { .. } | CommandEvent::HistorySaveFailed { .. }
        )
    }
}

/// Abstraction over how command results and diagnostics are presented.
///
/// ask-cli implements this with `OutputHandler` (text to stdout/stderr).
pub trait OutputSink {
    /// Emit a result string (the primary output of a command).
    fn emit_result(&self, content: &str);

    /// Emit a typed command-path event. Clients filter and format as appropriate.
    fn emit_event(&self, event: CommandEvent);

    /// Emit a blank line.
    fn newline(&self);

    /// Emit a message from a conversation history.
    fn emit_message(&self, message: &Message);
}

/// Sink that records everything it receives. Useful for embedding and tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub results: std::cell::RefCell<Vec<String>>,
    pub events: std::cell::RefCell<Vec<CommandEvent>>,
    pub messages: std::cell::RefCell<Vec<Message>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for CollectingSink {
    fn emit_result(&self, content: &str) {
        self.results.borrow_mut().push(content.to_string());
    }

    fn emit_event(&self, event: CommandEvent) {
        self.events.borrow_mut().push(event);
    }

    fn newline(&self) {
        self.results.borrow_mut().push(String::new());
    }

    fn emit_message(&self, message: &Message) {
        self.messages.borrow_mut().push(message.clone());
    }
}
