//! Output handling for the CLI.
//!
//! `OutputHandler` implements `OutputSink`: results go to stdout, events to
//! stderr. Verbose-tier events are dropped unless `-v` was given.

use ask_core::output::CommandEvent;
use ask_core::{Message, OutputSink};

/// Longest content shown per message in previews before truncation.
const PREVIEW_CHARS: usize = 50;

/// CLI output handler: text to stdout, diagnostics to stderr.
#[derive(Default)]
pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

/// Render an event as a single diagnostic line.
pub fn format_event(event: &CommandEvent) -> String {
    match event {
        CommandEvent::DefaultContextCreated { id } => {
            format!("[Created default context ({})]", id)
        }
        CommandEvent::LegacyHistoryFallback { stale_id } => format!(
            "[Selected context '{}' not found, using legacy history]",
            stale_id
        ),
        CommandEvent::RequestSending {
            model,
            message_count,
        } => format!("[Sending {} message(s) to {}]", message_count, model),
        CommandEvent::StateSaveFailed { reason } => {
            format!("Warning: Failed to save configuration: {}", reason)
        }
        CommandEvent::HistorySaveFailed { reason } => {
            format!("Warning: Failed to save conversation history: {}", reason)
        }
    }
}

/// Render a history message in full, as `--show-context` lists it.
pub fn format_message(message: &Message) -> String {
    format!("    {}: {}", message.role, message.content)
}

/// Shorten `content` to the preview width, appending "..." when cut.
pub fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let head: String = content.chars().take(PREVIEW_CHARS - 3).collect();
    format!("{}...", head)
}

impl OutputSink for OutputHandler {
    fn emit_result(&self, content: &str) {
        println!("{}", content);
    }

    fn emit_event(&self, event: CommandEvent) {
        if event.is_verbose() && !self.verbose {
            return;
        }
        eprintln!("{}", format_event(&event));
    }

    fn newline(&self) {
        println!();
    }

    fn emit_message(&self, message: &Message) {
        println!("    {}: {}", message.role, preview(&message.content));
    }
}
