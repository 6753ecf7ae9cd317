//! ask-core: state and context management for the ask CLI
//!
//! Provides the persisted state document, named conversation contexts, the
//! chat-completion client and the prompt flow that ties them together.
//!
//! # Quick Start
//!
//! ```no_run
//! use ask_core::{CollectingSink, OpenAiClient, PromptRequest, StateStore, send_prompt};
//!
//! #[tokio::main]
//! async fn main() -> ask_core::Result<()> {
//!     let store = StateStore::default_location(None)?;
//!     let mut state = store.load()?;
//!     let client = OpenAiClient::new(state.api_key.clone(), ask_core::config::api_url());
//!     let sink = CollectingSink::new();
//!
//!     let reply = send_prompt(&store, &mut state, &client, &PromptRequest::new("Hello!"), &sink).await?;
//!     println!("{}", reply.content);
//!     Ok(())
//! }
//! ```
//!
//! For context management without the network, load a [`State`] and use its
//! methods directly (`create_context`, `switch_context`, `list_contexts`, ...),
//! then save it back through the [`StateStore`].

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod execution;
pub mod output;
pub mod safe_io;
pub mod state;

pub use api::{CompletionClient, OpenAiClient};
pub use context::{Context, Message, Role};
pub use error::{CompletionError, Error, Result};
pub use execution::{PromptRequest, send_prompt};
pub use output::{CollectingSink, CommandEvent, OutputSink};
pub use state::{HistoryTarget, State, StateStore};
