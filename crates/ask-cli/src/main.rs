// ask-cli: CLI frontend for ask
// Argument parsing, interactive setup, terminal output

mod cli;
mod output;
mod setup;

use ask_core::config::{self, DEFAULT_MODEL, mask_api_key};
use ask_core::context::DEFAULT_CONTEXT_NAME;
use ask_core::{
    Context, Error, OpenAiClient, OutputSink, PromptRequest, Result, State, StateStore,
    send_prompt,
};
use cli::{Cli, Command};
use output::OutputHandler;
use setup::Prompter;
use std::io;
use std::process::ExitCode;

/// Number of trailing messages shown by `--show-config` (the last two exchanges).
const RECENT_MESSAGES: usize = 4;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn stdin_prompter() -> Prompter<io::StdinLock<'static>, io::Stdout> {
    Prompter::new(io::stdin().lock(), io::stdout())
}

/// Label for a context in listings, marking a lone auto-created default.
fn display_name(ctx: &Context, total: usize) -> String {
    if ctx.name == DEFAULT_CONTEXT_NAME && total == 1 {
        format!("{} (auto-created)", ctx.name)
    } else {
        ctx.name.clone()
    }
}

fn show_recent(output: &OutputHandler, history: &[ask_core::Message]) {
    if history.is_empty() {
        return;
    }
    output.emit_result("  Recent conversation:");
    let start = history.len().saturating_sub(RECENT_MESSAGES);
    for message in &history[start..] {
        output.emit_message(message);
    }
}

fn show_config(store: &StateStore, output: &OutputHandler) -> Result<()> {
    let mut state = store.load()?;
    let total = state.context_count();

    output.emit_result("Current ask configuration:");
    output.emit_result(&format!("  Config file: {}", store.path().display()));
    output.emit_result(&format!("  API Key: {}", mask_api_key(&state.api_key)));
    output.emit_result(&format!("  Model: {}", state.model));

    // Resolution may bootstrap "default" in memory; show-config never saves it.
    match state.current_context()? {
        Some(ctx) => {
            let marker = if ctx.name == DEFAULT_CONTEXT_NAME && total <= 1 {
                " (default)"
            } else {
                ""
            };
            output.emit_result(&format!(
                "  Current context: {}{} ({})",
                ctx.name, marker, ctx.id
            ));
            output.emit_result(&format!(
                "  Conversation history: {} messages",
                ctx.history.len()
            ));
            show_recent(output, &ctx.history);
        }
        None => {
            let legacy = state.legacy_history();
            output.emit_result(&format!(
                "  Conversation history: {} messages (legacy)",
                legacy.len()
            ));
            show_recent(output, legacy);
        }
    }
    Ok(())
}

fn list_contexts(state: &mut State, output: &OutputHandler) -> Result<()> {
    let ids: Vec<String> = state.list_contexts().iter().map(|c| c.id.clone()).collect();
    if ids.is_empty() {
        output.emit_result("📝 No contexts found.");
        output.emit_result("Create a new context with: ask --new-context \"context name\"");
        return Ok(());
    }

    let current_id = state.current_context()?.map(|c| c.id.clone());

    output.emit_result("📝 Available contexts:");
    output.newline();
    for (i, id) in ids.iter().enumerate() {
        let Some(ctx) = state.context(id) else {
            continue;
        };
        let marker = if current_id.as_deref() == Some(id.as_str()) {
            "▶"
        } else {
            " "
        };
        output.emit_result(&format!(
            "{} {} ({})",
            marker,
            display_name(ctx, ids.len()),
            ctx.id
        ));
        output.emit_result(&format!(
            "    Messages: {} | Updated: {}",
            ctx.history.len(),
            ctx.updated.format("%b %d, %H:%M")
        ));
        if i + 1 < ids.len() {
            output.newline();
        }
    }
    Ok(())
}

fn show_context(state: &State, identifier: &str, output: &OutputHandler) -> Result<()> {
    let ctx = state.resolve_identifier(identifier)?;
    output.emit_result(&format!("Context: {} ({})", ctx.name, ctx.id));
    output.emit_result(&format!(
        "  Created: {}",
        ctx.created.format("%Y-%m-%d %H:%M:%S %:z")
    ));
    output.emit_result(&format!(
        "  Updated: {}",
        ctx.updated.format("%Y-%m-%d %H:%M:%S %:z")
    ));
    output.emit_result(&format!("  Messages: {}", ctx.history.len()));
    for message in &ctx.history {
        output.emit_result(&output::format_message(message));
    }
    Ok(())
}

fn print_usage() {
    println!("❌ No prompt provided.");
    println!("Usage: ask \"your question here\"");
    println!("For help: ask --help");
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let output = OutputHandler::new(cli.verbose);
    let command = cli.to_command();

    match command {
        Command::ShowHelp => {
            Cli::print_help();
            return Ok(ExitCode::SUCCESS);
        }
        Command::ShowVersion => {
            println!("ask v{}", env!("CARGO_PKG_VERSION"));
            return Ok(ExitCode::SUCCESS);
        }
        Command::Completion => {
            println!("{}", cli::completion_script());
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let store = StateStore::default_location(cli.home.clone())?;
    log::debug!("using state at {}", store.path().display());

    match command {
        Command::Setup => setup::run_setup(&store, &mut stdin_prompter())?,
        Command::EditConfig => setup::edit_config(&store, &mut stdin_prompter())?,
        Command::ShowConfig => show_config(&store, &output)?,
        Command::ClearCurrent => {
            let mut state = store.load()?;
            state.clear_current_context()?;
            store.save(&state)?;
            output.emit_result("🗑️  Conversation history cleared.");
        }
        Command::NewContext(name) => {
            let mut state = store.load()?;
            let id = state.create_context(&name)?;
            store.save(&state)?;
            output.emit_result(&format!(
                "✅ Created new context '{}' with ID: {}",
                name, id
            ));
        }
        Command::SwitchContext(identifier) => {
            let mut state = store.load()?;
            let ctx = state.resolve_identifier(&identifier)?;
            let (id, name) = (ctx.id.clone(), ctx.name.clone());
            state.switch_context(&id)?;
            store.save(&state)?;
            output.emit_result(&format!("✅ Switched to context: {} ({})", name, id));
        }
        Command::ListContexts => {
            let mut state = store.load()?;
            list_contexts(&mut state, &output)?;
        }
        Command::DeleteContext(identifier) => {
            let mut state = store.load()?;
            let id = state.resolve_identifier(&identifier)?.id.clone();
            let removed = state.delete_context(&id)?;
            store.save(&state)?;
            output.emit_result(&format!(
                "🗑️  Deleted context: {} ({})",
                removed.name, removed.id
            ));
        }
        Command::ShowContext(identifier) => {
            let state = store.load()?;
            show_context(&state, &identifier, &output)?;
        }
        Command::SendPrompt {
            prompt,
            model,
            no_context,
        } => {
            let mut state = store.load()?;
            if state.api_key.is_empty() {
                output.emit_result("🤖 No configuration found. Starting setup process...");
                output.newline();
                setup::run_setup(&store, &mut stdin_prompter())?;
                state = store.load()?;
            }

            if prompt.trim().is_empty() {
                print_usage();
                return Ok(ExitCode::FAILURE);
            }

            if state.model.is_empty() {
                state.model = DEFAULT_MODEL.to_string();
            }

            let client = OpenAiClient::new(state.api_key.clone(), config::api_url());
            log::debug!("completion endpoint: {}", client.url());
            let request = PromptRequest {
                prompt,
                model_override: model,
                no_context,
            };
            let reply = send_prompt(&store, &mut state, &client, &request, &output).await?;
            output.emit_result(&reply.content);
        }
        Command::ShowHelp | Command::ShowVersion | Command::Completion => {}
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match cli::parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(Error::Completion(ask_core::CompletionError::EmptyResponse)) => {
            println!("No response from the model.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
