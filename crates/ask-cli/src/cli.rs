//! CLI argument parsing with clap.
//!
//! This module parses command-line arguments and reduces them to a single
//! [`Command`]. When several action flags are given, the first one in
//! [`Cli::to_command`]'s order wins.

use ask_core::Error;
use ask_core::config::AVAILABLE_MODELS;
use clap::Parser;
use std::path::PathBuf;

/// ask - get chat-completion answers from the command line
#[derive(Parser, Debug)]
#[command(
    name = "ask",
    version,
    about = "Get chat-completion answers from the command line",
    after_help = CLI_AFTER_HELP,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    // === Configuration ===
    /// Run the interactive setup process
    #[arg(long = "setup")]
    pub setup: bool,

    /// Override the configured model for this request
    #[arg(long = "model", value_name = "MODEL")]
    pub model: Option<String>,

    /// Show the current configuration and exit
    #[arg(long = "show-config")]
    pub show_config: bool,

    /// Edit the current configuration
    #[arg(long = "edit-config")]
    pub edit_config: bool,

    // === History ===
    /// Clear the current context's conversation history
    #[arg(long = "clear")]
    pub clear: bool,

    /// Don't use or record conversation history for this request
    #[arg(long = "no-context")]
    pub no_context: bool,

    // === Context management ===
    /// Create a new context with the given name and switch to it
    #[arg(long = "new-context", value_name = "NAME")]
    pub new_context: Option<String>,

    /// Switch to context by ID or name
    #[arg(long = "switch", value_name = "ID|NAME", allow_hyphen_values = true)]
    pub switch: Option<String>,

    /// List all contexts
    #[arg(long = "list-contexts")]
    pub list_contexts: bool,

    /// Delete context by ID or name
    #[arg(
        long = "delete-context",
        value_name = "ID|NAME",
        allow_hyphen_values = true
    )]
    pub delete_context: Option<String>,

    /// Show a context's details and history by ID or name
    #[arg(
        long = "show-context",
        value_name = "ID|NAME",
        allow_hyphen_values = true
    )]
    pub show_context: Option<String>,

    // === Control flags ===
    /// Show extra diagnostics on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Override ask home directory (default: ~/.ask, or ASK_HOME env var)
    #[arg(long = "home", value_name = "PATH")]
    pub home: Option<PathBuf>,

    // === Help and version ===
    /// Show help
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Show version
    #[arg(long = "version")]
    pub version: bool,

    // === Positional: prompt ===
    /// The prompt to send (all remaining arguments, joined with spaces)
    #[arg(trailing_var_arg = true)]
    pub prompt: Vec<String>,
}

const CLI_AFTER_HELP: &str = r#"EXAMPLES:
  ask "What is the capital of France?"
  ask --model gpt-4 "Explain quantum computing"
  ask "Continue from where we left off"   Uses conversation history
  ask --clear                             Clear conversation history
  ask --setup                             Configure API key and model

CONTEXTS:
  ask --new-context "Python Project"      Create and switch to a context
  ask --list-contexts                     List all contexts
  ask --switch "Python Project"           Switch by name or ID
  ask --delete-context "Python Project"   Delete by name or ID
  ask "What is a decorator?"              Use the current context

SHELL COMPLETION:
  source <(ask completion)"#;

/// What a single invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShowHelp,
    ShowVersion,
    Setup,
    ShowConfig,
    EditConfig,
    ClearCurrent,
    NewContext(String),
    SwitchContext(String),
    ListContexts,
    DeleteContext(String),
    ShowContext(String),
    Completion,
    SendPrompt {
        prompt: String,
        model: Option<String>,
        no_context: bool,
    },
}

impl Cli {
    /// Parse from explicit arguments (the first element is the binary name).
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| Error::InvalidInput(e.to_string()))
    }

    /// Reduce the parsed flags to one command.
    pub fn to_command(&self) -> Command {
        if self.help {
            Command::ShowHelp
        } else if self.version {
            Command::ShowVersion
        } else if self.setup {
            Command::Setup
        } else if self.show_config {
            Command::ShowConfig
        } else if self.edit_config {
            Command::EditConfig
        } else if self.clear {
            Command::ClearCurrent
        } else if let Some(name) = self.new_context.as_ref().filter(|n| !n.is_empty()) {
            Command::NewContext(name.clone())
        } else if let Some(id) = self.switch.as_ref().filter(|n| !n.is_empty()) {
            Command::SwitchContext(id.clone())
        } else if self.list_contexts {
            Command::ListContexts
        } else if let Some(id) = self.delete_context.as_ref().filter(|n| !n.is_empty()) {
            Command::DeleteContext(id.clone())
        } else if let Some(id) = self.show_context.as_ref().filter(|n| !n.is_empty()) {
            Command::ShowContext(id.clone())
        } else if self.prompt.first().map(String::as_str) == Some("completion") {
            Command::Completion
        } else {
            Command::SendPrompt {
                prompt: self.prompt.join(" "),
                model: self.model.clone().filter(|m| !m.is_empty()),
                no_context: self.no_context,
            }
        }
    }

    pub fn print_help() {
        use clap::CommandFactory;
        let mut cmd = Self::command();
        let _ = cmd.print_help();
    }
}

/// Parse the process arguments.
pub fn parse() -> Result<Cli, Error> {
    Cli::parse_from_args(std::env::args_os())
}

/// Bash/zsh completion script for `ask`.
pub fn completion_script() -> String {
    let opts = "--setup --model --help --version --show-config --edit-config --clear \
                --no-context --new-context --switch --list-contexts --delete-context \
                --show-context --home --verbose completion";
    let models = AVAILABLE_MODELS.join(" ");

    format!(
        r#"# bash/zsh completion for ask
_ask_completions() {{
    local cur prev opts models
    COMPREPLY=()
    cur="${{COMP_WORDS[COMP_CWORD]}}"
    prev="${{COMP_WORDS[COMP_CWORD-1]}}"
    opts="{opts}"
    models="{models}"

    if [[ $prev == --model ]]; then
        COMPREPLY=( $(compgen -W "$models" -- $cur) )
        return 0
    fi

    if [[ $cur == -* ]]; then
        COMPREPLY=( $(compgen -W "$opts" -- $cur) )
        return 0
    fi
}}

complete -F _ask_completions ask
# To enable: source <(ask completion)"#
    )
}
