//! Interactive setup and edit-config flows.
//!
//! Both read answers line by line from `input` and write prompts to `out`,
//! so tests can drive them with in-memory buffers.

use ask_core::config::{AVAILABLE_MODELS, find_model, mask_api_key};
use ask_core::{Error, Result, StateStore};
use std::io::{BufRead, Write};

/// Line-oriented question/answer helper over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    /// Print `question` without a newline and read one trimmed line.
    /// End of input reads as an empty answer.
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.out, "{}", question)?;
        self.out.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?.to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }

    fn list_models(&mut self) -> Result<()> {
        self.say("Available models:")?;
        for (i, model) in AVAILABLE_MODELS.iter().enumerate() {
            self.say(&format!("  {}. {}", i + 1, model))?;
        }
        Ok(())
    }
}

fn invalid_model_choice(choice: &str) -> Error {
    if choice.parse::<usize>().is_ok() {
        Error::InvalidInput(format!(
            "invalid choice. Please select a number between 1 and {}",
            AVAILABLE_MODELS.len()
        ))
    } else {
        Error::InvalidInput(format!("invalid model name: {}", choice))
    }
}

/// First-run setup: API key and preferred model.
pub fn run_setup<R: BufRead, W: Write>(
    store: &StateStore,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say("🤖 Welcome to ask setup!")?;
    prompter.say("This will configure your OpenAI API key and preferred model.")?;
    prompter.say("")?;

    let mut state = store.load()?;

    prompter.say("📝 Step 1: OpenAI API Key")?;
    prompter.say("You can get your API key from: https://platform.openai.com/account/api-keys")?;
    prompter.say("")?;

    if !state.api_key.is_empty() {
        if prompter.confirm("API key already configured. Do you want to update it? (y/N): ")? {
            state.api_key.clear();
        } else {
            prompter.say("Keeping existing API key.")?;
        }
    }

    if state.api_key.is_empty() {
        let api_key = prompter.ask("Enter your OpenAI API key: ")?;
        if api_key.is_empty() {
            return Err(Error::InvalidInput("API key cannot be empty".to_string()));
        }
        state.api_key = api_key;
    }

    prompter.say("")?;
    prompter.say("🤖 Step 2: Choose your preferred model")?;
    prompter.list_models()?;
    prompter.say("")?;

    let mut keep_model = false;
    if !state.model.is_empty() {
        prompter.say(&format!("Current model: {}", state.model))?;
        keep_model = !prompter.confirm("Do you want to change it? (y/N): ")?;
        if keep_model {
            prompter.say("Keeping existing model.")?;
        }
    }

    if !keep_model {
        let choice = prompter.ask(&format!(
            "Enter the number of your preferred model (1-{}): ",
            AVAILABLE_MODELS.len()
        ))?;
        state.model = find_model(&choice)
            .ok_or_else(|| invalid_model_choice(&choice))?
            .to_string();
    }

    store.save(&state)?;

    prompter.say("")?;
    prompter.say("✅ Setup complete!")?;
    prompter.say(&format!(
        "Configuration saved to: {}",
        store.path().display()
    ))?;
    prompter.say("")?;
    prompter.say("You can now use ask:")?;
    prompter.say("  ask \"Your question here\"")?;
    prompter.say("")?;
    prompter.say("To reconfigure, run: ask --setup")?;
    Ok(())
}

/// Edit the stored API key and model; blank answers keep current values.
pub fn edit_config<R: BufRead, W: Write>(
    store: &StateStore,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let mut state = store.load()?;

    prompter.say("🔧 Edit ask configuration")?;
    prompter.say("Leave blank to keep current value.")?;
    prompter.say("")?;

    prompter.say(&format!("Current API Key: {}", mask_api_key(&state.api_key)))?;
    let api_key = prompter.ask("New API Key (or press Enter to keep current): ")?;
    if !api_key.is_empty() {
        state.api_key = api_key;
    }

    prompter.say("")?;
    prompter.say(&format!("Current Model: {}", state.model))?;
    prompter.list_models()?;
    let choice = prompter.ask("New Model (number or name, or press Enter to keep current): ")?;
    if !choice.is_empty() {
        state.model = find_model(&choice)
            .ok_or_else(|| invalid_model_choice(&choice))?
            .to_string();
    }

    store.save(&state)?;

    prompter.say("")?;
    prompter.say("✅ Configuration updated successfully!")?;
    Ok(())
}
