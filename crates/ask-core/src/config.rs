//! Configuration constants and location resolution.
//!
//! The credential and model live inside the state document itself (see
//! [`crate::State`]); this module only knows where that document lives and
//! which models are offered during setup.

use dirs_next::home_dir;
use std::path::PathBuf;

/// Model used when the document does not name one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Chat-completions endpoint used unless `ASK_API_URL` overrides it.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "ASK_HOME";

/// Environment variable overriding the completion endpoint.
pub const API_URL_ENV: &str = "ASK_API_URL";

/// Name of the state document inside the home directory.
pub const STATE_FILE_NAME: &str = "config.json";

/// Models offered by setup and edit-config, in display order.
pub const AVAILABLE_MODELS: &[&str] = &[
    "gpt-4.1-nano",
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-4-turbo",
    "gpt-4",
    "gpt-3.5-turbo",
    "gpt-3.5-turbo-16k",
];

/// Resolve the ask home directory.
///
/// Precedence:
/// 1. `home_override` (from `--home`)
/// 2. `ASK_HOME` environment variable
/// 3. `~/.ask`
///
/// Returns `None` only when no override is given and the user's home
/// directory cannot be determined.
pub fn resolve_home_dir(home_override: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = home_override {
        return Some(path);
    }
    if let Some(path) = std::env::var_os(HOME_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    home_dir().map(|home| home.join(".ask"))
}

/// Completion endpoint, honouring `ASK_API_URL`.
pub fn api_url() -> String {
    std::env::var(API_URL_ENV)
        .ok()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Look up a model by 1-based menu number or exact name.
pub fn find_model(choice: &str) -> Option<&'static str> {
    let choice = choice.trim();
    if let Ok(n) = choice.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| AVAILABLE_MODELS.get(i)).copied();
    }
    AVAILABLE_MODELS.iter().find(|m| **m == choice).copied()
}

/// Mask an API key for display, keeping the first and last four characters.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}
