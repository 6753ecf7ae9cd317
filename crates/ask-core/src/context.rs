//! Conversation data model: messages and named contexts.

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to the context created implicitly on first use.
pub const DEFAULT_CONTEXT_NAME: &str = "default";

/// Prefix of every generated context id.
pub const CONTEXT_ID_PREFIX: &str = "ctx_";

/// Timestamp type stored on contexts (RFC 3339 with offset on the wire).
pub type Timestamp = DateTime<FixedOffset>;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged utterance in a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// A named conversation thread with its own history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub history: Vec<Message>,
    pub created: Timestamp,
    pub updated: Timestamp,
}

impl Context {
    /// Create an empty context; `created` and `updated` share one instant.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = now_timestamp();
        Self {
            id: id.into(),
            name: name.into(),
            history: Vec::new(),
            created: now,
            updated: now,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.history.push(message);
        self.touch();
    }

    pub fn clear(&mut self) {
        self.history = Vec::new();
        self.touch();
    }

    /// Refresh `updated`. A clock that stepped backwards leaves it unchanged.
    pub fn touch(&mut self) {
        let now = now_timestamp();
        if now > self.updated {
            self.updated = now;
        }
    }
}

pub fn now_timestamp() -> Timestamp {
    Local::now().fixed_offset()
}

/// Generate a context id: `ctx_` followed by 32 hex digits of a v4 UUID.
pub fn generate_context_id() -> String {
    format!("{}{}", CONTEXT_ID_PREFIX, uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty_with_equal_timestamps() {
        let ctx = Context::new("ctx_1", "work");
        assert!(ctx.history.is_empty());
        assert_eq!(ctx.created, ctx.updated);
    }

    #[test]
    fn test_push_never_moves_updated_backwards() {
        let mut ctx = Context::new("ctx_1", "work");
        let before = ctx.updated;
        ctx.push(Message::user("hi"));
        assert!(ctx.updated >= before);
        assert_eq!(ctx.history, vec![Message::user("hi")]);
    }

    #[test]
    fn test_touch_ignores_clock_going_backwards() {
        let mut ctx = Context::new("ctx_1", "work");
        let future = ctx.updated + chrono::Duration::days(1);
        ctx.updated = future;
        ctx.touch();
        assert_eq!(ctx.updated, future);
    }

    #[test]
    fn test_generate_context_id_format() {
        let id = generate_context_id();
        assert!(id.starts_with(CONTEXT_ID_PREFIX));
        assert_eq!(id.len(), CONTEXT_ID_PREFIX.len() + 32);
        assert_ne!(id, generate_context_id());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"ok"}"#);
    }

    #[test]
    fn test_context_reads_second_precision_timestamps() {
        let json = r#"{
            "id": "ctx_1700000000000000000",
            "name": "old",
            "history": [{"role": "user", "content": "hi"}],
            "created": "2024-01-02T15:04:05-07:00",
            "updated": "2024-01-02T15:05:00-07:00"
        }"#;
        let ctx: Context = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.name, "old");
        assert!(ctx.updated > ctx.created);
        assert_eq!(ctx.created.offset().local_minus_utc(), -7 * 3600);
    }
}
