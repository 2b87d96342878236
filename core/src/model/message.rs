use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{de_null_default, de_opt_id};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub turn_idx: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
    /// Provider response the message was built from, kept verbatim.
    #[serde(default)]
    pub raw_data: Option<Value>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub thinking_blocks: Vec<ThinkingBlock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThinkingBlock {
    #[serde(default)]
    pub thinking: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Tool,
    Other(String),
}

impl Role {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("user") => Role::User,
            Some("assistant") => Role::Assistant,
            Some("tool") => Role::Tool,
            Some(other) => Role::Other(other.to_string()),
            None => Role::Other("unknown".to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
            Role::Other(s) => s,
        }
    }

    /// Unrecognised roles are styled like the assistant.
    pub fn css_class(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Tool => "tool",
            Role::Assistant | Role::Other(_) => "assistant",
        }
    }
}

/// Message content classified once so renderers can match on shape.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent<'a> {
    Empty,
    Text(&'a str),
    Structured(&'a Value),
}

impl Message {
    pub fn role(&self) -> Role {
        Role::parse(self.role.as_deref())
    }

    pub fn content(&self) -> MessageContent<'_> {
        match self.content.as_ref() {
            None | Some(Value::Null) => MessageContent::Empty,
            Some(Value::String(s)) if s.is_empty() => MessageContent::Empty,
            Some(Value::String(s)) => MessageContent::Text(s),
            Some(other) => MessageContent::Structured(other),
        }
    }
}
