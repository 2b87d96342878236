//! Reasoning text lives in different places depending on the provider that
//! produced the message. Strategies are tried in order; the first non-empty
//! result wins.

use serde_json::Value;

use crate::model::Message;

pub type ReasoningStrategy = fn(&Message) -> Option<String>;

pub const STRATEGIES: &[(&str, ReasoningStrategy)] = &[
    ("reasoning_content", plain_reasoning),
    ("raw_data.message.reasoning_content", raw_message_reasoning),
    ("thinking_blocks", thinking_blocks),
];

pub fn extract_reasoning(msg: &Message) -> Option<String> {
    STRATEGIES.iter().find_map(|(_, strategy)| strategy(msg))
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn plain_reasoning(msg: &Message) -> Option<String> {
    msg.reasoning_content.as_deref().and_then(non_blank)
}

fn raw_message_reasoning(msg: &Message) -> Option<String> {
    msg.raw_data
        .as_ref()?
        .pointer("/message/reasoning_content")
        .and_then(Value::as_str)
        .and_then(non_blank)
}

fn thinking_blocks(msg: &Message) -> Option<String> {
    let joined = msg
        .thinking_blocks
        .iter()
        .filter_map(|b| b.thinking.as_deref().and_then(non_blank))
        .collect::<Vec<_>>()
        .join("\n\n");
    non_blank(&joined)
}
