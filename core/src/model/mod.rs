//! Typed views of the exported trajectory artifacts.
//!
//! Every member that the exporter may omit is optional and defaulted at decode
//! time, so rendering code never has to guard against missing keys.

mod message;
mod record;
mod run;

pub use message::{Message, MessageContent, Role, ThinkingBlock, ToolCall};
pub use record::{
    ActionCheck, CommunicateCheck, DbCheck, ExpectedAction, Instructions, RewardInfo, RunInfo,
    TaskDefinition, TaskRecord, UserScenario,
};
pub use run::{Outcome, Run, RunList, TaskIndex, TaskSummary};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Task ids show up both as JSON strings and as bare numbers.
pub(crate) fn de_id<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(id_from_value(Value::deserialize(d)?).unwrap_or_default())
}

pub(crate) fn de_opt_id<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(id_from_value(Value::deserialize(d)?))
}

fn id_from_value(v: Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

pub(crate) fn de_null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Accepts a number or anything else; non-numbers decode as absent.
pub(crate) fn de_lenient_f64<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(d)?.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_task_ids_decode_as_strings() {
        let s: TaskSummary = serde_json::from_str(r#"{"task_id": 17, "reward": 1.0}"#).unwrap();
        assert_eq!(s.task_id, "17");

        let s: TaskSummary = serde_json::from_str(r#"{"task_id": "abc"}"#).unwrap();
        assert_eq!(s.task_id, "abc");
        assert_eq!(s.reward, None);
    }

    #[test]
    fn non_numeric_reward_degrades_to_absent() {
        let s: TaskSummary =
            serde_json::from_str(r#"{"task_id": "1", "reward": "n/a"}"#).unwrap();
        assert_eq!(s.reward, None);
        assert_eq!(s.outcome(), Outcome::Fail);
    }
}
