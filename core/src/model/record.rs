use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{de_lenient_f64, de_null_default, de_opt_id, Message, Outcome};

/// Full transcript and evaluation of one task within one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub task_id: Option<String>,
    #[serde(default)]
    pub task: Option<TaskDefinition>,
    #[serde(default)]
    pub run_info: Option<RunInfo>,
    #[serde(default)]
    pub reward_info: Option<RewardInfo>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDefinition {
    #[serde(default)]
    pub user_scenario: Option<UserScenario>,
}

impl TaskDefinition {
    pub fn instructions(&self) -> Option<&Instructions> {
        self.user_scenario.as_ref()?.instructions.as_ref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserScenario {
    #[serde(default)]
    pub instructions: Option<Instructions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Instructions {
    #[serde(default)]
    pub reason_for_call: Option<String>,
    #[serde(default)]
    pub known_info: Option<String>,
    #[serde(default)]
    pub unknown_info: Option<String>,
    #[serde(default)]
    pub task_instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default)]
    pub simulation_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub duration_sec: Option<f64>,
    #[serde(default)]
    pub termination_reason: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub agent_cost: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub user_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewardInfo {
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub reward: Option<f64>,
    #[serde(default)]
    pub reward_breakdown: Option<Map<String, Value>>,
    #[serde(default)]
    pub db_check: Option<DbCheck>,
    #[serde(default)]
    pub action_checks: Option<Vec<ActionCheck>>,
    #[serde(default)]
    pub communicate_checks: Option<Vec<CommunicateCheck>>,
}

impl RewardInfo {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_reward(self.reward)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbCheck {
    #[serde(default)]
    pub db_match: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionCheck {
    #[serde(default)]
    pub action: Option<ExpectedAction>,
    #[serde(default)]
    pub action_match: Option<bool>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub action_reward: Option<f64>,
    #[serde(default)]
    pub tool_called: Option<bool>,
    #[serde(default)]
    pub actual_arguments: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedAction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunicateCheck {
    #[serde(default)]
    pub info: Option<Value>,
    #[serde(default)]
    pub met: Option<bool>,
    #[serde(default)]
    pub justification: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_decodes_to_placeholders() {
        let rec: TaskRecord = serde_json::from_str("{}").unwrap();
        assert!(rec.task.is_none());
        assert!(rec.run_info.is_none());
        assert!(rec.reward_info.is_none());
        assert!(rec.messages.is_empty());
    }

    #[test]
    fn nested_instructions_resolve() {
        let rec: TaskRecord = serde_json::from_str(
            r#"{"task_id": 3, "task": {"id": "3", "user_scenario": {"instructions": {"reason_for_call": "refund"}}}}"#,
        )
        .unwrap();
        assert_eq!(rec.task_id.as_deref(), Some("3"));
        let i = rec.task.as_ref().and_then(|t| t.instructions()).unwrap();
        assert_eq!(i.reason_for_call.as_deref(), Some("refund"));
        assert!(i.known_info.is_none());
    }

    #[test]
    fn null_sub_objects_are_absent() {
        let rec: TaskRecord =
            serde_json::from_str(r#"{"task": null, "reward_info": {"reward": null}}"#).unwrap();
        assert!(rec.task.is_none());
        assert_eq!(rec.reward_info.unwrap().outcome(), Outcome::Fail);
    }
}
