use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{de_id, de_lenient_f64, de_null_default};

/// Pass/fail classification of a reward. Exactly `1.0` passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn from_reward(reward: Option<f64>) -> Self {
        if reward == Some(1.0) {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        self == Outcome::Pass
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Pass => "Pass",
            Outcome::Fail => "Fail",
        }
    }

    pub fn mark(self) -> &'static str {
        match self {
            Outcome::Pass => "✓",
            Outcome::Fail => "✗",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunList {
    #[serde(default, deserialize_with = "de_null_default")]
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    #[serde(deserialize_with = "de_id", default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub num_tasks: u64,
    #[serde(default)]
    pub num_passed: Option<u64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Run {
    /// Explicit `domain`, else the second `_`-separated segment of the id
    /// (`2026-02-21T00:37:20_retail_llm_agent` -> `retail`).
    pub fn resolved_domain(&self) -> Option<&str> {
        if let Some(d) = self.domain.as_deref().filter(|d| !d.trim().is_empty()) {
            return Some(d);
        }
        self.id.split('_').nth(1).filter(|s| !s.is_empty())
    }

    pub fn display_label(&self) -> String {
        let label = if self.label.is_empty() {
            self.id.as_str()
        } else {
            self.label.as_str()
        };
        match self.num_passed {
            Some(passed) => format!("{label} ({passed}/{})", self.num_tasks),
            None => format!("{label} ({})", self.num_tasks),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskIndex {
    #[serde(default, deserialize_with = "de_null_default")]
    pub tasks: Vec<TaskSummary>,
    #[serde(default)]
    pub run_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    #[serde(deserialize_with = "de_id", default)]
    pub task_id: String,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub reward: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub duration_sec: Option<f64>,
    #[serde(default)]
    pub scenario_preview: Option<String>,
    #[serde(default)]
    pub termination_reason: Option<String>,
    #[serde(default)]
    pub db_match: Option<bool>,
    #[serde(default)]
    pub num_messages: Option<u64>,
    #[serde(default)]
    pub reward_breakdown: Option<Map<String, Value>>,
}

impl TaskSummary {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_reward(self.reward)
    }
}
