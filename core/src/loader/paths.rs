//! Deterministic resource naming for the exported data tree.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UNSAFE_ID_CHAR: Regex = Regex::new(r"[^A-Za-z0-9_\-]").unwrap();
    static ref REPEATED_SLASH: Regex = Regex::new(r"/+").unwrap();
}

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_task_id(task_id: &str) -> String {
    UNSAFE_ID_CHAR.replace_all(task_id, "_").into_owned()
}

/// A path relative to the data root, e.g. `data/run_a/index.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn runs() -> Self {
        Self("data/runs.json".to_string())
    }

    /// Without a run id this is the legacy single-run index.
    pub fn index(run_id: Option<&str>) -> Self {
        match non_empty(run_id) {
            Some(run) => Self(format!("data/{run}/index.json")),
            None => Self("data/index.json".to_string()),
        }
    }

    pub fn task(run_id: Option<&str>, task_id: &str) -> Self {
        let safe = sanitize_task_id(task_id);
        match non_empty(run_id) {
            Some(run) => Self(format!("data/{run}/task_{safe}.json")),
            None => Self(format!("data/task_{safe}.json")),
        }
    }

    /// Prefix with the configured base and collapse repeated slashes.
    pub fn with_base(&self, base_prefix: &str) -> String {
        let joined = format!("{base_prefix}{}", self.0);
        REPEATED_SLASH.replace_all(&joined, "/").into_owned()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}
