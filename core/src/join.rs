//! Outer join of two runs' task indices.
//!
//! Ordering of the joined ids: integer ids (ASCII digits with an optional
//! leading `-` or `+`) come first in ascending numeric order, negatives before
//! non-negatives. Equal values fall back to byte order, so `"01"` precedes
//! `"1"`. Every other id follows in byte-lexicographic order.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{Outcome, TaskSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRow {
    pub task_id: String,
    pub r1: Option<Outcome>,
    pub r2: Option<Outcome>,
    pub is_diff: bool,
}

impl JoinRow {
    pub fn new(task_id: String, r1: Option<Outcome>, r2: Option<Outcome>) -> Self {
        let is_diff = matches!((r1, r2), (Some(a), Some(b)) if a != b);
        Self {
            task_id,
            r1,
            r2,
            is_diff,
        }
    }
}

/// Task id wrapper carrying the join ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskKey<'a>(pub &'a str);

impl<'a> TaskKey<'a> {
    /// Sign and magnitude of an integer id (optional `-`/`+`, then ASCII
    /// digits). Leading zeros are stripped; `-0` counts as non-negative.
    fn integer(&self) -> Option<(bool, &'a str)> {
        let s = self.0;
        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let magnitude = body.trim_start_matches('0');
        Some((negative && !magnitude.is_empty(), magnitude))
    }
}

// Stripped magnitudes: longer means larger, equal length compares bytewise.
fn cmp_magnitude(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Ord for TaskKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.integer(), other.integer()) {
            (Some((na, a)), Some((nb, b))) => {
                let by_value = match (na, nb) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    (false, false) => cmp_magnitude(a, b),
                    (true, true) => cmp_magnitude(b, a),
                };
                by_value.then_with(|| self.0.cmp(other.0))
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(other.0),
        }
    }
}

impl PartialOrd for TaskKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn compare_task_ids(a: &str, b: &str) -> Ordering {
    TaskKey(a).cmp(&TaskKey(b))
}

/// Full outer join keyed by task id. Duplicate ids within one side resolve
/// to the last entry.
pub fn build_join(tasks_a: &[TaskSummary], tasks_b: &[TaskSummary]) -> Vec<JoinRow> {
    let side_a = outcomes_by_id(tasks_a);
    let side_b = outcomes_by_id(tasks_b);

    let mut ids: Vec<&str> = side_a
        .keys()
        .chain(side_b.keys())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    ids.sort_by(|a, b| compare_task_ids(a, b));

    ids.into_iter()
        .map(|id| {
            JoinRow::new(
                id.to_string(),
                side_a.get(id).copied(),
                side_b.get(id).copied(),
            )
        })
        .collect()
}

fn outcomes_by_id(tasks: &[TaskSummary]) -> HashMap<&str, Outcome> {
    tasks
        .iter()
        .map(|t| (t.task_id.as_str(), t.outcome()))
        .collect()
}

pub fn visible_rows(rows: &[JoinRow], diff_only: bool) -> impl Iterator<Item = &JoinRow> {
    rows.iter().filter(move |r| !diff_only || r.is_diff)
}

/// Counts shown above the comparison table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSummary {
    pub total: usize,
    pub diffs: usize,
    pub left_passed: usize,
    pub right_passed: usize,
    pub only_left: usize,
    pub only_right: usize,
}

impl JoinSummary {
    pub fn from_rows(rows: &[JoinRow]) -> Self {
        rows.iter().fold(
            JoinSummary {
                total: rows.len(),
                ..Default::default()
            },
            |mut acc, row| {
                if row.is_diff {
                    acc.diffs += 1;
                }
                if row.r1 == Some(Outcome::Pass) {
                    acc.left_passed += 1;
                }
                if row.r2 == Some(Outcome::Pass) {
                    acc.right_passed += 1;
                }
                match (row.r1, row.r2) {
                    (Some(_), None) => acc.only_left += 1,
                    (None, Some(_)) => acc.only_right += 1,
                    _ => {}
                }
                acc
            },
        )
    }
}

/// Pass/fail/all toggle of the single-run task table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeFilter {
    #[default]
    All,
    Pass,
    Fail,
}

impl OutcomeFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("pass") => OutcomeFilter::Pass,
            Some("fail") => OutcomeFilter::Fail,
            _ => OutcomeFilter::All,
        }
    }

    pub fn matches(self, outcome: Outcome) -> bool {
        match self {
            OutcomeFilter::All => true,
            OutcomeFilter::Pass => outcome.is_pass(),
            OutcomeFilter::Fail => !outcome.is_pass(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeFilter::All => "all",
            OutcomeFilter::Pass => "pass",
            OutcomeFilter::Fail => "fail",
        }
    }

    pub const ALL: [OutcomeFilter; 3] = [OutcomeFilter::All, OutcomeFilter::Pass, OutcomeFilter::Fail];
}
