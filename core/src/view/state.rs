use serde::{Deserialize, Serialize};

use crate::join::{build_join, JoinRow, OutcomeFilter};
use crate::model::{Run, TaskIndex, TaskRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Index,
    Task,
}

/// Identifies the selection a fetch was issued for. A completion whose tag no
/// longer matches the slot is stale and gets dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub side: Side,
    pub kind: RequestKind,
    pub generation: u64,
}

/// Lifecycle of one asynchronously loaded piece of the view.
#[derive(Debug, Clone, Default)]
pub enum Content<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// Holds the error text; renderers show a fixed placeholder.
    Failed(String),
}

impl<T> Content<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Content::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Content::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Content::Failed(_))
    }
}

/// One side of the view: a run selection, its task index and the selected
/// task's record.
#[derive(Debug, Clone, Default)]
pub struct PanelSlot {
    pub run_id: Option<String>,
    pub run_label: Option<String>,
    pub index: Content<TaskIndex>,
    pub task_id: Option<String>,
    pub record: Content<Box<TaskRecord>>,
    pub(crate) index_generation: u64,
    pub(crate) task_generation: u64,
}

impl PanelSlot {
    pub(crate) fn tag(&self, side: Side, kind: RequestKind) -> RequestTag {
        let generation = match kind {
            RequestKind::Index => self.index_generation,
            RequestKind::Task => self.task_generation,
        };
        RequestTag {
            side,
            kind,
            generation,
        }
    }

    pub(crate) fn next_tag(&mut self, side: Side, kind: RequestKind) -> RequestTag {
        match kind {
            RequestKind::Index => self.index_generation += 1,
            RequestKind::Task => self.task_generation += 1,
        }
        self.tag(side, kind)
    }

    pub fn tasks(&self) -> Option<&[crate::model::TaskSummary]> {
        self.index.ready().map(|i| i.tasks.as_slice())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub runs: Content<Vec<Run>>,
    pub left: PanelSlot,
    pub right: PanelSlot,
    pub join_rows: Vec<JoinRow>,
    pub filter: OutcomeFilter,
    pub diff_only: bool,
}

impl ViewState {
    pub fn slot(&self, side: Side) -> &PanelSlot {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub(crate) fn slot_mut(&mut self, side: Side) -> &mut PanelSlot {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn find_run(&self, run_id: &str) -> Option<&Run> {
        self.runs.ready()?.iter().find(|r| r.id == run_id)
    }

    /// Runs offered by the second selector: those sharing the first run's
    /// domain, or every run when that domain is unknown.
    pub fn right_run_options(&self) -> Vec<&Run> {
        let Some(runs) = self.runs.ready() else {
            return Vec::new();
        };
        let domain = self
            .left
            .run_id
            .as_deref()
            .and_then(|id| self.find_run(id))
            .and_then(Run::resolved_domain);
        match domain {
            Some(d) => runs
                .iter()
                .filter(|r| r.resolved_domain() == Some(d))
                .collect(),
            None => runs.iter().collect(),
        }
    }

    /// Full recomputation; only meaningful once both indices are loaded.
    pub(crate) fn recompute_join(&mut self) {
        self.join_rows = match (self.left.tasks(), self.right.tasks()) {
            (Some(a), Some(b)) => build_join(a, b),
            _ => Vec::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(id: &str, domain: Option<&str>) -> Run {
        Run {
            id: id.into(),
            label: id.into(),
            domain: domain.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn right_options_follow_left_domain() {
        let mut state = ViewState {
            runs: Content::Ready(vec![
                run("run_a", Some("retail")),
                run("run_b", Some("retail")),
                run("run_c", Some("airline")),
            ]),
            ..Default::default()
        };
        assert_eq!(state.right_run_options().len(), 3);

        state.left.run_id = Some("run_a".into());
        let ids: Vec<_> = state.right_run_options().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["run_a", "run_b"]);
    }

    #[test]
    fn unknown_left_domain_offers_everything() {
        let state = ViewState {
            runs: Content::Ready(vec![run("solo", None), run("x_retail", None)]),
            left: PanelSlot {
                run_id: Some("solo".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(state.right_run_options().len(), 2);
    }

    #[test]
    fn tags_advance_per_kind() {
        let mut slot = PanelSlot::default();
        let first = slot.next_tag(Side::Left, RequestKind::Index);
        let task = slot.next_tag(Side::Left, RequestKind::Task);
        let second = slot.next_tag(Side::Left, RequestKind::Index);
        assert_ne!(first, second);
        assert_eq!(task.generation, 1);
        assert_eq!(slot.tag(Side::Left, RequestKind::Index), second);
    }
}
