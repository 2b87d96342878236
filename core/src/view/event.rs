//! The reducer: every user action or fetch completion is an event applied to
//! an owned [`ViewState`], producing the next state and the fetches to issue.

use crate::error::LoadError;
use crate::join::OutcomeFilter;
use crate::model::{RunList, TaskIndex, TaskRecord};

use super::state::{Content, RequestKind, RequestTag, Side, ViewState};

#[derive(Debug)]
pub enum ViewEvent {
    /// Page load: fetch the run list.
    Init,
    RunsLoaded(Result<RunList, LoadError>),
    /// `None` clears the side.
    SelectRun {
        side: Side,
        run_id: Option<String>,
    },
    /// Single-run data laid out without a run directory.
    UseLegacyIndex,
    IndexLoaded {
        tag: RequestTag,
        result: Result<TaskIndex, LoadError>,
    },
    SelectTask {
        side: Side,
        task_id: Option<String>,
    },
    /// Opens the same task in both panels.
    CompareTask {
        task_id: String,
    },
    TaskLoaded {
        tag: RequestTag,
        result: Result<TaskRecord, LoadError>,
    },
    SetFilter(OutcomeFilter),
    SetDiffOnly(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadRuns,
    LoadIndex {
        tag: RequestTag,
        run_id: Option<String>,
    },
    LoadTask {
        tag: RequestTag,
        run_id: Option<String>,
        task_id: String,
    },
}

impl ViewState {
    pub fn apply(mut self, event: ViewEvent) -> (ViewState, Vec<Effect>) {
        let mut effects = Vec::new();
        match event {
            ViewEvent::Init => {
                self.runs = Content::Loading;
                effects.push(Effect::LoadRuns);
            }
            ViewEvent::RunsLoaded(result) => {
                self.runs = match result {
                    Ok(list) => Content::Ready(list.runs),
                    Err(e) => Content::Failed(e.to_string()),
                };
                self.refresh_labels();
            }
            ViewEvent::SelectRun { side, run_id } => {
                let run_id = run_id.filter(|id| !id.is_empty());
                let run_id = match side {
                    Side::Right => run_id.filter(|id| self.right_allows(id)),
                    Side::Left => run_id,
                };
                effects.extend(self.select_run(side, run_id));
                if side == Side::Left {
                    effects.extend(self.drop_incompatible_right());
                }
                self.recompute_join();
            }
            ViewEvent::UseLegacyIndex => {
                let slot = &mut self.left;
                slot.run_id = None;
                slot.run_label = None;
                reset_task(slot, Side::Left);
                let tag = slot.next_tag(Side::Left, RequestKind::Index);
                slot.index = Content::Loading;
                effects.push(Effect::LoadIndex { tag, run_id: None });
                self.recompute_join();
            }
            ViewEvent::IndexLoaded { tag, result } => {
                let slot = self.slot_mut(tag.side);
                if slot.tag(tag.side, RequestKind::Index) != tag {
                    tracing::debug!(side = tag.side.as_str(), generation = tag.generation, "dropping stale index response");
                    return (self, effects);
                }
                slot.index = match result {
                    Ok(index) => Content::Ready(index),
                    Err(e) => Content::Failed(e.to_string()),
                };
                self.recompute_join();
            }
            ViewEvent::SelectTask { side, task_id } => {
                effects.extend(self.select_task(side, task_id));
            }
            ViewEvent::CompareTask { task_id } => {
                for side in Side::BOTH {
                    if self.slot(side).run_id.is_some() {
                        effects.extend(self.select_task(side, Some(task_id.clone())));
                    } else {
                        let slot = self.slot_mut(side);
                        reset_task(slot, side);
                        slot.task_id = Some(task_id.clone());
                    }
                }
            }
            ViewEvent::TaskLoaded { tag, result } => {
                let slot = self.slot_mut(tag.side);
                if slot.tag(tag.side, RequestKind::Task) != tag {
                    tracing::debug!(side = tag.side.as_str(), generation = tag.generation, "dropping stale task response");
                    return (self, effects);
                }
                slot.record = match result {
                    Ok(record) => Content::Ready(Box::new(record)),
                    Err(e) => Content::Failed(e.to_string()),
                };
            }
            ViewEvent::SetFilter(filter) => self.filter = filter,
            ViewEvent::SetDiffOnly(on) => self.diff_only = on,
        }
        (self, effects)
    }

    fn select_run(&mut self, side: Side, run_id: Option<String>) -> Option<Effect> {
        let label = run_id
            .as_deref()
            .map(|id| self.find_run(id).map_or_else(|| id.to_string(), |r| r.display_label()));
        let slot = self.slot_mut(side);
        slot.run_id = run_id.clone();
        slot.run_label = label;
        reset_task(slot, side);
        let tag = slot.next_tag(side, RequestKind::Index);
        match run_id {
            Some(run_id) => {
                slot.index = Content::Loading;
                Some(Effect::LoadIndex {
                    tag,
                    run_id: Some(run_id),
                })
            }
            None => {
                slot.index = Content::Idle;
                None
            }
        }
    }

    /// Without a run list there is nothing to constrain against.
    fn right_allows(&self, run_id: &str) -> bool {
        if self.runs.ready().is_none() {
            return true;
        }
        let allowed = self.right_run_options().iter().any(|r| r.id == run_id);
        if !allowed {
            tracing::debug!(run_id, "right run outside the selected domain");
        }
        allowed
    }

    /// A left-hand change can leave the right selection outside the allowed
    /// domain; such a selection is cleared.
    fn drop_incompatible_right(&mut self) -> Option<Effect> {
        let right = self.right.run_id.clone()?;
        if self.right_allows(&right) {
            return None;
        }
        self.select_run(Side::Right, None)
    }

    fn select_task(&mut self, side: Side, task_id: Option<String>) -> Option<Effect> {
        let task_id = task_id.filter(|id| !id.is_empty());
        let slot = self.slot_mut(side);
        let tag = slot.next_tag(side, RequestKind::Task);
        slot.task_id = task_id.clone();
        match task_id {
            Some(task_id) => {
                slot.record = Content::Loading;
                Some(Effect::LoadTask {
                    tag,
                    run_id: slot.run_id.clone(),
                    task_id,
                })
            }
            None => {
                slot.record = Content::Idle;
                None
            }
        }
    }

    fn refresh_labels(&mut self) {
        for side in Side::BOTH {
            let Some(id) = self.slot(side).run_id.clone() else {
                continue;
            };
            if let Some(label) = self.find_run(&id).map(|r| r.display_label()) {
                self.slot_mut(side).run_label = Some(label);
            }
        }
    }
}

/// Invalidate whatever task fetch is in flight for the slot.
fn reset_task(slot: &mut super::state::PanelSlot, side: Side) {
    slot.next_tag(side, RequestKind::Task);
    slot.task_id = None;
    slot.record = Content::Idle;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Outcome, Run, TaskSummary};

    fn runs() -> RunList {
        RunList {
            runs: vec![
                Run {
                    id: "run_a".into(),
                    label: "A".into(),
                    domain: Some("retail".into()),
                    num_tasks: 1,
                    ..Default::default()
                },
                Run {
                    id: "run_b".into(),
                    label: "B".into(),
                    domain: Some("retail".into()),
                    num_tasks: 1,
                    ..Default::default()
                },
                Run {
                    id: "run_c".into(),
                    label: "C".into(),
                    domain: Some("airline".into()),
                    num_tasks: 1,
                    ..Default::default()
                },
            ],
        }
    }

    fn index(tasks: &[(&str, f64)]) -> TaskIndex {
        TaskIndex {
            tasks: tasks
                .iter()
                .map(|(id, reward)| TaskSummary {
                    task_id: id.to_string(),
                    reward: Some(*reward),
                    ..Default::default()
                })
                .collect(),
            run_timestamp: None,
        }
    }

    fn loaded() -> ViewState {
        let (s, _) = ViewState::default().apply(ViewEvent::Init);
        let (s, _) = s.apply(ViewEvent::RunsLoaded(Ok(runs())));
        s
    }

    fn index_tag(effects: &[Effect]) -> RequestTag {
        match &effects[0] {
            Effect::LoadIndex { tag, .. } => *tag,
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn init_requests_runs() {
        let (s, effects) = ViewState::default().apply(ViewEvent::Init);
        assert_eq!(effects, vec![Effect::LoadRuns]);
        assert!(s.runs.is_loading());
    }

    #[test]
    fn selecting_run_loads_its_index() {
        let (s, effects) = loaded().apply(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some("run_a".into()),
        });
        assert_eq!(
            effects,
            vec![Effect::LoadIndex {
                tag: s.left.tag(Side::Left, RequestKind::Index),
                run_id: Some("run_a".into()),
            }]
        );
        assert_eq!(s.left.run_label.as_deref(), Some("A (1)"));
        assert!(s.left.index.is_loading());
    }

    #[test]
    fn stale_index_response_is_discarded() {
        let (s, first) = loaded().apply(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some("run_a".into()),
        });
        let (s, second) = s.apply(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some("run_b".into()),
        });
        let (s, _) = s.apply(ViewEvent::IndexLoaded {
            tag: index_tag(&first),
            result: Ok(index(&[("1", 1.0)])),
        });
        assert!(s.left.index.is_loading(), "stale response must not land");

        let (s, _) = s.apply(ViewEvent::IndexLoaded {
            tag: index_tag(&second),
            result: Ok(index(&[("2", 0.0)])),
        });
        assert_eq!(s.left.tasks().unwrap()[0].task_id, "2");
    }

    #[test]
    fn stale_task_response_is_discarded() {
        let (s, _) = loaded().apply(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some("run_a".into()),
        });
        let (s, first) = s.apply(ViewEvent::SelectTask {
            side: Side::Left,
            task_id: Some("1".into()),
        });
        let (s, _) = s.apply(ViewEvent::SelectTask {
            side: Side::Left,
            task_id: Some("2".into()),
        });
        let Effect::LoadTask { tag, .. } = first[0].clone() else {
            panic!("expected task load");
        };
        let (s, _) = s.apply(ViewEvent::TaskLoaded {
            tag,
            result: Ok(TaskRecord::default()),
        });
        assert!(s.left.record.is_loading());
        assert_eq!(s.left.task_id.as_deref(), Some("2"));
    }

    #[test]
    fn join_recomputes_when_both_sides_load() {
        let (s, a) = loaded().apply(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some("run_a".into()),
        });
        let (s, b) = s.apply(ViewEvent::SelectRun {
            side: Side::Right,
            run_id: Some("run_b".into()),
        });
        let (s, _) = s.apply(ViewEvent::IndexLoaded {
            tag: index_tag(&a),
            result: Ok(index(&[("5", 0.0)])),
        });
        assert!(s.join_rows.is_empty());
        let (s, _) = s.apply(ViewEvent::IndexLoaded {
            tag: index_tag(&b),
            result: Ok(index(&[("5", 1.0)])),
        });
        assert_eq!(s.join_rows.len(), 1);
        assert_eq!(s.join_rows[0].r1, Some(Outcome::Fail));
        assert_eq!(s.join_rows[0].r2, Some(Outcome::Pass));
        assert!(s.join_rows[0].is_diff);

        // Changing a side drops the previous rows until the new index arrives.
        let (s, _) = s.apply(ViewEvent::SelectRun {
            side: Side::Right,
            run_id: Some("run_a".into()),
        });
        assert!(s.join_rows.is_empty());
    }

    #[test]
    fn left_domain_change_clears_incompatible_right() {
        let (s, _) = loaded().apply(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some("run_a".into()),
        });
        let (s, _) = s.apply(ViewEvent::SelectRun {
            side: Side::Right,
            run_id: Some("run_b".into()),
        });
        let (s, _) = s.apply(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some("run_c".into()),
        });
        assert_eq!(s.right.run_id, None);
        assert!(matches!(s.right.index, Content::Idle));
    }

    #[test]
    fn right_selection_outside_domain_is_refused() {
        let (s, _) = loaded().apply(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some("run_a".into()),
        });
        let (s, effects) = s.apply(ViewEvent::SelectRun {
            side: Side::Right,
            run_id: Some("run_c".into()),
        });
        assert!(effects.is_empty());
        assert_eq!(s.right.run_id, None);
    }

    #[test]
    fn compare_task_loads_both_panels() {
        let (s, _) = loaded().apply(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some("run_a".into()),
        });
        let (s, _) = s.apply(ViewEvent::SelectRun {
            side: Side::Right,
            run_id: Some("run_b".into()),
        });
        let (s, effects) = s.apply(ViewEvent::CompareTask {
            task_id: "5".into(),
        });
        assert_eq!(effects.len(), 2);
        assert!(s.left.record.is_loading());
        assert!(s.right.record.is_loading());
    }

    #[test]
    fn one_failed_panel_leaves_the_other_intact() {
        let (s, _) = loaded().apply(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some("run_a".into()),
        });
        let (s, _) = s.apply(ViewEvent::SelectRun {
            side: Side::Right,
            run_id: Some("run_b".into()),
        });
        let (s, effects) = s.apply(ViewEvent::CompareTask {
            task_id: "5".into(),
        });
        let tags: Vec<RequestTag> = effects
            .iter()
            .map(|e| match e {
                Effect::LoadTask { tag, .. } => *tag,
                other => panic!("unexpected effect {other:?}"),
            })
            .collect();
        let (s, _) = s.apply(ViewEvent::TaskLoaded {
            tag: tags[0],
            result: Err(LoadError::NotFound {
                path: "data/run_a/task_5.json".into(),
            }),
        });
        let (s, _) = s.apply(ViewEvent::TaskLoaded {
            tag: tags[1],
            result: Ok(TaskRecord::default()),
        });
        assert!(s.left.record.is_failed());
        assert!(s.right.record.ready().is_some());
    }

    #[test]
    fn filter_and_diff_toggles() {
        let (s, _) = ViewState::default().apply(ViewEvent::SetFilter(OutcomeFilter::Pass));
        let (s, _) = s.apply(ViewEvent::SetDiffOnly(true));
        assert_eq!(s.filter, OutcomeFilter::Pass);
        assert!(s.diff_only);
    }
}
