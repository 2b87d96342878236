//! Wiring of each page's navigation parameters into reducer events.

use serde::Deserialize;

use crate::join::OutcomeFilter;
use crate::loader::Loader;

use super::driver::drive;
use super::event::ViewEvent;
use super::state::{Side, ViewState};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexQuery {
    pub run: Option<String>,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerQuery {
    pub task: Option<String>,
    pub run: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareQuery {
    pub left: Option<String>,
    pub right: Option<String>,
    pub task: Option<String>,
    #[serde(default, deserialize_with = "de_checkbox")]
    pub diff_only: bool,
}

/// HTML checkboxes submit `on`; links generated here use `1`.
fn de_checkbox<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(d)?;
    Ok(matches!(
        raw.as_deref().map(str::trim),
        Some("1" | "on" | "true" | "yes")
    ))
}

/// Blank parameters count as absent; anything else passes through untouched.
fn non_empty(v: &Option<String>) -> Option<String> {
    v.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

/// Run list plus one run's task table. Without `run` the first listed run is
/// shown, falling back to the legacy single-run index when no run list exists.
pub async fn index_view(loader: &Loader, query: &IndexQuery) -> ViewState {
    let state = drive(loader, ViewState::default(), [ViewEvent::Init]).await;

    let filter = OutcomeFilter::parse(query.filter.as_deref());
    let select = match non_empty(&query.run) {
        Some(run) => ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some(run),
        },
        None => match state.runs.ready().and_then(|runs| runs.first()) {
            Some(first) => ViewEvent::SelectRun {
                side: Side::Left,
                run_id: Some(first.id.clone()),
            },
            None => ViewEvent::UseLegacyIndex,
        },
    };
    drive(loader, state, [ViewEvent::SetFilter(filter), select]).await
}

/// The detail view. Without `task` nothing is fetched; the page renders the
/// blocking error instead.
pub async fn viewer_view(loader: &Loader, query: &ViewerQuery) -> ViewState {
    let Some(task) = non_empty(&query.task) else {
        return ViewState::default();
    };
    let (state, select_run) = match non_empty(&query.run) {
        Some(run) => (
            drive(loader, ViewState::default(), [ViewEvent::Init]).await,
            ViewEvent::SelectRun {
                side: Side::Left,
                run_id: Some(run),
            },
        ),
        None => (ViewState::default(), ViewEvent::UseLegacyIndex),
    };
    let select_task = ViewEvent::SelectTask {
        side: Side::Left,
        task_id: Some(task),
    };
    drive(loader, state, [select_run, select_task]).await
}

/// Two run selectors, the joined table and optionally the two-panel view of
/// one task.
pub async fn compare_view(loader: &Loader, query: &CompareQuery) -> ViewState {
    let state = drive(loader, ViewState::default(), [ViewEvent::Init]).await;

    let mut events = vec![ViewEvent::SetDiffOnly(query.diff_only)];
    if let Some(left) = non_empty(&query.left) {
        events.push(ViewEvent::SelectRun {
            side: Side::Left,
            run_id: Some(left),
        });
    }
    if let Some(right) = non_empty(&query.right) {
        events.push(ViewEvent::SelectRun {
            side: Side::Right,
            run_id: Some(right),
        });
    }
    if let Some(task) = non_empty(&query.task) {
        events.push(ViewEvent::CompareTask { task_id: task });
    }
    drive(loader, state, events).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_values() {
        let q: CompareQuery = serde_json::from_str(r#"{"diff_only": "on"}"#).unwrap();
        assert!(q.diff_only);
        let q: CompareQuery = serde_json::from_str(r#"{"diff_only": "0"}"#).unwrap();
        assert!(!q.diff_only);
        let q: CompareQuery = serde_json::from_str("{}").unwrap();
        assert!(!q.diff_only);
    }

    #[test]
    fn blank_params_are_absent_but_ids_are_not_trimmed() {
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some("  ".into())), None);
        assert_eq!(non_empty(&Some(" 5".into())), Some(" 5".to_string()));
        assert_eq!(non_empty(&Some("5".into())), Some("5".to_string()));
    }
}
