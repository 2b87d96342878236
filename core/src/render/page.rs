//! Complete HTML documents for the three pages.

use crate::format::{encode_query_component as enc, escape_html, format_timestamp};
use crate::join::JoinSummary;
use crate::view::{Content, PanelSlot, Side, ViewState};

use super::panel::render_panel;
use super::tables::{filter_links, join_table, run_options, task_options, task_table, viewer_href};

const STYLE: &str = r#"
body{font-family:system-ui,sans-serif;margin:0;background:#f6f7f9;color:#1f2328}
header{background:#24292f;color:#fff;padding:12px 24px;display:flex;gap:16px;align-items:center}
header a{color:#fff;text-decoration:none}
main{padding:16px 24px}
.error{background:#ffebe9;border:1px solid #ff8182;padding:12px;border-radius:6px}
.empty{color:#656d76}
table{border-collapse:collapse;width:100%;background:#fff}
th,td{border-bottom:1px solid #d0d7de;padding:6px 8px;text-align:left;vertical-align:top}
tr.diff{background:#fff8c5}
.preview{max-width:480px;overflow:hidden;text-overflow:ellipsis;white-space:nowrap}
.reward-badge,.reward-box{padding:2px 8px;border-radius:10px;font-size:0.85em}
.pass{background:#dafbe1;color:#116329}
.fail{background:#ffebe9;color:#a40e26}
.absent{background:#eaeef2;color:#656d76}
.filters{margin:8px 0;display:flex;gap:8px}
.filter-btn{padding:4px 10px;border:1px solid #d0d7de;border-radius:6px;text-decoration:none;color:inherit}
.filter-btn.active{background:#0969da;color:#fff}
.viewer-section{background:#fff;border:1px solid #d0d7de;border-radius:6px;margin-bottom:12px;padding:8px 12px}
.run-info span{margin-right:16px}
.msg-block{border-left:3px solid #d0d7de;padding:4px 8px;margin:8px 0}
.msg-block.user{border-color:#0969da}
.msg-block.tool{border-color:#8250df}
.msg-header{font-size:0.8em;color:#656d76;display:flex;gap:12px}
.msg-body{white-space:pre-wrap;font-family:ui-monospace,monospace;font-size:0.85em}
.args{white-space:pre-wrap;font-family:ui-monospace,monospace;font-size:0.8em}
.mismatch-reason{color:#a40e26}
.panels{display:grid;grid-template-columns:1fr 1fr;gap:16px}
.nav{display:flex;justify-content:space-between;margin:8px 0}
.summary span{margin-right:16px}
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>{}</title><style>{STYLE}</style></head><body><header><strong>trajview</strong><a href="./">Runs</a><a href="compare">Compare</a></header><main>{body}</main></body></html>"#,
        escape_html(title)
    )
}

fn error_box(message: &str) -> String {
    format!(r#"<p class="error">{}</p>"#, escape_html(message))
}

/// Panel body for one slot, with the fixed placeholders for each state.
pub fn panel_body(slot: &PanelSlot) -> String {
    match &slot.record {
        Content::Ready(record) => render_panel(record),
        Content::Failed(_) => error_box("Failed to load task."),
        Content::Loading => r#"<p class="empty">Loading…</p>"#.to_string(),
        Content::Idle => r#"<p class="empty">Select run and task.</p>"#.to_string(),
    }
}

pub fn index_page(state: &ViewState) -> String {
    let slot = &state.left;
    let run_id = slot.run_id.as_deref();
    let mut body = String::new();

    if let Some(runs) = state.runs.ready().filter(|r| !r.is_empty()) {
        let all: Vec<_> = runs.iter().collect();
        body.push_str(&format!(
            r#"<form method="get" action="./"><label>Run <select name="run" onchange="this.form.submit()">{}</select></label><input type="hidden" name="filter" value="{}"><noscript><button type="submit">Show</button></noscript></form>"#,
            run_options(&all, run_id, None),
            state.filter.as_str()
        ));
    }

    match &slot.index {
        Content::Ready(index) => {
            let total = index.tasks.len();
            let passed = index.tasks.iter().filter(|t| t.outcome().is_pass()).count();
            body.push_str(&format!(
                r#"<div class="summary"><span>Tasks: {total}</span><span>Passed: {passed}</span>"#
            ));
            if index.run_timestamp.is_some() {
                body.push_str(&format!(
                    "<span>Run: {}</span>",
                    escape_html(&format_timestamp(index.run_timestamp.as_deref()))
                ));
            }
            body.push_str("</div>");
            body.push_str(&filter_links(run_id, state.filter));
            body.push_str(&task_table(&index.tasks, run_id, state.filter));
        }
        Content::Failed(_) => {
            if state.runs.is_failed() {
                body.push_str(&error_box("Could not load runs."));
            }
            body.push_str(&error_box("Could not load task index."));
        }
        Content::Loading => body.push_str(r#"<p class="empty">Loading…</p>"#),
        Content::Idle => body.push_str(r#"<p class="empty">No runs. Export trajectories first.</p>"#),
    }

    let title = slot.run_label.as_deref().unwrap_or("Trajectories");
    layout(title, &body)
}

/// Neighbouring task ids in the run's index order.
fn neighbours<'a>(slot: &'a PanelSlot, task_id: &str) -> (Option<&'a str>, Option<&'a str>) {
    let Some(tasks) = slot.tasks() else {
        return (None, None);
    };
    let Some(pos) = tasks.iter().position(|t| t.task_id == task_id) else {
        return (None, None);
    };
    let prev = pos.checked_sub(1).map(|i| tasks[i].task_id.as_str());
    let next = tasks.get(pos + 1).map(|t| t.task_id.as_str());
    (prev, next)
}

pub fn viewer_page(state: &ViewState) -> String {
    let slot = &state.left;
    let Some(task_id) = slot.task_id.as_deref() else {
        return layout("Task", &error_box("Missing task id. Use ?task=1"));
    };
    let run_id = slot.run_id.as_deref();

    let back = match run_id {
        Some(run) => format!("./?run={}", enc(run)),
        None => "./".to_string(),
    };
    let mut heading = format!("Task {task_id}");
    if let Some(label) = slot.run_label.as_deref() {
        heading.push_str(&format!(" · {label}"));
    }

    let (prev, next) = neighbours(slot, task_id);
    let nav_link = |id: Option<&str>, text: &str| match id {
        Some(id) => format!(
            r#"<a href="{}">{text}</a>"#,
            escape_html(&viewer_href(id, run_id))
        ),
        None => "<span></span>".to_string(),
    };

    let body = format!(
        r#"<p><a href="{}">← Back to tasks</a></p><h1>{}</h1><div class="nav">{}{}</div>{}"#,
        escape_html(&back),
        escape_html(&heading),
        nav_link(prev, "← Previous"),
        nav_link(next, "Next →"),
        panel_body(slot),
    );
    layout(&heading, &body)
}

fn compare_panel(state: &ViewState, side: Side) -> String {
    let slot = state.slot(side);
    let label = slot
        .run_label
        .as_deref()
        .or(slot.run_id.as_deref())
        .unwrap_or("No run selected");
    format!(
        r#"<div class="panel {}"><h2>{}</h2>{}</div>"#,
        side.as_str(),
        escape_html(label),
        panel_body(slot)
    )
}

pub fn compare_page(state: &ViewState) -> String {
    let runs = match &state.runs {
        Content::Ready(runs) if !runs.is_empty() => runs,
        Content::Failed(_) => return layout("Compare", &error_box("Could not load runs.")),
        _ => {
            return layout(
                "Compare",
                r#"<p class="empty">No runs. Export trajectories first.</p>"#,
            )
        }
    };
    let left = state.left.run_id.as_deref();
    let right = state.right.run_id.as_deref();

    let all: Vec<_> = runs.iter().collect();
    let checked = if state.diff_only { " checked" } else { "" };
    let mut body = format!(
        r#"<form method="get" action="compare"><label>Left <select name="left">{}</select></label> <label>Right <select name="right">{}</select></label> <label><input type="checkbox" name="diff_only" value="1"{checked}> Differences only</label> <button type="submit">Compare</button></form>"#,
        run_options(&all, left, Some("Select run")),
        run_options(&state.right_run_options(), right, Some("Select run")),
    );

    let (Some(left), Some(right)) = (left, right) else {
        body.push_str(r#"<p class="empty">Select two runs to compare.</p>"#);
        return layout("Compare", &body);
    };

    if state.left.index.is_failed() || state.right.index.is_failed() {
        body.push_str(&error_box("Could not load task index."));
    } else {
        let summary = JoinSummary::from_rows(&state.join_rows);
        body.push_str(&format!(
            r#"<div class="summary"><span>Tasks: {}</span><span>Differences: {}</span><span>Left passed: {}</span><span>Right passed: {}</span><span>Only left: {}</span><span>Only right: {}</span></div>"#,
            summary.total,
            summary.diffs,
            summary.left_passed,
            summary.right_passed,
            summary.only_left,
            summary.only_right,
        ));
        body.push_str(&join_table(&state.join_rows, left, right, state.diff_only));
    }

    let selected = state.left.task_id.as_deref().or(state.right.task_id.as_deref());
    if let Some(tasks) = state.left.tasks() {
        let diff = if state.diff_only {
            r#"<input type="hidden" name="diff_only" value="1">"#
        } else {
            ""
        };
        body.push_str(&format!(
            r#"<form method="get" action="compare"><input type="hidden" name="left" value="{}"><input type="hidden" name="right" value="{}">{diff}<label>Task <select name="task" onchange="this.form.submit()"><option value="">Select task</option>{}</select></label></form>"#,
            escape_html(left),
            escape_html(right),
            task_options(tasks, selected),
        ));
    }
    if selected.is_some() {
        body.push_str(&format!(
            r#"<div class="panels">{}{}</div>"#,
            compare_panel(state, Side::Left),
            compare_panel(state, Side::Right),
        ));
    }
    layout("Compare", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::model::{TaskIndex, TaskRecord, TaskSummary};

    fn slot_with_task(task: &str) -> PanelSlot {
        PanelSlot {
            run_id: Some("run_a".into()),
            run_label: Some("A (1/2)".into()),
            task_id: Some(task.into()),
            index: Content::Ready(TaskIndex {
                tasks: ["1", "2", "3"]
                    .iter()
                    .map(|id| TaskSummary {
                        task_id: id.to_string(),
                        ..Default::default()
                    })
                    .collect(),
                run_timestamp: None,
            }),
            record: Content::Ready(Box::default()),
            ..Default::default()
        }
    }

    #[test]
    fn viewer_without_task_is_blocked() {
        let html = viewer_page(&ViewState::default());
        assert!(html.contains("Missing task id. Use ?task=1"));
        assert!(!html.contains("viewer-section"));
    }

    #[test]
    fn viewer_links_back_and_to_neighbours() {
        let state = ViewState {
            left: slot_with_task("2"),
            ..Default::default()
        };
        let html = viewer_page(&state);
        assert!(html.contains(r#"href="./?run=run_a""#));
        assert!(html.contains("Task 2 · A (1/2)"));
        assert!(html.contains("viewer?task=1&amp;run=run_a"));
        assert!(html.contains("viewer?task=3&amp;run=run_a"));
    }

    #[test]
    fn failed_record_shows_placeholder() {
        let mut slot = slot_with_task("9");
        slot.record = Content::Failed(
            LoadError::NotFound {
                path: "data/run_a/task_9.json".into(),
            }
            .to_string(),
        );
        let html = panel_body(&slot);
        assert!(html.contains("Failed to load task."));
        assert!(!html.contains("data/run_a"));
    }

    #[test]
    fn index_page_without_data() {
        let state = ViewState {
            runs: Content::Ready(Vec::new()),
            ..Default::default()
        };
        assert!(index_page(&state).contains("No runs. Export trajectories first."));

        let state = ViewState {
            runs: Content::Failed("boom".into()),
            left: PanelSlot {
                index: Content::Failed("boom".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let html = index_page(&state);
        assert!(html.contains("Could not load runs."));
        assert!(html.contains("Could not load task index."));
    }

    #[test]
    fn compare_panels_render_independently() {
        let mut right = slot_with_task("2");
        right.run_id = Some("run_b".into());
        right.record = Content::Ready(Box::new(TaskRecord::default()));
        let mut left = slot_with_task("2");
        left.record = Content::Failed("404".into());
        let state = ViewState {
            runs: Content::Ready(vec![crate::model::Run {
                id: "run_a".into(),
                ..Default::default()
            }]),
            left,
            right,
            ..Default::default()
        };
        let html = compare_page(&state);
        assert!(html.contains("Failed to load task."));
        assert!(html.contains("viewer-section"));
    }
}
