//! Tables, selector options and filter links shared by the page shells.

use crate::format::{encode_query_component as enc, escape_html, format_duration, PLACEHOLDER};
use crate::join::{visible_rows, JoinRow, OutcomeFilter};
use crate::model::{Outcome, Run, TaskSummary};

fn badge(outcome: Outcome) -> String {
    format!(
        r#"<span class="reward-badge {}">{}</span>"#,
        outcome.as_str(),
        outcome.label()
    )
}

fn opt_badge(outcome: Option<Outcome>) -> String {
    match outcome {
        Some(o) => badge(o),
        None => format!(r#"<span class="reward-badge absent">{PLACEHOLDER}</span>"#),
    }
}

/// Link to the detail page of one task.
pub fn viewer_href(task_id: &str, run_id: Option<&str>) -> String {
    match run_id {
        Some(run) => format!("viewer?task={}&run={}", enc(task_id), enc(run)),
        None => format!("viewer?task={}", enc(task_id)),
    }
}

pub fn compare_href(left: &str, right: &str, task_id: Option<&str>, diff_only: bool) -> String {
    let mut href = format!("compare?left={}&right={}", enc(left), enc(right));
    if let Some(task) = task_id {
        href.push_str(&format!("&task={}", enc(task)));
    }
    if diff_only {
        href.push_str("&diff_only=1");
    }
    href
}

/// Rows hidden by the filter stay in the document with `display:none`.
pub fn task_table(tasks: &[TaskSummary], run_id: Option<&str>, filter: OutcomeFilter) -> String {
    if tasks.is_empty() {
        return r#"<p class="empty">No tasks in this run.</p>"#.to_string();
    }
    let mut html = String::from(
        "<table class=\"task-table\"><thead><tr><th>Task</th><th>Reward</th><th>Duration</th><th>Scenario</th><th></th></tr></thead><tbody>",
    );
    for t in tasks {
        let outcome = t.outcome();
        let hidden = if filter.matches(outcome) {
            ""
        } else {
            r#" style="display:none""#
        };
        let preview = t.scenario_preview.as_deref().unwrap_or(PLACEHOLDER);
        html.push_str(&format!(
            r#"<tr data-pass="{}"{hidden}><td>{}</td><td>{}</td><td>{}</td><td class="preview" title="{}">{}</td><td><a href="{}">View trajectory</a></td></tr>"#,
            outcome.is_pass(),
            escape_html(&t.task_id),
            badge(outcome),
            format_duration(t.duration_sec),
            escape_html(preview),
            escape_html(preview),
            escape_html(&viewer_href(&t.task_id, run_id)),
        ));
    }
    html.push_str("</tbody></table>");
    html
}

pub fn run_options(runs: &[&Run], selected: Option<&str>, placeholder: Option<&str>) -> String {
    let mut html = String::new();
    if let Some(p) = placeholder {
        html.push_str(&format!(r#"<option value="">{}</option>"#, escape_html(p)));
    }
    for run in runs {
        let sel = if selected == Some(run.id.as_str()) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<option value="{}"{sel}>{}</option>"#,
            escape_html(&run.id),
            escape_html(&run.display_label())
        ));
    }
    html
}

pub fn task_options(tasks: &[TaskSummary], selected: Option<&str>) -> String {
    tasks
        .iter()
        .map(|t| {
            let sel = if selected == Some(t.task_id.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{sel}>Task {} {}</option>"#,
                escape_html(&t.task_id),
                escape_html(&t.task_id),
                t.outcome().mark()
            )
        })
        .collect()
}

pub fn filter_links(run_id: Option<&str>, current: OutcomeFilter) -> String {
    let mut html = String::from(r#"<div class="filters">"#);
    for filter in OutcomeFilter::ALL {
        let mut href = format!("./?filter={}", filter.as_str());
        if let Some(run) = run_id {
            href.push_str(&format!("&run={}", enc(run)));
        }
        let active = if filter == current { " active" } else { "" };
        let label = match filter {
            OutcomeFilter::All => "All",
            OutcomeFilter::Pass => "Pass",
            OutcomeFilter::Fail => "Fail",
        };
        html.push_str(&format!(
            r#"<a class="filter-btn{active}" href="{}">{label}</a>"#,
            escape_html(&href)
        ));
    }
    html.push_str("</div>");
    html
}

/// The comparison table. Each row links to the two-panel view of its task.
pub fn join_table(rows: &[JoinRow], left: &str, right: &str, diff_only: bool) -> String {
    let mut body = String::new();
    for row in visible_rows(rows, diff_only) {
        let class = if row.is_diff { r#" class="diff""# } else { "" };
        body.push_str(&format!(
            r#"<tr{class}><td>{}</td><td>{}</td><td>{}</td><td><a class="compare-btn" href="{}">Compare</a></td></tr>"#,
            escape_html(&row.task_id),
            opt_badge(row.r1),
            opt_badge(row.r2),
            escape_html(&compare_href(left, right, Some(&row.task_id), diff_only)),
        ));
    }
    if body.is_empty() {
        return r#"<p class="empty">No tasks to show.</p>"#.to_string();
    }
    format!(
        r#"<table class="join-table"><thead><tr><th>Task</th><th>{}</th><th>{}</th><th></th></tr></thead><tbody>{body}</tbody></table>"#,
        escape_html(left),
        escape_html(right)
    )
}
