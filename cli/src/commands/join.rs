//! `trajview join`: compare two runs task by task.

use serde::Serialize;
use trajview_core::api::{build_join, CliError, JoinRow, JoinSummary, Loader};
use trajview_core::join::visible_rows;
use trajview_core::model::Outcome;

use super::cli::{JoinArgs, OutputFormat};

/// Output of `join`; the summary always covers every row.
#[derive(Debug, Serialize)]
pub struct JoinReport<'a> {
    pub left: &'a str,
    pub right: &'a str,
    pub summary: JoinSummary,
    pub rows: Vec<&'a JoinRow>,
}

fn mark(outcome: Option<Outcome>) -> &'static str {
    outcome.map_or("-", Outcome::mark)
}

/// Loads both indices concurrently and prints the joined rows.
pub async fn handle_join(args: JoinArgs, loader: &Loader) -> Result<(), CliError> {
    let (left, right) = tokio::join!(
        loader.index(Some(&args.left)),
        loader.index(Some(&args.right))
    );
    let rows = build_join(&left?.tasks, &right?.tasks);
    let report = JoinReport {
        left: &args.left,
        right: &args.right,
        summary: JoinSummary::from_rows(&rows),
        rows: visible_rows(&rows, args.diff_only).collect(),
    };

    match args.format {
        OutputFormat::Json => {
            let out = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::Command(format!("failed to encode join: {e}")))?;
            println!("{out}");
        }
        OutputFormat::Text => print!("{}", render_text(&report)),
    }
    Ok(())
}

/// Tab-separated rows, `diff` flagged, then a one-line summary.
fn render_text(report: &JoinReport<'_>) -> String {
    let mut out = format!("task\t{}\t{}\n", report.left, report.right);
    for row in &report.rows {
        out.push_str(&format!(
            "{}\t{}\t{}{}\n",
            row.task_id,
            mark(row.r1),
            mark(row.r2),
            if row.is_diff { "\tdiff" } else { "" }
        ));
    }
    let s = &report.summary;
    out.push_str(&format!(
        "{} tasks, {} differ, passed {}/{}\n",
        s.total, s.diffs, s.left_passed, s.right_passed
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajview_core::model::TaskSummary;

    #[test]
    fn text_report_flags_diffs() {
        let a = [TaskSummary {
            task_id: "5".into(),
            reward: Some(0.0),
            ..Default::default()
        }];
        let b = [TaskSummary {
            task_id: "5".into(),
            reward: Some(1.0),
            ..Default::default()
        }];
        let rows = build_join(&a, &b);
        let report = JoinReport {
            left: "run_a",
            right: "run_b",
            summary: JoinSummary::from_rows(&rows),
            rows: rows.iter().collect(),
        };
        let text = render_text(&report);
        assert!(text.starts_with("task\trun_a\trun_b\n"));
        assert!(text.contains("5\t✗\t✓\tdiff\n"));
        assert!(text.ends_with("1 tasks, 1 differ, passed 0/1\n"));
    }
}
