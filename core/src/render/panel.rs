//! HTML fragments for a single task record. Each fragment degrades to its own
//! placeholder when the sub-object it renders is absent.

use serde_json::Value;

use crate::format::{
    escape_html, format_cost, format_duration, format_number, format_timestamp, or_placeholder,
    pretty_json, truncate_chars, truncate_lines, PLACEHOLDER,
};
use crate::model::{
    ActionCheck, CommunicateCheck, Message, MessageContent, Role, RunInfo, RewardInfo,
    TaskDefinition, TaskRecord, ToolCall,
};

use super::reasoning::extract_reasoning;

pub const TOOL_OUTPUT_LINE_BUDGET: usize = 40;
pub const TOOL_OUTPUT_CHAR_LIMIT: usize = 2000;

pub fn render_panel(record: &TaskRecord) -> String {
    format!(
        r#"<section class="viewer-section"><h2>Task details</h2><div class="task-details">{}</div></section><section class="viewer-section"><h2>Run info</h2><div class="run-info">{}</div></section><section class="viewer-section"><h2>Evaluation</h2><div class="eval-content">{}</div></section><section class="viewer-section"><h2>Conversation</h2><div class="timeline">{}</div></section>"#,
        render_task_details(record.task.as_ref()),
        render_run_info(record.run_info.as_ref()),
        render_evaluation(record.reward_info.as_ref()),
        render_messages(&record.messages),
    )
}

pub fn render_task_details(task: Option<&TaskDefinition>) -> String {
    let Some(i) = task.and_then(TaskDefinition::instructions) else {
        return "<p>No task details.</p>".to_string();
    };
    let fields = [
        ("Reason for call", i.reason_for_call.as_deref()),
        ("Known info", i.known_info.as_deref()),
        ("Unknown info", i.unknown_info.as_deref()),
        ("Task instructions", i.task_instructions.as_deref()),
    ];
    let mut html = String::from("<dl>");
    for (label, value) in fields {
        html.push_str(&format!(
            "<dt>{label}</dt><dd>{}</dd>",
            escape_html(or_placeholder(value))
        ));
    }
    html.push_str("</dl>");
    html
}

pub fn render_run_info(run: Option<&RunInfo>) -> String {
    let Some(run) = run else {
        return "<p>No run info.</p>".to_string();
    };
    format!(
        "<span>Duration: {}</span><span>End: {}</span><span>Termination: {}</span><span>Agent cost: {}</span><span>User cost: {}</span>",
        format_duration(run.duration_sec),
        escape_html(&format_timestamp(run.timestamp.as_deref())),
        escape_html(or_placeholder(run.termination_reason.as_deref())),
        format_cost(run.agent_cost),
        format_cost(run.user_cost),
    )
}

pub fn render_evaluation(info: Option<&RewardInfo>) -> String {
    let Some(info) = info else {
        return "<p>No evaluation.</p>".to_string();
    };
    let outcome = info.outcome();
    let reward = info.reward.unwrap_or(0.0);

    let mut html = format!(
        r#"<div class="eval-card"><div class="eval-overview"><span class="reward-box {}">Reward: {}</span>"#,
        outcome.as_str(),
        format_number(reward),
    );
    if let Some(breakdown) = info.reward_breakdown.as_ref().filter(|b| !b.is_empty()) {
        let parts: Vec<String> = breakdown
            .iter()
            .map(|(name, v)| {
                let ok = v.as_f64() == Some(1.0);
                format!("{name}: {}", if ok { "✓" } else { "✗" })
            })
            .collect();
        html.push_str(&format!(
            r#"<span class="breakdown">{}</span>"#,
            escape_html(&parts.join(" · "))
        ));
    }
    html.push_str("</div>");

    if let Some(db) = &info.db_check {
        let badge = if db.db_match == Some(true) {
            r#"<span class="reward-badge pass">Match</span>"#
        } else {
            r#"<span class="reward-badge fail">Mismatch</span>"#
        };
        html.push_str(&format!("<p><strong>DB state:</strong> {badge}</p>"));
    }

    if let Some(checks) = info.action_checks.as_ref().filter(|c| !c.is_empty()) {
        html.push_str(r#"<div class="action-checks"><strong>Action checks</strong>"#);
        for check in checks {
            html.push_str(&render_action_check(check));
        }
        html.push_str("</div>");
    }

    if let Some(checks) = info.communicate_checks.as_ref().filter(|c| !c.is_empty()) {
        html.push_str(r#"<div class="communicate-checks"><strong>Communicate checks</strong>"#);
        for check in checks {
            html.push_str(&render_communicate_check(check));
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}

/// Why an expected tool invocation did not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchReason {
    NotCalled,
    ArgumentsDiffer,
    Other,
}

impl MismatchReason {
    pub fn label(self) -> &'static str {
        match self {
            MismatchReason::NotCalled => "Tool not called",
            MismatchReason::ArgumentsDiffer => "Arguments differ",
            MismatchReason::Other => "Mismatch",
        }
    }
}

pub fn mismatch_reason(check: &ActionCheck) -> Option<MismatchReason> {
    if check.action_match == Some(true) {
        return None;
    }
    if check.tool_called == Some(false) {
        return Some(MismatchReason::NotCalled);
    }
    let expected = check.action.as_ref().and_then(|a| a.arguments.as_ref());
    match (&check.actual_arguments, check.tool_called) {
        (Some(actual), _) if Some(actual) != expected => Some(MismatchReason::ArgumentsDiffer),
        (None, Some(true)) => Some(MismatchReason::ArgumentsDiffer),
        _ => Some(MismatchReason::Other),
    }
}

fn has_arguments(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Object(m) => !m.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn render_action_check(check: &ActionCheck) -> String {
    let matched = check.action_match == Some(true);
    let name = check.action.as_ref().and_then(|a| a.name.as_deref());
    let expected_args = check.action.as_ref().and_then(|a| a.arguments.as_ref());

    let mut detail = format!(
        r#"<div class="name">{}</div>"#,
        escape_html(or_placeholder(name))
    );
    if let Some(args) = expected_args.filter(|a| has_arguments(a)) {
        detail.push_str(&format!(
            r#"<div class="args">{}</div>"#,
            escape_html(&pretty_json(args))
        ));
    }
    if let Some(reason) = mismatch_reason(check) {
        detail.push_str(&format!(
            r#"<div class="mismatch-reason">{}</div>"#,
            reason.label()
        ));
        if let Some(actual) = &check.actual_arguments {
            detail.push_str(&format!(
                r#"<div class="args actual"><em>Actual:</em> {}</div>"#,
                escape_html(&pretty_json(actual))
            ));
        }
    }

    format!(
        r#"<div class="action-check">{}<div class="check-detail">{detail}</div></div>"#,
        check_icon(matched)
    )
}

fn render_communicate_check(check: &CommunicateCheck) -> String {
    let mut detail = String::new();
    match &check.info {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) => {
            detail.push_str(&format!("<strong>Expected: {}</strong>", escape_html(s)))
        }
        Some(other) => detail.push_str(&format!(
            "<strong>Expected: {}</strong>",
            escape_html(&other.to_string())
        )),
    }
    if let Some(j) = check.justification.as_deref().filter(|j| !j.is_empty()) {
        detail.push_str(&format!(
            r#"<div class="justification">{}</div>"#,
            escape_html(j)
        ));
    }
    format!(
        r#"<div class="communicate-check">{}<div class="check-detail">{detail}</div></div>"#,
        check_icon(check.met == Some(true))
    )
}

fn check_icon(ok: bool) -> String {
    let (class, mark) = if ok { ("pass", "✓") } else { ("fail", "✗") };
    format!(r#"<span class="check-icon {class}">{mark}</span>"#)
}

pub fn render_messages(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "<p>No messages.</p>".to_string();
    }
    messages.iter().map(render_message).collect()
}

fn render_message(m: &Message) -> String {
    let role = m.role();
    let mut header = format!(
        r#"<div class="msg-header"><span>{}</span>"#,
        escape_html(role.name())
    );
    if let Some(turn) = m.turn_idx {
        header.push_str(&format!("<span>Turn {turn}</span>"));
    }
    if let Some(ts) = m.timestamp.as_deref().filter(|t| !t.is_empty()) {
        header.push_str(&format!("<span>{}</span>", escape_html(ts)));
    }
    header.push_str("</div>");

    let body = if role == Role::Tool {
        render_tool_output(m.content())
    } else {
        render_assistant_body(m)
    };

    format!(
        r#"<div class="msg-block {}">{header}{body}</div>"#,
        role.css_class()
    )
}

fn no_content() -> String {
    r#"<div class="msg-body"><em>No content</em></div>"#.to_string()
}

/// JSON output is pretty-printed in full; anything else is clipped to the
/// line budget and character cap.
pub fn tool_output_text(content: MessageContent<'_>) -> Option<String> {
    match content {
        MessageContent::Empty => None,
        MessageContent::Structured(v) => Some(pretty_json(v)),
        MessageContent::Text(s) => match serde_json::from_str::<Value>(s) {
            Ok(v @ (Value::Object(_) | Value::Array(_))) => Some(pretty_json(&v)),
            _ => Some(truncate_chars(
                &truncate_lines(s, TOOL_OUTPUT_LINE_BUDGET),
                TOOL_OUTPUT_CHAR_LIMIT,
            )),
        },
    }
}

fn render_tool_output(content: MessageContent<'_>) -> String {
    let Some(text) = tool_output_text(content) else {
        return no_content();
    };
    let lines = text.lines().count();
    format!(
        r#"<details class="tool-output"><summary>Output ({lines} line{})</summary><div class="msg-body tool-result">{}</div></details>"#,
        if lines == 1 { "" } else { "s" },
        escape_html(&text)
    )
}

fn render_assistant_body(m: &Message) -> String {
    let mut body = String::new();

    if let Some(reasoning) = extract_reasoning(m) {
        body.push_str(&format!(
            r#"<details class="reasoning"><summary>Reasoning</summary><div class="msg-body reasoning-text">{}</div></details>"#,
            escape_html(&reasoning)
        ));
    }

    if !m.tool_calls.is_empty() {
        body.push_str(r#"<div class="tool-calls-list">"#);
        for call in &m.tool_calls {
            body.push_str(&render_tool_call(call));
        }
        body.push_str("</div>");
    }

    match m.content() {
        MessageContent::Empty => {}
        MessageContent::Text(s) => {
            body.push_str(&format!(r#"<div class="msg-body">{}</div>"#, escape_html(s)))
        }
        MessageContent::Structured(v) => body.push_str(&format!(
            r#"<div class="msg-body">{}</div>"#,
            escape_html(&pretty_json(v))
        )),
    }

    if body.is_empty() {
        no_content()
    } else {
        body
    }
}

fn render_tool_call(call: &ToolCall) -> String {
    let args = match &call.arguments {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(structured) => pretty_json(structured),
    };
    format!(
        r#"<div class="tool-call-item"><div class="tool-name">{}</div><div class="tool-args">{}</div></div>"#,
        escape_html(call.name.as_deref().unwrap_or(PLACEHOLDER)),
        escape_html(&args)
    )
}
