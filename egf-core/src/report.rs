//! Human-readable and JSON rendering of evaluation results. Formatting only.

use contracts::{EvaluationResult, RULES};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

use crate::config::ReportConfig;
use crate::services::{Decision, ScenarioOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format {other:?} (expected text or json)")),
        }
    }
}

pub fn status_word(is_permissible: bool) -> &'static str {
    Decision::from_permissible(is_permissible).as_str()
}

/// Render a list of labels as a Python list literal, e.g. `['a', 'b']`.
///
/// Backslashes are always doubled. Single quotes are used unless the label contains a
/// single quote and no double quote.
pub fn format_label_list<S: AsRef<str>>(labels: &[S]) -> String {
    let items: Vec<String> = labels
        .iter()
        .map(|l| {
            let l = l.as_ref();
            let escaped = l.replace('\\', "\\\\");
            if l.contains('\'') && !l.contains('"') {
                format!("\"{escaped}\"")
            } else {
                format!("'{}'", escaped.replace('\'', "\\'"))
            }
        })
        .collect();
    format!("[{}]", items.join(", "))
}

/// Prediction and actual result for one scenario, followed by a separator rule.
pub fn render_outcome_text(outcome: &ScenarioOutcome, cfg: &ReportConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Evaluating {} ---", outcome.title);
    if cfg.show_narrative {
        let _ = writeln!(out, "Narrative: {}", outcome.description.trim());
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Predicted Outcome: {}.",
        status_word(outcome.expected.permissible)
    );
    let _ = writeln!(
        out,
        "Expected Violations: {}",
        format_label_list(&outcome.expected.violations)
    );
    out.push('\n');
    out.push_str("Actual Output:\n");
    out.push_str(&render_result_text(&outcome.actual));
    let _ = writeln!(out, "\n{}\n", "-".repeat(cfg.separator_width));
    out
}

pub fn render_result_text(result: &EvaluationResult) -> String {
    format!(
        "Action is {}.\nViolated Rules: {}\n",
        status_word(result.is_permissible()),
        format_label_list(result.violated_rules())
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleSummary {
    pub index: u8,
    pub principle: &'static str,
    pub label: &'static str,
    pub formula: &'static str,
}

pub fn rule_summaries() -> Vec<RuleSummary> {
    RULES
        .iter()
        .map(|r| RuleSummary {
            index: r.index,
            principle: r.principle,
            label: r.label,
            formula: r.formula,
        })
        .collect()
}

pub fn render_rules_text() -> String {
    let mut out = String::new();
    for r in &RULES {
        let _ = writeln!(out, "{}\n    {}", r.label, r.formula);
    }
    out.push_str("\nPermissible := ¬V1 ∧ ¬V2 ∧ ¬V3 ∧ ¬V4 ∧ ¬V5 ∧ ¬V6\n");
    out
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
