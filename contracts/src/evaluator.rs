use crate::rules::RULES;
use crate::types::{Action, AttributeError};
use serde::Serialize;
use serde_json::{Map, Value};

// ----------------- Result -----------------

/// Verdict plus the labels of every violated rule, ascending by rule index.
///
/// Fields are private and there is no `Deserialize`, so a result is permissible exactly when
/// its list is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    is_permissible: bool,
    violated_rules: Vec<String>,
}

impl EvaluationResult {
    /// Permissibility is derived from the list, never set independently.
    pub fn from_violations(violated_rules: Vec<String>) -> Self {
        Self {
            is_permissible: violated_rules.is_empty(),
            violated_rules,
        }
    }

    pub fn is_permissible(&self) -> bool {
        self.is_permissible
    }

    pub fn violated_rules(&self) -> &[String] {
        &self.violated_rules
    }

    pub fn violation_count(&self) -> usize {
        self.violated_rules.len()
    }
}

// ----------------- Core -----------------

/// Check every rule against `action`.
///
/// All six predicates run regardless of earlier hits; labels are appended in rule order.
pub fn evaluate(action: &Action) -> EvaluationResult {
    let violated = RULES
        .iter()
        .filter(|rule| rule.is_violated(action))
        .map(|rule| rule.label.to_string())
        .collect();
    EvaluationResult::from_violations(violated)
}

/// Evaluate a dynamically-keyed attribute map, rejecting absent or non-boolean keys.
pub fn evaluate_attributes(attrs: &Map<String, Value>) -> Result<EvaluationResult, AttributeError> {
    let action = Action::from_attributes(attrs)?;
    Ok(evaluate(&action))
}

/// JSON-in entry point for callers that hold the action as text.
pub fn evaluate_action_json(json_action: &str) -> Result<EvaluationResult, AttributeError> {
    let action = Action::from_json_str(json_action)?;
    Ok(evaluate(&action))
}
