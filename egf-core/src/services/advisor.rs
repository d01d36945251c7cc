//! services/advisor.rs
//! Audited evaluation: runs the rule evaluator and records every decision through `tracing`.

use contracts::{Action, EvaluationResult, evaluate};
use serde::Serialize;

use crate::config::AdvisorConfig;
use crate::scenarios::{ExpectedOutcome, Scenario, ScenarioPack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Permissible,
    Impermissible,
}

impl Decision {
    pub fn from_permissible(is_permissible: bool) -> Self {
        if is_permissible {
            Decision::Permissible
        } else {
            Decision::Impermissible
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Permissible => "PERMISSIBLE",
            Decision::Impermissible => "IMPERMISSIBLE",
        }
    }
}

/// Map an [`EvaluationResult`] onto a gate decision.
pub fn decision_for(result: &EvaluationResult) -> Decision {
    Decision::from_permissible(result.is_permissible())
}

/// A scenario's prediction side by side with what the evaluator returned.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub key: String,
    pub title: String,
    pub description: String,
    pub expected: ExpectedOutcome,
    pub actual: EvaluationResult,
    pub matches_prediction: bool,
}

impl ScenarioOutcome {
    pub fn decision(&self) -> Decision {
        decision_for(&self.actual)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Advisor {
    config: AdvisorConfig,
}

impl Advisor {
    pub fn new(config: AdvisorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Evaluate one action and log the decision.
    ///
    /// # Side effects
    /// * `info` event for a permissible action, `warn` with the violated labels otherwise.
    pub fn assess(&self, action: &Action) -> EvaluationResult {
        let result = evaluate(action);
        if result.is_permissible() {
            tracing::info!(decision = Decision::Permissible.as_str(), "action evaluated");
        } else {
            tracing::warn!(
                decision = Decision::Impermissible.as_str(),
                violations = result.violation_count(),
                rules = ?result.violated_rules(),
                "action evaluated"
            );
        }
        result
    }

    /// Evaluate a scenario's action and compare it with the scenario's prediction.
    ///
    /// A prediction matches only if both the verdict and the ordered label list agree.
    pub fn run_scenario(&self, scenario: &Scenario) -> ScenarioOutcome {
        let span = tracing::info_span!("scenario", key = %scenario.key);
        let _guard = span.enter();

        let actual = self.assess(&scenario.action);
        let matches_prediction = actual.is_permissible() == scenario.expected.permissible
            && actual.violated_rules() == scenario.expected.violations;
        if !matches_prediction {
            tracing::warn!(
                expected = ?scenario.expected.violations,
                actual = ?actual.violated_rules(),
                "scenario outcome differs from prediction"
            );
        }

        ScenarioOutcome {
            key: scenario.key.clone(),
            title: scenario.title.clone(),
            description: scenario.description.clone(),
            expected: scenario.expected.clone(),
            actual,
            matches_prediction,
        }
    }

    /// Run every scenario in pack order.
    pub fn run_pack(&self, pack: &ScenarioPack) -> Vec<ScenarioOutcome> {
        pack.scenarios.iter().map(|s| self.run_scenario(s)).collect()
    }
}
