//! Six-rule propositional ethics evaluator for automated decisions.
//!
//! Pure and stateless: no I/O beyond the asset seeding helper, no logging, no shared state.

pub mod assets;
pub mod evaluator;
pub mod rules;
pub mod types;

pub use assets::write_default_scenarios;
pub use evaluator::{evaluate, evaluate_action_json, evaluate_attributes, EvaluationResult};
pub use rules::{rule, ViolationRule, RULES};
pub use types::{Action, AttributeError, ATTRIBUTE_NAMES};
