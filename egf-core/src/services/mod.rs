pub mod advisor;

pub use advisor::{Advisor, Decision, ScenarioOutcome, decision_for};
