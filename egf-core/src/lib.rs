//! EGF advisor: audited evaluation of automated decisions against the six-rule
//! ethics framework, scenario packs, and report rendering.

pub mod config;
pub mod report;
pub mod scenarios;
pub mod services;

pub use config::AdvisorConfig;
pub use report::ReportFormat;
pub use scenarios::{ExpectedOutcome, Scenario, ScenarioError, ScenarioPack};
pub use services::{Advisor, Decision, ScenarioOutcome};
