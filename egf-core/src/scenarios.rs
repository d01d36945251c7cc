//! Scenario packs: narrated sample actions with a predicted outcome.
//!
//! Packs are TOML documents with one `[[scenario]]` table per scenario. The embedded
//! pack (`contracts::assets::SCENARIOS_TOML`) carries the three demonstration cases.

use contracts::assets::SCENARIOS_TOML;
use contracts::{Action, AttributeError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to parse scenario pack: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("scenario {scenario:?}: {source}")]
    Attribute {
        scenario: String,
        #[source]
        source: AttributeError,
    },

    #[error("duplicate scenario key {0:?} (keys are case-insensitive)")]
    DuplicateKey(String),

    #[error("reading scenario pack {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the scenario author predicts the evaluator will return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    pub permissible: bool,
    #[serde(default)]
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub key: String,
    pub title: String,
    pub description: String,
    pub action: Action,
    pub expected: ExpectedOutcome,
}

// Actions stay untyped until validated, so a bad pack reports the missing key by name.
#[derive(Deserialize)]
struct RawScenario {
    key: String,
    title: String,
    #[serde(default)]
    description: String,
    action: Value,
    expected: ExpectedOutcome,
}

#[derive(Deserialize)]
struct RawPack {
    #[serde(default)]
    scenario: Vec<RawScenario>,
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioPack {
    pub scenarios: Vec<Scenario>,
}

impl ScenarioPack {
    /// The three built-in demonstration scenarios.
    pub fn embedded() -> Result<Self, ScenarioError> {
        Self::from_toml_str(SCENARIOS_TOML)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ScenarioError> {
        let raw: RawPack = toml::from_str(text)?;
        let mut seen = HashSet::new();
        let mut scenarios = Vec::with_capacity(raw.scenario.len());
        for r in raw.scenario {
            // Keys are looked up case-insensitively, so `a` and `A` collide.
            if !seen.insert(r.key.to_ascii_lowercase()) {
                return Err(ScenarioError::DuplicateKey(r.key));
            }
            let action = Action::from_value(&r.action).map_err(|source| {
                ScenarioError::Attribute {
                    scenario: r.key.clone(),
                    source,
                }
            })?;
            scenarios.push(Scenario {
                key: r.key,
                title: r.title,
                description: r.description,
                action,
                expected: r.expected,
            });
        }
        Ok(Self { scenarios })
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from `path` when given, else the embedded pack.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self, ScenarioError> {
        match path {
            Some(p) => Self::load(p),
            None => Self::embedded(),
        }
    }

    /// Case-insensitive lookup by scenario key.
    pub fn get(&self, key: &str) -> Option<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.key.eq_ignore_ascii_case(key))
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
