use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Attribute keys of an [`Action`], in schema order.
///
/// Validation walks this list front to back, so the first absent key is the one reported.
pub const ATTRIBUTE_NAMES: [&str; 11] = [
    "causes_severe_harm",
    "causes_minor_harm",
    "prevents_catastrophe",
    "violates_privacy",
    "has_consent",
    "deceives_human",
    "has_ethics_approval",
    "has_explanation",
    "prevents_minor_harm",
    "uses_historical_data",
    "has_bias_mitigation",
];

/// Boolean description of a candidate automated decision.
///
/// Every field is required; serde deserialization fails on an absent key rather than
/// defaulting it to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// sH: wrongful arrest, violence, or other life-changing consequences.
    pub causes_severe_harm: bool,
    /// mH: stress, repeated stops, short detainment.
    pub causes_minor_harm: bool,
    /// PC: averts a mass-casualty or comparably serious event.
    pub prevents_catastrophe: bool,
    /// VP: personal data used beyond what people expected or agreed to.
    pub violates_privacy: bool,
    /// HC: informed consent or a transparent, contestable legal mandate.
    pub has_consent: bool,
    /// DH: citizens or operators are misled about what the system does.
    pub deceives_human: bool,
    /// EA: reviewed and approved by an independent ethics or legal board.
    pub has_ethics_approval: bool,
    /// EX: decisions can be explained, audited, and traced to responsible humans.
    pub has_explanation: bool,
    /// PM: the action (or deception) prevents smaller-scale harm.
    pub prevents_minor_harm: bool,
    /// HD: trained mainly on historical crime or arrest records.
    pub uses_historical_data: bool,
    /// BM: explicit fairness techniques and regular bias audits.
    pub has_bias_mitigation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("missing required attribute `{name}`")]
    Missing { name: &'static str },

    #[error("attribute `{name}` must be a boolean, found {found}")]
    InvalidType { name: &'static str, found: &'static str },

    #[error("malformed action document: {reason}")]
    Malformed { reason: String },
}

impl AttributeError {
    /// Name of the offending attribute, if the error is tied to one.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            AttributeError::Missing { name } | AttributeError::InvalidType { name, .. } => {
                Some(*name)
            }
            AttributeError::Malformed { .. } => None,
        }
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn require(attrs: &Map<String, Value>, name: &'static str) -> Result<bool, AttributeError> {
    match attrs.get(name) {
        None => Err(AttributeError::Missing { name }),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(AttributeError::InvalidType {
            name,
            found: json_type_name(other),
        }),
    }
}

impl Action {
    /// Build an action from a dynamically-keyed attribute map.
    ///
    /// Keys outside [`ATTRIBUTE_NAMES`] are ignored. Values are never coerced: `"true"` or
    /// `1` is an [`AttributeError::InvalidType`].
    pub fn from_attributes(attrs: &Map<String, Value>) -> Result<Self, AttributeError> {
        let [sh, mh, pc, vp, hc, dh, ea, ex, pm, hd, bm] = ATTRIBUTE_NAMES;
        Ok(Action {
            causes_severe_harm: require(attrs, sh)?,
            causes_minor_harm: require(attrs, mh)?,
            prevents_catastrophe: require(attrs, pc)?,
            violates_privacy: require(attrs, vp)?,
            has_consent: require(attrs, hc)?,
            deceives_human: require(attrs, dh)?,
            has_ethics_approval: require(attrs, ea)?,
            has_explanation: require(attrs, ex)?,
            prevents_minor_harm: require(attrs, pm)?,
            uses_historical_data: require(attrs, hd)?,
            has_bias_mitigation: require(attrs, bm)?,
        })
    }

    /// Validate a JSON value whose top level must be an object of attributes.
    pub fn from_value(value: &Value) -> Result<Self, AttributeError> {
        match value {
            Value::Object(map) => Self::from_attributes(map),
            other => Err(AttributeError::Malformed {
                reason: format!("expected an object of attributes, found {}", json_type_name(other)),
            }),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, AttributeError> {
        let value: Value = serde_json::from_str(text).map_err(|e| AttributeError::Malformed {
            reason: e.to_string(),
        })?;
        Self::from_value(&value)
    }

    /// TOML documents are read as a flat table of attributes.
    pub fn from_toml_str(text: &str) -> Result<Self, AttributeError> {
        let value: Value = toml::from_str(text).map_err(|e| AttributeError::Malformed {
            reason: e.to_string(),
        })?;
        Self::from_value(&value)
    }

    pub fn to_attributes(&self) -> BTreeMap<&'static str, bool> {
        let values = [
            self.causes_severe_harm,
            self.causes_minor_harm,
            self.prevents_catastrophe,
            self.violates_privacy,
            self.has_consent,
            self.deceives_human,
            self.has_ethics_approval,
            self.has_explanation,
            self.prevents_minor_harm,
            self.uses_historical_data,
            self.has_bias_mitigation,
        ];
        ATTRIBUTE_NAMES.into_iter().zip(values).collect()
    }
}
