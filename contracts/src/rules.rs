//! The fixed rule set.
//!
//! Each rule is a violation predicate: `true` means the action breaches the principle.
//! Permissibility is `¬(V1 ∨ V2 ∨ V3 ∨ V4 ∨ V5 ∨ V6)`, i.e. `¬V1 ∧ … ∧ ¬V6`.

use crate::types::Action;

/// A named violation predicate over an [`Action`].
#[derive(Debug, Clone, Copy)]
pub struct ViolationRule {
    /// Stable index, 1 through 6. Results are always ordered by it.
    pub index: u8,
    pub principle: &'static str,
    /// Exact label emitted in results; downstream consumers match on it.
    pub label: &'static str,
    pub formula: &'static str,
    pub predicate: fn(&Action) -> bool,
}

impl ViolationRule {
    pub fn is_violated(&self, action: &Action) -> bool {
        (self.predicate)(action)
    }
}

fn non_maleficence(a: &Action) -> bool {
    a.causes_severe_harm
}

fn harm_mitigation(a: &Action) -> bool {
    a.causes_minor_harm && !a.prevents_catastrophe
}

fn data_stewardship(a: &Action) -> bool {
    a.violates_privacy && !a.has_consent
}

// Deception is excused only when it both prevents minor harm AND carries ethics approval.
fn honesty(a: &Action) -> bool {
    a.deceives_human && !(a.prevents_minor_harm && a.has_ethics_approval)
}

fn accountability(a: &Action) -> bool {
    !a.has_explanation
}

fn bias_governance(a: &Action) -> bool {
    a.uses_historical_data && !a.has_bias_mitigation
}

pub static RULES: [ViolationRule; 6] = [
    ViolationRule {
        index: 1,
        principle: "Non-Maleficence",
        label: "Rule 1: Non-Maleficence (Severe Harm)",
        formula: "V1 := sH",
        predicate: non_maleficence,
    },
    ViolationRule {
        index: 2,
        principle: "Harm-Mitigation",
        label: "Rule 2: Harm-Mitigation (Unjustified Minor Harm)",
        formula: "V2 := mH ∧ ¬PC",
        predicate: harm_mitigation,
    },
    ViolationRule {
        index: 3,
        principle: "Data-Stewardship",
        label: "Rule 3: Data-Stewardship (Privacy without Consent)",
        formula: "V3 := VP ∧ ¬HC",
        predicate: data_stewardship,
    },
    ViolationRule {
        index: 4,
        principle: "Honesty",
        label: "Rule 4: Honesty (Unjustified Deception)",
        formula: "V4 := DH ∧ ¬(PM ∧ EA)",
        predicate: honesty,
    },
    ViolationRule {
        index: 5,
        principle: "Accountability",
        label: "Rule 5: Accountability (No Explanation / Traceability)",
        formula: "V5 := ¬EX",
        predicate: accountability,
    },
    ViolationRule {
        index: 6,
        principle: "Bias Governance",
        label: "Rule 6: Bias Governance (Unmitigated Historical Bias)",
        formula: "V6 := HD ∧ ¬BM",
        predicate: bias_governance,
    },
];

/// Look up a rule by its 1-based index.
pub fn rule(index: u8) -> Option<&'static ViolationRule> {
    RULES.iter().find(|r| r.index == index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_one_through_six_in_order() {
        let idx: Vec<u8> = RULES.iter().map(|r| r.index).collect();
        assert_eq!(idx, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn labels_carry_their_index() {
        for r in &RULES {
            assert!(r.label.starts_with(&format!("Rule {}: {}", r.index, r.principle)));
        }
    }

    #[test]
    fn lookup_by_index() {
        assert_eq!(rule(4).map(|r| r.principle), Some("Honesty"));
        assert!(rule(0).is_none());
        assert!(rule(7).is_none());
    }
}
