use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

/// Command for the egf-advisor binary, run from an empty directory so no stray egf.toml is read.
#[allow(deprecated)]
fn advisor_cmd(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("egf-advisor").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

const COMPLETE_ACTION: &str = r#"{
    "causes_severe_harm": false,
    "causes_minor_harm": true,
    "prevents_catastrophe": true,
    "violates_privacy": false,
    "has_consent": true,
    "deceives_human": false,
    "has_ethics_approval": true,
    "has_explanation": false,
    "prevents_minor_harm": true,
    "uses_historical_data": false,
    "has_bias_mitigation": true
}"#;

#[test]
fn help_works() {
    let dir = tempfile::tempdir().unwrap();
    advisor_cmd(&dir).arg("--help").assert().success();
}

#[test]
fn demo_prints_all_three_scenarios() {
    let dir = tempfile::tempdir().unwrap();
    advisor_cmd(&dir)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "--- Evaluating Scenario A: Location-based Patrol Optimization ---",
        ))
        .stdout(predicate::str::contains(
            "--- Evaluating Scenario B: Individual Risk Scoring with Secret Blacklist ---",
        ))
        .stdout(predicate::str::contains(
            "--- Evaluating Scenario C: Targeted Undercover Intervention ---",
        ))
        .stdout(predicate::str::contains("Action is IMPERMISSIBLE."))
        .stdout(predicate::str::contains("3/3 scenarios matched"));
}

#[test]
fn demo_json_is_stable_with_fixed_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let out = advisor_cmd(&dir)
        .args(["demo", "--scenario", "b", "--format", "json"])
        .args(["--evaluated-at", "2025-01-01T00:00:00Z"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["evaluated_at"], "2025-01-01T00:00:00+00:00");
    assert_eq!(doc["total"], 1);
    assert_eq!(doc["matched"], 1);
    let rules = doc["outcomes"][0]["actual"]["violated_rules"].as_array().unwrap();
    assert_eq!(rules.len(), 6);
    assert_eq!(rules[0], "Rule 1: Non-Maleficence (Severe Harm)");
}

#[test]
fn demo_unknown_scenario_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    advisor_cmd(&dir)
        .args(["demo", "--scenario", "Q"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no scenario with key"));
}

#[test]
fn demo_mismatched_prediction_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let pack = contracts::assets::SCENARIOS_TOML.replacen(
        "[scenario.expected]\npermissible = true",
        "[scenario.expected]\npermissible = false",
        1,
    );
    let path = dir.path().join("pack.toml");
    fs::write(&path, pack).unwrap();
    advisor_cmd(&dir)
        .args(["demo", "--scenarios"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2/3 scenarios matched"));
}

#[test]
fn evaluate_reports_accountability_violation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("action.json");
    fs::write(&path, COMPLETE_ACTION).unwrap();
    advisor_cmd(&dir)
        .args(["evaluate", "--action"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Action is IMPERMISSIBLE."))
        .stdout(predicate::str::contains(
            "['Rule 5: Accountability (No Explanation / Traceability)']",
        ));

    advisor_cmd(&dir)
        .args(["evaluate", "--fail-on-violation", "--action"])
        .arg(&path)
        .assert()
        .code(1);
}

#[test]
fn evaluate_reads_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let permissible = COMPLETE_ACTION.replace("\"has_explanation\": false", "\"has_explanation\": true");
    advisor_cmd(&dir)
        .args(["evaluate", "--format", "json"])
        .write_stdin(permissible)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"decision\": \"PERMISSIBLE\""));
}

#[test]
fn evaluate_names_missing_attribute() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("action.json");
    fs::write(&path, COMPLETE_ACTION.replace("\"has_consent\": true,", "")).unwrap();
    advisor_cmd(&dir)
        .args(["evaluate", "--action"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing required attribute `has_consent`"));
}

#[test]
fn evaluate_accepts_toml_actions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("action.toml");
    let toml_text: String = COMPLETE_ACTION
        .lines()
        .filter(|l| l.contains(':'))
        .map(|l| {
            let l = l.trim().trim_end_matches(',').replace('"', "");
            format!("{}\n", l.replacen(':', " =", 1))
        })
        .collect();
    fs::write(&path, toml_text).unwrap();
    advisor_cmd(&dir)
        .args(["evaluate", "--action"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule 5: Accountability"));
}

#[test]
fn rules_lists_formulas() {
    let dir = tempfile::tempdir().unwrap();
    advisor_cmd(&dir)
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("V4 := DH ∧ ¬(PM ∧ EA)"))
        .stdout(predicate::str::contains("Rule 6: Bias Governance (Unmitigated Historical Bias)"));
}

#[test]
fn config_file_selects_json_and_hides_narrative() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("egf.toml"), "[report]\nformat = \"json\"\n").unwrap();
    advisor_cmd(&dir)
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));

    let cfg = dir.path().join("quiet.toml");
    fs::write(&cfg, "[report]\nshow_narrative = false\n").unwrap();
    advisor_cmd(&dir)
        .args(["--config"])
        .arg(&cfg)
        .args(["demo", "--scenario", "A", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Narrative:").not());
}

#[test]
fn config_source_is_logged_once_subscriber_is_installed() {
    let dir = tempfile::tempdir().unwrap();
    advisor_cmd(&dir)
        .env("RUST_LOG", "egf_core=info")
        .arg("rules")
        .assert()
        .success()
        .stderr(predicate::str::contains("No config file found at egf.toml"));

    fs::write(dir.path().join("egf.toml"), "[logging]\nfilter = \"egf_core=info\"\n").unwrap();
    advisor_cmd(&dir)
        .arg("rules")
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded advisor config"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    advisor_cmd(&dir)
        .args(["--config", "absent.toml", "rules"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn init_seeds_pack_once() {
    let dir = tempfile::tempdir().unwrap();
    advisor_cmd(&dir)
        .args(["init", "--dir", "packs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));
    assert!(dir.path().join("packs/scenarios.toml").exists());
    advisor_cmd(&dir)
        .args(["init", "--dir", "packs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"));
}
