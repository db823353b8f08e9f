use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn buckets(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("buckets").unwrap();
    cmd.env("BUCKET_PLANNER_DATA_DIR", dir.path())
        .env_remove("BUCKETS_LOG");
    cmd
}

fn start_plan(dir: &TempDir) {
    buckets(dir)
        .args(["new", "--income", "5000", "--essential", "1500"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Allocated $5000.00 of $5000.00 (100.00%) [OK]",
        ));
}

#[test]
fn show_without_draft_fails() {
    let dir = TempDir::new().unwrap();

    buckets(&dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("buckets new"));
}

#[test]
fn edits_keep_the_plan_balanced() {
    let dir = TempDir::new().unwrap();
    start_plan(&dir);

    buckets(&dir)
        .args(["set", "goal", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1000.00"))
        .stdout(predicate::str::contains("(100.00%) [OK]"));

    buckets(&dir)
        .args(["slide", "investments", "-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(100.00%) [OK]"));

    buckets(&dir)
        .args(["report", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_valid\": true"));
}

#[test]
fn locked_bucket_edit_is_rejected() {
    let dir = TempDir::new().unwrap();
    start_plan(&dir);

    buckets(&dir)
        .args(["slide", "essential", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));

    // the draft is unchanged
    buckets(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("$1500.00"));
}

#[test]
fn duration_picker_sizes_the_goal() {
    let dir = TempDir::new().unwrap();
    start_plan(&dir);

    buckets(&dir)
        .args(["duration", "goal", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Savings goal: $18000.00 over 12 months ($750.00 per month)",
        ));

    buckets(&dir)
        .args(["duration", "goal", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid savings duration"));
}

#[test]
fn save_export_and_delete() {
    let dir = TempDir::new().unwrap();
    start_plan(&dir);

    buckets(&dir)
        .args(["save", "March"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved plan 'March'"));

    buckets(&dir)
        .arg("plans")
        .assert()
        .success()
        .stdout(predicate::str::contains("March"));

    buckets(&dir)
        .args(["export", "march", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Bucket,Type,Locked,Amount,Percent"))
        .stdout(predicate::str::contains("Total,,,5000.00,100.00"));

    let output = dir.path().join("march.yaml");
    buckets(&dir)
        .args(["export", "March", "--format", "yaml", "--output"])
        .arg(&output)
        .assert()
        .success();
    let yaml = std::fs::read_to_string(&output).unwrap();
    assert!(yaml.starts_with("# Bucket Planner Export: March"));

    buckets(&dir)
        .args(["delete", "March"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted plan 'March'"));

    buckets(&dir)
        .args(["delete", "March"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan not found: March"));

    let audit = std::fs::read_to_string(dir.path().join("audit.log")).unwrap();
    assert!(audit.lines().count() >= 3);
}

#[test]
fn refresh_rebuilds_around_new_essential_amount() {
    let dir = TempDir::new().unwrap();
    start_plan(&dir);

    buckets(&dir)
        .args(["refresh", "2000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$2000.00"))
        .stdout(predicate::str::contains("(100.00%) [OK]"));
}

#[test]
fn config_shows_settings() {
    let dir = TempDir::new().unwrap();

    buckets(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Savings horizon:  24 months"))
        .stdout(predicate::str::contains("Absorption rule:  proportional"));
}

#[test]
fn equal_rule_from_config_is_used_for_edits() {
    let dir = TempDir::new().unwrap();

    buckets(&dir)
        .args(["config", "--rule", "equal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Absorption rule:  equal"));

    buckets(&dir)
        .args([
            "new",
            "--income",
            "5000",
            "--essential",
            "1500",
            "--bucket",
            "discretionary=discretionary:1000",
            "--bucket",
            "goal=goal:1000",
            "--bucket",
            "investments=investments:1500",
        ])
        .assert()
        .success();

    // the other two buckets absorb -200 evenly
    buckets(&dir)
        .args(["set", "discretionary", "1200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$900.00"))
        .stdout(predicate::str::contains("$1400.00"));
}

#[test]
fn invalid_config_value_is_rejected() {
    let dir = TempDir::new().unwrap();

    buckets(&dir)
        .args(["config", "--horizon", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("savings_horizon_months"));
}

#[test]
fn huge_slider_value_is_clamped_to_income() {
    let dir = TempDir::new().unwrap();
    start_plan(&dir);

    buckets(&dir)
        .args(["slide", "goal", "100000000000000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$3500.00"))
        .stdout(predicate::str::contains("(100.00%) [OK]"));
}

#[test]
fn oversized_income_is_rejected() {
    let dir = TempDir::new().unwrap();

    buckets(&dir)
        .args(["new", "--income", "99999999999999999", "--essential", "1500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn discard_removes_the_draft() {
    let dir = TempDir::new().unwrap();
    start_plan(&dir);

    buckets(&dir)
        .arg("discard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Discarded the draft plan for $5000.00"));

    buckets(&dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("buckets new"));

    buckets(&dir).arg("discard").assert().failure();
}

#[test]
fn exported_plan_can_be_imported_back() {
    let dir = TempDir::new().unwrap();
    start_plan(&dir);
    buckets(&dir).args(["save", "March"]).assert().success();

    let output = dir.path().join("march.yml");
    buckets(&dir)
        .args(["export", "March", "--format", "yaml", "--output"])
        .arg(&output)
        .assert()
        .success();
    buckets(&dir).args(["delete", "March"]).assert().success();

    buckets(&dir)
        .arg("import")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported plan 'March'"));

    buckets(&dir)
        .arg("import")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced plan 'March'"));

    buckets(&dir)
        .arg("plans")
        .assert()
        .success()
        .stdout(predicate::str::contains("March"));
}

#[test]
fn audit_shows_recent_changes() {
    let dir = TempDir::new().unwrap();

    buckets(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries."));

    start_plan(&dir);
    buckets(&dir).args(["set", "goal", "1000"]).assert().success();

    buckets(&dir)
        .args(["audit", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UPDATE Draft draft"))
        .stdout(predicate::str::contains("Changes: goal:"))
        .stdout(predicate::str::contains("CREATE").not());
}

#[test]
fn rule_help_names_the_default() {
    let dir = TempDir::new().unwrap();

    buckets(&dir)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("proportional (default) or equal"))
        .stdout(predicate::str::contains("takes 100 from each of two others"));
}
