//! End-to-end tests for `infracheck verify` and `infracheck destroy` against
//! a fake terraform executable.

#![cfg(unix)]
#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::fake_terraform::{FakeTerraform, stack_arg};

const VPC_JSON: &str = "\"vpc-0123456789abcdef0\"";

// --- verify: verdicts ---

#[test]
fn test_verify_passes_with_non_empty_output() {
    let tf = FakeTerraform::new();
    tf.command("verify", VPC_JSON)
        .assert()
        .success()
        .stdout(predicate::str::contains("vpc-0123456789abcdef0"))
        .stdout(predicate::str::contains("PASS"));

    let chdir = stack_arg(&tf.stack());
    assert_eq!(
        tf.calls(),
        [
            format!("{chdir} init -input=false -no-color"),
            format!("{chdir} apply -input=false -auto-approve -lock=false -no-color"),
            format!("{chdir} output -no-color -json vpc_id"),
            format!("{chdir} destroy -input=false -auto-approve -lock=false -no-color"),
        ]
    );
}

#[test]
fn test_verify_accepts_no_color_one() {
    let tf = FakeTerraform::new();
    tf.command("verify", VPC_JSON)
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));
    assert_eq!(tf.calls().len(), 4);
}

#[test]
fn test_verify_accepts_no_color_zero() {
    let tf = FakeTerraform::new();
    tf.command("verify", VPC_JSON)
        .env("NO_COLOR", "0")
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));
    assert_eq!(tf.calls().len(), 4);
}

#[test]
fn test_verify_fails_on_empty_output_and_destroys() {
    let tf = FakeTerraform::new();
    tf.command("verify", "\"\"")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "FAIL: expected output 'vpc_id' to be non-empty",
        ));
    assert_eq!(tf.count("destroy"), 1);
}

#[test]
fn test_verify_apply_failure_skips_output_and_destroys() {
    let tf = FakeTerraform::new();
    tf.command("verify", VPC_JSON)
        .env("FAKE_TF_FAIL_ON", "apply")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("simulated apply failure"));
    assert_eq!(tf.count("output"), 0);
    assert_eq!(tf.count("destroy"), 1);
}

#[test]
fn test_verify_undefined_output_fails_and_destroys() {
    let tf = FakeTerraform::new();
    tf.command("verify", "null")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not defined"));
    assert_eq!(tf.count("destroy"), 1);
}

#[test]
fn test_verify_teardown_failure_keeps_pass_verdict() {
    let tf = FakeTerraform::new();
    tf.command("verify", VPC_JSON)
        .env("FAKE_TF_FAIL_ON", "destroy")
        .assert()
        .success()
        .stderr(predicate::str::contains("Teardown failed"));
    assert_eq!(tf.count("destroy"), 1);
}

// --- verify: inputs ---

#[test]
fn test_verify_passes_vars_and_custom_output() {
    let tf = FakeTerraform::new();
    tf.command("verify", "\"subnet-1\"")
        .args(["--output", "subnet_id", "--var", "region=eu-west-1"])
        .assert()
        .success();

    let calls = tf.calls();
    assert!(calls[1].ends_with("-var region=eu-west-1"), "{}", calls[1]);
    assert!(calls[2].ends_with("-json subnet_id"), "{}", calls[2]);
    assert!(calls[3].ends_with("-var region=eu-west-1"), "{}", calls[3]);
}

#[test]
fn test_verify_reads_config_file_and_flags_win() {
    let tf = FakeTerraform::new();
    let config = tf.write_config(
        "infracheck.yaml",
        "output: from_file\nvars:\n  env: ci\n  region: us-east-1\nlock: true\n",
    );
    tf.command("verify", VPC_JSON)
        .arg("--config")
        .arg(&config)
        .args(["--var", "region=eu-west-1"])
        .assert()
        .success();

    let calls = tf.calls();
    assert!(calls[1].contains("-lock=true"), "{}", calls[1]);
    assert!(
        calls[1].ends_with("-var env=ci -var region=eu-west-1"),
        "{}",
        calls[1]
    );
    assert!(calls[2].ends_with("-json from_file"), "{}", calls[2]);
}

#[test]
fn test_verify_picks_up_config_in_working_directory() {
    let tf = FakeTerraform::new();
    tf.write_config("infracheck.yaml", "output: cwd_output\n");
    tf.command("verify", VPC_JSON).assert().success();
    assert!(tf.calls()[2].ends_with("-json cwd_output"));
}

// --- verify: JSON mode ---

#[test]
fn test_verify_json_report() {
    let tf = FakeTerraform::new();
    let out = tf
        .command("verify", VPC_JSON)
        .arg("--json")
        .output()
        .expect("run");
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(v["passed"], true);
    assert_eq!(v["output_name"], "vpc_id");
    assert_eq!(v["output_value"], "vpc-0123456789abcdef0");
    assert_eq!(v["outcome"]["status"], "passed");
    assert_eq!(v["teardown"]["status"], "destroyed");
    assert_eq!(
        v["phases"],
        serde_json::json!(["idle", "provisioning", "verifying", "destroying", "done"])
    );
}

#[test]
fn test_verify_json_report_on_apply_failure() {
    let tf = FakeTerraform::new();
    let out = tf
        .command("verify", VPC_JSON)
        .arg("--json")
        .env("FAKE_TF_FAIL_ON", "apply")
        .output()
        .expect("run");
    assert_eq!(out.status.code(), Some(1));

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(v["passed"], false);
    assert_eq!(v["outcome"]["status"], "provisioning_failed");
    assert_eq!(v["outcome"]["stage"], "apply");
    assert!(v["output_value"].is_null());
}

// --- destroy ---

#[test]
fn test_destroy_runs_destroy_only() {
    let tf = FakeTerraform::new();
    tf.command("destroy", VPC_JSON).assert().success();
    assert_eq!(tf.calls().len(), 1);
    assert_eq!(tf.count("destroy"), 1);
}

#[test]
fn test_destroy_failure_exits_one() {
    let tf = FakeTerraform::new();
    tf.command("destroy", VPC_JSON)
        .env("FAKE_TF_FAIL_ON", "destroy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("terraform destroy failed"));
}
