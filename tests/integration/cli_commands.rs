use predicates::prelude::*;
use serde_json::{json, Value};
use test_support::{fixtures_dir, init_insta, read_fixture_text, saved_search_cmd, tempdir};

fn stdout_json(out: &std::process::Output) -> Value {
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  serde_json::from_slice(&out.stdout).expect("stdout is JSON")
}

fn fixture_path(name: &str) -> String {
  fixtures_dir().join(name).to_string_lossy().to_string()
}

#[test]
fn defaults_prints_complete_request() {
  let v = stdout_json(&saved_search_cmd().arg("defaults").output().unwrap());
  assert_eq!(v.as_object().unwrap().len(), 37);
  assert_eq!(v["ResultType"], json!(1));
  assert_eq!(v["PageSize"], json!(1000));
  assert_eq!(v["AdvSearch"].as_object().unwrap().len(), 50);
}

#[test]
fn decode_reads_response_file() {
  let out = saved_search_cmd()
    .args(["decode", "--input", &fixture_path("opportunity_response.json")])
    .output()
    .unwrap();
  let v = stdout_json(&out);
  assert_eq!(v["kind"], json!("opportunity"));
  assert_eq!(v["fields"]["stage"], json!(["3", "4"]));
  assert_eq!(v["fields"]["city"], json!("Denver"));
}

#[test]
fn decode_array_from_stdin_keeps_order() {
  let batch = format!(
    "[{}, {{\"Data\": \"{{broken\"}}]",
    read_fixture_text("proposal_response.json")
  );
  let out = saved_search_cmd().arg("decode").write_stdin(batch).output().unwrap();
  let v = stdout_json(&out);
  assert_eq!(v[0]["kind"], json!("proposal"));
  assert_eq!(v[1], json!({ "kind": "opportunity", "fields": {} }));
}

#[test]
fn encode_resolves_kind_from_fields() {
  let form = json!({ "proposalName": "Renewal", "proposalStatus": ["Sent", "Won"], "companyName": "Globex" });
  let out = saved_search_cmd().arg("encode").write_stdin(form.to_string()).output().unwrap();
  let v = stdout_json(&out);
  assert_eq!(v["ResultType"], json!(2));
  assert_eq!(v["ProposalName"], json!("SW=Renewal~"));
  assert_eq!(v["ProposalStatus"], json!("IN=Sent~IN=Won~"));
  assert_eq!(v["CustomerName"], json!("SW=Globex~"));
}

#[test]
fn encode_honors_explicit_kind() {
  let out = saved_search_cmd()
    .args(["encode", "--kind", "opportunity", "--input", &fixture_path("opportunity_form.json")])
    .output()
    .unwrap();
  let v = stdout_json(&out);
  assert_eq!(v["ResultType"], json!(1));
  assert_eq!(v["CreatedFrom"], json!("2025-07-01"));
  assert_eq!(v["CloseFrom"], json!("2025-09-01"));
  assert_eq!(v["AdvSearch"]["LeadStatus"], json!("IN=Hot~IN=Warm~"));
  assert!(v.get("favoriteColor").is_none());
}

#[test]
fn filter_flags_build_request() {
  let out = saved_search_cmd()
    .args(["filter", "--period", "last7Days", "--rep", "42", "--product", "IE=7~", "--current-user", "9"])
    .output()
    .unwrap();
  let v = stdout_json(&out);
  assert_eq!(v["CreatedFrom"], json!("2025-08-08"));
  assert_eq!(v["CreatedTo"], json!("2025-08-15"));
  assert_eq!(v["AssignedTo"], json!("42"));
  assert_eq!(v["Products"], json!("7"));
  assert_eq!(v["BusinessUnit"], json!("all"));
}

#[test]
fn filter_uses_session_user_without_rep() {
  let out = saved_search_cmd()
    .args(["filter", "--current-user", "9"])
    .output()
    .unwrap();
  assert_eq!(stdout_json(&out)["AssignedTo"], json!("9"));
}

#[test]
fn filter_file_and_flag_overrides() {
  let out = saved_search_cmd()
    .args(["filter", "--filters", &fixture_path("report_filters.json"), "--product", "12"])
    .output()
    .unwrap();
  let v = stdout_json(&out);
  assert_eq!(v["CreatedFrom"], json!("2025-08-01"));
  assert_eq!(v["AssignedTo"], json!("42"));
  assert_eq!(v["Products"], json!("12"));
}

#[test]
fn unpaired_range_flag_is_rejected() {
  saved_search_cmd()
    .args(["filter", "--from", "2025-01-01"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--from and --to must be given together"));
}

#[test]
fn missing_subcommand_is_rejected() {
  saved_search_cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("Provide a subcommand"));
}

#[test]
fn summarize_reports_text_criteria() {
  init_insta();
  let form = json!({ "companyName": "Acme", "stage": ["1", "2"], "status": "Open" });
  let out = saved_search_cmd().arg("summarize").write_stdin(form.to_string()).output().unwrap();
  let v = stdout_json(&out);
  assert_eq!(v["count"], json!(2));
  assert_eq!(v["hasCriteria"], json!(true));
  insta::assert_snapshot!(v["summary"].as_str().unwrap(), @"Company Name: Acme, Status: Open");
}

#[test]
fn kind_reads_wrapped_payloads() {
  let out = saved_search_cmd()
    .args(["kind", "--input", &fixture_path("proposal_response.json")])
    .output()
    .unwrap();
  assert_eq!(stdout_json(&out), json!({ "kind": "proposal" }));
}

#[test]
fn validate_lists_issues() {
  let form = json!({ "createdDateFrom": "08/20/2025", "createdDateTo": "2025-08-01" });
  let out = saved_search_cmd().arg("validate").write_stdin(form.to_string()).output().unwrap();
  let v = stdout_json(&out);
  assert_eq!(v["kind"], json!("opportunity"));
  assert_eq!(
    v["issues"],
    json!([{
      "issue": "inverted_range",
      "from_field": "createdDateFrom",
      "to_field": "createdDateTo",
      "from": "2025-08-20",
      "to": "2025-08-01"
    }])
  );

  let out = saved_search_cmd()
    .args(["validate", "--kind", "proposal"])
    .write_stdin("{}")
    .output()
    .unwrap();
  let issues = stdout_json(&out)["issues"].as_array().unwrap().len();
  assert_eq!(issues, 2);
}

#[test]
fn out_flag_writes_file_and_keeps_stdout_empty() {
  let td = tempdir();
  let target = td.path().join("reports/defaults.json");
  let target_s = target.to_string_lossy().to_string();

  saved_search_cmd()
    .args(["defaults", "--out", &target_s])
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  let written: Value = serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
  assert_eq!(written["SortDirection"], json!("desc"));
}

#[test]
fn logs_go_to_stderr() {
  let out = saved_search_cmd()
    .env("RUST_LOG", "debug")
    .args(["encode", "--input", &fixture_path("opportunity_form.json")])
    .output()
    .unwrap();
  let v = stdout_json(&out);
  assert_eq!(v["CustomerName"], json!("SW=Acme Industrial~"));
  assert!(String::from_utf8_lossy(&out.stderr).contains("favoriteColor"));
}
