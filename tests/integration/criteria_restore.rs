use saved_search_codec::model::FormFields;
use saved_search_codec::summary::summarize;
use saved_search_codec::{restore_many, restore_saved_search, to_form_fields, to_payload, FieldValue, SearchKind};
use serde_json::Value;
use test_support::{init_insta, read_fixture_json};

#[test]
fn opportunity_response_restores_fields() {
  let response: Value = read_fixture_json("opportunity_response.json");
  let restored = restore_saved_search(&response);

  // ResultType 1 outranks the stale proposal field.
  assert_eq!(restored.kind, SearchKind::Opportunity);
  let f = &restored.fields;
  assert_eq!(f.get("companyName"), Some(&FieldValue::from("Acme Industrial")));
  assert_eq!(f.get("stage"), Some(&FieldValue::from(vec!["3", "4"])));
  assert_eq!(f.get("assignedRep"), Some(&FieldValue::from("42")));
  assert_eq!(f.get("createdDateFrom"), Some(&FieldValue::from("2025-07-01")));
  assert_eq!(f.get("createdDateTo"), Some(&FieldValue::from("2025-07-31")));
  assert_eq!(f.get("leadStatus"), Some(&FieldValue::from(vec!["Hot", "Warm"])));
  assert_eq!(f.get("state"), Some(&FieldValue::from("6")));
  assert!(!f.contains_key("proposalName"));
  assert!(!f.contains_key("opportunityName"));
  assert!(!f.contains_key("closeDateFrom"));
  assert_eq!(f.len(), 9);
}

#[test]
fn restored_opportunity_summary() {
  init_insta();
  let response: Value = read_fixture_json("opportunity_response.json");
  let summary = summarize(&restore_saved_search(&response).fields);
  insta::assert_snapshot!(
    summary.to_string(),
    @"7 criteria active: Assigned Rep: 42, City: Denver, Company Name: Acme Industrial, Created Date From: 2025-07-01, Created Date To: 2025-07-31, State: 6, Status: Open"
  );
}

#[test]
fn string_encoded_proposal_response() {
  init_insta();
  let response: Value = read_fixture_json("proposal_response.json");
  let restored = restore_saved_search(&response);
  insta::assert_json_snapshot!(restored, @r#"
  {
    "kind": "proposal",
    "fields": {
      "companyName": "Globex",
      "proposalAmountFrom": 2500,
      "proposalCreatedDateFrom": "2025-06-01",
      "proposalCreatedDateTo": "2025-06-30",
      "proposalId": "9001",
      "proposalName": "Q3 renewal",
      "proposalStatus": [
        "Sent",
        "Won"
      ]
    }
  }
  "#);
}

#[test]
fn restored_fields_re_encode_to_equivalent_payload() {
  let response: Value = read_fixture_json("proposal_response.json");
  let restored = restore_saved_search(&response);
  let payload = to_payload(&restored.fields, restored.kind);
  assert_eq!(to_form_fields(&payload, restored.kind), restored.fields);
}

#[test]
fn batch_restore_tolerates_bad_entries() {
  let responses: Vec<Value> = vec![
    read_fixture_json("opportunity_response.json"),
    serde_json::json!({ "Data": "{truncated" }),
    read_fixture_json("proposal_response.json"),
  ];
  let out = restore_many(&responses, None);
  let kinds: Vec<SearchKind> = out.iter().map(|r| r.kind).collect();
  assert_eq!(kinds, vec![SearchKind::Opportunity, SearchKind::Opportunity, SearchKind::Proposal]);
  assert_eq!(out[1].fields, FormFields::new());
}
