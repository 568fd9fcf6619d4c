//! FHIR JSON adapters: Patient bundles, OperationOutcome payloads and the HTTP client.

mod client;

use roster_core::{CodeableConcept, FetchError, OperationOutcome, OutcomeIssue, Patient};
use serde::Deserialize;
use serde_json::Value;

pub use client::{resolve_response, FhirClient};

/// Extract patients from a Bundle JSON string.
pub fn patients_from_bundle_str(bundle_json: &str) -> Result<Vec<Patient>, FetchError> {
    let value: Value =
        serde_json::from_str(bundle_json).map_err(|err| FetchError::Malformed(err.to_string()))?;
    patients_from_bundle_value(&value)
}

/// Extract patients from a Bundle `serde_json::Value`, keeping server order.
///
/// A bundle without `entry` is an empty result. Entries without a resource,
/// resources of another type and Patients that fail to deserialize are skipped.
pub fn patients_from_bundle_value(bundle: &Value) -> Result<Vec<Patient>, FetchError> {
    let bundle = bundle
        .as_object()
        .ok_or_else(|| FetchError::Malformed("bundle is not a JSON object".to_string()))?;

    let entries = match bundle.get("entry") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(FetchError::Malformed("bundle entry is not an array".to_string())),
    };

    let mut patients = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Some(resource) = entry.get("resource") else {
            continue;
        };

        match resource.get("resourceType").and_then(Value::as_str) {
            None | Some("Patient") => {}
            Some(_) => continue,
        }

        match Patient::deserialize(resource) {
            Ok(patient) => patients.push(patient),
            Err(err) => {
                tracing::warn!(entry = index, error = %err, "skipping unreadable entry[{index}]");
            }
        }
    }

    Ok(patients)
}

/// Read an OperationOutcome-like error payload. Never fails: unexpected shapes
/// simply yield fewer issues.
pub fn outcome_from_value(payload: &Value) -> OperationOutcome {
    let issue = payload
        .get("issue")
        .and_then(Value::as_array)
        .map(|issues| issues.iter().map(read_issue).collect())
        .unwrap_or_default();

    OperationOutcome { issue }
}

fn read_issue(issue: &Value) -> OutcomeIssue {
    OutcomeIssue {
        severity: string_field(issue, "severity"),
        code: string_field(issue, "code"),
        details: issue.get("details").map(|details| CodeableConcept {
            text: string_field(details, "text"),
            coding: Vec::new(),
        }),
        diagnostics: string_field(issue, "diagnostics"),
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_entry_is_an_empty_list() {
        let bundle = json!({"resourceType": "Bundle", "type": "searchset", "total": 0});
        assert_eq!(patients_from_bundle_value(&bundle).unwrap(), Vec::new());
    }

    #[test]
    fn non_array_entry_is_malformed() {
        let bundle = json!({"resourceType": "Bundle", "entry": {"resource": {}}});
        assert!(matches!(
            patients_from_bundle_value(&bundle),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            patients_from_bundle_str("[]"),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            patients_from_bundle_str("<html>"),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn skips_entries_that_are_not_patients() {
        let bundle = json!({
            "entry": [
                {"resource": {"resourceType": "Patient", "id": "a"}},
                {"fullUrl": "urn:uuid:no-resource"},
                {"resource": {"resourceType": "OperationOutcome", "issue": []},
                 "search": {"mode": "outcome"}},
                {"resource": {"id": "b"}}
            ]
        });
        let ids: Vec<_> = patients_from_bundle_value(&bundle)
            .unwrap()
            .into_iter()
            .filter_map(|patient| patient.id)
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn unreadable_entry_is_skipped_and_siblings_survive() {
        let bundle = json!({"entry": [
            {"resource": {"resourceType": "Patient", "id": "ok"}},
            {"resource": {"resourceType": "Patient", "id": "bad", "name": "not-a-list"}},
            {"resource": {"resourceType": "Patient", "id": "also-ok"}}
        ]});
        let ids: Vec<_> = patients_from_bundle_value(&bundle)
            .unwrap()
            .into_iter()
            .filter_map(|patient| patient.id)
            .collect();
        assert_eq!(ids, ["ok", "also-ok"]);
    }

    #[test]
    fn null_given_placeholder_keeps_whole_list() {
        let bundle = r#"{"entry": [
            {"resource": {"resourceType": "Patient", "id": "1",
                          "name": [{"given": ["John"], "family": "Doe"}]}},
            {"resource": {"resourceType": "Patient", "id": "2",
                          "name": [{"given": [null, "Jim"],
                                    "_given": [{"extension": []}, null],
                                    "family": "Roe"}]}}
        ]}"#;
        let names: Vec<_> = patients_from_bundle_str(bundle)
            .unwrap()
            .iter()
            .map(Patient::display_name)
            .collect();
        assert_eq!(names, ["John Doe", "Jim Roe"]);
    }

    #[test]
    fn outcome_reads_first_issue_details() {
        let payload = json!({
            "resourceType": "OperationOutcome",
            "issue": [
                {"severity": "error", "code": "not-found", "details": {"text": "X"}},
                {"severity": "warning", "details": {"text": "second"}}
            ]
        });
        let outcome = outcome_from_value(&payload);
        assert_eq!(outcome.issue.len(), 2);
        assert_eq!(outcome.first_message(), Some("X"));
        assert_eq!(outcome.issue[0].code.as_deref(), Some("not-found"));
    }

    #[test]
    fn outcome_tolerates_unexpected_shapes() {
        assert!(outcome_from_value(&json!({})).issue.is_empty());
        assert!(outcome_from_value(&json!("boom")).issue.is_empty());
        assert!(outcome_from_value(&json!({"issue": "nope"})).issue.is_empty());

        let outcome = outcome_from_value(&json!({"issue": [{"details": 5}]}));
        assert_eq!(outcome.first_message(), None);
    }
}
