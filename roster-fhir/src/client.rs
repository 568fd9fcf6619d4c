use reqwest::header::ACCEPT;
use roster_core::{ClientConfig, FetchError, Patient};
use serde_json::Value;

use crate::{outcome_from_value, patients_from_bundle_value};

/// Reads the Patient collection from a FHIR server.
#[derive(Debug, Clone)]
pub struct FhirClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl FhirClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue the single GET for the patient list. No timeout, no retry.
    pub async fn fetch_patients(&self) -> Result<Vec<Patient>, FetchError> {
        tracing::debug!(endpoint = %self.config.endpoint, "requesting patient bundle");

        let response = self
            .http
            .get(&self.config.endpoint)
            .header(ACCEPT, &self.config.accept)
            .send()
            .await
            .map_err(|err| transport_error(&self.config.endpoint, err))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| transport_error(&self.config.endpoint, err))?;

        let outcome = resolve_response(status, &body);
        match &outcome {
            Ok(patients) => tracing::debug!(status, count = patients.len(), "patient bundle loaded"),
            Err(err) => tracing::warn!(status, error = %err, "patient bundle request failed"),
        }
        outcome
    }
}

/// Map a completed HTTP exchange to patients or an error.
///
/// Non-success bodies are read as OperationOutcome when they are JSON; any
/// other body leaves the error without a payload.
pub fn resolve_response(status: u16, body: &[u8]) -> Result<Vec<Patient>, FetchError> {
    if !(200..300).contains(&status) {
        let outcome = serde_json::from_slice::<Value>(body)
            .ok()
            .map(|payload| outcome_from_value(&payload));
        return Err(FetchError::Status { status, outcome });
    }

    let bundle: Value =
        serde_json::from_slice(body).map_err(|err| FetchError::Malformed(err.to_string()))?;
    patients_from_bundle_value(&bundle)
}

fn transport_error(endpoint: &str, err: reqwest::Error) -> FetchError {
    tracing::warn!(%endpoint, error = %err, "transport failure");
    FetchError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::GENERIC_SERVER_ERROR;

    #[test]
    fn client_keeps_its_config() {
        let config = ClientConfig {
            endpoint: "http://localhost:8080/fhir/Patient".to_string(),
            ..ClientConfig::default()
        };
        let client = FhirClient::new(config.clone());
        assert_eq!(client.config(), &config);
    }

    #[test]
    fn success_status_parses_bundle() {
        let body = br#"{"entry":[{"resource":{"id":"1","name":[{"given":["John"],"family":"Doe"}]}}]}"#;
        let patients = resolve_response(200, body).unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].display_name(), "John Doe");
    }

    #[test]
    fn error_status_carries_outcome() {
        let body = br#"{"issue":[{"details":{"text":"X"}}]}"#;
        let err = resolve_response(400, body).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 400, .. }));
        assert_eq!(err.user_message(), "X");
    }

    #[test]
    fn error_status_with_html_body_is_generic() {
        let err = resolve_response(503, b"<html>Service Unavailable</html>").unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                status: 503,
                outcome: None
            }
        );
        assert_eq!(err.user_message(), GENERIC_SERVER_ERROR);
    }

    #[test]
    fn success_status_with_garbage_is_malformed() {
        assert!(matches!(
            resolve_response(200, b"not json"),
            Err(FetchError::Malformed(_))
        ));
    }
}
