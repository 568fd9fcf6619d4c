use std::fs;

use roster_core::{ClientConfig, FetchError, GENERIC_SERVER_ERROR};
use roster_fhir::FhirClient;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(path).expect("Không đọc được fixture")
}

/// Serve exactly one HTTP response and hand back the raw request head.
async fn serve_once(status_line: &str, body: String) -> (ClientConfig, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let status_line = status_line.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buf).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buf[..read]);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/fhir+json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });

    let config = ClientConfig {
        endpoint: format!("http://{addr}/fhir/Patient"),
        ..ClientConfig::default()
    };
    (config, handle)
}

#[tokio::test]
async fn sends_fhir_accept_header_and_reads_bundle() {
    let (config, server) = serve_once("200 OK", fixture("patient_searchset.json")).await;

    let patients = FhirClient::new(config).fetch_patients().await.unwrap();
    assert_eq!(patients.len(), 3);
    assert_eq!(patients[0].display_name(), "John Doe");
    assert_eq!(patients[2].display_name(), "Jane Doe");

    let request = server.await.unwrap().to_ascii_lowercase();
    assert!(request.starts_with("get /fhir/patient http/1.1"));
    assert!(request.contains("accept: application/fhir+json"));
}

#[tokio::test]
async fn error_status_surfaces_outcome_text() {
    let (config, server) = serve_once("404 Not Found", fixture("not_found_outcome.json")).await;

    let err = FhirClient::new(config).fetch_patients().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(
        err.user_message(),
        "Resource type 'Patient' is not available on this server"
    );
    server.await.unwrap();
}

#[tokio::test]
async fn error_status_without_issue_is_generic() {
    let (config, server) = serve_once("500 Internal Server Error", "{}".to_string()).await;

    let err = FhirClient::new(config).fetch_patients().await.unwrap_err();
    assert_eq!(err.user_message(), GENERIC_SERVER_ERROR);
    server.await.unwrap();
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig {
        endpoint: format!("http://{addr}/Patient"),
        ..ClientConfig::default()
    };
    let err = FhirClient::new(config).fetch_patients().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(err.user_message(), GENERIC_SERVER_ERROR);
}
