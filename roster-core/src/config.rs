use serde::{Deserialize, Serialize};

/// Endpoint mặc định trả về bundle Patient.
pub const DEFAULT_ENDPOINT: &str = "https://wildfhir4.aegis.net/fhir4-0-1/Patient";

/// Media type JSON của FHIR, gửi trong header `Accept`.
pub const FHIR_JSON: &str = "application/fhir+json";

/// Cấu hình cho lần đọc danh sách bệnh nhân.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL đầy đủ của truy vấn Patient (không có query parameter).
    pub endpoint: String,
    /// Giá trị header `Accept`.
    pub accept: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            accept: FHIR_JSON.to_string(),
        }
    }
}

/// Các giá trị ghi đè tùy chọn do host (JS, CLI) cung cấp.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ClientConfigOverrides {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub accept: Option<String>,
}

impl From<ClientConfigOverrides> for ClientConfig {
    fn from(overrides: ClientConfigOverrides) -> Self {
        let mut base = ClientConfig::default();
        if let Some(endpoint) = overrides.endpoint.filter(|value| !value.trim().is_empty()) {
            base.endpoint = endpoint;
        }
        if let Some(accept) = overrides.accept.filter(|value| !value.trim().is_empty()) {
            base.accept = accept;
        }
        base
    }
}
