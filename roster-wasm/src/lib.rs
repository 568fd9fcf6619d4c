//! Bridge WASM <-> JavaScript trung lập framework cho danh sách bệnh nhân.

use roster_core::{
    build_patient_list, FetchError, Patient, Selection, ViewState, GENERIC_SERVER_ERROR,
};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Trạng thái view do host JS giữ: ba biến `loading`, `error`, `patients`.
#[derive(Deserialize, Default)]
struct JsViewState {
    #[serde(default)]
    loading: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    patients: Vec<Patient>,
}

impl From<JsViewState> for ViewState {
    fn from(state: JsViewState) -> Self {
        if state.loading {
            ViewState::Loading
        } else if let Some(message) = state.error {
            ViewState::Failed(message)
        } else {
            ViewState::Loaded(state.patients)
        }
    }
}

/// Trích danh sách Patient từ một bundle JSON.
#[wasm_bindgen]
pub fn patients_from_bundle(bundle: JsValue) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let bundle_value = from_value::<serde_json::Value>(bundle)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được JSON bundle: {err}")))?;

    let patients = roster_fhir::patients_from_bundle_value(&bundle_value)
        .map_err(|err| JsValue::from_str(&format_fetch_error(err)))?;

    to_value(&patients)
        .map_err(|err| JsValue::from_str(&format!("Không serialize danh sách: {err}")))
}

/// Thông báo người dùng cho payload lỗi từ máy chủ (hoặc lỗi transport).
#[wasm_bindgen]
pub fn error_message_from_outcome(payload: JsValue) -> String {
    install_panic_hook();

    match from_value::<serde_json::Value>(payload) {
        Ok(value) => message_for_payload(&value),
        Err(_) => GENERIC_SERVER_ERROR.to_string(),
    }
}

/// Dựng mô hình render cho host không dùng Yew.
#[wasm_bindgen]
pub fn build_patient_list_model(
    state: JsValue,
    selected: Option<String>,
) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let state: JsViewState = if state.is_undefined() || state.is_null() {
        JsViewState::default()
    } else {
        from_value(state)
            .map_err(|err| JsValue::from_str(&format!("Không đọc được trạng thái: {err}")))?
    };

    let mut selection = Selection::default();
    selection.select(selected.as_deref());

    let model = build_patient_list(&ViewState::from(state), &selection);
    to_value(&model).map_err(|err| JsValue::from_str(&format!("Không serialize view: {err}")))
}

fn message_for_payload(payload: &serde_json::Value) -> String {
    roster_fhir::outcome_from_value(payload)
        .first_message()
        .unwrap_or(GENERIC_SERVER_ERROR)
        .to_string()
}

fn format_fetch_error(err: FetchError) -> String {
    format!("Patient list error: {err}")
}

fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}
