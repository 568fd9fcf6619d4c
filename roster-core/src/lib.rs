//! Logic lõi cho danh sách bệnh nhân: mô hình dữ liệu, trạng thái hiển thị và mô hình render.

mod config;
mod error;
mod model;
mod state;
mod view;

pub use config::{ClientConfig, ClientConfigOverrides, DEFAULT_ENDPOINT, FHIR_JSON};
pub use error::{FetchError, GENERIC_SERVER_ERROR};
pub use model::{
    Address, CodeableConcept, Coding, ContactPoint, HumanName, OperationOutcome, OutcomeIssue,
    Patient, PatientCommunication, PatientContact,
};
pub use state::{is_activation_key, FetchOutcome, Selection, ViewState};
pub use view::{
    build_patient_list, DetailLine, EmergencyContact, PatientDetail, PatientListModel,
    PatientSummary, LIST_HEADING, LOADING_LABEL,
};
