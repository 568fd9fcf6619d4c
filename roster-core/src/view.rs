//! Mô hình render thuần: mô tả những gì view hiển thị cho một trạng thái.

use std::fmt;

use serde::Serialize;

use crate::model::{Patient, PatientContact};
use crate::state::{Selection, ViewState};

pub const LOADING_LABEL: &str = "Loading...";
pub const LIST_HEADING: &str = "Patients";

/// Nội dung view cho một cặp (trạng thái, lựa chọn).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatientListModel {
    Loading {
        label: &'static str,
    },
    Error {
        message: String,
    },
    List {
        heading: &'static str,
        items: Vec<PatientSummary>,
    },
}

/// Khối tóm tắt của một bệnh nhân.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientSummary {
    pub id: Option<String>,
    pub name: String,
    /// `false` khi bệnh nhân không có id: click/phím không có tác dụng.
    pub selectable: bool,
    pub detail: Option<PatientDetail>,
}

impl PatientSummary {
    pub fn is_expanded(&self) -> bool {
        self.detail.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientDetail {
    pub lines: Vec<DetailLine>,
    pub emergency_contact: Option<EmergencyContact>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyContact {
    pub lines: Vec<DetailLine>,
}

/// Dựng mô hình render. Lỗi được ưu tiên hơn danh sách.
pub fn build_patient_list(state: &ViewState, selection: &Selection) -> PatientListModel {
    match state {
        ViewState::Loading => PatientListModel::Loading {
            label: LOADING_LABEL,
        },
        ViewState::Failed(message) => PatientListModel::Error {
            message: format!("Error: {message}"),
        },
        ViewState::Loaded(patients) => PatientListModel::List {
            heading: LIST_HEADING,
            items: patients
                .iter()
                .map(|patient| summarize(patient, selection))
                .collect(),
        },
    }
}

fn summarize(patient: &Patient, selection: &Selection) -> PatientSummary {
    let id = patient.selection_id();
    PatientSummary {
        id: patient.id.clone(),
        name: patient.display_name(),
        selectable: id.is_some(),
        detail: selection.is_selected(id).then(|| describe(patient)),
    }
}

fn describe(patient: &Patient) -> PatientDetail {
    let mut lines = Vec::new();
    push_line(&mut lines, "Gender", patient.gender.clone());
    push_line(&mut lines, "Birth Date", patient.birth_date.clone());
    push_line(
        &mut lines,
        "Address",
        patient.address.first().and_then(|address| address.one_line()),
    );
    push_line(
        &mut lines,
        "Contact",
        patient.telecom.first().and_then(|telecom| telecom.display()),
    );
    push_line(
        &mut lines,
        "Primary Language",
        patient
            .communication
            .first()
            .and_then(|communication| communication.language.as_ref())
            .and_then(|language| language.display_text()),
    );

    PatientDetail {
        lines,
        emergency_contact: patient.contact.first().and_then(describe_contact),
    }
}

fn describe_contact(contact: &PatientContact) -> Option<EmergencyContact> {
    let mut lines = Vec::new();
    push_line(
        &mut lines,
        "Name",
        contact.name.as_ref().and_then(|name| name.display_text()),
    );
    push_line(
        &mut lines,
        "Relationship",
        contact
            .relationship
            .first()
            .and_then(|relationship| relationship.display_text()),
    );
    push_line(
        &mut lines,
        "Contact",
        contact.telecom.first().and_then(|telecom| telecom.display()),
    );
    (!lines.is_empty()).then_some(EmergencyContact { lines })
}

fn push_line(lines: &mut Vec<DetailLine>, label: &'static str, value: Option<String>) {
    if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
        lines.push(DetailLine { label, value });
    }
}

impl fmt::Display for DetailLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

impl fmt::Display for PatientListModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientListModel::Loading { label } => writeln!(f, "{label}"),
            PatientListModel::Error { message } => writeln!(f, "{message}"),
            PatientListModel::List { heading, items } => {
                writeln!(f, "{heading}")?;
                for item in items {
                    writeln!(f)?;
                    writeln!(f, "ID: {}", item.id.as_deref().unwrap_or_default())?;
                    writeln!(f, "Name: {}", item.name)?;
                    let Some(detail) = &item.detail else {
                        continue;
                    };
                    for line in &detail.lines {
                        writeln!(f, "  {line}")?;
                    }
                    if let Some(contact) = &detail.emergency_contact {
                        writeln!(f, "  Emergency Contact:")?;
                        for line in &contact.lines {
                            writeln!(f, "    {line}")?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
