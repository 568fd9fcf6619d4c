//! Subset of FHIR R4 types needed to list and describe patients.
//!
//! Every field except `Patient::id` may be missing on the wire; lists default
//! to empty so rendering never has to distinguish "absent" from "empty".

use serde::{Deserialize, Deserializer, Serialize};

/// [Patient](https://hl7.org/fhir/R4/patient.html)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    pub id: Option<String>,
    pub name: Vec<HumanName>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub address: Vec<Address>,
    pub telecom: Vec<ContactPoint>,
    pub communication: Vec<PatientCommunication>,
    pub contact: Vec<PatientContact>,
}

impl Patient {
    /// Identifier usable for selection; blank ids count as missing.
    pub fn selection_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Given names and family name of the first name entry.
    pub fn display_name(&self) -> String {
        self.name
            .first()
            .map(HumanName::given_family)
            .unwrap_or_default()
    }
}

/// [HumanName](https://hl7.org/fhir/R4/datatypes.html#HumanName)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HumanName {
    pub text: Option<String>,
    pub family: Option<String>,
    #[serde(deserialize_with = "strings_skipping_nulls")]
    pub given: Vec<String>,
}

impl HumanName {
    /// `given` joined by spaces, then `family`. Missing parts are empty.
    pub fn given_family(&self) -> String {
        let given = self.given.join(" ");
        let family = self.family.as_deref().unwrap_or_default();
        format!("{given} {family}").trim().to_string()
    }

    /// Free-text form, falling back to the structured parts.
    pub fn display_text(&self) -> Option<String> {
        non_empty(self.text.as_deref()).or_else(|| {
            let composed = self.given_family();
            (!composed.is_empty()).then_some(composed)
        })
    }
}

/// [Address](https://hl7.org/fhir/R4/datatypes.html#Address)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(deserialize_with = "strings_skipping_nulls")]
    pub line: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Street lines followed by city, state and postal code on one line.
    pub fn one_line(&self) -> Option<String> {
        let mut parts: Vec<String> = self
            .line
            .iter()
            .filter_map(|line| non_empty(Some(line.as_str())))
            .collect();
        parts.extend(
            [&self.city, &self.state, &self.postal_code]
                .into_iter()
                .filter_map(|part| non_empty(part.as_deref())),
        );
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// [ContactPoint](https://hl7.org/fhir/R4/datatypes.html#ContactPoint)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactPoint {
    pub system: Option<String>,
    pub value: Option<String>,
    #[serde(rename = "use")]
    pub use_: Option<String>,
}

impl ContactPoint {
    /// `system: value`, or whichever half is present.
    pub fn display(&self) -> Option<String> {
        match (non_empty(self.system.as_deref()), non_empty(self.value.as_deref())) {
            (Some(system), Some(value)) => Some(format!("{system}: {value}")),
            (None, Some(value)) => Some(value),
            (Some(system), None) => Some(system),
            (None, None) => None,
        }
    }
}

/// [Coding](https://hl7.org/fhir/R4/datatypes.html#Coding)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Coding {
    pub system: Option<String>,
    pub code: Option<String>,
    pub display: Option<String>,
}

/// [CodeableConcept](https://hl7.org/fhir/R4/datatypes.html#CodeableConcept)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodeableConcept {
    pub text: Option<String>,
    pub coding: Vec<Coding>,
}

impl CodeableConcept {
    pub fn display_text(&self) -> Option<String> {
        non_empty(self.text.as_deref()).or_else(|| {
            self.coding
                .iter()
                .find_map(|coding| non_empty(coding.display.as_deref()))
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatientCommunication {
    pub language: Option<CodeableConcept>,
    pub preferred: Option<bool>,
}

/// Emergency contact / guardian attached to a patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatientContact {
    pub name: Option<HumanName>,
    pub relationship: Vec<CodeableConcept>,
    pub telecom: Vec<ContactPoint>,
}

/// Error payload returned alongside a non-success status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OperationOutcome {
    pub issue: Vec<OutcomeIssue>,
}

impl OperationOutcome {
    /// Human-readable text of the first issue, if it carries any.
    pub fn first_message(&self) -> Option<&str> {
        let issue = self.issue.first()?;
        issue
            .details
            .as_ref()
            .and_then(|details| details.text.as_deref())
            .filter(|text| !text.is_empty())
            .or_else(|| issue.diagnostics.as_deref().filter(|text| !text.is_empty()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutcomeIssue {
    pub severity: Option<String>,
    pub code: Option<String>,
    pub details: Option<CodeableConcept>,
    pub diagnostics: Option<String>,
}

/// Primitive arrays may hold `null` placeholders when a parallel `_given` /
/// `_line` array carries extensions.
fn strings_skipping_nulls<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(values.unwrap_or_default().into_iter().flatten().collect())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
