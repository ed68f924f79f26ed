use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw education submission as it arrives over the wire.
///
/// Every field is optional and free-form (string or number); nothing is
/// interpreted here. `specialization`/`field` and `cgpa`/`gpa` are accepted
/// as synonyms because both spellings exist in client payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub degree: Option<Value>,
    #[serde(default)]
    pub specialization: Option<Value>,
    #[serde(default)]
    pub field: Option<Value>,
    #[serde(default)]
    pub cgpa: Option<Value>,
    #[serde(default)]
    pub gpa: Option<Value>,
    #[serde(default)]
    pub gpa_scale: Option<Value>,
    #[serde(default)]
    pub experience: Option<Value>,
    #[serde(default)]
    pub graduation_year: Option<Value>,
    #[serde(default)]
    pub university: Option<Value>,
    #[serde(default)]
    pub skills: Option<Value>,
}

impl RawSubmission {
    pub fn specialization_value(&self) -> Option<&Value> {
        first_present(&[self.specialization.as_ref(), self.field.as_ref()])
    }

    pub fn gpa_value(&self) -> Option<&Value> {
        first_present(&[self.cgpa.as_ref(), self.gpa.as_ref()])
    }
}

/// Returns the first value that is neither null nor a blank string.
fn first_present<'a>(candidates: &[Option<&'a Value>]) -> Option<&'a Value> {
    candidates.iter().flatten().copied().find(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

/// Validated education snapshot stored with each prediction.
///
/// Copied into the record at prediction time so later profile edits never
/// rewrite history. `gpa` is on the submitted `gpa_scale` (4 or 10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationProfile {
    pub degree: String,
    pub specialization: String,
    pub gpa: f64,
    pub gpa_scale: f64,
    pub graduation_year: i32,
    pub university: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl EducationProfile {
    /// Label used to bucket history by education, e.g. "Master - Data Science".
    pub fn label(&self) -> String {
        format!("{} - {}", self.degree, self.specialization)
    }
}
