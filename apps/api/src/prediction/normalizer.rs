//! Feature normalization: maps a raw submission to the canonical feature set
//! the rule table evaluates.
//!
//! Never fails. Anything missing or unparseable becomes `None` (or an empty
//! skill list) so that it contributes zero score rather than a penalty.

use serde_json::Value;

use crate::models::profile::RawSubmission;

/// Scale that the GPA rule thresholds are expressed on.
pub const CANONICAL_GPA_SCALE: f64 = 4.0;

/// GPA scales a submission may declare.
pub const SUPPORTED_GPA_SCALES: [f64; 2] = [4.0, 10.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeLevel {
    Doctoral,
    Masters,
    Bachelors,
    Other,
}

impl DegreeLevel {
    /// Classifies a degree label, ignoring case, dots, apostrophes and spaces
    /// ("Ph.D." and "PhD" are the same label).
    pub fn from_label(label: &str) -> Self {
        let compact: String = label
            .chars()
            .filter(|c| !matches!(c, '.' | '\'' | ' ' | '-'))
            .collect::<String>()
            .to_lowercase();

        match compact.as_str() {
            "phd" | "dphil" | "doctorate" | "doctoral" | "doctor" => DegreeLevel::Doctoral,
            "master" | "masters" | "msc" | "ms" | "mtech" | "mba" | "ma" | "meng" | "mphil" => {
                DegreeLevel::Masters
            }
            "bachelor" | "bachelors" | "bsc" | "bs" | "btech" | "ba" | "beng" | "be" | "bba" => {
                DegreeLevel::Bachelors
            }
            _ => DegreeLevel::Other,
        }
    }
}

/// Canonical features. Text is lower-cased; GPA is on the 4.0 scale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFeatures {
    pub degree: Option<DegreeLevel>,
    pub field: Option<String>,
    pub gpa: Option<f64>,
    pub experience_years: Option<f64>,
    pub skills: Vec<String>,
}

pub fn normalize(raw: &RawSubmission, default_gpa_scale: f64) -> ProfileFeatures {
    let scale = raw
        .gpa_scale
        .as_ref()
        .and_then(parse_number)
        .filter(|s| SUPPORTED_GPA_SCALES.contains(s))
        .unwrap_or(default_gpa_scale);

    ProfileFeatures {
        degree: raw
            .degree
            .as_ref()
            .and_then(text_value)
            .map(|d| DegreeLevel::from_label(&d)),
        field: raw
            .specialization_value()
            .and_then(text_value)
            .map(|f| f.to_lowercase()),
        gpa: raw
            .gpa_value()
            .and_then(parse_number)
            .filter(|g| *g >= 0.0)
            .map(|g| to_canonical_gpa(g, scale)),
        experience_years: raw
            .experience
            .as_ref()
            .and_then(parse_number)
            .filter(|y| *y >= 0.0),
        skills: raw.skills.as_ref().map(skill_tokens).unwrap_or_default(),
    }
}

pub fn to_canonical_gpa(gpa: f64, scale: f64) -> f64 {
    if scale == CANONICAL_GPA_SCALE {
        gpa
    } else {
        gpa * CANONICAL_GPA_SCALE / scale
    }
}

/// Parses a JSON number or numeric string. Non-finite values are rejected.
pub fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Trimmed, non-empty text. Numbers are accepted and rendered as text.
pub fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Splits skills given either as "a, b, c" or as `["a", "b"]`.
/// Order and casing are preserved; blank tokens are dropped.
pub fn split_skills(value: &Value) -> Vec<String> {
    let raw: Vec<String> = match value {
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        Value::Array(items) => items.iter().filter_map(text_value).collect(),
        _ => Vec::new(),
    };

    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lower-cased skill tokens for case-insensitive matching.
pub fn skill_tokens(value: &Value) -> Vec<String> {
    split_skills(value)
        .into_iter()
        .map(|s| s.to_lowercase())
        .collect()
}
