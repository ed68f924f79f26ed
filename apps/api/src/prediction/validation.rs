use serde::{Deserialize, Serialize};

use crate::models::profile::{EducationProfile, RawSubmission};
use crate::prediction::normalizer::{parse_number, split_skills, text_value, SUPPORTED_GPA_SCALES};

const MIN_GRADUATION_YEAR: i64 = 1900;
const MAX_GRADUATION_YEAR: i64 = 2100;

/// A single field-level rejection, returned to the client as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Checks the required profile fields and builds the education snapshot.
///
/// Required: degree, specialization (or field), GPA (cgpa or gpa), graduation
/// year and university. Every problem is collected so the client can fix
/// them in one round trip. Skills and experience stay optional.
pub fn validate_submission(
    raw: &RawSubmission,
    default_gpa_scale: f64,
) -> Result<EducationProfile, Vec<FieldError>> {
    let mut errors = Vec::new();

    let degree = required_text(raw.degree.as_ref(), "degree", &mut errors);
    let specialization = required_text(raw.specialization_value(), "specialization", &mut errors);
    let university = required_text(raw.university.as_ref(), "university", &mut errors);

    let gpa_scale = match raw.gpa_scale.as_ref() {
        None => default_gpa_scale,
        Some(value) => match parse_number(value) {
            Some(scale) if SUPPORTED_GPA_SCALES.contains(&scale) => scale,
            _ => {
                errors.push(FieldError::new("gpa_scale", "gpa_scale must be 4 or 10"));
                default_gpa_scale
            }
        },
    };

    let gpa = match raw.gpa_value() {
        None => {
            errors.push(FieldError::new("cgpa", "cgpa is required"));
            None
        }
        Some(value) => match parse_number(value) {
            Some(gpa) if (0.0..=gpa_scale).contains(&gpa) => Some(gpa),
            Some(gpa) => {
                errors.push(FieldError::new(
                    "cgpa",
                    format!("cgpa {gpa} is outside the 0-{gpa_scale} scale"),
                ));
                None
            }
            None => {
                errors.push(FieldError::new("cgpa", "cgpa must be a number"));
                None
            }
        },
    };

    let graduation_year = match raw.graduation_year.as_ref() {
        None => {
            errors.push(FieldError::new("graduation_year", "graduation_year is required"));
            None
        }
        Some(value) => match parse_number(value) {
            Some(year)
                if year.fract() == 0.0
                    && (MIN_GRADUATION_YEAR as f64..=MAX_GRADUATION_YEAR as f64)
                        .contains(&year) =>
            {
                Some(year as i32)
            }
            _ => {
                errors.push(FieldError::new(
                    "graduation_year",
                    format!(
                        "graduation_year must be a whole year between {MIN_GRADUATION_YEAR} and {MAX_GRADUATION_YEAR}"
                    ),
                ));
                None
            }
        },
    };

    match (degree, specialization, university, gpa, graduation_year) {
        (Some(degree), Some(specialization), Some(university), Some(gpa), Some(graduation_year))
            if errors.is_empty() =>
        {
            Ok(EducationProfile {
                degree,
                specialization,
                gpa,
                gpa_scale,
                graduation_year,
                university,
                experience_years: raw
                    .experience
                    .as_ref()
                    .and_then(parse_number)
                    .filter(|y| *y >= 0.0),
                skills: raw
                    .skills
                    .as_ref()
                    .map(split_skills)
                    .unwrap_or_default(),
            })
        }
        _ => Err(errors),
    }
}

fn required_text(
    value: Option<&serde_json::Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let text = value.and_then(text_value);
    if text.is_none() {
        errors.push(FieldError::new(field, format!("{field} is required")));
    }
    text
}
