//! Trend aggregation over a user's prediction history.
//!
//! Pure and recomputed on demand; nothing here is persisted. Empty input is a
//! normal state (new accounts) and yields an empty summary.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::prediction::PredictionRecord;

pub const TOP_ROLE_LIMIT: usize = 3;

/// What the aggregator needs from a history entry.
pub trait HistoryEntry {
    fn primary_role(&self) -> &str;
    /// Calendar year the entry was created, if it can be determined.
    fn created_year(&self) -> Option<i32>;
    fn education_label(&self) -> Option<String>;
}

impl HistoryEntry for PredictionRecord {
    fn primary_role(&self) -> &str {
        self.prediction.primary.role.label()
    }

    fn created_year(&self) -> Option<i32> {
        Some(self.created_at.year())
    }

    fn education_label(&self) -> Option<String> {
        Some(self.education.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    /// Up to three most frequent primary roles; ties go to the role seen first.
    pub top_roles: Vec<String>,
    /// year → role → count of primary predictions.
    pub yearly_role_counts: BTreeMap<String, BTreeMap<String, u32>>,
    /// The `yearly_role_counts` entry for the most recent year.
    pub latest_year_role_counts: BTreeMap<String, u32>,
    pub total_predictions: usize,
    /// "<degree> - <specialization>" → number of predictions.
    pub education_breakdown: BTreeMap<String, u32>,
}

pub fn aggregate<E: HistoryEntry>(entries: &[E]) -> TrendSummary {
    // Insertion order doubles as first-appearance order for tie-breaking.
    let mut frequency: Vec<(&str, u32)> = Vec::new();
    let mut by_year: BTreeMap<i32, BTreeMap<String, u32>> = BTreeMap::new();
    let mut education_breakdown: BTreeMap<String, u32> = BTreeMap::new();

    for entry in entries {
        let role = entry.primary_role();

        match frequency.iter_mut().find(|(r, _)| *r == role) {
            Some((_, count)) => *count += 1,
            None => frequency.push((role, 1)),
        }

        if let Some(year) = entry.created_year() {
            *by_year
                .entry(year)
                .or_default()
                .entry(role.to_string())
                .or_default() += 1;
        }

        if let Some(label) = entry.education_label() {
            *education_breakdown.entry(label).or_default() += 1;
        }
    }

    frequency.sort_by(|a, b| b.1.cmp(&a.1));
    let top_roles = frequency
        .iter()
        .take(TOP_ROLE_LIMIT)
        .map(|(role, _)| role.to_string())
        .collect();

    let latest_year_role_counts = by_year
        .iter()
        .next_back()
        .map(|(_, counts)| counts.clone())
        .unwrap_or_default();

    TrendSummary {
        top_roles,
        yearly_role_counts: by_year
            .into_iter()
            .map(|(year, counts)| (year.to_string(), counts))
            .collect(),
        latest_year_role_counts,
        total_predictions: entries.len(),
        education_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prediction::{RankedPrediction, RankedRole};
    use crate::models::profile::EducationProfile;
    use crate::prediction::catalog::Role;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    struct Entry {
        role: &'static str,
        year: Option<i32>,
    }

    impl HistoryEntry for Entry {
        fn primary_role(&self) -> &str {
            self.role
        }

        fn created_year(&self) -> Option<i32> {
            self.year
        }

        fn education_label(&self) -> Option<String> {
            None
        }
    }

    fn entry(role: &'static str, year: Option<i32>) -> Entry {
        Entry { role, year }
    }

    fn record(role: Role, year: i32, degree: &str) -> PredictionRecord {
        PredictionRecord {
            id: Uuid::new_v4(),
            owner_id: "owner-1".to_string(),
            education: EducationProfile {
                degree: degree.to_string(),
                specialization: "Data Science".to_string(),
                gpa: 3.5,
                gpa_scale: 4.0,
                graduation_year: 2020,
                university: "Uni".to_string(),
                experience_years: None,
                skills: vec![],
            },
            prediction: RankedPrediction {
                primary: RankedRole {
                    role,
                    confidence: 60,
                    justification: None,
                },
                alternatives: vec![],
            },
            created_at: Utc.with_ymd_and_hms(year, 6, 15, 9, 30, 0).unwrap(),
        }
    }

    fn counts(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_history_is_empty_summary() {
        let summary = aggregate::<PredictionRecord>(&[]);
        assert!(summary.top_roles.is_empty());
        assert!(summary.yearly_role_counts.is_empty());
        assert!(summary.latest_year_role_counts.is_empty());
        assert_eq!(summary.total_predictions, 0);
    }

    #[test]
    fn test_same_year_history() {
        let records = vec![
            record(Role::DataScientist, 2024, "Master"),
            record(Role::DataScientist, 2024, "Master"),
            record(Role::SoftwareEngineer, 2024, "Master"),
        ];
        let summary = aggregate(&records);

        assert_eq!(summary.top_roles, vec!["Data Scientist", "Software Engineer"]);
        assert_eq!(
            summary.latest_year_role_counts,
            counts(&[("Data Scientist", 2), ("Software Engineer", 1)])
        );
        assert_eq!(summary.yearly_role_counts.len(), 1);
        assert_eq!(summary.education_breakdown, counts(&[("Master - Data Science", 3)]));
    }

    #[test]
    fn test_top_roles_ties_break_by_first_appearance() {
        let entries = vec![
            entry("Consultant", Some(2023)),
            entry("Business Analyst", Some(2023)),
            entry("Product Manager", Some(2023)),
            entry("Business Analyst", Some(2023)),
            entry("Consultant", Some(2023)),
            entry("Data Scientist", Some(2023)),
            entry("Product Manager", Some(2023)),
        ];
        let summary = aggregate(&entries);
        assert_eq!(
            summary.top_roles,
            vec!["Consultant", "Business Analyst", "Product Manager"]
        );
    }

    #[test]
    fn test_latest_year_is_numeric_maximum() {
        let records = vec![
            record(Role::Consultant, 2024, "MBA"),
            record(Role::DataScientist, 2022, "MBA"),
            record(Role::Consultant, 2024, "MBA"),
            record(Role::ProductManager, 2023, "MBA"),
        ];
        let summary = aggregate(&records);

        assert_eq!(summary.latest_year_role_counts, counts(&[("Consultant", 2)]));
        assert_eq!(
            summary.yearly_role_counts.keys().collect::<Vec<_>>(),
            vec!["2022", "2023", "2024"]
        );
        assert_eq!(summary.yearly_role_counts["2022"], counts(&[("Data Scientist", 1)]));
    }

    #[test]
    fn test_undated_entries_count_only_toward_frequency() {
        let entries = vec![
            entry("Financial Analyst", None),
            entry("Financial Analyst", None),
            entry("Consultant", Some(2021)),
        ];
        let summary = aggregate(&entries);

        assert_eq!(summary.top_roles, vec!["Financial Analyst", "Consultant"]);
        assert_eq!(summary.total_predictions, 3);
        assert_eq!(summary.latest_year_role_counts, counts(&[("Consultant", 1)]));
        assert!(!summary.yearly_role_counts["2021"].contains_key("Financial Analyst"));
    }

    #[test]
    fn test_only_undated_entries_have_no_year_data() {
        let summary = aggregate(&[entry("Consultant", None)]);
        assert_eq!(summary.top_roles, vec!["Consultant"]);
        assert!(summary.yearly_role_counts.is_empty());
        assert!(summary.latest_year_role_counts.is_empty());
    }

    #[test]
    fn test_top_roles_capped_at_three() {
        let entries: Vec<_> = Role::ALL.iter().map(|r| entry(r.label(), Some(2020))).collect();
        assert_eq!(aggregate(&entries).top_roles.len(), TOP_ROLE_LIMIT);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let json = serde_json::to_value(aggregate(&[record(Role::Consultant, 2024, "MBA")])).unwrap();
        assert_eq!(json["topRoles"][0], "Consultant");
        assert_eq!(json["latestYearRoleCounts"]["Consultant"], 1);
        assert_eq!(json["yearlyRoleCounts"]["2024"]["Consultant"], 1);
        assert_eq!(json["totalPredictions"], 1);
    }
}
