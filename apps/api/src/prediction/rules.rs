//! Declarative rule table. Each rule pairs a condition on the normalized
//! features with the points it awards; rules only ever add.

use crate::prediction::catalog::Role::{self, *};
use crate::prediction::normalizer::{DegreeLevel, ProfileFeatures};

pub const GPA_HIGH_THRESHOLD: f64 = 3.5;
pub const GPA_MID_THRESHOLD: f64 = 3.0;
pub const EXPERIENCE_THRESHOLD_YEARS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// Field text contains any of the needles. Fires at most once.
    FieldContains(&'static [&'static str]),
    DegreeIs(DegreeLevel),
    /// `min <= gpa < below` on the canonical 4.0 scale.
    GpaInRange { min: f64, below: Option<f64> },
    ExperienceAbove(f64),
    /// Fires once per skill token containing any of the needles.
    SkillContains(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Award {
    Roles(&'static [(Role, u32)]),
    EveryRole(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub name: &'static str,
    pub condition: Condition,
    pub award: Award,
}

impl Rule {
    /// How many times this rule fires for the given features.
    pub fn firings(&self, features: &ProfileFeatures) -> u32 {
        match self.condition {
            Condition::FieldContains(needles) => features
                .field
                .as_deref()
                .map_or(0, |field| contains_any(field, needles) as u32),
            Condition::DegreeIs(level) => (features.degree == Some(level)) as u32,
            Condition::GpaInRange { min, below } => features.gpa.map_or(0, |gpa| {
                (gpa >= min && below.map_or(true, |upper| gpa < upper)) as u32
            }),
            Condition::ExperienceAbove(years) => features
                .experience_years
                .map_or(0, |exp| (exp > years) as u32),
            Condition::SkillContains(needles) => features
                .skills
                .iter()
                .filter(|skill| contains_any(skill, needles))
                .count() as u32,
        }
    }

    /// Points this rule awards `role` per firing.
    pub fn points_for(&self, role: Role) -> u32 {
        match self.award {
            Award::EveryRole(points) => points,
            Award::Roles(awards) => awards
                .iter()
                .filter(|(r, _)| *r == role)
                .map(|(_, points)| points)
                .sum(),
        }
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// The reference rule set, evaluated in this order.
pub const DEFAULT_RULES: &[Rule] = &[
    Rule {
        name: "computing field",
        condition: Condition::FieldContains(&["computer", "software"]),
        award: Award::Roles(&[(SoftwareEngineer, 30), (DataScientist, 20)]),
    },
    Rule {
        name: "data field",
        condition: Condition::FieldContains(&["data", "statistics"]),
        award: Award::Roles(&[(DataScientist, 30), (BusinessAnalyst, 20)]),
    },
    Rule {
        name: "business field",
        condition: Condition::FieldContains(&["business", "management"]),
        award: Award::Roles(&[(ProductManager, 30), (BusinessAnalyst, 20), (Consultant, 20)]),
    },
    Rule {
        name: "marketing field",
        condition: Condition::FieldContains(&["marketing"]),
        award: Award::Roles(&[(MarketingManager, 40)]),
    },
    Rule {
        name: "finance field",
        condition: Condition::FieldContains(&["finance", "economics"]),
        award: Award::Roles(&[(FinancialAnalyst, 40)]),
    },
    Rule {
        name: "research field",
        condition: Condition::FieldContains(&["science", "research"]),
        award: Award::Roles(&[(ResearchScientist, 30)]),
    },
    Rule {
        name: "doctoral degree",
        condition: Condition::DegreeIs(DegreeLevel::Doctoral),
        award: Award::Roles(&[(ResearchScientist, 20), (DataScientist, 15)]),
    },
    Rule {
        name: "master's degree",
        condition: Condition::DegreeIs(DegreeLevel::Masters),
        award: Award::EveryRole(10),
    },
    Rule {
        name: "high GPA",
        condition: Condition::GpaInRange {
            min: GPA_HIGH_THRESHOLD,
            below: None,
        },
        award: Award::EveryRole(15),
    },
    Rule {
        name: "good GPA",
        condition: Condition::GpaInRange {
            min: GPA_MID_THRESHOLD,
            below: Some(GPA_HIGH_THRESHOLD),
        },
        award: Award::EveryRole(10),
    },
    Rule {
        name: "work experience",
        condition: Condition::ExperienceAbove(EXPERIENCE_THRESHOLD_YEARS),
        award: Award::EveryRole(10),
    },
    Rule {
        name: "programming skill",
        condition: Condition::SkillContains(&["programming", "coding"]),
        award: Award::Roles(&[(SoftwareEngineer, 10), (DataScientist, 5)]),
    },
    Rule {
        name: "data skill",
        condition: Condition::SkillContains(&["data", "analytics"]),
        award: Award::Roles(&[(DataScientist, 10), (BusinessAnalyst, 5)]),
    },
    Rule {
        name: "leadership skill",
        condition: Condition::SkillContains(&["leadership", "management"]),
        award: Award::Roles(&[(ProductManager, 10), (Consultant, 5)]),
    },
];
