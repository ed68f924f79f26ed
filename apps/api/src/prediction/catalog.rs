//! The fixed role catalog. Declaration order is significant: it is the
//! tie-break order for ranking and the fill order when too few roles score.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Role {
    SoftwareEngineer,
    DataScientist,
    ProductManager,
    BusinessAnalyst,
    MarketingManager,
    FinancialAnalyst,
    ResearchScientist,
    Consultant,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    /// Every catalog role, in declaration order.
    pub const ALL: [Role; 8] = [
        Role::SoftwareEngineer,
        Role::DataScientist,
        Role::ProductManager,
        Role::BusinessAnalyst,
        Role::MarketingManager,
        Role::FinancialAnalyst,
        Role::ResearchScientist,
        Role::Consultant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Role::SoftwareEngineer => "Software Engineer",
            Role::DataScientist => "Data Scientist",
            Role::ProductManager => "Product Manager",
            Role::BusinessAnalyst => "Business Analyst",
            Role::MarketingManager => "Marketing Manager",
            Role::FinancialAnalyst => "Financial Analyst",
            Role::ResearchScientist => "Research Scientist",
            Role::Consultant => "Consultant",
        }
    }

    /// Position in the catalog; also the slot index in a `ScoreVector`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
