//! Role scoring: pluggable, trait-based scorer over normalized features.
//!
//! Default: `RuleTableScorer` (additive point rules, pure and deterministic).
//! The service holds an `Arc<dyn RoleScorer>` so the backend can be swapped
//! without touching the ranker or handlers.

use crate::prediction::catalog::Role;
use crate::prediction::normalizer::ProfileFeatures;
use crate::prediction::rules::{Rule, DEFAULT_RULES};

/// Raw additive score for one catalog role, with the rules that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleScore {
    pub role: Role,
    pub score: u32,
    pub contributions: Vec<&'static str>,
}

/// One slot per catalog role, indexed by `Role::index`. Every role is always
/// present, at zero if nothing matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreVector {
    slots: Vec<RoleScore>,
}

impl ScoreVector {
    pub fn zeroed() -> Self {
        Self {
            slots: Role::ALL
                .into_iter()
                .map(|role| RoleScore {
                    role,
                    score: 0,
                    contributions: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn add(&mut self, role: Role, points: u32, rule: &'static str) {
        let slot = &mut self.slots[role.index()];
        slot.score = slot.score.saturating_add(points);
        slot.contributions.push(rule);
    }

    pub fn get(&self, role: Role) -> &RoleScore {
        &self.slots[role.index()]
    }

    /// Entries in catalog declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RoleScore> {
        self.slots.iter()
    }
}

pub trait RoleScorer: Send + Sync {
    fn score(&self, features: &ProfileFeatures) -> ScoreVector;
}

/// Evaluates a fixed rule table in order; each firing adds the rule's points.
pub struct RuleTableScorer {
    rules: &'static [Rule],
}

impl RuleTableScorer {
    pub fn new(rules: &'static [Rule]) -> Self {
        Self { rules }
    }
}

impl Default for RuleTableScorer {
    fn default() -> Self {
        Self::new(DEFAULT_RULES)
    }
}

impl RoleScorer for RuleTableScorer {
    fn score(&self, features: &ProfileFeatures) -> ScoreVector {
        let mut scores = ScoreVector::zeroed();

        for rule in self.rules {
            let firings = rule.firings(features);
            if firings == 0 {
                continue;
            }
            for role in Role::ALL {
                let points = rule.points_for(role);
                if points > 0 {
                    scores.add(role, points.saturating_mul(firings), rule.name);
                }
            }
        }

        scores
    }
}
