use crate::models::prediction::{RankedPrediction, RankedRole};
use crate::prediction::catalog::Role;
use crate::prediction::scoring::{RoleScore, ScoreVector};

pub const DEFAULT_TOP_N: usize = 3;
pub const MAX_CONFIDENCE: u32 = 100;

/// Orders a score vector and keeps the top N roles.
///
/// Sort is by raw score descending. Ties keep catalog declaration order (the
/// sort is stable over a vector already in catalog order), and zero-score
/// roles fill remaining slots in that same order.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    top_n: usize,
}

impl Ranker {
    /// `top_n` is clamped to `1..=catalog size`.
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n: top_n.clamp(1, Role::ALL.len()),
        }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn rank(&self, scores: &ScoreVector) -> RankedPrediction {
        let mut ordered: Vec<&RoleScore> = scores.iter().collect();
        ordered.sort_by(|a, b| b.score.cmp(&a.score));

        let mut ranked = ordered.into_iter().take(self.top_n).map(to_ranked_role);
        // `top_n >= 1` and the catalog is non-empty, so a primary always exists.
        let primary = ranked.next().unwrap_or_else(|| to_ranked_role(scores.get(Role::ALL[0])));

        RankedPrediction {
            primary,
            alternatives: ranked.collect(),
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

/// Raw scores can exceed 100 through compounding rules; confidence is
/// clamped, not rescaled.
pub fn clamp_confidence(score: u32) -> u32 {
    score.min(MAX_CONFIDENCE)
}

fn to_ranked_role(entry: &RoleScore) -> RankedRole {
    RankedRole {
        role: entry.role,
        confidence: clamp_confidence(entry.score),
        justification: justify(&entry.contributions),
    }
}

fn justify(contributions: &[&'static str]) -> Option<String> {
    if contributions.is_empty() {
        return None;
    }
    let mut unique: Vec<&str> = Vec::with_capacity(contributions.len());
    for name in contributions {
        if !unique.contains(name) {
            unique.push(name);
        }
    }
    Some(format!("Matched: {}", unique.join(", ")))
}
