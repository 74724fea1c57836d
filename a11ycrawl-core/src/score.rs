// Page scoring from axe violations

use a11ycrawl_scanner::{Impact, Violation};
use serde::{Deserialize, Serialize};

pub const PERFECT_SCORE: u8 = 100;

/// Points deducted for one violation of the given impact.
///
/// Critical and unknown impacts deduct nothing, matching the scores the
/// service has always reported.
pub fn impact_penalty(impact: Option<Impact>) -> u32 {
    match impact {
        Some(Impact::Serious) => 30,
        Some(Impact::Moderate) => 15,
        Some(Impact::Minor) => 5,
        Some(Impact::Critical) | Some(Impact::Unknown) | None => 0,
    }
}

/// Score in `[0, 100]`: 100 minus the penalties, floored at zero.
pub fn score(violations: &[Violation]) -> u8 {
    let penalty = violations
        .iter()
        .fold(0u32, |total, v| total.saturating_add(impact_penalty(v.impact)));
    u32::from(PERFECT_SCORE).saturating_sub(penalty) as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub description: String,
    pub help: String,
    #[serde(rename = "helpUrl")]
    pub help_url: String,
}

impl From<&Violation> for Suggestion {
    fn from(violation: &Violation) -> Self {
        Self {
            description: violation.description.clone(),
            help: violation.help.clone(),
            help_url: violation.help_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub suggestions: Vec<Suggestion>,
}

/// Every violation, in order, regardless of whether it affects the score.
pub fn summarize(violations: &[Violation]) -> Summary {
    Summary {
        count: violations.len(),
        suggestions: violations.iter().map(Suggestion::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(impact: Option<Impact>) -> Violation {
        Violation {
            impact,
            ..Default::default()
        }
    }

    #[test]
    fn test_penalties() {
        assert_eq!(impact_penalty(Some(Impact::Serious)), 30);
        assert_eq!(impact_penalty(Some(Impact::Moderate)), 15);
        assert_eq!(impact_penalty(Some(Impact::Minor)), 5);
        assert_eq!(impact_penalty(Some(Impact::Critical)), 0);
        assert_eq!(impact_penalty(None), 0);
    }

    #[test]
    fn test_score_saturates_at_zero() {
        let many = vec![violation(Some(Impact::Serious)); 10_000];
        assert_eq!(score(&many), 0);
    }
}
