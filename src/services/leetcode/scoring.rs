use crate::models::assessments::entities::round2;
use crate::models::leetcode::entities::LeetCodeStats;

pub const MAX_SCORE: f64 = 100.0;

const EASY_WEIGHT: i64 = 1;
const MEDIUM_WEIGHT: i64 = 3;
const HARD_WEIGHT: i64 = 5;

pub fn weighted_solved(stats: &LeetCodeStats) -> i64 {
    stats.easy_solved * EASY_WEIGHT
        + stats.medium_solved * MEDIUM_WEIGHT
        + stats.hard_solved * HARD_WEIGHT
}

/// 加权解题数达到 target 即满分
pub fn compute_score(weighted: i64, target: i64) -> f64 {
    let target = target.max(1) as f64;
    round2((weighted.max(0) as f64 / target * MAX_SCORE).min(MAX_SCORE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(easy: i64, medium: i64, hard: i64) -> LeetCodeStats {
        LeetCodeStats {
            username: "alice".into(),
            total_solved: easy + medium + hard,
            easy_solved: easy,
            medium_solved: medium,
            hard_solved: hard,
            acceptance_rate: None,
            ranking: None,
            fetched_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_weights() {
        assert_eq!(weighted_solved(&stats(10, 0, 0)), 10);
        assert_eq!(weighted_solved(&stats(10, 4, 2)), 10 + 12 + 10);
    }

    #[test]
    fn test_score_scales_and_caps() {
        assert_eq!(compute_score(0, 500), 0.0);
        assert_eq!(compute_score(250, 500), 50.0);
        assert_eq!(compute_score(1, 3), 33.33);
        assert_eq!(compute_score(800, 500), MAX_SCORE);
    }

    #[test]
    fn test_non_positive_target_treated_as_one() {
        assert_eq!(compute_score(1, 0), MAX_SCORE);
        assert_eq!(compute_score(0, -5), 0.0);
    }
}
