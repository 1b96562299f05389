use serde::Serialize;
use ts_rs::TS;

use super::entities::LeetCodeStats;

/// 统计预览（不落库）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/leetcode.ts")]
pub struct LeetCodePreviewResponse {
    pub stats: LeetCodeStats,
    pub weighted_solved: i64,
    pub target_score: i64,
    pub score: f64,
    pub max_score: f64,
}
