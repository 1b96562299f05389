use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// LeetCode 解题统计快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/leetcode.ts")]
pub struct LeetCodeStats {
    pub username: String,
    pub total_solved: i64,
    pub easy_solved: i64,
    pub medium_solved: i64,
    pub hard_solved: i64,
    pub acceptance_rate: Option<f64>,
    pub ranking: Option<i64>,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// 上游接口原始响应（leetcode-stats-api 格式）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamStats {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_solved: i64,
    #[serde(default)]
    pub easy_solved: i64,
    #[serde(default)]
    pub medium_solved: i64,
    #[serde(default)]
    pub hard_solved: i64,
    #[serde(default)]
    pub acceptance_rate: Option<f64>,
    #[serde(default)]
    pub ranking: Option<i64>,
}
