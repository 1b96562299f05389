use serde::Serialize;
use ts_rs::TS;

use super::entities::{Assessment, AssessmentKind};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListResponse {
    pub items: Vec<Assessment>,
    pub pagination: PaginationInfo,
}

/// 可测评性
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AvailabilityResponse {
    pub available: bool,
    pub cooldown_days: i64,
    pub last_completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub next_available_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 冷却期拒绝时附带的数据
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CooldownErrorData {
    pub next_available_at: chrono::DateTime<chrono::Utc>,
}

/// 单个测评类型的成绩汇总
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct KindSummary {
    pub kind: AssessmentKind,
    pub attempts: i64,
    pub scored: i64,
    pub pending: i64,
    pub best_percentage: Option<f64>,
    pub latest_percentage: Option<f64>,
    pub average_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentSummaryResponse {
    pub user_id: i64,
    pub kinds: Vec<KindSummary>,
    pub overall_average: Option<f64>,
    pub total_attempts: i64,
}
