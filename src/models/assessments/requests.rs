use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AssessmentKind, AssessmentLevel, AssessmentStatus};
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::lenient_option_i64;

/// 提交测评请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct SubmitAssessmentRequest {
    pub kind: AssessmentKind,
    pub level: Option<AssessmentLevel>,
    pub language: Option<String>,
    /// 自动评分类型（听力/写作/谜题）必填
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    #[ts(type = "unknown")]
    pub details: Option<serde_json::Value>,
    /// 口语/演讲录音录像的下载令牌
    pub media_token: Option<String>,
    /// 演讲题目 ID
    pub question_id: Option<i64>,
}

/// 可测评性查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AvailabilityQuery {
    pub kind: AssessmentKind,
    pub level: Option<AssessmentLevel>,
    pub language: Option<String>,
}

/// 测评列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "lenient_option_i64")]
    pub user_id: Option<i64>,
    pub kind: Option<AssessmentKind>,
    pub status: Option<AssessmentStatus>,
}

/// 待评审队列查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct PendingReviewParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub kind: Option<AssessmentKind>,
}

// 测评列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AssessmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub user_id: Option<i64>,
    pub kind: Option<AssessmentKind>,
    pub status: Option<AssessmentStatus>,
    /// 按创建时间升序（待评审队列先进先出）
    pub oldest_first: bool,
}

/// 评审请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ReviewRequest {
    pub score: f64,
    pub feedback: Option<String>,
}
