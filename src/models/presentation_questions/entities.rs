use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assessments::entities::AssessmentLevel;

/// 演讲题目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/presentation_question.ts")]
pub struct PresentationQuestion {
    pub id: i64,
    pub topic: String,
    pub prompt: String,
    pub difficulty: AssessmentLevel,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
