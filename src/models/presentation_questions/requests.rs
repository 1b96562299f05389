use serde::Deserialize;
use ts_rs::TS;

use crate::models::assessments::entities::AssessmentLevel;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/presentation_question.ts")]
pub struct QuestionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub difficulty: Option<AssessmentLevel>,
    /// 按主题/题干搜索
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct QuestionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub difficulty: Option<AssessmentLevel>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/presentation_question.ts")]
pub struct RandomQuestionQuery {
    pub difficulty: Option<AssessmentLevel>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/presentation_question.ts")]
pub struct CreateQuestionRequest {
    pub topic: String,
    pub prompt: String,
    pub difficulty: AssessmentLevel,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/presentation_question.ts")]
pub struct UpdateQuestionRequest {
    pub topic: Option<String>,
    pub prompt: Option<String>,
    pub difficulty: Option<AssessmentLevel>,
}
