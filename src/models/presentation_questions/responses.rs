use serde::Serialize;
use ts_rs::TS;

use super::entities::PresentationQuestion;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/presentation_question.ts")]
pub struct QuestionListResponse {
    pub items: Vec<PresentationQuestion>,
    pub pagination: PaginationInfo,
}
