use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, request_storage};

pub async fn delete_question(question_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = request_storage(request)?;

    match storage.delete_question(question_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("题目已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PresentationQuestionNotFound,
            "Presentation question not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to delete question",
            e,
        )),
    }
}
