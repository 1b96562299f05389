use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, request_storage};

pub async fn delete_assessment(
    assessment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = request_storage(request)?;

    match storage.delete_assessment(assessment_id).await {
        Ok(true) => {
            tracing::info!("Assessment {} deleted", assessment_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("测评已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssessmentNotFound,
            "Assessment not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to delete assessment",
            e,
        )),
    }
}
