use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, request_storage};

pub async fn get_assessment(
    assessment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = request_storage(request)?;
    let assessment = match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssessmentNotFound,
                "Assessment not found",
            )));
        }
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Failed to load assessment",
                e,
            ));
        }
    };

    // 本人或评审员/管理员可见
    if assessment.user_id != user.id && !user.role.can_review() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "No permission to view this assessment",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assessment,
        "Assessment retrieved successfully",
    )))
}
