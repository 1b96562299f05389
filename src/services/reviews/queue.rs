use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::assessments::{
    entities::AssessmentStatus,
    requests::{AssessmentListQuery, PendingReviewParams},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, request_storage};

/// 待评审记录，先提交的排在前面
pub async fn list_pending(
    params: PendingReviewParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = request_storage(request)?;

    let query = AssessmentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        user_id: None,
        kind: params.kind,
        status: Some(AssessmentStatus::PendingReview),
        oldest_first: true,
    };

    match storage.list_assessments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Pending reviews retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to retrieve pending reviews",
            e,
        )),
    }
}
