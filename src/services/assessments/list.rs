use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::assessments::requests::{AssessmentListParams, AssessmentListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, request_storage};

async fn run_query(query: AssessmentListQuery, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = request_storage(request)?;

    match storage.list_assessments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assessment list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to retrieve assessment list",
            e,
        )),
    }
}

/// 当前用户自己的测评，忽略 user_id 参数
pub async fn list_my_assessments(
    params: AssessmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let query = AssessmentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        user_id: Some(user.id),
        kind: params.kind,
        status: params.status,
        oldest_first: false,
    };
    run_query(query, request).await
}

pub async fn list_assessments(
    params: AssessmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let query = AssessmentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        user_id: params.user_id,
        kind: params.kind,
        status: params.status,
        oldest_first: false,
    };
    run_query(query, request).await
}
