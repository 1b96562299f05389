use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::presentation_questions::requests::{QuestionListParams, QuestionListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, request_storage};

pub async fn list_questions(
    params: QuestionListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = request_storage(request)?;

    let query = QuestionListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        difficulty: params.difficulty,
        search: params.search,
    };

    match storage.list_questions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Question list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to retrieve question list",
            e,
        )),
    }
}
