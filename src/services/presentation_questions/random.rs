use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rand::seq::IndexedRandom;

use crate::models::presentation_questions::requests::RandomQuestionQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, request_storage};

fn no_question() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::PresentationQuestionNotFound,
        "No presentation question available",
    ))
}

pub async fn random_question(
    query: RandomQuestionQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = request_storage(request)?;

    let ids = match storage.list_question_ids(query.difficulty).await {
        Ok(ids) => ids,
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Failed to load questions",
                e,
            ));
        }
    };

    let Some(id) = ids.choose(&mut rand::rng()).copied() else {
        return Ok(no_question());
    };

    match storage.get_question_by_id(id).await {
        Ok(Some(question)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            question,
            "Question retrieved successfully",
        ))),
        // 抽中后被删除
        Ok(None) => Ok(no_question()),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to load question",
            e,
        )),
    }
}
