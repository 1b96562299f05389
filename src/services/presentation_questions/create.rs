use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{normalize_prompt, normalize_topic};
use crate::models::presentation_questions::requests::CreateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, request_storage};

pub async fn create_question(
    req: CreateQuestionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let normalized = normalize_topic(&req.topic).and_then(|topic| {
        normalize_prompt(&req.prompt).map(|prompt| CreateQuestionRequest {
            topic,
            prompt,
            difficulty: req.difficulty,
        })
    });
    let req = match normalized {
        Ok(req) => req,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::PresentationQuestionInvalid,
                msg,
            )));
        }
    };

    let storage = request_storage(request)?;
    match storage.create_question(user.id, req).await {
        Ok(question) => {
            tracing::info!("Presentation question {} created by {}", question.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(question, "题目创建成功")))
        }
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to create question",
            e,
        )),
    }
}
