use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{normalize_prompt, normalize_topic};
use crate::models::presentation_questions::requests::UpdateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, request_storage};

fn normalize_update(req: UpdateQuestionRequest) -> Result<UpdateQuestionRequest, String> {
    Ok(UpdateQuestionRequest {
        topic: req.topic.as_deref().map(normalize_topic).transpose()?,
        prompt: req.prompt.as_deref().map(normalize_prompt).transpose()?,
        difficulty: req.difficulty,
    })
}

pub async fn update_question(
    question_id: i64,
    req: UpdateQuestionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let req = match normalize_update(req) {
        Ok(req) => req,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::PresentationQuestionInvalid,
                msg,
            )));
        }
    };

    let storage = request_storage(request)?;
    match storage.update_question(question_id, req).await {
        Ok(Some(question)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            question,
            "Question updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PresentationQuestionNotFound,
            "Presentation question not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to update question",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_keeps_absent_fields() {
        let req = UpdateQuestionRequest {
            topic: Some("  New topic ".into()),
            ..Default::default()
        };
        let normalized = normalize_update(req).unwrap();
        assert_eq!(normalized.topic.as_deref(), Some("New topic"));
        assert_eq!(normalized.prompt, None);
    }

    #[test]
    fn test_blank_prompt_rejected() {
        let req = UpdateQuestionRequest {
            prompt: Some(" ".into()),
            ..Default::default()
        };
        assert!(normalize_update(req).is_err());
    }
}
