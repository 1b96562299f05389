pub mod create;
pub mod delete;
pub mod list;
pub mod random;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::presentation_questions::requests::{
    CreateQuestionRequest, QuestionListParams, RandomQuestionQuery, UpdateQuestionRequest,
};

const MAX_TOPIC_CHARS: usize = 200;
const MAX_PROMPT_CHARS: usize = 5000;

// 题目文本：去掉首尾空白后非空且不超长
pub(crate) fn normalize_text(value: &str, field: &str, max_chars: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if trimmed.chars().count() > max_chars {
        return Err(format!("{field} must be at most {max_chars} characters"));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_topic(value: &str) -> Result<String, String> {
    normalize_text(value, "topic", MAX_TOPIC_CHARS)
}

pub(crate) fn normalize_prompt(value: &str) -> Result<String, String> {
    normalize_text(value, "prompt", MAX_PROMPT_CHARS)
}

pub struct PresentationQuestionService;

impl PresentationQuestionService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn list(
        &self,
        params: QuestionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(params, request).await
    }

    // 随机抽题
    pub async fn random(
        &self,
        query: RandomQuestionQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        random::random_question(query, request).await
    }

    pub async fn create(
        &self,
        req: CreateQuestionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_question(req, request).await
    }

    pub async fn update(
        &self,
        question_id: i64,
        req: UpdateQuestionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_question(question_id, req, request).await
    }

    pub async fn delete(
        &self,
        question_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_question(question_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(normalize_topic("  Climate  ").unwrap(), "Climate");
    }

    #[test]
    fn test_blank_text_rejected() {
        assert!(normalize_topic("   ").is_err());
        assert!(normalize_prompt("").is_err());
    }

    #[test]
    fn test_length_counted_in_chars() {
        let topic = "演".repeat(MAX_TOPIC_CHARS);
        assert!(normalize_topic(&topic).is_ok());
        assert!(normalize_topic(&format!("{topic}讲")).is_err());
    }
}
