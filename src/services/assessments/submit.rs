use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::cooldown::check_cooldown;
use crate::models::assessments::{
    entities::{
        AssessmentKind, AssessmentLevel, AssessmentStatus, CooldownKey, NewAssessment,
    },
    requests::SubmitAssessmentRequest,
    responses::CooldownErrorData,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;
use crate::services::{current_user, internal_error, request_storage};
use crate::utils::validate::validate_language;

/// 通过格式校验的提交内容
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub kind: AssessmentKind,
    pub level: Option<AssessmentLevel>,
    pub language: Option<String>,
    pub status: AssessmentStatus,
    pub score: Option<f64>,
    pub max_score: f64,
    pub details: serde_json::Value,
    pub media_token: Option<String>,
    pub question_id: Option<i64>,
}

impl ValidatedSubmission {
    pub fn cooldown_key(&self, user_id: i64) -> Option<CooldownKey> {
        if !self.kind.has_cooldown() {
            return None;
        }
        Some(CooldownKey {
            user_id,
            kind: self.kind,
            level: self.level?,
            language: self.language.clone()?,
        })
    }
}

/// 按测评类型校验请求字段（不访问存储）
pub fn validate_submission(
    req: SubmitAssessmentRequest,
    default_max_score: f64,
) -> Result<ValidatedSubmission, String> {
    let kind = req.kind;
    if kind == AssessmentKind::LeetCode {
        return Err("LeetCode assessments are recorded through /api/v1/leetcode/sync".into());
    }

    let language = req
        .language
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty());

    let (level, language) = if kind.is_language() {
        let level = req
            .level
            .ok_or_else(|| format!("level is required for {kind} assessments"))?;
        let language =
            language.ok_or_else(|| format!("language is required for {kind} assessments"))?;
        validate_language(&language)?;
        (Some(level), Some(language))
    } else {
        (req.level, None)
    };

    let max_score = req.max_score.unwrap_or(default_max_score);
    if !max_score.is_finite() || max_score <= 0.0 {
        return Err("max_score must be greater than 0".into());
    }

    let details = match req.details {
        None | Some(serde_json::Value::Null) => json!({}),
        Some(value @ serde_json::Value::Object(_)) => value,
        Some(_) => return Err("details must be a JSON object".into()),
    };

    if kind.requires_review() {
        let media_token = req
            .media_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| format!("media_token is required for {kind} assessments"))?;

        let question_id = if kind == AssessmentKind::Presentation {
            match req.question_id {
                Some(id) if id > 0 => Some(id),
                _ => return Err("question_id is required for presentation assessments".into()),
            }
        } else {
            None
        };

        return Ok(ValidatedSubmission {
            kind,
            level,
            language,
            status: AssessmentStatus::PendingReview,
            score: None,
            max_score,
            details,
            media_token: Some(media_token),
            question_id,
        });
    }

    let score = req
        .score
        .ok_or_else(|| format!("score is required for {kind} assessments"))?;
    if !score.is_finite() || score < 0.0 || score > max_score {
        return Err(format!("score must be between 0 and {max_score}"));
    }

    Ok(ValidatedSubmission {
        kind,
        level,
        language,
        status: AssessmentStatus::Completed,
        score: Some(score),
        max_score,
        details,
        media_token: None,
        question_id: None,
    })
}

pub async fn submit_assessment(
    req: SubmitAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let default_max_score = crate::config::AppConfig::get().assessment.default_max_score;
    let submission = match validate_submission(req, default_max_score) {
        Ok(s) => s,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::AssessmentInvalid, msg)));
        }
    };

    let storage = request_storage(request)?;

    // 录音录像必须是本人上传的文件
    if let Some(token) = &submission.media_token {
        match storage.get_file_by_token(token).await {
            Ok(Some(file)) if file.user_id == user.id => {}
            Ok(_) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::FileNotFound,
                    "Media file not found",
                )));
            }
            Err(e) => {
                return Ok(internal_error(
                    ErrorCode::InternalServerError,
                    "Failed to load media file",
                    e,
                ));
            }
        }
    }

    if let Some(question_id) = submission.question_id {
        match storage.get_question_by_id(question_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::PresentationQuestionNotFound,
                    "Presentation question not found",
                )));
            }
            Err(e) => {
                return Ok(internal_error(
                    ErrorCode::InternalServerError,
                    "Failed to load presentation question",
                    e,
                ));
            }
        }
    }

    let now = chrono::Utc::now();

    if let Some(key) = submission.cooldown_key(user.id) {
        let last = match storage.get_last_completed_at(&key).await {
            Ok(last) => last,
            Err(e) => {
                return Ok(internal_error(
                    ErrorCode::InternalServerError,
                    "Failed to check cooldown",
                    e,
                ));
            }
        };

        let availability = check_cooldown(last, now, DynamicConfig::cooldown_days().await);
        if let (false, Some(next_available_at)) =
            (availability.available, availability.next_available_at)
        {
            tracing::info!(
                "User {} blocked by cooldown on {}/{}/{} until {}",
                user.id,
                key.kind,
                key.level,
                key.language,
                next_available_at
            );
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error(
                ErrorCode::AssessmentCooldownActive,
                CooldownErrorData { next_available_at },
                "Assessment is in cooldown",
            )));
        }
    }

    let new_assessment = NewAssessment {
        user_id: user.id,
        kind: submission.kind,
        level: submission.level,
        language: submission.language,
        status: submission.status,
        score: submission.score,
        max_score: submission.max_score,
        details: submission.details,
        media_token: submission.media_token,
        question_id: submission.question_id,
        completed_at: now,
    };

    match storage.create_assessment(new_assessment).await {
        Ok(assessment) => {
            tracing::info!(
                "User {} submitted {} assessment {}",
                user.id,
                assessment.kind,
                assessment.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assessment, "测评提交成功")))
        }
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to save assessment",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: AssessmentKind) -> SubmitAssessmentRequest {
        SubmitAssessmentRequest {
            kind,
            level: None,
            language: None,
            score: None,
            max_score: None,
            details: None,
            media_token: None,
            question_id: None,
        }
    }

    #[test]
    fn test_leetcode_rejected() {
        assert!(validate_submission(request(AssessmentKind::LeetCode), 100.0).is_err());
    }

    #[test]
    fn test_language_kind_needs_level_and_language() {
        let mut req = request(AssessmentKind::Listening);
        req.score = Some(80.0);
        assert!(validate_submission(req.clone(), 100.0).is_err());

        req.level = Some(AssessmentLevel::Beginner);
        assert!(validate_submission(req.clone(), 100.0).is_err());

        req.language = Some(" EN ".into());
        let ok = validate_submission(req, 100.0).unwrap();
        assert_eq!(ok.language.as_deref(), Some("en"));
        assert_eq!(ok.status, AssessmentStatus::Completed);
        assert_eq!(ok.max_score, 100.0);
    }

    #[test]
    fn test_auto_scored_range() {
        let mut req = request(AssessmentKind::Puzzle);
        assert!(validate_submission(req.clone(), 100.0).is_err());

        req.score = Some(11.0);
        req.max_score = Some(10.0);
        assert!(validate_submission(req.clone(), 100.0).is_err());

        req.score = Some(-1.0);
        assert!(validate_submission(req.clone(), 100.0).is_err());

        req.score = Some(10.0);
        let ok = validate_submission(req.clone(), 100.0).unwrap();
        assert_eq!(ok.score, Some(10.0));
        assert_eq!(ok.level, None);

        req.max_score = Some(0.0);
        req.score = Some(0.0);
        assert!(validate_submission(req, 100.0).is_err());
    }

    #[test]
    fn test_review_kinds_go_pending() {
        let mut req = request(AssessmentKind::Speaking);
        req.level = Some(AssessmentLevel::Advanced);
        req.language = Some("fr".into());
        req.score = Some(99.0);
        assert!(validate_submission(req.clone(), 100.0).is_err());

        req.media_token = Some("abc-123".into());
        let ok = validate_submission(req, 100.0).unwrap();
        assert_eq!(ok.status, AssessmentStatus::PendingReview);
        assert_eq!(ok.score, None);
        assert!(ok.cooldown_key(7).is_some());
    }

    #[test]
    fn test_presentation_needs_question() {
        let mut req = request(AssessmentKind::Presentation);
        req.media_token = Some("abc-123".into());
        assert!(validate_submission(req.clone(), 100.0).is_err());

        req.question_id = Some(3);
        let ok = validate_submission(req, 100.0).unwrap();
        assert_eq!(ok.question_id, Some(3));
        assert_eq!(ok.cooldown_key(7), None);
    }

    #[test]
    fn test_details_must_be_object() {
        let mut req = request(AssessmentKind::Writing);
        req.level = Some(AssessmentLevel::Intermediate);
        req.language = Some("en".into());
        req.score = Some(50.0);
        req.details = Some(json!([1, 2]));
        assert!(validate_submission(req.clone(), 100.0).is_err());

        req.details = Some(json!({"essay": "..."}));
        let ok = validate_submission(req, 100.0).unwrap();
        assert_eq!(ok.details["essay"], "...");
    }
}
