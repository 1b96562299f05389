use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};

use crate::models::assessments::{
    entities::{Assessment, AssessmentStatus},
    requests::ReviewRequest,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, error_response, internal_error, request_storage};

/// 评审前置检查，按顺序：类型、状态、分数范围、本人
pub fn check_review(
    reviewer: &User,
    assessment: &Assessment,
    score: f64,
) -> Result<(), (StatusCode, ErrorCode, String)> {
    if !assessment.kind.requires_review() {
        return Err((
            StatusCode::BAD_REQUEST,
            ErrorCode::AssessmentNotReviewable,
            format!("{} assessments are scored automatically", assessment.kind),
        ));
    }
    if assessment.status != AssessmentStatus::PendingReview {
        return Err((
            StatusCode::CONFLICT,
            ErrorCode::AssessmentAlreadyReviewed,
            "Assessment has already been reviewed".into(),
        ));
    }
    if !score.is_finite() || score < 0.0 || score > assessment.max_score {
        return Err((
            StatusCode::BAD_REQUEST,
            ErrorCode::ReviewScoreInvalid,
            format!("score must be between 0 and {}", assessment.max_score),
        ));
    }
    if assessment.user_id == reviewer.id {
        return Err((
            StatusCode::FORBIDDEN,
            ErrorCode::ReviewOwnAssessment,
            "Cannot review your own assessment".into(),
        ));
    }
    Ok(())
}

pub async fn submit_review(
    assessment_id: i64,
    review: ReviewRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let reviewer = match current_user(request) {
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

    if let Err((status, code, msg)) = check_review(&reviewer, &assessment, review.score) {
        return Ok(error_response(status, code, msg));
    }

    let feedback = review
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());

    match storage
        .review_assessment(assessment_id, reviewer.id, review.score, feedback)
        .await
    {
        Ok(Some(reviewed)) => {
            tracing::info!(
                "Assessment {} reviewed by {} with score {}",
                assessment_id,
                reviewer.id,
                review.score
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(reviewed, "评审已提交")))
        }
        // 并发评审：另一位评审员先完成
        Ok(None) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AssessmentAlreadyReviewed,
            "Assessment has already been reviewed",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to save review",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::AssessmentKind;
    use crate::models::users::entities::{UserRole, UserStatus};

    fn reviewer(id: i64) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            username: "reviewer".into(),
            email: "reviewer@example.com".into(),
            password_hash: String::new(),
            role: UserRole::Supervisor,
            status: UserStatus::Active,
            display_name: None,
            avatar_url: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn pending(kind: AssessmentKind, owner: i64) -> Assessment {
        let now = chrono::Utc::now();
        Assessment {
            id: 1,
            user_id: owner,
            kind,
            level: None,
            language: None,
            status: AssessmentStatus::PendingReview,
            score: None,
            max_score: 100.0,
            details: serde_json::json!({}),
            media_token: Some("tok".into()),
            question_id: None,
            feedback: None,
            reviewer_id: None,
            completed_at: now,
            reviewed_at: None,
            created_at: now,
        }
    }

    fn code_of(result: Result<(), (StatusCode, ErrorCode, String)>) -> (StatusCode, ErrorCode) {
        let (status, code, _) = result.unwrap_err();
        (status, code)
    }

    #[test]
    fn test_auto_scored_kind_not_reviewable() {
        let a = pending(AssessmentKind::Listening, 2);
        assert_eq!(
            code_of(check_review(&reviewer(1), &a, 50.0)),
            (StatusCode::BAD_REQUEST, ErrorCode::AssessmentNotReviewable)
        );
    }

    #[test]
    fn test_already_reviewed_conflicts() {
        let mut a = pending(AssessmentKind::Speaking, 2);
        a.status = AssessmentStatus::Reviewed;
        assert_eq!(
            code_of(check_review(&reviewer(1), &a, 50.0)),
            (StatusCode::CONFLICT, ErrorCode::AssessmentAlreadyReviewed)
        );
    }

    #[test]
    fn test_score_bounds() {
        let a = pending(AssessmentKind::Presentation, 2);
        assert_eq!(
            code_of(check_review(&reviewer(1), &a, 100.5)),
            (StatusCode::BAD_REQUEST, ErrorCode::ReviewScoreInvalid)
        );
        assert_eq!(
            code_of(check_review(&reviewer(1), &a, -0.1)),
            (StatusCode::BAD_REQUEST, ErrorCode::ReviewScoreInvalid)
        );
        assert!(check_review(&reviewer(1), &a, 0.0).is_ok());
        assert!(check_review(&reviewer(1), &a, 100.0).is_ok());
    }

    #[test]
    fn test_cannot_review_own_attempt() {
        let a = pending(AssessmentKind::Speaking, 1);
        assert_eq!(
            code_of(check_review(&reviewer(1), &a, 80.0)),
            (StatusCode::FORBIDDEN, ErrorCode::ReviewOwnAssessment)
        );
    }
}
