use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::LeetCodeService;
use super::scoring::{MAX_SCORE, compute_score, weighted_solved};
use crate::cache::{ObjectCache, ObjectCacheExt};
use crate::config::AppConfig;
use crate::errors::SkillHubError;
use crate::models::assessments::entities::{AssessmentKind, AssessmentStatus, NewAssessment};
use crate::models::leetcode::{
    entities::LeetCodeStats, requests::LeetCodeSyncRequest, responses::LeetCodePreviewResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;
use crate::services::{current_user, internal_error, request_cache, request_storage};
use crate::utils::validate::validate_leetcode_username;

fn stats_cache_key(username: &str) -> String {
    format!("leetcode:{}", username.to_lowercase())
}

fn invalid_username(msg: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::LeetCodeUsernameInvalid,
        msg,
    ))
}

// 先查缓存，未命中再请求上游
async fn load_stats(
    service: &LeetCodeService,
    username: &str,
    cache: &Arc<dyn ObjectCache>,
) -> Result<LeetCodeStats, HttpResponse> {
    let key = stats_cache_key(username);
    if let Some(stats) = cache.get_json::<LeetCodeStats>(&key).await {
        return Ok(stats);
    }

    let client = service.client().map_err(|e| {
        internal_error(
            ErrorCode::LeetCodeUpstreamFailed,
            "LeetCode client unavailable",
            e,
        )
    })?;

    match client.fetch_stats(username).await {
        Ok(stats) => {
            cache
                .insert_json(key, &stats, AppConfig::get().cache.default_ttl)
                .await;
            Ok(stats)
        }
        Err(SkillHubError::NotFound(msg)) => Err(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::LeetCodeUserNotFound, msg),
        )),
        Err(e) => {
            tracing::warn!("LeetCode upstream failed for {}: {}", username, e);
            Err(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::LeetCodeUpstreamFailed,
                "LeetCode stats service is unavailable",
            )))
        }
    }
}

async fn build_preview(stats: LeetCodeStats) -> LeetCodePreviewResponse {
    let weighted = weighted_solved(&stats);
    let target_score = DynamicConfig::leetcode_target_score().await;
    LeetCodePreviewResponse {
        score: compute_score(weighted, target_score),
        weighted_solved: weighted,
        target_score,
        max_score: MAX_SCORE,
        stats,
    }
}

pub async fn preview(
    service: &LeetCodeService,
    username: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let username = username.trim().to_string();
    if let Err(msg) = validate_leetcode_username(&username) {
        return Ok(invalid_username(msg));
    }

    let cache = request_cache(request)?;
    let stats = match load_stats(service, &username, &cache).await {
        Ok(stats) => stats,
        Err(response) => return Ok(response),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        build_preview(stats).await,
        "LeetCode stats retrieved successfully",
    )))
}

pub async fn sync(
    service: &LeetCodeService,
    req: LeetCodeSyncRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let username = req.username.trim().to_string();
    if let Err(msg) = validate_leetcode_username(&username) {
        return Ok(invalid_username(msg));
    }

    let cache = request_cache(request)?;
    let stats = match load_stats(service, &username, &cache).await {
        Ok(stats) => stats,
        Err(response) => return Ok(response),
    };

    let preview = build_preview(stats).await;
    let new_assessment = NewAssessment {
        user_id: user.id,
        kind: AssessmentKind::LeetCode,
        level: None,
        language: None,
        status: AssessmentStatus::Completed,
        score: Some(preview.score),
        max_score: preview.max_score,
        details: json!({
            "stats": preview.stats,
            "weighted_solved": preview.weighted_solved,
            "target_score": preview.target_score,
        }),
        media_token: None,
        question_id: None,
        completed_at: chrono::Utc::now(),
    };

    let storage = request_storage(request)?;
    match storage.create_assessment(new_assessment).await {
        Ok(assessment) => {
            tracing::info!(
                "User {} synced LeetCode account {} (score {})",
                user.id,
                username,
                preview.score
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assessment, "LeetCode 成绩已同步")))
        }
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to save LeetCode assessment",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_case_insensitive() {
        assert_eq!(stats_cache_key("Alice"), stats_cache_key("alice"));
        assert_eq!(stats_cache_key("bob_1"), "leetcode:bob_1");
    }
}
