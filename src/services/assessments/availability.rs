use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::cooldown::check_cooldown;
use crate::models::assessments::{
    entities::CooldownKey, requests::AvailabilityQuery, responses::AvailabilityResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;
use crate::services::{current_user, internal_error, request_storage};
use crate::utils::validate::validate_language;

pub async fn check_availability(
    query: AvailabilityQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    // 不受冷却期限制的类型随时可测
    if !query.kind.has_cooldown() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            AvailabilityResponse {
                available: true,
                cooldown_days: 0,
                last_completed_at: None,
                next_available_at: None,
            },
            "Assessment is available",
        )));
    }

    let language = query
        .language
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty());
    let (Some(level), Some(language)) = (query.level, language) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssessmentInvalid,
            format!("level and language are required for {}", query.kind),
        )));
    };
    if let Err(msg) = validate_language(&language) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AssessmentInvalid, msg)));
    }

    let key = CooldownKey {
        user_id: user.id,
        kind: query.kind,
        level,
        language,
    };

    let storage = request_storage(request)?;
    let last_completed_at = match storage.get_last_completed_at(&key).await {
        Ok(last) => last,
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Failed to check cooldown",
                e,
            ));
        }
    };

    let cooldown_days = DynamicConfig::cooldown_days().await;
    let availability = check_cooldown(last_completed_at, chrono::Utc::now(), cooldown_days);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AvailabilityResponse {
            available: availability.available,
            cooldown_days: cooldown_days.max(0),
            last_completed_at,
            next_available_at: availability.next_available_at,
        },
        "Availability retrieved successfully",
    )))
}
