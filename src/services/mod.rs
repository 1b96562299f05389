pub mod assessments;
pub mod auth;
pub mod files;
pub mod leetcode;
pub mod presentation_questions;
pub mod reviews;
pub mod system;
pub mod users;

pub use assessments::AssessmentService;
pub use auth::AuthService;
pub use files::FileService;
pub use leetcode::LeetCodeService;
pub use presentation_questions::PresentationQuestionService;
pub use reviews::ReviewService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode, web};
use std::fmt::Display;
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

// 从 app_data 中取出存储实例
pub(crate) fn request_storage(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not found in app data"))
}

// 从 app_data 中取出缓存实例
pub(crate) fn request_cache(request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Cache not found in app data"))
}

/// 当前登录用户；未经过 RequireJWT 时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

pub(crate) fn error_response(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}

// 500 响应，同时记录日志
pub(crate) fn internal_error(code: ErrorCode, context: &str, err: impl Display) -> HttpResponse {
    tracing::error!("{context}: {err}");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        code,
        format!("{context}: {err}"),
    )
}
