use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, request_storage};

pub async fn delete_user(user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
    // 禁止删除当前登录用户
    if RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete current user",
        )));
    }

    let storage = request_storage(request)?;

    match storage.delete_user(user_id).await {
        Ok(true) => {
            tracing::info!("User {} deleted", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::UserDeleteFailed,
            "User deletion failed",
            e,
        )),
    }
}
