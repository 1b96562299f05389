use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::{bearer_token, user_cache_key};
use crate::models::ApiResponse;
use crate::services::request_cache;
use crate::utils::jwt::JwtUtils;

/// 处理用户登出
/// 清除 refresh_token cookie，并移除该 access token 对应的用户缓存
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(token) = bearer_token(request) {
        let cache = request_cache(request)?;
        cache.remove(&user_cache_key(token)).await;
    }

    // max_age=0 会让浏览器删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("登出成功")))
}
