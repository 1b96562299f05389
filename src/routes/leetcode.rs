use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::leetcode::requests::LeetCodeSyncRequest;
use crate::services::LeetCodeService;

// 懒加载的全局 LeetCodeService 实例
static LEETCODE_SERVICE: Lazy<LeetCodeService> = Lazy::new(LeetCodeService::new_lazy);

pub async fn preview_stats(
    req: HttpRequest,
    username: web::Path<String>,
) -> ActixResult<HttpResponse> {
    LEETCODE_SERVICE
        .preview(username.into_inner(), &req)
        .await
}

pub async fn sync_stats(
    req: HttpRequest,
    body: web::Json<LeetCodeSyncRequest>,
) -> ActixResult<HttpResponse> {
    LEETCODE_SERVICE.sync(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_leetcode_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/leetcode")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/stats/{username}")
                    .wrap(RateLimit::leetcode())
                    .route(web::get().to(preview_stats)),
            )
            .service(
                web::resource("/sync")
                    .wrap(RateLimit::leetcode())
                    .route(web::post().to(sync_stats)),
            ),
    );
}
