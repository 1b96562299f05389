use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assessments::requests::{PendingReviewParams, ReviewRequest};
use crate::models::users::entities::UserRole;
use crate::services::ReviewService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ReviewService 实例
static REVIEW_SERVICE: Lazy<ReviewService> = Lazy::new(ReviewService::new_lazy);

pub async fn list_pending(
    req: HttpRequest,
    query: web::Query<PendingReviewParams>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.pending(query.into_inner(), &req).await
}

pub async fn submit_review(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<ReviewRequest>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.review(id.0, body.into_inner(), &req).await
}

// 配置路由
pub fn configure_review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reviews")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::reviewer_roles()))
                    .route("/pending", web::get().to(list_pending))
                    .route("/{id}", web::post().to(submit_review)),
            ),
    );
}
