use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::assessments::requests::{
    AssessmentListParams, AvailabilityQuery, SubmitAssessmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AssessmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssessmentService 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

pub async fn submit_assessment(
    req: HttpRequest,
    body: web::Json<SubmitAssessmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.submit(body.into_inner(), &req).await
}

pub async fn availability(
    req: HttpRequest,
    query: web::Query<AvailabilityQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .availability(query.into_inner(), &req)
        .await
}

pub async fn list_my_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.list_my(query.into_inner(), &req).await
}

pub async fn list_assessments(
    req: HttpRequest,
    query: web::Query<AssessmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.list_all(query.into_inner(), &req).await
}

pub async fn get_assessment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get(id.0, &req).await
}

pub async fn delete_assessment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.delete(id.0, &req).await
}

pub async fn my_summary(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.my_summary(&req).await
}

// 挂在 /api/v1/users/{id}/assessments/summary
pub async fn user_summary(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.user_summary(user_id.0, &req).await
}

// 配置路由
pub fn configure_assessment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .guard(guard::Post())
                    .wrap(RateLimit::assessment_submit())
                    .to(submit_assessment),
            )
            .route("/availability", web::get().to(availability))
            .route("/my", web::get().to(list_my_assessments))
            .route("/summary", web::get().to(my_summary))
            .route("/{id}", web::get().to(get_assessment))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::reviewer_roles()))
                    .route("", web::get().to(list_assessments))
                    .service(
                        web::scope("")
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .route("/{id}", web::delete().to(delete_assessment)),
                    ),
            ),
    );
}
