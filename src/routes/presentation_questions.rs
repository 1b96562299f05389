use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::presentation_questions::requests::{
    CreateQuestionRequest, QuestionListParams, RandomQuestionQuery, UpdateQuestionRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::PresentationQuestionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 PresentationQuestionService 实例
static QUESTION_SERVICE: Lazy<PresentationQuestionService> =
    Lazy::new(PresentationQuestionService::new_lazy);

pub async fn list_questions(
    req: HttpRequest,
    query: web::Query<QuestionListParams>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.list(query.into_inner(), &req).await
}

pub async fn random_question(
    req: HttpRequest,
    query: web::Query<RandomQuestionQuery>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.random(query.into_inner(), &req).await
}

pub async fn create_question(
    req: HttpRequest,
    body: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.create(body.into_inner(), &req).await
}

pub async fn update_question(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.update(id.0, body.into_inner(), &req).await
}

pub async fn delete_question(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.delete(id.0, &req).await
}

// 配置路由
pub fn configure_presentation_question_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/presentation-questions")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_questions))
            .route("/random", web::get().to(random_question))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::reviewer_roles()))
                    .route("", web::post().to(create_question))
                    .route("/{id}", web::put().to(update_question))
                    .route("/{id}", web::delete().to(delete_question)),
            ),
    );
}
