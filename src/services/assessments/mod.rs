pub mod availability;
pub mod cooldown;
pub mod delete;
pub mod detail;
pub mod list;
pub mod submit;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::assessments::requests::{
    AssessmentListParams, AvailabilityQuery, SubmitAssessmentRequest,
};

pub struct AssessmentService;

impl AssessmentService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 提交测评
    pub async fn submit(
        &self,
        req: SubmitAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assessment(req, request).await
    }

    // 冷却期查询
    pub async fn availability(
        &self,
        query: AvailabilityQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        availability::check_availability(query, request).await
    }

    pub async fn list_my(
        &self,
        params: AssessmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_my_assessments(params, request).await
    }

    pub async fn list_all(
        &self,
        params: AssessmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_assessments(params, request).await
    }

    pub async fn get(&self, assessment_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::get_assessment(assessment_id, request).await
    }

    pub async fn delete(
        &self,
        assessment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assessment(assessment_id, request).await
    }

    // 成绩汇总
    pub async fn my_summary(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        summary::my_summary(request).await
    }

    pub async fn user_summary(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::user_summary(user_id, request).await
    }
}
