pub mod queue;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::assessments::requests::{PendingReviewParams, ReviewRequest};

pub struct ReviewService;

impl ReviewService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 待评审队列
    pub async fn pending(
        &self,
        params: PendingReviewParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        queue::list_pending(params, request).await
    }

    // 提交评审
    pub async fn review(
        &self,
        assessment_id: i64,
        review: ReviewRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_review(assessment_id, review, request).await
    }
}
