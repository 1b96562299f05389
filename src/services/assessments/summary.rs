use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::assessments::{
    entities::{Assessment, AssessmentKind, AssessmentStatus, round2},
    responses::{AssessmentSummaryResponse, KindSummary},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, request_storage};

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(round2(values.iter().sum::<f64>() / values.len() as f64))
}

/// 按类型聚合成绩
///
/// 待评审的记录只计入尝试次数；"最近一次" 按完成时间取最后一条已评分记录。
pub fn summarize(user_id: i64, assessments: &[Assessment]) -> AssessmentSummaryResponse {
    let mut kinds = Vec::new();
    let mut all_percentages = Vec::new();

    for kind in AssessmentKind::ALL {
        let mut attempts: Vec<&Assessment> =
            assessments.iter().filter(|a| a.kind == *kind).collect();
        if attempts.is_empty() {
            continue;
        }
        attempts.sort_by_key(|a| (a.completed_at, a.id));

        let percentages: Vec<f64> = attempts.iter().filter_map(|a| a.percentage()).collect();
        let pending = attempts
            .iter()
            .filter(|a| a.status == AssessmentStatus::PendingReview)
            .count();

        kinds.push(KindSummary {
            kind: *kind,
            attempts: attempts.len() as i64,
            scored: percentages.len() as i64,
            pending: pending as i64,
            best_percentage: percentages.iter().copied().reduce(f64::max),
            latest_percentage: percentages.last().copied(),
            average_percentage: mean(&percentages),
        });
        all_percentages.extend(percentages);
    }

    AssessmentSummaryResponse {
        user_id,
        kinds,
        overall_average: mean(&all_percentages),
        total_attempts: assessments.len() as i64,
    }
}

async fn load_summary(user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = request_storage(request)?;

    match storage.list_user_assessments(user_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize(user_id, &items),
            "Assessment summary retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to build assessment summary",
            e,
        )),
    }
}

pub async fn my_summary(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match current_user(request) {
        Ok(user) => load_summary(user.id, request).await,
        Err(response) => Ok(response),
    }
}

pub async fn user_summary(user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = request_storage(request)?;
    match storage.get_user_by_id(user_id).await {
        Ok(Some(_)) => load_summary(user_id, request).await,
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to get user information",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn attempt(
        id: i64,
        kind: AssessmentKind,
        score: Option<f64>,
        max_score: f64,
        day: i64,
    ) -> Assessment {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let completed_at = base + Duration::days(day);
        Assessment {
            id,
            user_id: 1,
            kind,
            level: None,
            language: None,
            status: if score.is_some() {
                AssessmentStatus::Completed
            } else {
                AssessmentStatus::PendingReview
            },
            score,
            max_score,
            details: serde_json::json!({}),
            media_token: None,
            question_id: None,
            feedback: None,
            reviewer_id: None,
            completed_at,
            reviewed_at: None,
            created_at: completed_at,
        }
    }

    #[test]
    fn test_empty_history() {
        let summary = summarize(9, &[]);
        assert_eq!(summary.user_id, 9);
        assert!(summary.kinds.is_empty());
        assert_eq!(summary.overall_average, None);
        assert_eq!(summary.total_attempts, 0);
    }

    #[test]
    fn test_per_kind_aggregation() {
        // 乱序输入，latest 取完成时间最晚的已评分记录
        let items = vec![
            attempt(3, AssessmentKind::Listening, Some(25.0), 100.0, 5),
            attempt(1, AssessmentKind::Listening, Some(9.0), 10.0, 1),
            attempt(2, AssessmentKind::Puzzle, Some(5.0), 10.0, 2),
            attempt(4, AssessmentKind::Speaking, None, 100.0, 6),
        ];

        let summary = summarize(1, &items);
        assert_eq!(summary.total_attempts, 4);
        // 按类型声明顺序输出
        let kinds: Vec<_> = summary.kinds.iter().map(|k| k.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AssessmentKind::Listening,
                AssessmentKind::Speaking,
                AssessmentKind::Puzzle
            ]
        );

        let listening = &summary.kinds[0];
        assert_eq!(listening.attempts, 2);
        assert_eq!(listening.scored, 2);
        assert_eq!(listening.best_percentage, Some(90.0));
        assert_eq!(listening.latest_percentage, Some(25.0));
        assert_eq!(listening.average_percentage, Some(57.5));

        let speaking = &summary.kinds[1];
        assert_eq!(speaking.attempts, 1);
        assert_eq!(speaking.scored, 0);
        assert_eq!(speaking.pending, 1);
        assert_eq!(speaking.best_percentage, None);
        assert_eq!(speaking.average_percentage, None);

        // (90 + 25 + 50) / 3
        assert_eq!(summary.overall_average, Some(55.0));
    }
}
