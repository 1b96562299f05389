//! 测评存储操作

use super::SeaOrmStorage;
use crate::entity::assessments::{ActiveModel, Column, Entity as Assessments};
use crate::errors::{Result, SkillHubError};
use crate::models::{
    PaginationInfo,
    assessments::{
        entities::{Assessment, AssessmentStatus, CooldownKey, NewAssessment},
        requests::AssessmentListQuery,
        responses::AssessmentListResponse,
    },
    normalize_page,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建测评记录
    pub async fn create_assessment_impl(&self, req: NewAssessment) -> Result<Assessment> {
        let now = chrono::Utc::now().timestamp();

        let details = serde_json::to_string(&req.details)?;

        let model = ActiveModel {
            user_id: Set(req.user_id),
            kind: Set(req.kind.to_string()),
            level: Set(req.level.map(|l| l.to_string())),
            language: Set(req.language),
            status: Set(req.status.to_string()),
            score: Set(req.score),
            max_score: Set(req.max_score),
            details: Set(details),
            media_token: Set(req.media_token),
            question_id: Set(req.question_id),
            feedback: Set(None),
            reviewer_id: Set(None),
            completed_at: Set(req.completed_at.timestamp()),
            reviewed_at: Set(None),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("创建测评记录失败: {e}")))?;

        Ok(result.into_assessment())
    }

    /// 通过 ID 获取测评
    pub async fn get_assessment_by_id_impl(&self, id: i64) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询测评失败: {e}")))?;

        Ok(result.map(|m| m.into_assessment()))
    }

    /// 最近一次完成时间
    pub async fn get_last_completed_at_impl(
        &self,
        key: &CooldownKey,
    ) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        let latest: Option<i64> = Assessments::find()
            .select_only()
            .column(Column::CompletedAt)
            .filter(Column::UserId.eq(key.user_id))
            .filter(Column::Kind.eq(key.kind.to_string()))
            .filter(Column::Level.eq(key.level.to_string()))
            .filter(Column::Language.eq(key.language.as_str()))
            .order_by_desc(Column::CompletedAt)
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询最近测评失败: {e}")))?;

        Ok(latest.map(crate::entity::ts_to_datetime))
    }

    /// 分页列出测评
    pub async fn list_assessments_with_pagination_impl(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Assessments::find();

        if let Some(user_id) = query.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }

        if let Some(kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 待评审队列先进先出，其余按最新优先
        select = if query.oldest_first {
            select
                .order_by_asc(Column::CreatedAt)
                .order_by_asc(Column::Id)
        } else {
            select
                .order_by_desc(Column::CompletedAt)
                .order_by_desc(Column::Id)
        };

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询测评总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询测评列表失败: {e}")))?;

        Ok(AssessmentListResponse {
            items: items.into_iter().map(|m| m.into_assessment()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 某用户全部测评，按完成时间升序
    pub async fn list_user_assessments_impl(&self, user_id: i64) -> Result<Vec<Assessment>> {
        let items = Assessments::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CompletedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询用户测评失败: {e}")))?;

        Ok(items.into_iter().map(|m| m.into_assessment()).collect())
    }

    /// 写入评审结果
    ///
    /// 条件更新：只有 status 仍为 pending_review 的记录会被修改，
    /// 并发评审时后到者得到 None。
    pub async fn review_assessment_impl(
        &self,
        id: i64,
        reviewer_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Assessment>> {
        let now = chrono::Utc::now().timestamp();

        let result = Assessments::update_many()
            .col_expr(Column::Score, sea_orm::sea_query::Expr::value(score))
            .col_expr(Column::Feedback, sea_orm::sea_query::Expr::value(feedback))
            .col_expr(
                Column::ReviewerId,
                sea_orm::sea_query::Expr::value(reviewer_id),
            )
            .col_expr(Column::ReviewedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(AssessmentStatus::Reviewed.to_string()),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(AssessmentStatus::PendingReview.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("保存评审结果失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_assessment_by_id_impl(id).await
    }

    /// 删除测评
    pub async fn delete_assessment_impl(&self, id: i64) -> Result<bool> {
        let result = Assessments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("删除测评失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::{AssessmentKind, AssessmentLevel};
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use chrono::{Duration, Utc};

    async fn setup() -> (SeaOrmStorage, i64, i64) {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let mut ids = Vec::new();
        for (name, role) in [("learner", UserRole::User), ("mentor", UserRole::Supervisor)] {
            let user = storage
                .create_user_impl(CreateUserRequest {
                    username: name.into(),
                    email: format!("{name}@example.com"),
                    password: "hashed".into(),
                    role,
                    display_name: None,
                    avatar_url: None,
                })
                .await
                .unwrap();
            ids.push(user.id);
        }
        (storage, ids[0], ids[1])
    }

    fn listening(user_id: i64, completed_at: chrono::DateTime<Utc>) -> NewAssessment {
        NewAssessment {
            user_id,
            kind: AssessmentKind::Listening,
            level: Some(AssessmentLevel::Beginner),
            language: Some("en".into()),
            status: AssessmentStatus::Completed,
            score: Some(80.0),
            max_score: 100.0,
            details: serde_json::json!({"answers": [1, 2, 3]}),
            media_token: None,
            question_id: None,
            completed_at,
        }
    }

    fn speaking(user_id: i64) -> NewAssessment {
        NewAssessment {
            kind: AssessmentKind::Speaking,
            status: AssessmentStatus::PendingReview,
            score: None,
            ..listening(user_id, Utc::now())
        }
    }

    #[tokio::test]
    async fn test_last_completed_at_matches_full_key() {
        let (storage, learner, _) = setup().await;
        let older = Utc::now() - Duration::days(10);
        let newer = Utc::now() - Duration::days(2);
        storage
            .create_assessment_impl(listening(learner, older))
            .await
            .unwrap();
        storage
            .create_assessment_impl(listening(learner, newer))
            .await
            .unwrap();

        let key = CooldownKey {
            user_id: learner,
            kind: AssessmentKind::Listening,
            level: AssessmentLevel::Beginner,
            language: "en".into(),
        };
        let last = storage.get_last_completed_at_impl(&key).await.unwrap();
        assert_eq!(last.map(|t| t.timestamp()), Some(newer.timestamp()));

        let other_language = CooldownKey {
            language: "fr".into(),
            ..key.clone()
        };
        assert!(
            storage
                .get_last_completed_at_impl(&other_language)
                .await
                .unwrap()
                .is_none()
        );

        let other_level = CooldownKey {
            level: AssessmentLevel::Advanced,
            ..key
        };
        assert!(
            storage
                .get_last_completed_at_impl(&other_level)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_details_survive_storage() {
        let (storage, learner, _) = setup().await;
        let created = storage
            .create_assessment_impl(listening(learner, Utc::now()))
            .await
            .unwrap();
        let fetched = storage
            .get_assessment_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.details["answers"][2], 3);
        assert_eq!(fetched.level, Some(AssessmentLevel::Beginner));
    }

    #[tokio::test]
    async fn test_review_only_applies_once() {
        let (storage, learner, mentor) = setup().await;
        let pending = storage
            .create_assessment_impl(speaking(learner))
            .await
            .unwrap();

        let reviewed = storage
            .review_assessment_impl(pending.id, mentor, 72.5, Some("clear".into()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reviewed.status, AssessmentStatus::Reviewed);
        assert_eq!(reviewed.score, Some(72.5));
        assert_eq!(reviewed.reviewer_id, Some(mentor));
        assert!(reviewed.reviewed_at.is_some());

        let again = storage
            .review_assessment_impl(pending.id, mentor, 10.0, None)
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_pending_queue_is_oldest_first() {
        let (storage, learner, _) = setup().await;
        let first = storage
            .create_assessment_impl(speaking(learner))
            .await
            .unwrap();
        let second = storage
            .create_assessment_impl(speaking(learner))
            .await
            .unwrap();
        storage
            .create_assessment_impl(listening(learner, Utc::now()))
            .await
            .unwrap();

        let queue = storage
            .list_assessments_with_pagination_impl(AssessmentListQuery {
                status: Some(AssessmentStatus::PendingReview),
                oldest_first: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<i64> = queue.items.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(queue.pagination.total, 2);
    }

    #[tokio::test]
    async fn test_delete_assessment() {
        let (storage, learner, _) = setup().await;
        let created = storage
            .create_assessment_impl(listening(learner, Utc::now()))
            .await
            .unwrap();
        assert!(storage.delete_assessment_impl(created.id).await.unwrap());
        assert!(!storage.delete_assessment_impl(created.id).await.unwrap());
        assert!(
            storage
                .list_user_assessments_impl(learner)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
