//! 演讲题库存储操作

use super::SeaOrmStorage;
use crate::entity::presentation_questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{Result, SkillHubError};
use crate::models::{
    PaginationInfo,
    assessments::entities::AssessmentLevel,
    normalize_page,
    presentation_questions::{
        entities::PresentationQuestion,
        requests::{CreateQuestionRequest, QuestionListQuery, UpdateQuestionRequest},
        responses::QuestionListResponse,
    },
};
use crate::utils::contains_like;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建题目
    pub async fn create_question_impl(
        &self,
        created_by: i64,
        req: CreateQuestionRequest,
    ) -> Result<PresentationQuestion> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            topic: Set(req.topic),
            prompt: Set(req.prompt),
            difficulty: Set(req.difficulty.to_string()),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("创建演讲题目失败: {e}")))?;

        Ok(result.into_question())
    }

    pub async fn get_question_by_id_impl(&self, id: i64) -> Result<Option<PresentationQuestion>> {
        let result = Questions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询演讲题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 分页列出题目
    pub async fn list_questions_with_pagination_impl(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Questions::find();

        if let Some(difficulty) = query.difficulty {
            select = select.filter(Column::Difficulty.eq(difficulty.to_string()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Topic.like(contains_like(pattern)))
                    .add(Column::Prompt.like(contains_like(pattern))),
            );
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询题目总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(QuestionListResponse {
            items: items.into_iter().map(|m| m.into_question()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 候选题目 ID
    pub async fn list_question_ids_impl(
        &self,
        difficulty: Option<AssessmentLevel>,
    ) -> Result<Vec<i64>> {
        let mut select = Questions::find().select_only().column(Column::Id);

        if let Some(difficulty) = difficulty {
            select = select.filter(Column::Difficulty.eq(difficulty.to_string()));
        }

        select
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询题目失败: {e}")))
    }

    /// 更新题目
    pub async fn update_question_impl(
        &self,
        id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<PresentationQuestion>> {
        let Some(existing) = Questions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询演讲题目失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(topic) = update.topic {
            model.topic = Set(topic);
        }
        if let Some(prompt) = update.prompt {
            model.prompt = Set(prompt);
        }
        if let Some(difficulty) = update.difficulty {
            model.difficulty = Set(difficulty.to_string());
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("更新演讲题目失败: {e}")))?;

        Ok(Some(updated.into_question()))
    }

    pub async fn delete_question_impl(&self, id: i64) -> Result<bool> {
        let result = Questions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("删除演讲题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};

    async fn setup() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let admin = storage
            .create_user_impl(CreateUserRequest {
                username: "admin".into(),
                email: "admin@example.com".into(),
                password: "hashed".into(),
                role: UserRole::Admin,
                display_name: None,
                avatar_url: None,
            })
            .await
            .unwrap();
        (storage, admin.id)
    }

    fn question(topic: &str, difficulty: AssessmentLevel) -> CreateQuestionRequest {
        CreateQuestionRequest {
            topic: topic.into(),
            prompt: format!("Talk about {topic} for three minutes."),
            difficulty,
        }
    }

    #[tokio::test]
    async fn test_filter_and_search() {
        let (storage, admin) = setup().await;
        storage
            .create_question_impl(admin, question("Climate", AssessmentLevel::Advanced))
            .await
            .unwrap();
        storage
            .create_question_impl(admin, question("Hobbies", AssessmentLevel::Beginner))
            .await
            .unwrap();
        storage
            .create_question_impl(admin, question("Travel", AssessmentLevel::Beginner))
            .await
            .unwrap();

        let beginner = storage
            .list_question_ids_impl(Some(AssessmentLevel::Beginner))
            .await
            .unwrap();
        assert_eq!(beginner.len(), 2);

        let found = storage
            .list_questions_with_pagination_impl(QuestionListQuery {
                search: Some("clim".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.pagination.total, 1);
        assert_eq!(found.items[0].topic, "Climate");
    }

    #[tokio::test]
    async fn test_update_question() {
        let (storage, admin) = setup().await;
        let created = storage
            .create_question_impl(admin, question("Cities", AssessmentLevel::Intermediate))
            .await
            .unwrap();

        let updated = storage
            .update_question_impl(
                created.id,
                UpdateQuestionRequest {
                    difficulty: Some(AssessmentLevel::Advanced),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.difficulty, AssessmentLevel::Advanced);
        assert_eq!(updated.topic, "Cities");

        assert!(
            storage
                .update_question_impl(999, UpdateQuestionRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }
}
