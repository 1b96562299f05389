use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, SkillHubError};
use crate::models::{
    PaginationInfo, normalize_page,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::contains_like;
use sea_orm::sea_query::{Expr, IntoCondition};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

fn db_err(action: &'static str) -> impl FnOnce(sea_orm::DbErr) -> SkillHubError {
    move |e| SkillHubError::database_operation(format!("{action}: {e}"))
}

impl SeaOrmStorage {
    async fn find_user_where(&self, condition: impl IntoCondition + Send) -> Result<Option<User>> {
        Ok(Users::find()
            .filter(condition)
            .one(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?
            .map(|m| m.into_user()))
    }

    /// 创建用户，新用户一律为启用状态
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            avatar_url: Set(req.avatar_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map(|m| m.into_user())
        .map_err(db_err("创建用户失败"))
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        self.find_user_where(Column::Id.eq(id)).await
    }

    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        self.find_user_where(Column::Username.eq(username)).await
    }

    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        self.find_user_where(Column::Email.eq(email)).await
    }

    /// 登录标识：用户名或邮箱均可
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let condition = Condition::any()
            .add(Column::Username.eq(identifier))
            .add(Column::Email.eq(identifier.to_lowercase()));
        self.find_user_where(condition).await
    }

    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Users::find().order_by_desc(Column::CreatedAt);

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = contains_like(search);
            select = select.filter(
                Condition::any()
                    .add(Column::Username.like(pattern.clone()))
                    .add(Column::Email.like(pattern.clone()))
                    .add(Column::DisplayName.like(pattern)),
            );
        }
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("查询用户总数失败"))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("查询用户列表失败"))?
            .into_iter()
            .map(|m| m.into_user())
            .collect();

        Ok(UserListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err("更新最后登录时间失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 部分更新，只写入请求中给出的字段；用户不存在时返回 None
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("查询用户失败"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password_hash) = update.password {
            model.password_hash = Set(password_hash);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(display_name) = update.display_name {
            model.display_name = Set(Some(display_name));
        }
        if let Some(avatar_url) = update.avatar_url {
            model.avatar_url = Set(Some(avatar_url));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新用户失败"))?;
        Ok(Some(updated.into_user()))
    }

    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除用户失败"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(db_err("统计用户数量失败"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    fn new_user(username: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "hashed".to_string(),
            role,
            display_name: None,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let user = storage
            .create_user_impl(new_user("alice", UserRole::User))
            .await
            .unwrap();

        assert_eq!(user.status, UserStatus::Active);
        let by_email = storage
            .get_user_by_username_or_email_impl("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(storage.count_users_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_user_impl(new_user("alice", UserRole::User))
            .await
            .unwrap();
        assert!(
            storage
                .create_user_impl(new_user("alice", UserRole::Admin))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_list_users_filters_by_role() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        for (name, role) in [
            ("learner1", UserRole::User),
            ("learner2", UserRole::User),
            ("reviewer", UserRole::Supervisor),
        ] {
            storage.create_user_impl(new_user(name, role)).await.unwrap();
        }

        let resp = storage
            .list_users_with_pagination_impl(UserListQuery {
                page: Some(1),
                size: Some(10),
                role: Some(UserRole::User),
                status: None,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(resp.pagination.total, 2);
        assert!(resp.items.iter().all(|u| u.role == UserRole::User));
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let updated = storage
            .update_user_impl(42, UpdateUserRequest::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
