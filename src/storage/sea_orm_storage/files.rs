//! 文件存储操作

use super::SeaOrmStorage;
use crate::entity::files::{ActiveModel, Entity as Files};
use crate::errors::{Result, SkillHubError};
use crate::models::files::entities::{File, NewFile};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 创建文件记录，生成下载令牌
    pub async fn create_file_impl(&self, file: NewFile) -> Result<File> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            download_token: Set(uuid::Uuid::new_v4().to_string()),
            stored_name: Set(file.stored_name),
            original_name: Set(file.original_name),
            file_size: Set(file.file_size),
            file_type: Set(file.file_type),
            user_id: Set(file.user_id),
            created_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("保存文件记录失败: {e}")))?;

        Ok(result.into_file())
    }

    /// 通过 token 获取文件
    pub async fn get_file_by_token_impl(&self, token: &str) -> Result<Option<File>> {
        let result = Files::find_by_id(token.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(result.map(|m| m.into_file()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};

    #[tokio::test]
    async fn test_create_and_fetch_file() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let user = storage
            .create_user_impl(CreateUserRequest {
                username: "speaker".into(),
                email: "speaker@example.com".into(),
                password: "hashed".into(),
                role: UserRole::User,
                display_name: None,
                avatar_url: None,
            })
            .await
            .unwrap();

        let file = storage
            .create_file_impl(NewFile {
                stored_name: "abc.webm".into(),
                original_name: "answer.webm".into(),
                file_size: 1024,
                file_type: "video/webm".into(),
                user_id: user.id,
            })
            .await
            .unwrap();

        let fetched = storage
            .get_file_by_token_impl(&file.download_token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.stored_name, "abc.webm");
        assert_eq!(fetched.user_id, user.id);
        assert!(
            storage
                .get_file_by_token_impl("missing")
                .await
                .unwrap()
                .is_none()
        );
    }
}
