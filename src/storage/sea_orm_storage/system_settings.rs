//! 系统设置存储实现

use sea_orm::{ActiveModelTrait, EntityTrait, Order, QueryOrder, Set};

use crate::entity::prelude::SystemSettings;
use crate::entity::system_settings::{ActiveModel, Column};
use crate::errors::{Result, SkillHubError};
use crate::models::system::entities::SystemSetting;

use super::SeaOrmStorage;

impl SeaOrmStorage {
    /// 获取所有设置
    pub(crate) async fn list_all_settings_impl(&self) -> Result<Vec<SystemSetting>> {
        let settings = SystemSettings::find()
            .order_by(Column::Key, Order::Asc)
            .all(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("获取设置列表失败: {e}")))?;

        Ok(settings.into_iter().map(|s| s.into_setting()).collect())
    }

    /// 更新设置
    pub(crate) async fn update_setting_impl(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
    ) -> Result<SystemSetting> {
        let now = chrono::Utc::now().timestamp();

        let existing = SystemSettings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("获取设置失败: {e}")))?
            .ok_or_else(|| SkillHubError::not_found(format!("配置项不存在: {key}")))?;

        let mut active_model: ActiveModel = existing.into();
        active_model.value = Set(value.to_string());
        active_model.updated_at = Set(now);
        active_model.updated_by = Set(Some(user_id));

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| SkillHubError::database_operation(format!("更新设置失败: {e}")))?;

        Ok(updated.into_setting())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::system::entities::SettingValueType;

    #[tokio::test]
    async fn test_seeded_settings_present() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let settings = storage.list_all_settings_impl().await.unwrap();
        let cooldown = settings
            .iter()
            .find(|s| s.key == "assessment.cooldown_days")
            .unwrap();
        assert_eq!(cooldown.value, "7");
        assert_eq!(cooldown.value_type, SettingValueType::Integer);
    }

    #[tokio::test]
    async fn test_update_unknown_setting_is_not_found() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let err = storage
            .update_setting_impl("nope", "1", 1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");
    }
}
