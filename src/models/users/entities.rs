use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::enums::string_enum;

string_enum! {
    /// 用户角色
    pub enum UserRole: "用户角色" {
        /// 学员
        User => "user",
        /// 评审员，负责口语/演讲测评的人工评分
        Supervisor => "supervisor",
        Admin => "admin",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn reviewer_roles() -> &'static [&'static UserRole] {
        &[&Self::Supervisor, &Self::Admin]
    }

    /// 是否可以查看他人测评并进行评审
    pub fn can_review(&self) -> bool {
        matches!(self, UserRole::Supervisor | UserRole::Admin)
    }
}

string_enum! {
    /// 用户状态
    pub enum UserStatus: "用户状态" {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role.as_str(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_strings() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), *role);
        }
        assert!("moderator".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_error_lists_choices() {
        let err = serde_json::from_str::<UserRole>(r#""root""#).unwrap_err();
        assert!(err.to_string().contains("user, supervisor, admin"));
    }

    #[test]
    fn test_review_permission() {
        assert!(UserRole::Supervisor.can_review());
        assert!(UserRole::Admin.can_review());
        assert!(!UserRole::User.can_review());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let now = chrono::Utc::now();
        let user = User {
            id: 1,
            username: "learner".into(),
            email: "learner@example.com".into(),
            password_hash: "secret-hash".into(),
            role: UserRole::User,
            status: UserStatus::Active,
            display_name: None,
            avatar_url: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains(r#""role":"user""#));
    }
}
