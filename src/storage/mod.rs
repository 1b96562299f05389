use std::sync::Arc;

use crate::models::{
    assessments::{
        entities::{Assessment, CooldownKey, NewAssessment},
        requests::AssessmentListQuery,
        responses::AssessmentListResponse,
    },
    files::entities::{File, NewFile},
    presentation_questions::{
        entities::PresentationQuestion,
        requests::{CreateQuestionRequest, QuestionListQuery, UpdateQuestionRequest},
        responses::QuestionListResponse,
    },
    system::entities::SystemSetting,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 文件管理方法
    // 保存文件记录，返回带下载令牌的文件信息
    async fn create_file(&self, file: NewFile) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;

    /// 测评方法
    async fn create_assessment(&self, assessment: NewAssessment) -> Result<Assessment>;
    async fn get_assessment_by_id(&self, id: i64) -> Result<Option<Assessment>>;
    // 同一 (用户, 类型, 级别, 语言) 最近一次完成时间，用于冷却期判断
    async fn get_last_completed_at(
        &self,
        key: &CooldownKey,
    ) -> Result<Option<chrono::DateTime<chrono::Utc>>>;
    async fn list_assessments_with_pagination(
        &self,
        query: AssessmentListQuery,
    ) -> Result<AssessmentListResponse>;
    // 某用户全部测评（按完成时间升序），用于成绩汇总
    async fn list_user_assessments(&self, user_id: i64) -> Result<Vec<Assessment>>;
    // 写入评审结果；仅当记录仍处于待评审状态时生效
    async fn review_assessment(
        &self,
        id: i64,
        reviewer_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Option<Assessment>>;
    async fn delete_assessment(&self, id: i64) -> Result<bool>;

    /// 演讲题库方法
    async fn create_question(
        &self,
        created_by: i64,
        req: CreateQuestionRequest,
    ) -> Result<PresentationQuestion>;
    async fn get_question_by_id(&self, id: i64) -> Result<Option<PresentationQuestion>>;
    async fn list_questions_with_pagination(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse>;
    // 按难度筛选的全部题目 ID（随机抽题用）
    async fn list_question_ids(
        &self,
        difficulty: Option<crate::models::assessments::entities::AssessmentLevel>,
    ) -> Result<Vec<i64>>;
    async fn update_question(
        &self,
        id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<PresentationQuestion>>;
    async fn delete_question(&self, id: i64) -> Result<bool>;

    /// 系统设置方法
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>>;
    async fn update_setting(&self, key: &str, value: &str, user_id: i64)
    -> Result<SystemSetting>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
