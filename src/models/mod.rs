pub mod assessments;
pub mod auth;
pub mod common;
pub mod files;
pub mod leetcode;
pub mod presentation_questions;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery, normalize_page};

use serde::Serialize;

/// 业务错误码（随 ApiResponse 返回给前端）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,

    // 用户
    UserNotFound = 2100,
    UserAlreadyExists = 2101,
    UserNameInvalid = 2102,
    UserEmailInvalid = 2103,
    UserPasswordInvalid = 2104,
    UserNameAlreadyExists = 2105,
    UserEmailAlreadyExists = 2106,
    UserCreationFailed = 2107,
    UserUpdateFailed = 2108,
    UserDeleteFailed = 2109,
    CanNotDeleteCurrentUser = 2110,

    // 文件
    FileNotFound = 3000,
    FileUploadFailed = 3001,
    FileTypeNotAllowed = 3002,
    FileSizeExceeded = 3003,
    MultifileUploadNotAllowed = 3004,

    // 测评
    AssessmentNotFound = 4000,
    AssessmentInvalid = 4001,
    AssessmentCooldownActive = 4002,
    AssessmentAlreadyReviewed = 4003,
    AssessmentNotReviewable = 4004,
    ReviewScoreInvalid = 4005,
    ReviewOwnAssessment = 4006,

    // 演讲题库
    PresentationQuestionNotFound = 4100,
    PresentationQuestionInvalid = 4101,

    // LeetCode
    LeetCodeUsernameInvalid = 4200,
    LeetCodeUserNotFound = 4201,
    LeetCodeUpstreamFailed = 4202,

    // 系统设置
    SettingNotFound = 5000,
    SettingInvalid = 5001,
}
