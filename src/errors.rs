//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() / error_type() / message() 访问方法
/// - snake_case 便捷构造函数
macro_rules! define_skillhub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SkillHubError {
            $($variant(String),)*
        }

        impl SkillHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SkillHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SkillHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SkillHubError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SkillHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SkillHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_skillhub_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    Upstream("E013", "Upstream Service Error"),
}

impl SkillHubError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SkillHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SkillHubError {}

impl From<sea_orm::DbErr> for SkillHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        SkillHubError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SkillHubError {
    fn from(err: std::io::Error) -> Self {
        SkillHubError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SkillHubError {
    fn from(err: serde_json::Error) -> Self {
        SkillHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SkillHubError {
    fn from(err: chrono::ParseError) -> Self {
        SkillHubError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for SkillHubError {
    fn from(err: reqwest::Error) -> Self {
        SkillHubError::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SkillHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SkillHubError::cache_connection("test").code(), "E001");
        assert_eq!(SkillHubError::database_config("test").code(), "E003");
        assert_eq!(SkillHubError::validation("test").code(), "E007");
        assert_eq!(SkillHubError::upstream("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SkillHubError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            SkillHubError::upstream("test").error_type(),
            "Upstream Service Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = SkillHubError::validation("score out of range");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("score out of range"));
        assert_eq!(err.to_string(), formatted);
    }

    #[test]
    fn test_from_serde_error() {
        let err: SkillHubError = serde_json::from_str::<i32>("nope").unwrap_err().into();
        assert_eq!(err.code(), "E009");
    }
}
