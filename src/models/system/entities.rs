use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::enums::string_enum;

string_enum! {
    /// 配置值类型
    pub enum SettingValueType: "配置值类型" {
        String => "string",
        Integer => "integer",
        JsonArray => "json_array",
    }
}

impl SettingValueType {
    /// 校验字符串形式的配置值是否符合该类型
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            SettingValueType::String => {
                if value.trim().is_empty() {
                    Err("配置值不能为空".to_string())
                } else {
                    Ok(())
                }
            }
            SettingValueType::Integer => value
                .trim()
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| format!("'{value}' 不是有效的整数")),
            SettingValueType::JsonArray => serde_json::from_str::<Vec<String>>(value)
                .map(|_| ())
                .map_err(|e| format!("'{value}' 不是有效的字符串数组: {e}")),
        }
    }
}

/// 已知配置键
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownSettingKey {
    SystemName,
    CooldownDays,
    UploadMaxSize,
    UploadAllowedTypes,
    LeetCodeTargetScore,
}

impl KnownSettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownSettingKey::SystemName => "app.system_name",
            KnownSettingKey::CooldownDays => "assessment.cooldown_days",
            KnownSettingKey::UploadMaxSize => "upload.max_size",
            KnownSettingKey::UploadAllowedTypes => "upload.allowed_types",
            KnownSettingKey::LeetCodeTargetScore => "leetcode.target_score",
        }
    }

    pub fn value_type(&self) -> SettingValueType {
        match self {
            KnownSettingKey::SystemName => SettingValueType::String,
            KnownSettingKey::CooldownDays => SettingValueType::Integer,
            KnownSettingKey::UploadMaxSize => SettingValueType::Integer,
            KnownSettingKey::UploadAllowedTypes => SettingValueType::JsonArray,
            KnownSettingKey::LeetCodeTargetScore => SettingValueType::Integer,
        }
    }

    /// 类型之外的取值约束
    pub fn check_range(&self, value: &str) -> Result<(), String> {
        match self {
            KnownSettingKey::CooldownDays => match value.trim().parse::<i64>() {
                Ok(days) if (0..=365).contains(&days) => Ok(()),
                _ => Err("冷却期必须在 0 到 365 天之间".to_string()),
            },
            KnownSettingKey::UploadMaxSize | KnownSettingKey::LeetCodeTargetScore => {
                match value.trim().parse::<i64>() {
                    Ok(v) if v > 0 => Ok(()),
                    _ => Err(format!("{} 必须为正整数", self.as_str())),
                }
            }
            KnownSettingKey::UploadAllowedTypes => {
                let types: Vec<String> = serde_json::from_str(value).unwrap_or_default();
                if types.iter().all(|t| t.starts_with('.') && t.len() > 1) {
                    Ok(())
                } else {
                    Err("文件类型必须以 '.' 开头，例如 \".mp4\"".to_string())
                }
            }
            KnownSettingKey::SystemName => Ok(()),
        }
    }
}

impl std::str::FromStr for KnownSettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app.system_name" => Ok(KnownSettingKey::SystemName),
            "assessment.cooldown_days" => Ok(KnownSettingKey::CooldownDays),
            "upload.max_size" => Ok(KnownSettingKey::UploadMaxSize),
            "upload.allowed_types" => Ok(KnownSettingKey::UploadAllowedTypes),
            "leetcode.target_score" => Ok(KnownSettingKey::LeetCodeTargetScore),
            _ => Err(format!("Unknown setting key: {s}")),
        }
    }
}

/// 系统设置实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub value_type: SettingValueType,
    pub description: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub updated_by: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_validation() {
        assert!(SettingValueType::Integer.validate("42").is_ok());
        assert!(SettingValueType::Integer.validate("4.2").is_err());
        assert!(SettingValueType::JsonArray.validate(r#"[".mp4"]"#).is_ok());
        assert!(SettingValueType::JsonArray.validate("[1, 2]").is_err());
        assert!(SettingValueType::String.validate("  ").is_err());
    }

    #[test]
    fn test_known_key_parsing() {
        let key: KnownSettingKey = "assessment.cooldown_days".parse().unwrap();
        assert_eq!(key, KnownSettingKey::CooldownDays);
        assert_eq!(key.value_type(), SettingValueType::Integer);
        assert!("cors.max_age".parse::<KnownSettingKey>().is_err());
    }

    #[test]
    fn test_known_key_ranges() {
        assert!(KnownSettingKey::CooldownDays.check_range("0").is_ok());
        assert!(KnownSettingKey::CooldownDays.check_range("400").is_err());
        assert!(KnownSettingKey::UploadMaxSize.check_range("0").is_err());
        assert!(
            KnownSettingKey::UploadAllowedTypes
                .check_range(r#"["mp4"]"#)
                .is_err()
        );
    }
}
