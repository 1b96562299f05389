//! 动态配置缓存
//!
//! 启动时从 system_settings 表加载，管理员修改后热更新。
//! 缺失或无法解析的配置项回落到静态配置。

use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::models::system::entities::KnownSettingKey;

static DYNAMIC_CONFIG: OnceLock<RwLock<DynamicConfigCache>> = OnceLock::new();

#[derive(Debug, Default)]
struct DynamicConfigCache {
    settings: HashMap<String, String>,
    initialized: bool,
}

/// 动态配置访问接口
pub struct DynamicConfig;

impl DynamicConfig {
    /// 初始化动态配置缓存
    pub async fn init(settings: Vec<(String, String)>) {
        let cache = DYNAMIC_CONFIG.get_or_init(|| RwLock::new(DynamicConfigCache::default()));

        let mut guard = cache.write().await;
        guard.settings = settings.into_iter().collect();
        guard.initialized = true;

        tracing::info!(
            "动态配置缓存初始化完成，加载了 {} 个配置项",
            guard.settings.len()
        );
    }

    /// 更新单个配置项
    pub async fn update(key: &str, value: &str) {
        if let Some(cache) = DYNAMIC_CONFIG.get() {
            let mut guard = cache.write().await;
            guard.settings.insert(key.to_string(), value.to_string());
            tracing::debug!("动态配置更新: {} = {}", key, value);
        }
    }

    async fn get_string(key: KnownSettingKey) -> Option<String> {
        let cache = DYNAMIC_CONFIG.get()?;
        let guard = cache.read().await;
        guard.settings.get(key.as_str()).cloned()
    }

    async fn get_i64(key: KnownSettingKey) -> Option<i64> {
        Self::get_string(key)
            .await
            .and_then(|v| v.trim().parse().ok())
    }

    async fn get_json_array(key: KnownSettingKey) -> Option<Vec<String>> {
        Self::get_string(key)
            .await
            .and_then(|v| serde_json::from_str(&v).ok())
    }

    pub async fn system_name() -> String {
        Self::get_string(KnownSettingKey::SystemName)
            .await
            .unwrap_or_else(|| AppConfig::get().app.system_name.clone())
    }

    /// 重测冷却期（天）
    pub async fn cooldown_days() -> i64 {
        Self::get_i64(KnownSettingKey::CooldownDays)
            .await
            .unwrap_or_else(|| AppConfig::get().assessment.cooldown_days)
    }

    /// 上传文件大小限制（字节）
    pub async fn upload_max_size() -> usize {
        Self::get_i64(KnownSettingKey::UploadMaxSize)
            .await
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or_else(|| AppConfig::get().upload.max_size)
    }

    /// 允许上传的扩展名（含点号）
    pub async fn upload_allowed_types() -> Vec<String> {
        Self::get_json_array(KnownSettingKey::UploadAllowedTypes)
            .await
            .unwrap_or_else(|| AppConfig::get().upload.allowed_types.clone())
    }

    /// LeetCode 满分对应的加权解题数
    pub async fn leetcode_target_score() -> i64 {
        Self::get_i64(KnownSettingKey::LeetCodeTargetScore)
            .await
            .filter(|v| *v > 0)
            .unwrap_or_else(|| AppConfig::get().leetcode.target_score)
    }

    pub async fn is_initialized() -> bool {
        match DYNAMIC_CONFIG.get() {
            Some(cache) => cache.read().await.initialized,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 全局缓存只在这一个测试中初始化，所有读取的键都有值，不会回落到 AppConfig
    #[tokio::test]
    async fn test_init_update_and_typed_reads() {
        DynamicConfig::init(vec![
            ("app.system_name".into(), "Academy".into()),
            ("assessment.cooldown_days".into(), "3".into()),
            ("upload.max_size".into(), "1024".into()),
            ("upload.allowed_types".into(), r#"[".mp3",".pdf"]"#.into()),
            ("leetcode.target_score".into(), "200".into()),
        ])
        .await;

        assert!(DynamicConfig::is_initialized().await);
        assert_eq!(DynamicConfig::system_name().await, "Academy");
        assert_eq!(DynamicConfig::cooldown_days().await, 3);
        assert_eq!(DynamicConfig::upload_max_size().await, 1024);
        assert_eq!(
            DynamicConfig::upload_allowed_types().await,
            vec![".mp3".to_string(), ".pdf".to_string()]
        );
        assert_eq!(DynamicConfig::leetcode_target_score().await, 200);

        DynamicConfig::update("assessment.cooldown_days", "0").await;
        assert_eq!(DynamicConfig::cooldown_days().await, 0);
    }
}
