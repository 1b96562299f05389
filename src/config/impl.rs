use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 常用的无前缀环境变量 → 配置键
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("UNIX_SOCKET", "server.unix_socket_path"),
    ("CPU_COUNT", "server.workers"),
    ("JWT_SECRET", "jwt.secret"),
    ("DATABASE_URL", "database.url"),
    ("REDIS_URL", "cache.redis.url"),
    ("REDIS_KEY_PREFIX", "cache.redis.key_prefix"),
    ("UPLOAD_DIR", "upload.dir"),
    ("LEETCODE_API_URL", "leetcode.base_url"),
];

impl AppConfig {
    /// 加载配置：config.toml → config.{APP_ENV}.toml → SKILLHUB_* → 常用环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let env_name = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{env_name}")).required(false))
            .add_source(
                Environment::with_prefix("SKILLHUB")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        // 0 表示按 CPU 核数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// 启动前拒绝明显错误的配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Message(msg.to_string()));

        if self.jwt.secret.is_empty() {
            return invalid("jwt.secret is empty, set JWT_SECRET");
        }
        if self.jwt.access_token_expiry <= 0 || self.jwt.refresh_token_expiry <= 0 {
            return invalid("jwt token expiry must be positive");
        }
        if self.assessment.cooldown_days < 0 {
            return invalid("assessment.cooldown_days must not be negative");
        }
        if self.assessment.default_max_score.is_nan() || self.assessment.default_max_score <= 0.0 {
            return invalid("assessment.default_max_score must be positive");
        }
        if self.leetcode.target_score <= 0 {
            return invalid("leetcode.target_score must be positive");
        }
        if self.upload.dir.trim().is_empty() {
            return invalid("upload.dir is empty");
        }
        if let Some(ext) = self
            .upload
            .allowed_types
            .iter()
            .find(|ext| !ext.starts_with('.'))
        {
            return Err(ConfigError::Message(format!(
                "upload.allowed_types entry '{ext}' must start with '.'"
            )));
        }
        Ok(())
    }

    /// 获取全局配置实例，未初始化时按需加载，失败直接退出
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时调用
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        Some(self.server.unix_socket_path.as_str()).filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppConfig {
        let raw = include_str!("../../config.toml");
        let mut config: AppConfig = Config::builder()
            .add_source(File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        config.jwt.secret = "test-secret".to_string();
        config
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = sample();
        assert!(config.validate().is_ok());
        assert_eq!(config.assessment.cooldown_days, 7);
        assert_eq!(config.leetcode.target_score, 500);
        assert!(config.upload.allowed_types.contains(&".mp4".to_string()));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = sample();
        config.jwt.secret.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_business_values_rejected() {
        let mut config = sample();
        config.assessment.cooldown_days = -1;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.assessment.default_max_score = 0.0;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.leetcode.target_score = 0;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.upload.allowed_types.push("mp4".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unix_socket_path_empty_is_none() {
        let mut config = sample();
        config.server.unix_socket_path.clear();
        #[cfg(unix)]
        assert_eq!(config.unix_socket_path(), None);
    }
}
