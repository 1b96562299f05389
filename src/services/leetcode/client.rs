//! LeetCode 统计接口客户端
//!
//! 上游为 leetcode-stats-api 风格的公开接口：`GET {base_url}/{username}`，
//! 用户不存在时返回 `{"status": "error", "message": "user does not exist"}`。

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;

use crate::config::LeetCodeConfig;
use crate::errors::{Result, SkillHubError};
use crate::models::leetcode::entities::{LeetCodeStats, UpstreamStats};

pub struct LeetCodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl LeetCodeClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &LeetCodeConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout_secs)
    }

    pub async fn fetch_stats(&self, username: &str) -> Result<LeetCodeStats> {
        let url = format!("{}/{}", self.base_url, username);
        tracing::debug!("Fetching LeetCode stats from {}", url);

        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(SkillHubError::not_found(format!(
                "LeetCode user '{username}' does not exist"
            )));
        }

        let upstream = response.error_for_status()?.json::<UpstreamStats>().await?;
        parse_stats(username, upstream, Utc::now())
    }
}

/// 把上游响应转换为统计快照
pub fn parse_stats(
    username: &str,
    upstream: UpstreamStats,
    fetched_at: DateTime<Utc>,
) -> Result<LeetCodeStats> {
    if upstream.status.eq_ignore_ascii_case("error") {
        let reason = upstream
            .message
            .unwrap_or_else(|| "user does not exist".to_string());
        return Err(SkillHubError::not_found(format!(
            "LeetCode user '{username}': {reason}"
        )));
    }

    Ok(LeetCodeStats {
        username: username.to_string(),
        total_solved: upstream.total_solved.max(0),
        easy_solved: upstream.easy_solved.max(0),
        medium_solved: upstream.medium_solved.max(0),
        hard_solved: upstream.hard_solved.max(0),
        acceptance_rate: upstream.acceptance_rate,
        ranking: upstream.ranking,
        fetched_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(json: &str) -> UpstreamStats {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_success_payload() {
        let body = upstream(
            r#"{"status":"success","message":"retrieved","totalSolved":120,
                "easySolved":60,"mediumSolved":50,"hardSolved":10,
                "acceptanceRate":54.3,"ranking":123456}"#,
        );
        let now = Utc::now();
        let stats = parse_stats("alice", body, now).unwrap();
        assert_eq!(stats.username, "alice");
        assert_eq!(stats.total_solved, 120);
        assert_eq!(stats.medium_solved, 50);
        assert_eq!(stats.ranking, Some(123456));
        assert_eq!(stats.fetched_at, now);
    }

    #[test]
    fn test_error_status_means_missing_user() {
        let body = upstream(r#"{"status":"error","message":"user does not exist"}"#);
        let err = parse_stats("ghost", body, Utc::now()).unwrap_err();
        assert!(matches!(err, SkillHubError::NotFound(_)));
        assert!(err.message().contains("user does not exist"));
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let body = upstream(r#"{"status":"success"}"#);
        let stats = parse_stats("bob", body, Utc::now()).unwrap();
        assert_eq!(stats.total_solved, 0);
        assert_eq!(stats.acceptance_rate, None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = LeetCodeClient::new("https://stats.example.com/", 5).unwrap();
        assert_eq!(client.base_url, "https://stats.example.com");
    }
}
