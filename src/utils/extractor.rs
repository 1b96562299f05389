//! 路径参数提取器
//!
//! 在进入处理函数前校验路径参数，格式错误直接返回 400 + ApiResponse。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{1,64}$").expect("Invalid token regex"));

static SETTING_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+(\.[a-z0-9_]+)*$").expect("Invalid setting key regex"));

fn bad_param(name: &str, raw: &str) -> actix_web::Error {
    let message = format!("路径参数 {name} 无效: '{raw}'");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

fn path_param<'a>(req: &'a HttpRequest, name: &str) -> &'a str {
    req.match_info().get(name).unwrap_or_default()
}

fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = path_param(req, name);
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_param(name, raw)),
    }
}

fn parse_matching(req: &HttpRequest, name: &str, re: &Regex) -> Result<String, actix_web::Error> {
    let raw = path_param(req, name);
    if re.is_match(raw) {
        Ok(raw.to_string())
    } else {
        Err(bad_param(name, raw))
    }
}

macro_rules! id_extractor {
    ($name:ident, $param:literal) => {
        /// 正整数路径参数
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req, $param).map($name))
            }
        }
    };
}

id_extractor!(SafeIDI64, "id");

/// 文件下载令牌
#[derive(Debug, Clone)]
pub struct SafeFileToken(pub String);

impl FromRequest for SafeFileToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_matching(req, "token", &TOKEN_RE).map(SafeFileToken))
    }
}

/// 系统设置键，如 "assessment.cooldown_days"
#[derive(Debug, Clone)]
pub struct SafeSettingKey(pub String);

impl FromRequest for SafeSettingKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_matching(req, "key", &SETTING_KEY_RE).map(SafeSettingKey))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_id_extractor() {
        let req = TestRequest::default().param("id", "42").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);

        for bad in ["0", "-1", "abc", ""] {
            let req = TestRequest::default().param("id", bad).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err());
        }
    }

    #[actix_web::test]
    async fn test_token_and_key_extractors() {
        let req = TestRequest::default()
            .param("token", "0b9c6f7e-1d2a-4c55-9a3e-2f1b8c7d6e5f")
            .to_http_request();
        assert!(SafeFileToken::extract(&req).await.is_ok());

        let req = TestRequest::default()
            .param("token", "../../etc")
            .to_http_request();
        assert!(SafeFileToken::extract(&req).await.is_err());

        let req = TestRequest::default()
            .param("key", "assessment.cooldown_days")
            .to_http_request();
        assert_eq!(
            SafeSettingKey::extract(&req).await.unwrap().0,
            "assessment.cooldown_days"
        );

        let req = TestRequest::default()
            .param("key", "Bad Key")
            .to_http_request();
        assert!(SafeSettingKey::extract(&req).await.is_err());
    }
}
