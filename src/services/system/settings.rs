use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DynamicConfig, SystemService};
use crate::models::{
    ApiResponse, ErrorCode,
    system::{
        entities::KnownSettingKey,
        requests::UpdateSettingRequest,
        responses::{AdminSettingsListResponse, SettingResponse, SystemSettingsResponse},
    },
};
use crate::services::{current_user, internal_error, request_storage};

/// 获取公开系统设置（只读）
pub async fn get_settings(
    service: &SystemService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let response = SystemSettingsResponse {
        system_name: DynamicConfig::system_name().await,
        cooldown_days: DynamicConfig::cooldown_days().await,
        max_file_size: i64::try_from(DynamicConfig::upload_max_size().await).unwrap_or(i64::MAX),
        allowed_file_types: DynamicConfig::upload_allowed_types().await,
        environment: config.app.environment.clone(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Settings retrieved successfully",
    )))
}

/// 获取所有管理员配置
pub async fn get_admin_settings(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = request_storage(request)?;

    match storage.list_all_settings().await {
        Ok(settings) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AdminSettingsListResponse { settings },
            "Admin settings retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "获取配置列表失败",
            e,
        )),
    }
}

/// 按键校验配置值：先校验类型，再校验取值范围
pub fn validate_setting(key: &str, value: &str) -> Result<KnownSettingKey, (ErrorCode, String)> {
    let known: KnownSettingKey = key
        .parse()
        .map_err(|e: String| (ErrorCode::SettingNotFound, e))?;
    known
        .value_type()
        .validate(value)
        .and_then(|_| known.check_range(value))
        .map_err(|msg| (ErrorCode::SettingInvalid, msg))?;
    Ok(known)
}

/// 更新单个配置
pub async fn update_setting(
    key: String,
    update: UpdateSettingRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let value = update.value.trim().to_string();
    let known = match validate_setting(&key, &value) {
        Ok(known) => known,
        Err((ErrorCode::SettingNotFound, msg)) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::SettingNotFound, msg)));
        }
        Err((code, msg)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
        }
    };

    let storage = request_storage(request)?;
    let setting = match storage.update_setting(known.as_str(), &value, user.id).await {
        Ok(setting) => setting,
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "更新配置失败",
                e,
            ));
        }
    };

    DynamicConfig::update(known.as_str(), &setting.value).await;
    tracing::info!("Setting {} updated by user {}", known.as_str(), user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SettingResponse { setting },
        "Setting updated successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_is_not_found() {
        let err = validate_setting("jwt.secret", "x").unwrap_err();
        assert_eq!(err.0, ErrorCode::SettingNotFound);
    }

    #[test]
    fn test_type_mismatch_is_invalid() {
        let err = validate_setting("assessment.cooldown_days", "seven").unwrap_err();
        assert_eq!(err.0, ErrorCode::SettingInvalid);

        let err = validate_setting("upload.allowed_types", ".mp4").unwrap_err();
        assert_eq!(err.0, ErrorCode::SettingInvalid);
    }

    #[test]
    fn test_out_of_range_is_invalid() {
        let err = validate_setting("assessment.cooldown_days", "400").unwrap_err();
        assert_eq!(err.0, ErrorCode::SettingInvalid);

        let err = validate_setting("leetcode.target_score", "0").unwrap_err();
        assert_eq!(err.0, ErrorCode::SettingInvalid);

        let err = validate_setting("upload.allowed_types", r#"["mp4"]"#).unwrap_err();
        assert_eq!(err.0, ErrorCode::SettingInvalid);
    }

    #[test]
    fn test_valid_values_accepted() {
        assert_eq!(
            validate_setting("assessment.cooldown_days", "0").unwrap(),
            KnownSettingKey::CooldownDays
        );
        assert_eq!(
            validate_setting("upload.allowed_types", r#"[".mp4",".pdf"]"#).unwrap(),
            KnownSettingKey::UploadAllowedTypes
        );
        assert_eq!(
            validate_setting("app.system_name", "Academy").unwrap(),
            KnownSettingKey::SystemName
        );
    }
}
