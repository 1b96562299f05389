pub mod settings;
pub mod settings_cache;

pub use settings_cache::DynamicConfig;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::system::requests::UpdateSettingRequest;

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 公开设置
    pub async fn get_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::get_settings(self, request).await
    }

    // 管理员设置列表
    pub async fn get_admin_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::get_admin_settings(request).await
    }

    // 更新单个设置
    pub async fn update_setting(
        &self,
        key: String,
        update: UpdateSettingRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        settings::update_setting(key, update, request).await
    }
}
