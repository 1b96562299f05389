pub mod client;
pub mod scoring;
pub mod stats;

pub use client::LeetCodeClient;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use once_cell::sync::OnceCell;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::leetcode::requests::LeetCodeSyncRequest;

pub struct LeetCodeService {
    client: OnceCell<LeetCodeClient>,
}

impl LeetCodeService {
    pub fn new_lazy() -> Self {
        Self {
            client: OnceCell::new(),
        }
    }

    // 首次使用时按配置构建 HTTP 客户端
    pub(crate) fn client(&self) -> Result<&LeetCodeClient> {
        self.client
            .get_or_try_init(|| LeetCodeClient::from_config(&AppConfig::get().leetcode))
    }

    // 统计预览
    pub async fn preview(&self, username: String, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::preview(self, username, request).await
    }

    // 同步为测评记录
    pub async fn sync(
        &self,
        req: LeetCodeSyncRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stats::sync(self, req, request).await
    }
}
