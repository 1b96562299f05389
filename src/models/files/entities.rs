use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 已上传文件（测评录音、录像、演讲稿）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct File {
    pub download_token: String,
    /// 磁盘上的文件名（上传目录内）
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub stored_name: String,
    pub original_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub user_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 新文件记录
#[derive(Debug, Clone)]
pub struct NewFile {
    pub stored_name: String,
    pub original_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub user_id: i64,
}
