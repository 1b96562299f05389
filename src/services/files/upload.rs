use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::SkillHubError;
use crate::models::files::entities::NewFile;
use crate::models::{ApiResponse, ErrorCode, files::responses::FileUploadResponse};
use crate::services::system::DynamicConfig;
use crate::services::{current_user, internal_error, request_storage};
use crate::utils::{content_type_for, validate_magic_bytes};

const MAX_NAME_CHARS: usize = 255;

/// 小写扩展名（含点号），没有扩展名时为空串
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

pub fn is_allowed_extension(extension: &str, allowed: &[String]) -> bool {
    !extension.is_empty() && allowed.iter().any(|t| t.eq_ignore_ascii_case(extension))
}

/// 去掉客户端路径，只保留文件名
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    base.chars().take(MAX_NAME_CHARS).collect()
}

fn bad_request(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

// 已写入的文件
struct Stored {
    path: PathBuf,
    stored_name: String,
    original_name: String,
    extension: String,
    size: i64,
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::warn!("{}", SkillHubError::file_operation(format!("清理 {path:?} 失败: {e}")));
    }
}

pub async fn handle_upload(req: &HttpRequest, mut payload: Multipart) -> ActixResult<HttpResponse> {
    let user = match current_user(req) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let upload_dir = PathBuf::from(&AppConfig::get().upload.dir);
    let max_size = DynamicConfig::upload_max_size().await;
    let allowed_types = DynamicConfig::upload_allowed_types().await;

    if let Err(e) = fs::create_dir_all(&upload_dir) {
        return Ok(internal_error(
            ErrorCode::FileUploadFailed,
            "创建上传目录失败",
            SkillHubError::from(e),
        ));
    }

    let mut stored: Option<Stored> = None;

    while let Some(mut field) = payload.try_next().await? {
        let Some(content_disposition) = field.content_disposition().cloned() else {
            continue;
        };
        if content_disposition.get_name() != Some("file") {
            continue;
        }

        if let Some(previous) = stored.take() {
            discard(&previous.path);
            return Ok(bad_request(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }

        let original_name = sanitize_file_name(content_disposition.get_filename().unwrap_or_default());
        let extension = extension_of(&original_name);
        if !is_allowed_extension(&extension, &allowed_types) {
            return Ok(bad_request(ErrorCode::FileTypeNotAllowed, "File type not allowed"));
        }

        let stored_name = format!("{}{}", Uuid::new_v4(), extension);
        let path = upload_dir.join(&stored_name);
        let mut file = match File::create(&path) {
            Ok(file) => file,
            Err(e) => {
                return Ok(internal_error(
                    ErrorCode::FileUploadFailed,
                    "文件创建失败",
                    SkillHubError::from(e),
                ));
            }
        };

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    discard(&path);
                    return Err(e.into());
                }
            };

            // 首个分块校验文件头
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    discard(&path);
                    return Ok(bad_request(
                        ErrorCode::FileTypeNotAllowed,
                        "文件内容与扩展名不匹配",
                    ));
                }
            }

            total_size += data.len();
            if total_size > max_size {
                discard(&path);
                return Ok(bad_request(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                ));
            }
            if let Err(e) = file.write_all(&data) {
                discard(&path);
                return Ok(internal_error(
                    ErrorCode::FileUploadFailed,
                    "文件写入失败",
                    SkillHubError::from(e),
                ));
            }
        }

        if total_size == 0 {
            discard(&path);
            return Ok(bad_request(ErrorCode::FileUploadFailed, "Uploaded file is empty"));
        }

        stored = Some(Stored {
            path,
            stored_name,
            original_name,
            extension,
            size: total_size as i64,
        });
    }

    let Some(stored) = stored else {
        return Ok(bad_request(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ));
    };

    let storage = request_storage(req)?;
    let new_file = NewFile {
        stored_name: stored.stored_name.clone(),
        original_name: stored.original_name.clone(),
        file_size: stored.size,
        file_type: content_type_for(&stored.extension).to_string(),
        user_id: user.id,
    };

    match storage.create_file(new_file).await {
        Ok(file) => {
            tracing::info!(
                "User {} uploaded {} ({} bytes)",
                user.id,
                file.original_name,
                file.file_size
            );
            let response = FileUploadResponse {
                download_token: file.download_token,
                file_name: file.original_name,
                size: file.file_size,
                content_type: file.file_type,
                created_at: file.created_at,
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(response, "File uploaded successfully")))
        }
        Err(e) => {
            discard(&stored.path);
            Ok(internal_error(
                ErrorCode::FileUploadFailed,
                "Failed to save file record",
                e,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(extension_of("Talk.MP4"), ".mp4");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn test_allowed_extension_check() {
        let allowed = vec![".mp4".to_string(), ".PDF".to_string()];
        assert!(is_allowed_extension(".mp4", &allowed));
        assert!(is_allowed_extension(".pdf", &allowed));
        assert!(!is_allowed_extension(".exe", &allowed));
        assert!(!is_allowed_extension("", &allowed));
    }

    #[test]
    fn test_client_path_is_stripped() {
        assert_eq!(sanitize_file_name("C:\\Users\\me\\talk.mp3"), "talk.mp3");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("  slides.pdf "), "slides.pdf");
    }
}
