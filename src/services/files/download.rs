use actix_web::http::header::{CONTENT_TYPE, ContentDisposition};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::errors::SkillHubError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, request_storage};

fn file_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::FileNotFound,
        "File not found",
    ))
}

pub async fn handle_download(request: &HttpRequest, file_token: String) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = request_storage(request)?;
    let db_file = match storage.get_file_by_token(&file_token).await {
        Ok(Some(f)) => f,
        Ok(None) => return Ok(file_not_found()),
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "File query failed",
                e,
            ));
        }
    };

    // 上传者本人或评审员/管理员
    if db_file.user_id != user.id && !user.role.can_review() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "No permission to download this file",
        )));
    }

    let path = PathBuf::from(&AppConfig::get().upload.dir).join(&db_file.stored_name);
    let content = match web::block(move || std::fs::read(path)).await? {
        Ok(buf) => buf,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("File {} missing on disk", db_file.stored_name);
            return Ok(file_not_found());
        }
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "File read failed",
                SkillHubError::from(e),
            ));
        }
    };

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, db_file.file_type))
        .insert_header(ContentDisposition::attachment(db_file.original_name))
        .body(content))
}
