pub mod extractor;
pub mod file_magic;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod validate;

pub use extractor::{SafeFileToken, SafeIDI64, SafeSettingKey};
pub use file_magic::{content_type_for, validate_magic_bytes};
pub use parameter_error_handler::{json_error_handler, query_error_handler};
pub use sql::{contains_like, escape_like_pattern};
