//! 上传文件内容校验
//!
//! 只信任文件头，不信任客户端声明的 Content-Type。

/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// `extension` 含点号，如 ".mp4"，大小写不敏感。未知扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // ISO BMFF 容器：偏移 4 处为 "ftyp"
        ".mp4" | ".mov" | ".m4a" => data.len() >= 8 && &data[4..8] == b"ftyp",
        // Matroska / WebM (EBML)
        ".webm" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),
        // ID3 标签或 MPEG 帧同步
        ".mp3" => {
            data.starts_with(b"ID3") || (data.len() >= 2 && data[0] == 0xFF && data[1] & 0xE0 == 0xE0)
        }
        ".wav" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE",
        ".ogg" => data.starts_with(b"OggS"),

        // 演讲稿
        ".pdf" => data.starts_with(b"%PDF"),
        // MS Office 旧格式 (OLE Compound Document)
        ".ppt" => data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
        // MS Office 新格式 (ZIP-based OOXML)
        ".pptx" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),

        _ => false,
    }
}

/// 扩展名对应的 MIME 类型
pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_lowercase().as_str() {
        ".mp4" => "video/mp4",
        ".mov" => "video/quicktime",
        ".webm" => "video/webm",
        ".m4a" => "audio/mp4",
        ".mp3" => "audio/mpeg",
        ".wav" => "audio/wav",
        ".ogg" => "audio/ogg",
        ".pdf" => "application/pdf",
        ".ppt" => "application/vnd.ms-powerpoint",
        ".pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_bmff_containers() {
        let header = [0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(validate_magic_bytes(&header, ".mp4"));
        assert!(validate_magic_bytes(&header, ".MOV"));
        assert!(validate_magic_bytes(&header, ".m4a"));
        assert!(!validate_magic_bytes(&header, ".webm"));
        assert!(!validate_magic_bytes(&header[..6], ".mp4"));
    }

    #[test]
    fn test_audio_headers() {
        assert!(validate_magic_bytes(b"ID3\x04\x00", ".mp3"));
        assert!(validate_magic_bytes(&[0xFF, 0xFB, 0x90], ".mp3"));
        assert!(validate_magic_bytes(b"RIFF\x24\x00\x00\x00WAVEfmt ", ".wav"));
        assert!(!validate_magic_bytes(b"RIFF\x24\x00\x00\x00WEBPVP8 ", ".wav"));
        assert!(validate_magic_bytes(b"OggS\x00\x02", ".ogg"));
    }

    #[test]
    fn test_webm_and_documents() {
        assert!(validate_magic_bytes(&[0x1A, 0x45, 0xDF, 0xA3, 0x9F], ".webm"));
        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".pptx"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", ".pptx"));
    }

    #[test]
    fn test_rejects_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".mp4"));
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".exe"));
        assert!(!validate_magic_bytes(b"plain text", ".txt"));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(".WEBM"), "video/webm");
        assert_eq!(content_type_for(".bin"), "application/octet-stream");
    }
}
