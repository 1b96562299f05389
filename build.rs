use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// rust-embed 要求目录在编译期存在；没有前端产物时写入占位页面，保证纯 API 构建可用
const PLACEHOLDER_INDEX: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SkillHub</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 640px; margin: 96px auto; padding: 0 16px; color: #1f2933; }
        code { background: #eef2f7; padding: 2px 6px; border-radius: 4px; }
        .note { border-left: 4px solid #f0b429; padding: 8px 16px; background: #fffbea; }
    </style>
</head>
<body>
    <h1>SkillHub</h1>
    <p class="note">API 已在 <code>/api/v1</code> 下可用，管理界面尚未构建。</p>
    <p>构建前端：<code>cd frontend &amp;&amp; bun install &amp;&amp; bun run build</code>，然后重新编译。</p>
</body>
</html>
"#;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        panic!("CARGO_MANIFEST_DIR is not set");
    };
    let dist: PathBuf = Path::new(&manifest_dir).join("frontend").join("dist");

    if dist.join("index.html").exists() {
        return;
    }

    println!("cargo:warning=frontend/dist not found, embedding placeholder page");
    if let Err(e) = write_placeholder(&dist) {
        panic!("failed to write placeholder frontend into {}: {e}", dist.display());
    }
}

fn write_placeholder(dist: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dist.join("assets"))?;
    fs::write(dist.join("index.html"), PLACEHOLDER_INDEX)
}
