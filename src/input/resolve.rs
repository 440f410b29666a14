//! # 路径解析
//!
//! 将用户提供的原始文本（手工输入的路径，或拖放产生的 `file://` URI）
//! 规范化为存在的绝对路径。
//!
//! ## 功能
//! - 去除首尾空白与 `file://` 前缀
//! - 百分号解码
//! - 词法上消除 `.` / `..`
//! - 不存在的路径静默丢弃
//!
//! ## 依赖关系
//! - 被 `input/builder.rs` 和 `commands/` 使用
//! - 使用 `urlencoding` 解码

use std::path::{Component, Path, PathBuf};
use tracing::debug;

const FILE_SCHEME: &str = "file://";

/// 解析后的路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// 逐行解析，丢弃空行与不存在的路径
pub fn resolve_lines<'a, I>(lines: I) -> Vec<ResolvedPath>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().filter_map(resolve_line).collect()
}

/// 解析单行文本
pub fn resolve_line(line: &str) -> Option<ResolvedPath> {
    let raw = line.trim();
    if raw.is_empty() {
        return None;
    }

    let path = normalize(&decode(raw));
    if !path.exists() {
        debug!(path = %path.display(), "dropping non-existent input");
        return None;
    }

    let path = if path.is_absolute() {
        path
    } else {
        match std::env::current_dir() {
            Ok(cwd) => normalize(&cwd.join(path)),
            Err(_) => path,
        }
    };

    Some(ResolvedPath {
        is_dir: path.is_dir(),
        path,
    })
}

/// 去掉 URI 前缀并百分号解码；解码失败时保留原文
fn decode(raw: &str) -> PathBuf {
    let stripped = match raw.strip_prefix(FILE_SCHEME) {
        Some(rest) => strip_uri_host(rest),
        None => raw,
    };

    let decoded = urlencoding::decode(stripped)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| stripped.to_string());

    PathBuf::from(strip_drive_slash(&decoded))
}

/// `file://localhost/x` 与 `file:///x` 等价
fn strip_uri_host(rest: &str) -> &str {
    match rest.strip_prefix("localhost") {
        Some(after) if after.starts_with('/') => after,
        _ => rest,
    }
}

/// Windows 上 `file:///C:/x` 剥掉前缀后是 `/C:/x`
fn strip_drive_slash(path: &str) -> &str {
    let bytes = path.as_bytes();
    if cfg!(windows)
        && bytes.len() >= 3
        && bytes[0] == b'/'
        && bytes[1].is_ascii_alphabetic()
        && bytes[2] == b':'
    {
        &path[1..]
    } else {
        path
    }
}

/// 词法规范化，不访问文件系统
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
