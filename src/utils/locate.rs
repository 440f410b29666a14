//! # 转换器查找
//!
//! 在 `PATH` 中查找 ImageMagick 的 `magick` 可执行文件。
//! 显式的 `--magick` / `TEXSHRINK_MAGICK` 由 clap 处理，优先于这里。
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用

use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

#[cfg(windows)]
const CANDIDATES: &[&str] = &["magick.exe", "magick"];
#[cfg(not(windows))]
const CANDIDATES: &[&str] = &["magick"];

/// 在当前 `PATH` 中查找转换器
pub fn find_converter() -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    find_in(&path)
}

/// 在给定的 `PATH` 格式字符串中查找转换器
pub fn find_in(path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .flat_map(|dir| CANDIDATES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_search_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let exe = second.path().join(CANDIDATES[0]);
        fs::write(&exe, b"").unwrap();

        let path_var = env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(find_in(&path_var), Some(exe.clone()));

        let earlier = first.path().join(CANDIDATES[0]);
        fs::write(&earlier, b"").unwrap();
        assert_eq!(find_in(&path_var), Some(earlier));
    }

    #[test]
    fn test_directory_named_magick_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(CANDIDATES[0])).unwrap();
        let path_var = env::join_paths([dir.path()]).unwrap();
        assert_eq!(find_in(&path_var), None);
    }
}
