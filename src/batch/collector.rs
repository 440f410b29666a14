//! # 贴图收集与分类
//!
//! 在输入项的工作目录下递归查找 .dds 文件，并按处理模式筛选。
//!
//! ## 功能
//! - 法线贴图判定：文件名主干（大小写不敏感）以 `_n` 或 `_msn` 结尾
//! - 三种模式: 全部 / 跳过法线 / 仅法线
//! - 遍历顺序取决于文件系统，下游不依赖顺序
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 和 `commands/scan.rs` 调用
//! - 使用 `walkdir` 遍历目录

use crate::models::{CandidateFile, InputItem, ProcessingMode};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 目标贴图扩展名
pub const TEXTURE_EXTENSION: &str = "dds";

/// 法线贴图文件名后缀
const NORMAL_MAP_SUFFIXES: [&str; 2] = ["_n", "_msn"];

/// 判断是否为法线贴图
pub fn is_normal_map(path: &Path) -> bool {
    let stem = match path.file_stem() {
        Some(stem) => stem.to_string_lossy().to_lowercase(),
        None => return false,
    };
    NORMAL_MAP_SUFFIXES
        .iter()
        .any(|suffix| stem.ends_with(suffix))
}

/// 是否为目标扩展名
fn is_texture(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(TEXTURE_EXTENSION))
}

/// 列出 `work_dir` 下的全部 .dds 文件
pub fn find_textures(work_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(work_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_texture(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// 按模式筛选 `work_dir` 下的贴图
pub fn select_files(work_dir: &Path, mode: ProcessingMode) -> Vec<PathBuf> {
    find_textures(work_dir)
        .into_iter()
        .filter(|p| mode.includes(is_normal_map(p)))
        .collect()
}

/// 收集所有输入项的候选文件
pub fn collect_candidates(items: &[InputItem], mode: ProcessingMode) -> Vec<CandidateFile<'_>> {
    items
        .iter()
        .flat_map(|item| {
            select_files(&item.work_dir, mode)
                .into_iter()
                .map(move |path| CandidateFile { item, path })
        })
        .collect()
}
