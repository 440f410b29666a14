//! # 输入项数据模型
//!
//! `InputItem` 表示一个逻辑上的处理单元：一个文件夹，
//! 或压缩包解压后的一个根目录。
//!
//! ## 依赖关系
//! - 被 `input/`, `batch/`, `output/` 使用
//! - 无外部模块依赖

use std::path::{Path, PathBuf};

/// 输入项类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Folder,
    Archive,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Folder => write!(f, "folder"),
            InputKind::Archive => write!(f, "archive"),
        }
    }
}

/// 一个处理单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
    pub kind: InputKind,
    /// 用户提供的原始路径（文件夹或压缩包文件）
    pub source_path: PathBuf,
    /// 实际遍历的目录
    pub work_dir: PathBuf,
    /// 处理结束后是否需要删除 `work_dir`
    pub is_temporary: bool,
}

impl InputItem {
    pub fn folder(path: PathBuf) -> Self {
        Self {
            kind: InputKind::Folder,
            work_dir: path.clone(),
            source_path: path,
            is_temporary: false,
        }
    }

    pub fn archive(archive: PathBuf, root: PathBuf) -> Self {
        Self {
            kind: InputKind::Archive,
            source_path: archive,
            work_dir: root,
            is_temporary: true,
        }
    }

    /// 用于命名输出的源名称：文件夹取目录名，压缩包取去掉扩展名的文件名
    pub fn source_name(&self) -> String {
        let name = match self.kind {
            InputKind::Folder => self.source_path.file_name(),
            InputKind::Archive => self.source_path.file_stem(),
        };
        name.map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "textures".to_string())
    }
}

/// 在某个输入项的 `work_dir` 中发现的候选文件
#[derive(Debug, Clone)]
pub struct CandidateFile<'a> {
    pub item: &'a InputItem,
    pub path: PathBuf,
}

impl CandidateFile<'_> {
    /// 相对于 `work_dir` 的路径
    pub fn relative_path(&self) -> &Path {
        self.path
            .strip_prefix(&self.item.work_dir)
            .unwrap_or(&self.path)
    }
}
