//! # 输入项构建
//!
//! 将解析后的路径分派为统一的 `InputItem` 列表：
//! 文件夹直接成为输入项，压缩包经解压后每个根目录成为一个临时输入项。
//!
//! ## 错误处理
//! - 单个压缩包解压失败：记录到 `skipped`，其余输入继续
//! - 配置类错误（如缺少 7z 支持）：本次调用已创建的临时目录全部删除后向上传播
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `input/archive.rs`, `input/resolve.rs`, `batch/janitor.rs`

use super::archive::{self, ArchiveFormat};
use super::resolve::ResolvedPath;
use crate::batch::ResourceJanitor;
use crate::error::{Result, ShrinkError};
use crate::models::InputItem;

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 被跳过的输入
#[derive(Debug)]
pub struct SkippedInput {
    pub path: PathBuf,
    pub error: ShrinkError,
}

/// 构建结果。`janitor` 持有所有解压产生的临时目录。
#[derive(Debug)]
pub struct BuiltInputs {
    pub items: Vec<InputItem>,
    pub janitor: ResourceJanitor,
    pub skipped: Vec<SkippedInput>,
}

/// 构建输入项列表
pub fn build(resolved: &[ResolvedPath]) -> Result<BuiltInputs> {
    build_in(resolved, &std::env::temp_dir())
}

/// 同 [`build`]，解压目录创建在 `temp_root` 下
pub fn build_in(resolved: &[ResolvedPath], temp_root: &Path) -> Result<BuiltInputs> {
    let mut items = Vec::new();
    let mut skipped = Vec::new();
    // 出错返回时 janitor 被丢弃，临时目录随之清理
    let mut janitor = ResourceJanitor::new();

    for entry in resolved {
        if entry.is_dir {
            items.push(InputItem::folder(entry.path.clone()));
            continue;
        }

        if ArchiveFormat::from_path(&entry.path).is_none() {
            debug!(path = %entry.path.display(), "skipping unsupported file");
            continue;
        }

        match archive::extract(&entry.path, temp_root) {
            Ok(extraction) => {
                for root in extraction.roots {
                    items.push(InputItem::archive(entry.path.clone(), root));
                }
                janitor.adopt(extraction.dir);
            }
            Err(error) if error.is_configuration() => return Err(error),
            Err(error) => {
                warn!(path = %entry.path.display(), %error, "archive skipped");
                skipped.push(SkippedInput {
                    path: entry.path.clone(),
                    error,
                });
            }
        }
    }

    janitor.track_items(&items);

    Ok(BuiltInputs {
        items,
        janitor,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::archive::tests::write_zip;
    use crate::models::input::InputKind;
    use std::fs;
    use tempfile::TempDir;

    fn resolved(path: PathBuf) -> ResolvedPath {
        ResolvedPath {
            is_dir: path.is_dir(),
            path,
        }
    }

    #[test]
    fn test_folders_and_archives() {
        let tmp = TempDir::new().unwrap();
        let folder = tmp.path().join("ModA");
        fs::create_dir(&folder).unwrap();
        let archive = tmp.path().join("ModB.zip");
        write_zip(&archive, &[("ModB/t.dds", "x")]);
        let readme = tmp.path().join("readme.txt");
        fs::write(&readme, b"hi").unwrap();

        let built = build(&[
            resolved(folder.clone()),
            resolved(archive.clone()),
            resolved(readme),
        ])
        .unwrap();

        assert_eq!(built.items.len(), 2);
        assert!(built.skipped.is_empty());

        let first = &built.items[0];
        assert_eq!(first.kind, InputKind::Folder);
        assert_eq!(first.work_dir, folder);
        assert!(!first.is_temporary);

        let second = &built.items[1];
        assert_eq!(second.kind, InputKind::Archive);
        assert_eq!(second.source_path, archive);
        assert!(second.is_temporary);
        assert!(second.work_dir.ends_with("ModB"));
        assert!(second.work_dir.is_dir());
    }

    #[test]
    fn test_broken_archive_is_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("Good");
        fs::create_dir(&good).unwrap();
        let bad = tmp.path().join("bad.zip");
        fs::write(&bad, b"garbage").unwrap();

        let built = build(&[resolved(bad.clone()), resolved(good)]).unwrap();
        assert_eq!(built.items.len(), 1);
        assert_eq!(built.skipped.len(), 1);
        assert_eq!(built.skipped[0].path, bad);
    }

    #[test]
    fn test_temp_dirs_removed_when_janitor_released() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("Pack.zip");
        write_zip(&archive, &[("a.dds", "a")]);

        let mut built = build(&[resolved(archive)]).unwrap();
        let work_dir = built.items[0].work_dir.clone();
        assert!(work_dir.is_dir());

        built.janitor.release();
        assert!(!work_dir.exists());
    }

    #[cfg(not(feature = "sevenz"))]
    #[test]
    fn test_configuration_error_removes_earlier_extractions() {
        let tmp = TempDir::new().unwrap();
        let temp_root = TempDir::new().unwrap();
        let good = tmp.path().join("Good.zip");
        write_zip(&good, &[("Good/a.dds", "a")]);
        let seven = tmp.path().join("Other.7z");
        fs::write(&seven, b"7z").unwrap();

        let err = build_in(&[resolved(good), resolved(seven)], temp_root.path()).unwrap_err();

        assert!(matches!(err, ShrinkError::ArchiveSupportMissing { .. }));
        assert_eq!(fs::read_dir(temp_root.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_extractions_live_under_temp_root() {
        let tmp = TempDir::new().unwrap();
        let temp_root = TempDir::new().unwrap();
        let archive = tmp.path().join("Pack.zip");
        write_zip(&archive, &[("Pack/a.dds", "a")]);

        let mut built = build_in(&[resolved(archive)], temp_root.path()).unwrap();
        assert!(built.items[0].work_dir.starts_with(temp_root.path()));

        built.janitor.release();
        assert_eq!(fs::read_dir(temp_root.path()).unwrap().count(), 0);
    }
}
