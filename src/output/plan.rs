//! # 输出规划
//!
//! 根据输出方式计算每个转换文件的目标路径。
//!
//! ## 布局
//! - 文件夹模式: `<源的父目录>/<源名>_low_res/<相对路径>`
//! - ZIP 模式: `<暂存根>/<清洗后的源名>/<相对路径>`，
//!   打包为 `<zip 目录>/<清洗后的源名>_low_res[_N].zip`
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 和 `output/package.rs` 使用
//! - 使用 `models/`

use crate::models::{CandidateFile, InputItem};

use std::path::{Path, PathBuf};

/// 输出目录/压缩包名后缀
pub const LOW_RES_SUFFIX: &str = "_low_res";

/// 将非字母数字（`.`、`_`、`-` 除外）替换为 `_`
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// 文件夹模式下输入项的输出根目录
pub fn folder_output_root(item: &InputItem) -> PathBuf {
    let parent = item.source_path.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{}{}", item.source_name(), LOW_RES_SUFFIX))
}

/// ZIP 模式下输入项在暂存树中的子目录名
pub fn staging_name(item: &InputItem) -> String {
    sanitize_name(&item.source_name())
}

/// 在 `dir` 中为 `name` 选择一个尚不存在的压缩包路径
///
/// 依次检查 `<name>_low_res.zip`, `<name>_low_res_1.zip`, ...，第一个空闲的胜出。
/// 不防并发写入者。
pub fn unique_zip_path(dir: &Path, name: &str) -> PathBuf {
    let base = format!("{}{}", name, LOW_RES_SUFFIX);
    let mut candidate = dir.join(format!("{}.zip", base));
    let mut counter = 0;
    while candidate.exists() {
        counter += 1;
        candidate = dir.join(format!("{}_{}.zip", base, counter));
    }
    candidate
}

/// 一次运行的输出规划
#[derive(Debug, Clone)]
pub enum OutputPlan {
    Folder,
    Zip { staging_root: PathBuf, zip_dir: PathBuf },
}

impl OutputPlan {
    /// 候选文件的目标路径
    pub fn destination(&self, candidate: &CandidateFile<'_>) -> PathBuf {
        let relative = candidate.relative_path();
        match self {
            OutputPlan::Folder => folder_output_root(candidate.item).join(relative),
            OutputPlan::Zip { staging_root, .. } => staging_root
                .join(staging_name(candidate.item))
                .join(relative),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Rocks HD (v1.2)"), "Rocks_HD__v1.2_");
        assert_eq!(sanitize_name("a-b_c.d"), "a-b_c.d");
        assert_eq!(sanitize_name("Мох"), "Мох");
    }

    #[test]
    fn test_folder_destination() {
        let item = InputItem::folder(PathBuf::from("/mods/Rocks"));
        let candidate = CandidateFile {
            item: &item,
            path: PathBuf::from("/mods/Rocks/textures/a.dds"),
        };
        assert_eq!(
            OutputPlan::Folder.destination(&candidate),
            PathBuf::from("/mods/Rocks_low_res/textures/a.dds")
        );
    }

    #[test]
    fn test_archive_folder_destination_uses_archive_location() {
        let item = InputItem::archive(
            PathBuf::from("/downloads/Rocks.zip"),
            PathBuf::from("/tmp/x/Rocks/Inner"),
        );
        let candidate = CandidateFile {
            item: &item,
            path: PathBuf::from("/tmp/x/Rocks/Inner/t/a.dds"),
        };
        assert_eq!(
            OutputPlan::Folder.destination(&candidate),
            PathBuf::from("/downloads/Rocks_low_res/t/a.dds")
        );
    }

    #[test]
    fn test_zip_destination() {
        let item = InputItem::folder(PathBuf::from("/mods/My Mod"));
        let candidate = CandidateFile {
            item: &item,
            path: PathBuf::from("/mods/My Mod/a.dds"),
        };
        let plan = OutputPlan::Zip {
            staging_root: PathBuf::from("/tmp/stage"),
            zip_dir: PathBuf::from("/out"),
        };
        assert_eq!(
            plan.destination(&candidate),
            PathBuf::from("/tmp/stage/My_Mod/a.dds")
        );
    }

    #[test]
    fn test_unique_zip_path() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            unique_zip_path(tmp.path(), "Foo"),
            tmp.path().join("Foo_low_res.zip")
        );

        fs::write(tmp.path().join("Foo_low_res.zip"), b"").unwrap();
        assert_eq!(
            unique_zip_path(tmp.path(), "Foo"),
            tmp.path().join("Foo_low_res_1.zip")
        );

        fs::write(tmp.path().join("Foo_low_res_1.zip"), b"").unwrap();
        assert_eq!(
            unique_zip_path(tmp.path(), "Foo"),
            tmp.path().join("Foo_low_res_2.zip")
        );
    }
}
