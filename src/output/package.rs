//! # ZIP 打包
//!
//! 把暂存树中每个输入项的子目录打成一个独立的 ZIP。
//! 条目路径相对于暂存根，子目录名即压缩包内的顶层文件夹。
//! 使用存储模式（DDS 输出本身已是压缩格式）。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `output/plan.rs`
//! - 使用 `zip`, `walkdir`

use super::plan::{staging_name, unique_zip_path};
use crate::error::{Result, ShrinkError};
use crate::models::InputItem;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 为每个存在暂存子目录的输入项生成压缩包，返回创建的压缩包路径
///
/// 多个输入项映射到同一子目录名时只打包一次。
pub fn package_items(
    items: &[InputItem],
    staging_root: &Path,
    zip_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut seen = Vec::new();
    let mut created = Vec::new();

    for item in items {
        let name = staging_name(item);
        if seen.contains(&name) {
            continue;
        }
        seen.push(name.clone());

        let staged = staging_root.join(&name);
        if !staged.is_dir() {
            continue;
        }

        let zip_path = unique_zip_path(zip_dir, &name);
        write_zip(&staged, staging_root, &zip_path)?;
        info!(archive = %zip_path.display(), "packaged");
        created.push(zip_path);
    }

    Ok(created)
}

/// 将 `dir` 下所有文件写入 `zip_path`，条目名相对于 `base`
fn write_zip(dir: &Path, base: &Path, zip_path: &Path) -> Result<()> {
    let file = File::create(zip_path).map_err(|e| ShrinkError::write(zip_path, e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let name = entry_name(path.strip_prefix(base).unwrap_or(path));

        zip.start_file(name, options)?;
        let mut src = BufReader::new(File::open(path).map_err(|e| ShrinkError::read(path, e))?);
        io::copy(&mut src, &mut zip).map_err(|e| ShrinkError::write(zip_path, e))?;
    }

    zip.finish()?;
    Ok(())
}

/// ZIP 条目名统一使用 `/` 分隔
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
