//! # 压缩包解压
//!
//! 将 .zip / .7z 完整解压到独立的临时目录，并确定要作为输入树的根目录。
//!
//! ## 根目录规则
//! - 解压内容只有一个顶层目录时，直接使用该目录（"透明拆包"）
//! - 平铺文件或多个并列条目时，以解压目录本身作为唯一根
//!
//! ## 依赖关系
//! - 被 `input/builder.rs` 调用
//! - 使用 `zip`，可选的 `sevenz-rust2`（cargo feature `sevenz`）
//! - 使用 `tempfile` 分配临时目录

use crate::error::{Result, ShrinkError};

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};
use zip::ZipArchive;

/// 支持的压缩包格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    SevenZ,
}

impl ArchiveFormat {
    /// 按扩展名识别（大小写不敏感）
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())?;

        match ext.as_str() {
            "zip" => Some(ArchiveFormat::Zip),
            "7z" => Some(ArchiveFormat::SevenZ),
            _ => None,
        }
    }

    /// 当前构建是否能读取该格式
    pub fn is_available(self) -> bool {
        match self {
            ArchiveFormat::Zip => true,
            ArchiveFormat::SevenZ => cfg!(feature = "sevenz"),
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveFormat::Zip => write!(f, "zip"),
            ArchiveFormat::SevenZ => write!(f, "7z"),
        }
    }
}

/// 一次解压的结果。`dir` 被丢弃时临时目录随之删除。
#[derive(Debug)]
pub struct Extraction {
    pub dir: TempDir,
    pub roots: Vec<PathBuf>,
}

/// 解压压缩包到 `temp_root` 下新分配的临时目录
///
/// 出错时临时目录在返回前即被删除，不留下任何部分状态。
pub fn extract(archive: &Path, temp_root: &Path) -> Result<Extraction> {
    let format = ArchiveFormat::from_path(archive).ok_or_else(|| ShrinkError::UnsupportedArchive {
        ext: archive
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })?;

    if !format.is_available() {
        return Err(ShrinkError::ArchiveSupportMissing {
            format: format.to_string(),
        });
    }

    let dir = tempfile::Builder::new()
        .prefix("texshrink-extract-")
        .tempdir_in(temp_root)
        .map_err(|e| ShrinkError::write(temp_root, e))?;

    let stem = archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());
    let extract_to = dir.path().join(stem);
    fs::create_dir_all(&extract_to).map_err(|e| ShrinkError::write(&extract_to, e))?;

    debug!(archive = %archive.display(), to = %extract_to.display(), %format, "extracting");
    match format {
        ArchiveFormat::Zip => extract_zip(archive, &extract_to)?,
        ArchiveFormat::SevenZ => extract_7z(archive, &extract_to)?,
    }

    let roots = find_roots(&extract_to)?;
    info!(archive = %archive.display(), roots = roots.len(), "extracted");

    Ok(Extraction { dir, roots })
}

fn extract_zip(archive: &Path, target: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| ShrinkError::read(archive, e))?;
    let mut zip =
        ZipArchive::new(BufReader::new(file)).map_err(|e| ShrinkError::extraction(archive, e))?;
    zip.extract(target)
        .map_err(|e| ShrinkError::extraction(archive, e))
}

#[cfg(feature = "sevenz")]
fn extract_7z(archive: &Path, target: &Path) -> Result<()> {
    sevenz_rust2::decompress_file(archive, target).map_err(|e| ShrinkError::extraction(archive, e))
}

#[cfg(not(feature = "sevenz"))]
fn extract_7z(_archive: &Path, _target: &Path) -> Result<()> {
    Err(ShrinkError::ArchiveSupportMissing {
        format: ArchiveFormat::SevenZ.to_string(),
    })
}

/// 单一顶层目录则拆包，否则以解压目录本身为根
fn find_roots(extract_to: &Path) -> Result<Vec<PathBuf>> {
    let entries: Vec<PathBuf> = fs::read_dir(extract_to)
        .map_err(|e| ShrinkError::read(extract_to, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();

    match entries.as_slice() {
        [only] if only.is_dir() => Ok(vec![only.clone()]),
        _ => Ok(vec![extract_to.to_path_buf()]),
    }
}
