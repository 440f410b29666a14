//! # 统一错误处理模块
//!
//! 定义 texshrink 的所有错误类型，使用 `thiserror` 派生。
//! 每个变体都是一个封闭的错误种类，携带结构化字段，
//! 如何展示给用户由 `utils/output.rs` 决定。
//!
//! 单个文件的转换失败不是错误，见 `batch::ConversionOutcome`。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::path::Path;
use thiserror::Error;

/// texshrink 统一错误类型
#[derive(Error, Debug)]
pub enum ShrinkError {
    // ─────────────────────────────────────────────────────────────
    // 配置错误（运行开始前报告）
    // ─────────────────────────────────────────────────────────────
    #[error("ImageMagick not found. Pass --magick or set TEXSHRINK_MAGICK")]
    ConverterNotFound,

    #[error("Converter executable is not a file: {path}")]
    InvalidConverter { path: String },

    #[error("--zip-dir is required when --method zip is used")]
    MissingZipDir,

    #[error("Format unsupported, requires additional component: {format}")]
    ArchiveSupportMissing { format: String },

    #[error("No valid texture folders or archives in input")]
    NoInputs,

    // ─────────────────────────────────────────────────────────────
    // 发现错误
    // ─────────────────────────────────────────────────────────────
    #[error("No .dds files found")]
    NoCandidates,

    // ─────────────────────────────────────────────────────────────
    // 压缩包错误（只影响出错的那个压缩包）
    // ─────────────────────────────────────────────────────────────
    #[error("Unsupported archive format: {ext}")]
    UnsupportedArchive { ext: String },

    #[error("Failed to extract {path}: {reason}")]
    ExtractionFailed { path: String, reason: String },

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ShrinkError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        ShrinkError::FileReadError {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        ShrinkError::FileWriteError {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn extraction(path: &Path, reason: impl ToString) -> Self {
        ShrinkError::ExtractionFailed {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// 是否属于"启动前即致命"的配置错误
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ShrinkError::ConverterNotFound
                | ShrinkError::InvalidConverter { .. }
                | ShrinkError::MissingZipDir
                | ShrinkError::ArchiveSupportMissing { .. }
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ShrinkError>;
