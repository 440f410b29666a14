//! # compress 子命令 CLI 定义
//!
//! 批量降分辨率并输出到同级文件夹或 ZIP
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/compress.rs`

use super::InputArgs;
use crate::models::{OutputMethod, ProcessingMode, Resolution};

use clap::Args;
use std::path::PathBuf;

/// compress 子命令参数
#[derive(Args, Debug)]
pub struct CompressArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Path to the ImageMagick executable (searched on PATH when omitted)
    #[arg(long, env = "TEXSHRINK_MAGICK", value_name = "EXE")]
    pub magick: Option<PathBuf>,

    /// Maximum texture edge in pixels
    #[arg(long, value_enum, default_value_t = Resolution::Half)]
    pub resolution: Resolution,

    /// Which textures to process
    #[arg(long, value_enum, default_value_t = ProcessingMode::All)]
    pub mode: ProcessingMode,

    /// Where converted textures go
    #[arg(long, value_enum, default_value_t = OutputMethod::Folder)]
    pub method: OutputMethod,

    /// Output directory for zip archives (required with --method zip)
    #[arg(long, value_name = "DIR")]
    pub zip_dir: Option<PathBuf>,

    /// Save the processing log to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Write a per-file CSV report
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}
