//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `compress`: 批量缩小 `.dds` 贴图
//! - `scan`: 只解析输入并统计候选文件（不调用转换器）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: compress, scan

pub mod compress;
pub mod scan;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// texshrink - 游戏模组贴图批量降分辨率工具
#[derive(Parser)]
#[command(name = "texshrink")]
#[command(version)]
#[command(about = "Batch-downscale DDS textures in mod folders and archives", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Downscale textures with ImageMagick
    Compress(compress::CompressArgs),

    /// Show what would be processed without converting anything
    Scan(scan::ScanArgs),
}

/// 两个子命令共用的输入参数
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Folders, .zip or .7z archives (file:// URIs are accepted)
    pub paths: Vec<String>,

    /// Read additional paths from a file, one per line ('-' for stdin)
    #[arg(long, value_name = "FILE")]
    pub list: Option<PathBuf>,
}
