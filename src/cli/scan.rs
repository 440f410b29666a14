//! # scan 子命令 CLI 定义
//!
//! 预览输入项与候选文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scan.rs`

use super::InputArgs;
use crate::models::ProcessingMode;

use clap::Args;

/// scan 子命令参数
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Which textures count as selected
    #[arg(long, value_enum, default_value_t = ProcessingMode::All)]
    pub mode: ProcessingMode,
}
