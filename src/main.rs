//! # texshrink - 游戏贴图批量降分辨率工具
//!
//! 从文件夹、ZIP、7Z 压缩包中找出 `.dds` 贴图，逐个调用 ImageMagick 缩小，
//! 输出到同级 `_low_res` 文件夹或打包为 ZIP。
//!
//! ## 子命令
//! - `compress` - 批量转换
//! - `scan`     - 预览将要处理的文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── input/   (路径解析、解压、输入项构建)
//!   │     ├── batch/   (候选收集、转换器调用、执行状态机)
//!   │     ├── output/  (目标路径规划、ZIP 打包)
//!   │     └── models/  (数据模型与配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod input;
mod models;
mod output;
mod utils;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
