//! # 工具函数模块
//!
//! 提供美化输出、进度条、转换器查找与 CSV 报告等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: locate, output, progress, report

pub mod locate;
pub mod output;
pub mod progress;
pub mod report;
