//! # 批量处理模块
//!
//! 候选收集、转换器调用、执行状态机与临时资源清理。
//!
//! ## 功能
//! - 按模式收集 `.dds` 候选文件
//! - 逐个调用外部转换器（带超时）
//! - 通过通道向调用方报告进度、日志与汇总
//! - 完成或取消后清理临时目录
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `crossbeam-channel` 传递事件
//! - 使用 `output/` 计算目标路径与打包

pub mod collector;
pub mod converter;
pub mod events;
pub mod janitor;
pub mod runner;

pub use converter::ConversionOutcome;
pub use events::{BatchEvent, BatchSummary, LogLine};
pub use janitor::ResourceJanitor;
pub use runner::{BatchHandle, FileRecord, RunOutcome};
