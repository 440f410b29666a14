//! # 数据模型模块
//!
//! 定义输入项、候选文件与批处理配置。
//!
//! ## 依赖关系
//! - 被 `input/`, `batch/`, `output/`, `commands/` 使用
//! - 子模块: input, options

pub mod input;
pub mod options;

pub use input::{CandidateFile, InputItem};
pub use options::{BatchConfig, OutputMethod, OutputTarget, ProcessingMode, Resolution};
