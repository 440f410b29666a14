//! # 输入模块
//!
//! 从原始文本到 `InputItem` 列表的完整流程：
//! 路径解析 → 压缩包解压 → 输入项构建。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 子模块: resolve, archive, builder

pub mod archive;
pub mod builder;
pub mod resolve;

pub use builder::{build, BuiltInputs};
pub use resolve::resolve_lines;
