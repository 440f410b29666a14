//! # 输出模块
//!
//! 两种互斥的输出策略：文件夹镜像，或暂存后打包为 ZIP。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 子模块: plan, package

pub mod package;
pub mod plan;

pub use package::package_items;
pub use plan::{folder_output_root, OutputPlan};
