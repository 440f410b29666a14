//! # 临时资源清理
//!
//! 跟踪解压目录与 ZIP 暂存目录，运行结束（完成或取消）后递归删除。
//! 删除失败一律吞掉：残留临时目录可以接受，崩溃不行。
//!
//! 未显式 `release` 时由 `Drop` 兜底。
//!
//! ## 依赖关系
//! - 被 `input/builder.rs`, `batch/runner.rs` 使用
//! - 使用 `tempfile`

use crate::models::InputItem;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ResourceJanitor {
    dirs: Vec<TempDir>,
    paths: Vec<PathBuf>,
}

impl ResourceJanitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接管一个临时目录
    pub fn adopt(&mut self, dir: TempDir) {
        self.dirs.push(dir);
    }

    /// 登记一个需要删除的目录
    pub fn track(&mut self, path: PathBuf) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// 登记所有临时输入项的 `work_dir`
    pub fn track_items(&mut self, items: &[InputItem]) {
        for item in items.iter().filter(|i| i.is_temporary) {
            self.track(item.work_dir.clone());
        }
    }

    /// 被跟踪的资源数量
    pub fn len(&self) -> usize {
        self.dirs.len() + self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 尽力删除所有资源，可重复调用
    pub fn release(&mut self) {
        if self.is_empty() {
            return;
        }
        debug!(count = self.len(), "releasing temporary resources");
        for path in self.paths.drain(..) {
            remove_quietly(&path);
        }
        for dir in self.dirs.drain(..) {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                debug!(path = %path.display(), error = %e, "temp dir left behind");
            }
        }
    }
}

impl Drop for ResourceJanitor {
    fn drop(&mut self) {
        self.release();
    }
}

fn remove_quietly(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_dir_all(path) {
            debug!(path = %path.display(), error = %e, "temp dir left behind");
        }
    }
}
