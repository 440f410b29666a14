//! # 批处理事件
//!
//! 工作线程通过通道向调用方单向发送的事件。
//! 事件按处理顺序送达，`Finished` 总是最后一个。
//! 事件只携带结构化数据，文本呈现由 `utils/output.rs` 负责。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 发送
//! - 被 `commands/compress.rs` 接收

use std::path::PathBuf;
use std::time::Duration;

/// 一条处理日志
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    Converted {
        file: PathBuf,
        destination: PathBuf,
        elapsed: Duration,
    },
    Failed {
        file: PathBuf,
        diagnostic: String,
    },
    TimedOut {
        file: PathBuf,
        elapsed: Duration,
    },
    Exception {
        file: PathBuf,
        message: String,
    },
    Packaged {
        archive: PathBuf,
    },
}

impl LogLine {
    /// 日志对应的文件名（仅显示用）
    pub fn file_name(&self) -> String {
        let path = match self {
            LogLine::Converted { file, .. }
            | LogLine::Failed { file, .. }
            | LogLine::TimedOut { file, .. }
            | LogLine::Exception { file, .. } => file,
            LogLine::Packaged { archive } => archive,
        };
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}

/// 运行完成时的汇总
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub success: usize,
    pub total: usize,
    /// 文件夹模式为各 `_low_res` 目录，ZIP 模式为创建的压缩包
    pub outputs: Vec<PathBuf>,
    /// 输出位置描述：ZIP 模式为用户选择的目录
    pub location: Option<PathBuf>,
}

/// 工作线程发出的事件
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    Progress {
        done: usize,
        total: usize,
        success: usize,
    },
    Log(LogLine),
    Finished(BatchSummary),
}
