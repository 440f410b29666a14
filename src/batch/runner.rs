//! # 批处理执行器
//!
//! 逐个文件顺序调用转换器，汇总进度与结果。
//!
//! ## 状态
//! `Idle → Running → {Completed, Cancelled, NoCandidates}`，
//! 取消只在文件粒度检查，正在运行的转换会先跑完（或超时）。
//!
//! ## 功能
//! - 单文件超时与错误隔离，失败不会中止整批
//! - 每个文件后发送进度事件
//! - 完成后打包（ZIP 模式）并清理临时目录
//! - 取消时跳过打包和汇总，但同样清理临时目录
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用
//! - 使用 `batch/collector.rs`, `batch/converter.rs`, `batch/janitor.rs`
//! - 使用 `output/` 计算目标路径与打包
//! - 使用 `crossbeam-channel` 发送事件

use super::collector::{collect_candidates, is_normal_map};
use super::converter::{ConversionOutcome, Converter};
use super::events::{BatchEvent, BatchSummary, LogLine};
use super::janitor::ResourceJanitor;
use crate::error::{Result, ShrinkError};
use crate::models::{BatchConfig, InputItem, OutputTarget};
use crate::output::{folder_output_root, package_items, OutputPlan};

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// 协作式取消标记
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// 单个文件的处理记录
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub normal_map: bool,
    pub outcome: ConversionOutcome,
}

/// 运行结束状态
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(BatchSummary),
    Cancelled {
        done: usize,
        total: usize,
        success: usize,
    },
}

/// 一次运行的完整结果
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub records: Vec<FileRecord>,
}

impl RunReport {
    pub fn success(&self) -> usize {
        match &self.outcome {
            RunOutcome::Completed(summary) => summary.success,
            RunOutcome::Cancelled { success, .. } => *success,
        }
    }

    pub fn total(&self) -> usize {
        match &self.outcome {
            RunOutcome::Completed(summary) => summary.total,
            RunOutcome::Cancelled { total, .. } => *total,
        }
    }
}

/// 批处理执行器
pub struct BatchProcessor {
    config: BatchConfig,
    converter: Converter,
    events: Sender<BatchEvent>,
    cancel: CancelToken,
}

impl BatchProcessor {
    /// 创建新的批处理执行器
    pub fn new(config: BatchConfig, events: Sender<BatchEvent>, cancel: CancelToken) -> Self {
        let converter = Converter::new(
            config.converter.clone(),
            config.resolution.pixels(),
            config.timeout(),
        );
        Self {
            config,
            converter,
            events,
            cancel,
        }
    }

    fn emit(&self, event: BatchEvent) {
        // 调用方可能已不再监听
        let _ = self.events.send(event);
    }

    /// 执行整批转换。无论结果如何，`janitor` 管理的临时资源都会被释放。
    pub fn run(&self, items: &[InputItem], mut janitor: ResourceJanitor) -> Result<RunReport> {
        let candidates = collect_candidates(items, self.config.mode);
        if candidates.is_empty() {
            janitor.release();
            return Err(ShrinkError::NoCandidates);
        }

        let plan = match &self.config.output {
            OutputTarget::Folder => OutputPlan::Folder,
            OutputTarget::Zip { dir } => {
                let staging = tempfile::Builder::new()
                    .prefix("texshrink-stage-")
                    .tempdir()
                    .map_err(|e| ShrinkError::write(&std::env::temp_dir(), e))?;
                let staging_root = staging.path().to_path_buf();
                janitor.adopt(staging);
                OutputPlan::Zip {
                    staging_root,
                    zip_dir: dir.clone(),
                }
            }
        };

        let total = candidates.len();
        let mut success = 0;
        let mut records = Vec::with_capacity(total);
        info!(total, mode = %self.config.mode, "batch started");

        for (index, candidate) in candidates.iter().enumerate() {
            if self.cancel.is_cancelled() {
                info!(done = index, total, "batch cancelled");
                janitor.release();
                return Ok(RunReport {
                    outcome: RunOutcome::Cancelled {
                        done: index,
                        total,
                        success,
                    },
                    records,
                });
            }

            let source = candidate.path.clone();
            let destination = plan.destination(candidate);
            let normal_map = is_normal_map(&source);

            let outcome = match destination.parent().map(fs::create_dir_all) {
                Some(Err(e)) => ConversionOutcome::Exception {
                    message: e.to_string(),
                },
                _ => self.converter.convert(&source, &destination, normal_map),
            };
            debug!(file = %source.display(), ?outcome, "converted");

            let line = match &outcome {
                ConversionOutcome::Success { elapsed } => {
                    success += 1;
                    LogLine::Converted {
                        file: source.clone(),
                        destination: destination.clone(),
                        elapsed: *elapsed,
                    }
                }
                ConversionOutcome::Failed { diagnostic, .. } => LogLine::Failed {
                    file: source.clone(),
                    diagnostic: diagnostic.clone(),
                },
                ConversionOutcome::TimedOut { elapsed } => LogLine::TimedOut {
                    file: source.clone(),
                    elapsed: *elapsed,
                },
                ConversionOutcome::Exception { message } => LogLine::Exception {
                    file: source.clone(),
                    message: message.clone(),
                },
            };
            self.emit(BatchEvent::Log(line));
            self.emit(BatchEvent::Progress {
                done: index + 1,
                total,
                success,
            });

            records.push(FileRecord {
                source,
                destination,
                normal_map,
                outcome,
            });
        }

        // 最后一个文件转换期间请求的取消
        if self.cancel.is_cancelled() {
            info!(done = total, total, "batch cancelled");
            janitor.release();
            return Ok(RunReport {
                outcome: RunOutcome::Cancelled {
                    done: total,
                    total,
                    success,
                },
                records,
            });
        }

        let summary = match self.finalize(items, &plan, success, total) {
            Ok(summary) => summary,
            Err(e) => {
                janitor.release();
                return Err(e);
            }
        };
        janitor.release();

        info!(success, total, "batch completed");
        self.emit(BatchEvent::Finished(summary.clone()));

        Ok(RunReport {
            outcome: RunOutcome::Completed(summary),
            records,
        })
    }

    /// 物化输出：ZIP 模式打包，文件夹模式只汇总输出目录
    fn finalize(
        &self,
        items: &[InputItem],
        plan: &OutputPlan,
        success: usize,
        total: usize,
    ) -> Result<BatchSummary> {
        match plan {
            OutputPlan::Folder => {
                let mut outputs: Vec<PathBuf> = Vec::new();
                for root in items.iter().map(folder_output_root) {
                    if !outputs.contains(&root) {
                        outputs.push(root);
                    }
                }
                Ok(BatchSummary {
                    success,
                    total,
                    outputs,
                    location: None,
                })
            }
            OutputPlan::Zip {
                staging_root,
                zip_dir,
            } => {
                let archives = package_items(items, staging_root, zip_dir)?;
                for archive in &archives {
                    self.emit(BatchEvent::Log(LogLine::Packaged {
                        archive: archive.clone(),
                    }));
                }
                Ok(BatchSummary {
                    success,
                    total,
                    outputs: archives,
                    location: Some(zip_dir.clone()),
                })
            }
        }
    }
}

/// 在独立工作线程中运行的批处理
pub struct BatchHandle {
    pub events: Receiver<BatchEvent>,
    pub cancel: CancelToken,
    worker: JoinHandle<Result<RunReport>>,
}

impl BatchHandle {
    /// 启动工作线程，调用方线程保持空闲以处理进度显示与取消
    pub fn spawn(config: BatchConfig, items: Vec<InputItem>, janitor: ResourceJanitor) -> Self {
        let (sender, events) = unbounded();
        let cancel = CancelToken::new();
        let processor = BatchProcessor::new(config, sender, cancel.clone());

        let worker = thread::spawn(move || processor.run(&items, janitor));

        Self {
            events,
            cancel,
            worker,
        }
    }

    /// 等待工作线程结束
    pub fn join(self) -> Result<RunReport> {
        self.worker
            .join()
            .unwrap_or_else(|_| Err(ShrinkError::InvalidArgument("batch worker panicked".into())))
    }
}
