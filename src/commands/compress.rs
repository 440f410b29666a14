//! # compress 命令实现
//!
//! 批量降低 `.dds` 贴图分辨率。
//!
//! ## 流程
//! 1. 定位转换器并校验配置（任何文件操作之前）
//! 2. 解析输入、解压压缩包
//! 3. 在工作线程中运行批处理，本线程负责进度条与 Ctrl-C
//! 4. 导出日志与 CSV 报告，打印汇总
//!
//! ## 依赖关系
//! - 使用 `cli/compress.rs` 定义的参数
//! - 使用 `batch/`, `input/`, `models/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/locate.rs`, `utils/report.rs`

use super::gather_inputs;
use crate::batch::{BatchEvent, BatchHandle, RunOutcome};
use crate::cli::compress::CompressArgs;
use crate::error::{Result, ShrinkError};
use crate::models::{BatchConfig, OutputTarget};
use crate::utils::{locate, output, progress, report};

use std::fs;
use std::path::Path;
use tracing::warn;

/// 执行 compress 命令
pub fn execute(args: CompressArgs) -> Result<()> {
    output::print_header("Compressing Textures");

    let converter = args
        .magick
        .clone()
        .or_else(locate::find_converter)
        .ok_or(ShrinkError::ConverterNotFound)?;
    let target = OutputTarget::from_method(args.method, args.zip_dir.clone())?;
    let config = BatchConfig::new(converter, args.resolution, args.mode, target);
    config.validate()?;

    output::print_info(&format!("Using converter '{}'", config.converter.display()));

    let built = gather_inputs(&args.input)?;
    output::print_info(&format!(
        "{} input item(s), max {}px, mode {}",
        built.items.len(),
        config.resolution,
        config.mode
    ));

    let handle = BatchHandle::spawn(config, built.items, built.janitor);

    let cancel = handle.cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        if !cancel.is_cancelled() {
            cancel.cancel();
            output::print_warning("Canceling... waiting for the current file to finish");
        }
    }) {
        warn!(error = %e, "Ctrl-C handler not installed");
    }

    let pb = progress::create_progress_bar(0, "Processing");
    let mut log_lines = Vec::new();

    for event in handle.events.iter() {
        match event {
            BatchEvent::Progress {
                done,
                total,
                success,
            } => {
                pb.set_length(total as u64);
                pb.set_position(done as u64);
                pb.set_message(format!("{} ok", success));
            }
            BatchEvent::Log(line) => {
                pb.suspend(|| output::print_log_line(&line));
                log_lines.push(output::render_log_line(&line));
            }
            BatchEvent::Finished(_) => {}
        }
    }
    pb.finish_and_clear();

    let run = handle.join()?;

    match &run.outcome {
        RunOutcome::Completed(summary) => {
            log_lines.push(output::render_summary(summary));
        }
        RunOutcome::Cancelled {
            done,
            total,
            success,
        } => {
            log_lines.push(format!(
                "Cancelled. Processed {}/{}, successful: {}",
                done, total, success
            ));
        }
    }

    if let Some(path) = &args.log_file {
        export_log(&log_lines, path)?;
        output::print_success(&format!("Log exported to: {}", path.display()));
    }

    if let Some(path) = &args.report {
        report::write_report(&run.records, path)?;
        output::print_success(&format!("Report written to: {}", path.display()));
    }

    match &run.outcome {
        RunOutcome::Completed(summary) => output::print_summary(summary),
        RunOutcome::Cancelled {
            done,
            total,
            success,
        } => output::print_warning(&format!(
            "Cancelled after {}/{} files ({} successful)",
            done, total, success
        )),
    }

    Ok(())
}

/// 写出纯文本日志
fn export_log(lines: &[String], path: &Path) -> Result<()> {
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(path, text).map_err(|e| ShrinkError::write(path, e))
}
