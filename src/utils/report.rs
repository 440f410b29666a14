//! # CSV 报告导出
//!
//! 每个尝试过的文件一行：源、目标、是否法线贴图、状态、耗时、详情。
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用
//! - 使用 `serde` + `csv` 写入

use crate::batch::{ConversionOutcome, FileRecord};
use crate::error::{Result, ShrinkError};

use serde::Serialize;
use std::path::Path;

/// 报告中的一行
#[derive(Debug, Serialize)]
struct ReportRow {
    source: String,
    destination: String,
    normal_map: bool,
    status: &'static str,
    seconds: String,
    detail: String,
}

impl From<&FileRecord> for ReportRow {
    fn from(record: &FileRecord) -> Self {
        let (status, elapsed, detail) = match &record.outcome {
            ConversionOutcome::Success { elapsed } => ("ok", Some(*elapsed), String::new()),
            ConversionOutcome::Failed {
                diagnostic,
                elapsed,
            } => ("failed", Some(*elapsed), diagnostic.clone()),
            ConversionOutcome::TimedOut { elapsed } => ("timeout", Some(*elapsed), String::new()),
            ConversionOutcome::Exception { message } => ("exception", None, message.clone()),
        };
        Self {
            source: record.source.display().to_string(),
            destination: record.destination.display().to_string(),
            normal_map: record.normal_map,
            status,
            seconds: elapsed
                .map(|d| format!("{:.2}", d.as_secs_f64()))
                .unwrap_or_default(),
            detail,
        }
    }
}

/// 写出 CSV 报告
pub fn write_report(records: &[FileRecord], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for record in records {
        wtr.serialize(ReportRow::from(record))?;
    }

    wtr.flush().map_err(|e| ShrinkError::write(output_path, e))?;
    Ok(())
}
