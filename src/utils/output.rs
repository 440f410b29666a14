//! # 美化输出工具
//!
//! 提供统一的终端输出样式，以及日志行、汇总的文本呈现。
//! 带颜色的版本打印到终端，纯文本版本用于 `--log-file`。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use crate::batch::{BatchSummary, LogLine};

use colored::Colorize;
use std::path::Path;
use std::time::Duration;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn seconds(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

/// 日志行的纯文本形式
pub fn render_log_line(line: &LogLine) -> String {
    match line {
        LogLine::Converted {
            destination,
            elapsed,
            ..
        } => format!(
            "{} -> {} ({})",
            line.file_name(),
            destination.display(),
            seconds(*elapsed)
        ),
        LogLine::Failed { diagnostic, .. } => {
            format!("ERROR: {}: {}", line.file_name(), diagnostic)
        }
        LogLine::TimedOut { elapsed, .. } => format!(
            "TIMEOUT: {} (after {:.1}s)",
            line.file_name(),
            elapsed.as_secs_f64()
        ),
        LogLine::Exception { message, .. } => {
            format!("EXCEPTION: {}: {}", line.file_name(), message)
        }
        LogLine::Packaged { archive } => format!("Created: {}", name_of(archive)),
    }
}

/// 打印带颜色前缀的日志行
pub fn print_log_line(line: &LogLine) {
    match line {
        LogLine::Converted {
            destination,
            elapsed,
            ..
        } => println!(
            "{} {} {} {} {}",
            "[OK]".green().bold(),
            line.file_name().dimmed(),
            "->".cyan(),
            destination.display(),
            format!("({})", seconds(*elapsed)).dimmed()
        ),
        LogLine::Failed { diagnostic, .. } => println!(
            "{} {}: {}",
            "[FAIL]".red().bold(),
            line.file_name(),
            diagnostic
        ),
        LogLine::TimedOut { elapsed, .. } => println!(
            "{} {} (after {:.1}s)",
            "[TIMEOUT]".yellow().bold(),
            line.file_name(),
            elapsed.as_secs_f64()
        ),
        LogLine::Exception { message, .. } => println!(
            "{} {}: {}",
            "[ERR]".red().bold(),
            line.file_name(),
            message
        ),
        LogLine::Packaged { archive } => println!(
            "{} Created {}",
            "[ZIP]".green().bold(),
            name_of(archive)
        ),
    }
}

/// 汇总的纯文本形式
pub fn render_summary(summary: &BatchSummary) -> String {
    let mut text = format!(
        "Completed! Successfully processed: {}/{}\nOutput paths:",
        summary.success, summary.total
    );
    match &summary.location {
        Some(dir) => text.push_str(&format!("\n{}", dir.display())),
        None => {
            for path in &summary.outputs {
                text.push_str(&format!("\n{}", path.display()));
            }
        }
    }
    text
}

/// 打印完成汇总
pub fn print_summary(summary: &BatchSummary) {
    print_separator();
    print_done(&format!(
        "Successfully processed: {}/{}",
        summary.success, summary.total
    ));
    if let Some(dir) = &summary.location {
        print_info(&format!("Archives written to '{}':", dir.display()));
    } else {
        print_info("Output paths:");
    }
    for path in &summary.outputs {
        println!("    {}", path.display());
    }
}
