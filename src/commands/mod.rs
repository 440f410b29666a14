//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，以及两者共用的输入收集流程。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `input/`, `batch/`, `utils/`
//! - 子模块: compress, scan

pub mod compress;
pub mod scan;

use crate::cli::{Commands, InputArgs};
use crate::error::{Result, ShrinkError};
use crate::input::{self, BuiltInputs};
use crate::utils::{output, progress};

use std::fs;
use std::io::{self, Read};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Compress(args) => compress::execute(args),
        Commands::Scan(args) => scan::execute(args),
    }
}

/// 读取命令行路径和 `--list` 中的原始行
fn read_raw_lines(args: &InputArgs) -> Result<Vec<String>> {
    let mut lines = args.paths.clone();

    if let Some(list) = &args.list {
        let text = if list.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ShrinkError::read(list, e))?;
            buf
        } else {
            fs::read_to_string(list).map_err(|e| ShrinkError::read(list, e))?
        };
        lines.extend(text.lines().map(str::to_string));
    }

    Ok(lines)
}

/// 解析、解压并构建输入项；被跳过的压缩包以警告形式报告
fn gather_inputs(args: &InputArgs) -> Result<BuiltInputs> {
    let lines = read_raw_lines(args)?;
    let resolved = input::resolve_lines(lines.iter().map(String::as_str));
    if resolved.is_empty() {
        return Err(ShrinkError::NoInputs);
    }

    let spinner = progress::create_spinner("Preparing inputs");
    let built = input::build(&resolved);
    spinner.finish_and_clear();
    let built = built?;

    for skipped in &built.skipped {
        output::print_warning(&format!("Skipped {}: {}", skipped.path.display(), skipped.error));
    }

    if built.items.is_empty() {
        return Err(ShrinkError::NoInputs);
    }

    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_raw_lines_merges_list_file() {
        let tmp = TempDir::new().unwrap();
        let list = tmp.path().join("inputs.txt");
        fs::write(&list, "file:///mods/A%20B\n\n/mods/C\n").unwrap();

        let args = InputArgs {
            paths: vec!["/mods/Z".into()],
            list: Some(list),
        };
        let lines = read_raw_lines(&args).unwrap();
        assert_eq!(lines, vec!["/mods/Z", "file:///mods/A%20B", "", "/mods/C"]);
    }

    #[test]
    fn test_gather_inputs_rejects_empty() {
        let args = InputArgs {
            paths: vec!["/definitely/not/here".into(), "".into()],
            list: None,
        };
        assert!(matches!(gather_inputs(&args), Err(ShrinkError::NoInputs)));
    }

    #[test]
    fn test_gather_inputs_skips_broken_archive() {
        let tmp = TempDir::new().unwrap();
        let mods = tmp.path().join("Mod");
        fs::create_dir(&mods).unwrap();
        let broken = tmp.path().join("broken.zip");
        fs::write(&broken, b"not a zip").unwrap();

        let args = InputArgs {
            paths: vec![
                mods.display().to_string(),
                broken.display().to_string(),
            ],
            list: None,
        };
        let built = gather_inputs(&args).unwrap();
        assert_eq!(built.items.len(), 1);
        assert_eq!(built.skipped.len(), 1);
    }
}
