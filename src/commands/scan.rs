//! # scan 命令实现
//!
//! 预览：解析与解压输入后，统计每个输入项的贴图数量，不调用转换器。
//!
//! ## 依赖关系
//! - 使用 `cli/scan.rs` 定义的参数
//! - 使用 `batch/collector.rs`
//! - 使用 `utils/output.rs`

use super::gather_inputs;
use crate::batch::collector::{find_textures, is_normal_map};
use crate::cli::scan::ScanArgs;
use crate::error::Result;
use crate::models::{InputItem, ProcessingMode};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 扫描结果行
#[derive(Debug, Clone, Tabled)]
struct ScanRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Work dir")]
    work_dir: String,
    #[tabled(rename = ".dds")]
    textures: usize,
    #[tabled(rename = "Normal maps")]
    normal_maps: usize,
    #[tabled(rename = "Selected")]
    selected: usize,
}

fn scan_item(item: &InputItem, mode: ProcessingMode) -> ScanRow {
    let textures = find_textures(&item.work_dir);
    let normal_maps = textures.iter().filter(|p| is_normal_map(p)).count();
    let selected = textures
        .iter()
        .filter(|p| mode.includes(is_normal_map(p)))
        .count();

    ScanRow {
        source: item.source_path.display().to_string(),
        kind: item.kind.to_string(),
        work_dir: item.work_dir.display().to_string(),
        textures: textures.len(),
        normal_maps,
        selected,
    }
}

/// 执行 scan 命令
pub fn execute(args: ScanArgs) -> Result<()> {
    output::print_header("Scanning Inputs");

    let mut built = gather_inputs(&args.input)?;
    let rows: Vec<ScanRow> = built
        .items
        .iter()
        .map(|item| scan_item(item, args.mode))
        .collect();

    println!("{}", Table::new(&rows));

    let selected: usize = rows.iter().map(|r| r.selected).sum();
    if selected == 0 {
        output::print_warning("No .dds files found");
    } else {
        output::print_done(&format!(
            "{} file(s) would be processed in mode {}",
            selected, args.mode
        ));
    }

    built.janitor.release();
    Ok(())
}
