// crates/yh_workflow/src/merge.rs

//! 情景瓦片合并
//!
//! 扫描输出目录下某一情景的全部流域深度瓦片
//! （`Flood_{流域ID}_{情景}.{扩展名}`），镶嵌为一幅合并栅格并写出
//! `{前缀}_{情景}.{扩展名}`。瓦片按文件名排序后粘贴，保证结果稳定。

use crate::batch::remove_best_effort;
use crate::error::WorkflowError;
use std::path::PathBuf;
use yh_config::SimulationConfig;

/// 合并单个情景的深度瓦片
///
/// 返回合并结果的路径。目录下没有该情景的瓦片时返回
/// [`WorkflowError::NoTiles`]，调用方可以选择告警后继续处理
/// 其他情景。
pub fn merge_scenario(
    config: &SimulationConfig,
    scenario: &str,
) -> Result<PathBuf, WorkflowError> {
    let suffix = format!("_{}.{}", scenario, config.output.format.extension());

    let mut tile_paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(&config.output_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("Flood_") && name.ends_with(&suffix) {
            tile_paths.push(entry.path());
        }
    }

    if tile_paths.is_empty() {
        return Err(WorkflowError::NoTiles {
            scenario: scenario.to_string(),
            dir: config.output_dir.display().to_string(),
        });
    }
    tile_paths.sort();

    tracing::info!(
        "合并情景 {}: 找到 {} 个分块文件",
        scenario,
        tile_paths.len()
    );

    let mut tiles = Vec::with_capacity(tile_paths.len());
    for path in &tile_paths {
        tiles.push(yh_io::read_raster(path)?);
    }

    let merged = yh_io::mosaic(&tiles, config.output.nodata)?;

    let merged_name = config.merged_name(scenario);
    let final_path = config.output_dir.join(&merged_name);
    let tmp_path = config.output_dir.join(format!(".tmp_{}", merged_name));

    let result = yh_io::write_raster(&merged, &tmp_path)
        .map_err(WorkflowError::from)
        .and_then(|_| std::fs::rename(&tmp_path, &final_path).map_err(WorkflowError::from));

    if let Err(e) = result {
        remove_best_effort(&tmp_path);
        return Err(e);
    }

    tracing::info!("已生成: {}", final_path.display());
    Ok(final_path)
}
