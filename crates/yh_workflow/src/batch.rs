// crates/yh_workflow/src/batch.rs

//! 批处理运行器
//!
//! 对配置中的每个（流域 × 情景）执行完整求值链路：
//! 读 DEM 瓦片 → 按瓦片范围截取土地利用 → 提取有效样本 →
//! 平均 CN → 径流体积 → 淹没水位 → 深度栅格 → 写出。
//!
//! 流域之间用 rayon 并行；单元失败只记录结果，不中断批处理。

use crate::error::WorkflowError;
use crate::report::{BatchReport, UnitOutcome, UnitRecord};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use yh_config::{SimulationConfig, WatershedSpec};
use yh_hydrology::runoff::runoff_volume;
use yh_hydrology::solver::find_flood_surface;
use yh_terrain::depth::{build_depth_grid, flooded_cells};
use yh_terrain::grid::RasterGrid;
use yh_terrain::sample::WatershedSample;

/// 批处理运行器
pub struct BatchRunner<'a> {
    config: &'a SimulationConfig,
}

impl<'a> BatchRunner<'a> {
    /// 创建运行器
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self { config }
    }

    /// 执行批处理
    ///
    /// 只有环境级问题（如输出目录无法创建）会返回错误；
    /// 单元级失败全部进入报告。
    pub fn run(&self) -> Result<BatchReport, WorkflowError> {
        let start = Instant::now();
        std::fs::create_dir_all(&self.config.output_dir)?;

        // 每个情景的土地利用栅格只加载一次，各流域只读共享。
        // 缺失或不可读的情景按原始语义跳过并告警，不中断批处理。
        let mut scenarios: Vec<(String, f64, RasterGrid)> = Vec::new();
        for (name, sc) in &self.config.scenarios {
            let path = self.config.landuse_path(sc);
            if !path.exists() {
                tracing::warn!(
                    "找不到土地利用文件: {}，跳过情景 {}",
                    path.display(),
                    name
                );
                continue;
            }
            match yh_io::read_raster(&path) {
                Ok(grid) => scenarios.push((name.clone(), sc.rainfall_mm, grid)),
                Err(e) => {
                    tracing::warn!("读取土地利用失败: {}，跳过情景 {}", e, name);
                }
            }
        }

        let total = self.config.watersheds.len();
        tracing::info!(
            "开始批处理: {} 个流域 × {} 个情景",
            total,
            scenarios.len()
        );

        let counter = AtomicUsize::new(0);
        let records: Mutex<Vec<UnitRecord>> = Mutex::new(Vec::new());

        self.config.watersheds.par_iter().for_each(|ws| {
            let done = counter.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::info!("[{}/{}] 处理流域: {}", done, total, ws.id);

            let units = self.process_watershed(ws, &scenarios);
            records.lock().extend(units);
        });

        let mut report = BatchReport {
            records: records.into_inner(),
            elapsed_secs: start.elapsed().as_secs_f64(),
        };
        report.sort();

        tracing::info!(
            "批处理完成: 成功 {} / 跳过 {} / 失败 {}，耗时 {:.2} s",
            report.success_count(),
            report.skipped_count(),
            report.failed_count(),
            report.elapsed_secs
        );

        Ok(report)
    }

    /// 处理单个流域的全部情景
    fn process_watershed(
        &self,
        ws: &WatershedSpec,
        scenarios: &[(String, f64, RasterGrid)],
    ) -> Vec<UnitRecord> {
        let dem_path = self.config.dem_path(ws);
        let dem = match yh_io::read_raster(&dem_path) {
            Ok(dem) => dem,
            Err(e) => {
                tracing::error!("流域 {} DEM 读取失败: {}", ws.id, e);
                // DEM 不可用时该流域所有情景都记为失败
                return scenarios
                    .iter()
                    .map(|(name, _, _)| UnitRecord {
                        watershed_id: ws.id.clone(),
                        scenario: name.clone(),
                        outcome: UnitOutcome::Failed {
                            error: e.to_string(),
                        },
                    })
                    .collect();
            }
        };

        scenarios
            .iter()
            .map(|(name, rainfall_mm, landuse)| {
                let outcome = match self.process_unit(ws, &dem, name, *rainfall_mm, landuse) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!("流域 {} 情景 {} 失败: {}", ws.id, name, e);
                        UnitOutcome::Failed {
                            error: e.to_string(),
                        }
                    }
                };
                UnitRecord {
                    watershed_id: ws.id.clone(),
                    scenario: name.clone(),
                    outcome,
                }
            })
            .collect()
    }

    /// 处理单个（流域, 情景）单元
    fn process_unit(
        &self,
        ws: &WatershedSpec,
        dem: &RasterGrid,
        scenario: &str,
        rainfall_mm: f64,
        landuse: &RasterGrid,
    ) -> Result<UnitOutcome, WorkflowError> {
        let window = landuse.window_of(dem)?;
        let sample = WatershedSample::extract(dem, &window, &self.config.cn_mapping)?;

        // 求解器的前置条件：空样本在这里拦截，记为跳过
        if sample.is_empty() {
            return Ok(UnitOutcome::Skipped {
                reason: "没有有效像元 (DEM 无值或土地利用为零)".to_string(),
            });
        }

        let avg_cn = sample.mean_cn()?;
        let volume = runoff_volume(rainfall_mm, avg_cn, sample.area());
        let solution = find_flood_surface(&sample.elevations, volume, sample.cell_area)?;

        if solution.bracket_expanded {
            tracing::warn!(
                "流域 {} 情景 {}: 目标体积超出余量上界容量，求解区间已扩展",
                ws.id,
                scenario
            );
        }

        let depth = build_depth_grid(dem, &sample, solution.elevation, self.config.output.nodata);
        let flooded = flooded_cells(&depth);

        let tile_name = self.config.depth_tile_name(&ws.id, scenario);
        self.write_tile(&depth, &tile_name)?;

        tracing::info!(
            "  -> {}: P={:.1} | CN={:.1} | 水位={:.2}m | 淹没{}像元",
            scenario,
            rainfall_mm,
            avg_cn,
            solution.elevation,
            flooded
        );

        Ok(UnitOutcome::Success {
            avg_cn,
            runoff_volume: volume,
            flood_elevation: solution.elevation,
            flooded_cells: flooded,
            bracket_expanded: solution.bracket_expanded,
        })
    }

    /// 写出瓦片：先写临时文件再改名，失败时尽力清理
    fn write_tile(&self, grid: &RasterGrid, name: &str) -> Result<(), WorkflowError> {
        let final_path = self.config.output_dir.join(name);
        let tmp_path = self.config.output_dir.join(format!(".tmp_{}", name));

        let result = yh_io::write_raster(grid, &tmp_path)
            .map_err(WorkflowError::from)
            .and_then(|_| std::fs::rename(&tmp_path, &final_path).map_err(WorkflowError::from));

        if result.is_err() {
            remove_best_effort(&tmp_path);
        }
        result
    }
}

/// 尽力删除文件，失败只记录警告
pub(crate) fn remove_best_effort(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!("清理临时文件失败: {}: {}", path.display(), e);
        }
    }
}
