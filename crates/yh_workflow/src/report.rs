// crates/yh_workflow/src/report.rs

//! 批处理结果报告
//!
//! 记录每个（流域, 情景）单元的求值结果，供 CLI 汇总输出。

use std::fmt;

/// 单元求值结果
#[derive(Debug, Clone)]
pub enum UnitOutcome {
    /// 求值成功并写出深度瓦片
    Success {
        /// 流域平均 CN 值
        avg_cn: f64,
        /// 径流体积 [m^3]
        runoff_volume: f64,
        /// 收敛水位 [m]
        flood_elevation: f64,
        /// 深度大于零的像元数
        flooded_cells: usize,
        /// 水位求解时区间被扩展
        bracket_expanded: bool,
    },
    /// 跳过（如没有有效像元）
    Skipped {
        /// 跳过原因
        reason: String,
    },
    /// 失败（错误已记录，批处理继续）
    Failed {
        /// 错误信息
        error: String,
    },
}

/// 单元记录
#[derive(Debug, Clone)]
pub struct UnitRecord {
    /// 流域 ID
    pub watershed_id: String,
    /// 情景名
    pub scenario: String,
    /// 求值结果
    pub outcome: UnitOutcome,
}

/// 批处理报告
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 全部单元记录（按流域、情景排序）
    pub records: Vec<UnitRecord>,
    /// 批处理耗时 [s]
    pub elapsed_secs: f64,
}

impl BatchReport {
    /// 成功单元数
    pub fn success_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, UnitOutcome::Success { .. }))
            .count()
    }

    /// 跳过单元数
    pub fn skipped_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, UnitOutcome::Skipped { .. }))
            .count()
    }

    /// 失败单元数
    pub fn failed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, UnitOutcome::Failed { .. }))
            .count()
    }

    /// 是否没有任何失败
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }

    /// 按（流域, 情景）排序，保证并行批次输出稳定
    pub fn sort(&mut self) {
        self.records.sort_by(|a, b| {
            (a.watershed_id.as_str(), a.scenario.as_str())
                .cmp(&(b.watershed_id.as_str(), b.scenario.as_str()))
        });
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "批处理报告:")?;
        writeln!(
            f,
            "  单元: {} 个 (成功 {}, 跳过 {}, 失败 {})",
            self.records.len(),
            self.success_count(),
            self.skipped_count(),
            self.failed_count()
        )?;
        writeln!(f, "  耗时: {:.2} s", self.elapsed_secs)?;

        for record in &self.records {
            match &record.outcome {
                UnitOutcome::Success {
                    avg_cn,
                    runoff_volume,
                    flood_elevation,
                    flooded_cells,
                    bracket_expanded,
                } => {
                    write!(
                        f,
                        "  [成功] {} / {}: CN={:.1} 体积={:.1}m³ 水位={:.2}m 淹没{}像元",
                        record.watershed_id,
                        record.scenario,
                        avg_cn,
                        runoff_volume,
                        flood_elevation,
                        flooded_cells
                    )?;
                    if *bracket_expanded {
                        write!(f, " (区间扩展)")?;
                    }
                    writeln!(f)?;
                }
                UnitOutcome::Skipped { reason } => {
                    writeln!(
                        f,
                        "  [跳过] {} / {}: {}",
                        record.watershed_id, record.scenario, reason
                    )?;
                }
                UnitOutcome::Failed { error } => {
                    writeln!(
                        f,
                        "  [失败] {} / {}: {}",
                        record.watershed_id, record.scenario, error
                    )?;
                }
            }
        }
        Ok(())
    }
}
