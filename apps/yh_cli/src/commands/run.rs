// apps/yh_cli/src/commands/run.rs

//! 运行批处理命令
//!
//! 执行完整的（流域 × 情景）淹没深度批处理。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};
use yh_config::SimulationConfig;
use yh_workflow::BatchRunner;

/// 运行批处理参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径 (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// 批处理后立即合并各情景瓦片
    #[arg(long)]
    pub merge: bool,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== YuHong 雨洪淹没模拟启动 ===");

    let config = SimulationConfig::from_file(&args.config)
        .with_context(|| format!("加载配置失败: {}", args.config.display()))?;

    info!(
        "配置: {} 个流域, {} 个情景, 输出目录 {}",
        config.watersheds.len(),
        config.scenarios.len(),
        config.output_dir.display()
    );

    let report = BatchRunner::new(&config).run().context("批处理失败")?;
    println!("{}", report);

    if !report.is_clean() {
        warn!("{} 个单元失败，详见报告", report.failed_count());
    }

    if args.merge {
        for scenario in config.scenarios.keys() {
            match yh_workflow::merge_scenario(&config, scenario) {
                Ok(path) => info!("情景 {} 合并完成: {}", scenario, path.display()),
                Err(e) => warn!("情景 {} 合并失败: {}", scenario, e),
            }
        }
    }

    info!("=== 全部完成 ===");
    Ok(())
}
