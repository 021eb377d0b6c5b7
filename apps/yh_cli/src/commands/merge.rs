// apps/yh_cli/src/commands/merge.rs

//! 合并情景瓦片命令
//!
//! 将输出目录下逐流域的深度瓦片镶嵌为整幅情景栅格。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};
use yh_config::SimulationConfig;
use yh_workflow::merge_scenario;

/// 合并参数
#[derive(Args)]
pub struct MergeArgs {
    /// 配置文件路径 (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// 只合并指定情景（默认合并全部情景）
    #[arg(short, long)]
    pub scenario: Option<String>,
}

/// 执行合并命令
pub fn execute(args: MergeArgs) -> Result<()> {
    let config = SimulationConfig::from_file(&args.config)
        .with_context(|| format!("加载配置失败: {}", args.config.display()))?;

    let scenarios: Vec<String> = match &args.scenario {
        Some(name) => vec![name.clone()],
        None => config.scenarios.keys().cloned().collect(),
    };

    let mut merged = 0;
    for scenario in &scenarios {
        match merge_scenario(&config, scenario) {
            Ok(path) => {
                info!("情景 {} 合并完成: {}", scenario, path.display());
                merged += 1;
            }
            // 单个情景没有瓦片不算致命问题，继续其余情景
            Err(e) => warn!("情景 {} 合并失败: {}", scenario, e),
        }
    }

    if merged == 0 {
        anyhow::bail!("没有任何情景完成合并");
    }
    info!("合并完成: {}/{} 个情景", merged, scenarios.len());
    Ok(())
}
