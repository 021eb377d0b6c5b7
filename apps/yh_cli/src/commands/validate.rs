// apps/yh_cli/src/commands/validate.rs

//! 验证配置命令
//!
//! 硬性校验（格式、取值范围、映射规则）在加载时完成；
//! 之后做软性检查（文件存在性、可疑配置）并打印报告。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;
use yh_config::SimulationConfig;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径 (JSON)
    #[arg(short, long)]
    pub config: PathBuf,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    let config = SimulationConfig::from_file(&args.config)
        .with_context(|| format!("配置校验失败: {}", args.config.display()))?;

    info!("配置格式与取值校验通过");

    let report = config.check();
    println!("{}", report);

    if report.has_errors() {
        anyhow::bail!("软性检查发现 {} 个错误", report.error_count());
    }
    info!("验证通过");
    Ok(())
}
