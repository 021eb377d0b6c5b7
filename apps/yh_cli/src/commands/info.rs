// apps/yh_cli/src/commands/info.rs

//! 显示配置信息命令

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use yh_config::SimulationConfig;

/// 信息参数
#[derive(Args)]
pub struct InfoArgs {
    /// 配置文件路径 (JSON)
    #[arg(short, long)]
    pub config: PathBuf,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    let config = SimulationConfig::from_file(&args.config)
        .with_context(|| format!("加载配置失败: {}", args.config.display()))?;

    println!("=== YuHong 配置概览 ===");
    println!("输入目录: {}", config.input_dir.display());
    println!("输出目录: {}", config.output_dir.display());
    println!("输出格式: {:?} (哨兵值 {})", config.output.format, config.output.nodata);

    println!("\n流域 ({} 个):", config.watersheds.len());
    for ws in &config.watersheds {
        println!("  {} -> {}", ws.id, ws.dem_file.display());
    }

    println!("\n情景 ({} 个):", config.scenarios.len());
    for (name, sc) in &config.scenarios {
        println!(
            "  {}: P={} mm, 土地利用 {}",
            name,
            sc.rainfall_mm,
            sc.landuse_file.display()
        );
    }

    println!("\nCN 映射规则:");
    for rule in &config.cn_mapping.rules {
        println!("  代码 {:?} -> CN {}", rule.codes, rule.cn);
    }
    println!("  默认 CN: {}", config.cn_mapping.default_cn);

    Ok(())
}
