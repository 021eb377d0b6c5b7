// apps/yh_cli/src/main.rs

//! YuHong 命令行界面
//!
//! 雨洪淹没模拟的命令行工具：按配置批量计算逐流域淹没深度栅格，
//! 并将同一情景的瓦片合并为整幅结果。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// YuHong 雨洪淹没模拟命令行工具
#[derive(Parser)]
#[command(name = "yh_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SCS-CN flood inundation estimator", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行批处理模拟
    Run(commands::run::RunArgs),
    /// 合并情景瓦片
    Merge(commands::merge::MergeArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
    /// 显示配置信息
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Merge(args) => commands::merge::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
