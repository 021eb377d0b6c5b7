// crates/yh_config/src/lib.rs

//! YuHong 配置层
//!
//! 模拟配置的加载、校验与访问。配置一经加载即不可变，
//! 以显式参数传入工作流；计算层不读取任何环境或全局状态。
//!
//! # 模块概览
//!
//! - [`scenario`]: SimulationConfig 模拟配置（JSON）
//! - [`error`]: 配置错误类型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod scenario;

// 重导出核心类型
pub use error::ConfigError;
pub use scenario::{
    OutputConfig, OutputFormat, ScenarioSpec, SimulationConfig, WatershedSpec,
};
