// crates/yh_workflow/src/lib.rs

//! YuHong 工作流层
//!
//! 按（流域 × 情景）组织批处理：读取瓦片、提取样本、计算径流与
//! 水位、写出深度栅格，以及情景级瓦片合并。
//!
//! # 批处理语义
//!
//! - 每个（流域, 情景）求值相互独立，流域间用 rayon 并行；
//! - 单个求值失败只记录该单元的失败结果，批处理继续（部分失败容忍）；
//! - 缺失土地利用文件的情景整体跳过并告警；
//! - 输出先写临时文件再改名，失败时尽力清理并记录警告，不静默吞错。
//!
//! # 模块
//!
//! - [`batch`]: 批处理运行器
//! - [`report`]: 批处理结果报告
//! - [`merge`]: 情景瓦片合并
//! - [`error`]: 工作流错误类型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod error;
pub mod merge;
pub mod report;

// 重导出常用类型
pub use batch::BatchRunner;
pub use error::WorkflowError;
pub use merge::merge_scenario;
pub use report::{BatchReport, UnitOutcome, UnitRecord};
