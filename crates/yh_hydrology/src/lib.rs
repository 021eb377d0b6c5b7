// crates/yh_hydrology/src/lib.rs

//! YuHong 水文计算层
//!
//! 提供 SCS-CN 径流模型与 DEM 填充式淹没水位求解，是整个项目中唯一
//! 包含数值算法的层。所有函数均为纯计算：无 IO、无共享可变状态，
//! 每个（流域, 情景）求解相互独立，可安全并行。
//!
//! # 模块概览
//!
//! - [`runoff`]: SCS-CN 径流体积模型
//! - [`storage`]: 指定水位以下的蓄水体积估算
//! - [`solver`]: 淹没水位二分求解器
//! - [`remap`]: 土地利用代码 → CN 值映射规则
//! - [`error`]: 水文层错误类型
//!
//! # 计算链路
//!
//! ```text
//! 降雨 P + 平均 CN + 汇水面积 ──runoff──> 径流体积
//! 径流体积 + 高程样本 + 像元面积 ──solver──> 淹没水位
//! (solver 内部每次迭代调用 storage)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod remap;
pub mod runoff;
pub mod solver;
pub mod storage;

// 重导出常用类型
pub use error::{HydroError, HydroResult};
pub use remap::{CnMapping, CnRule};
pub use runoff::{potential_retention, runoff_depth_mm, runoff_volume};
pub use solver::{find_flood_surface, SurfaceSolution};
pub use storage::volume_below;
