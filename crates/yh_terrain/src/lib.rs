// crates/yh_terrain/src/lib.rs

//! 地形数据管理
//!
//! 提供栅格地形数据的存储、有效样本提取和淹没深度栅格构建。
//!
//! # 模块
//!
//! - [`grid`]: 栅格数据与地理变换
//! - [`sample`]: 流域有效样本提取（DEM 有值且土地利用非零）
//! - [`depth`]: 淹没深度栅格构建

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod depth;
pub mod grid;
pub mod sample;

// 重导出常用类型
pub use depth::build_depth_grid;
pub use grid::RasterGrid;
pub use sample::WatershedSample;
