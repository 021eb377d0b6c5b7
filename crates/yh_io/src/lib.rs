// crates/yh_io/src/lib.rs

//! YuHong IO 模块
//!
//! 提供栅格数据的读写与瓦片合并。
//!
//! # 模块
//!
//! - [`drivers`]: 栅格驱动（ESRI ASCII，可选 GDAL GeoTIFF）
//! - [`merge`]: 同分辨率瓦片镶嵌
//!
//! # 可选依赖
//!
//! - `gdal`: 启用 GDAL GeoTIFF 驱动；未启用时 `.tif` 读写返回
//!   [`IoError::NotAvailable`]，不伪造数据。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod drivers;
pub mod error;
pub mod merge;

// 重导出常用类型
pub use drivers::{read_raster, write_raster, GdalDriver};
pub use error::{IoError, IoResult};
pub use merge::mosaic;
