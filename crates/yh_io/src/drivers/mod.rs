// crates/yh_io/src/drivers/mod.rs

//! 栅格驱动
//!
//! 按文件扩展名分发读写：`.asc` 使用纯 Rust 的 ESRI ASCII 驱动，
//! `.tif`/`.tiff` 使用 GDAL 驱动（需要 `gdal` 特性）。

pub mod asc;
pub mod gdal;

pub use gdal::GdalDriver;

use crate::error::{IoError, IoResult};
use std::path::Path;
use yh_terrain::grid::RasterGrid;

/// 支持的扩展名列表（错误信息用）
fn supported_formats() -> Vec<String> {
    vec!["asc".to_string(), "tif".to_string(), "tiff".to_string()]
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// 按扩展名读取单波段栅格
pub fn read_raster(path: &Path) -> IoResult<RasterGrid> {
    match extension_of(path).as_str() {
        "asc" => asc::read_asc(path),
        "tif" | "tiff" => {
            let driver = GdalDriver::open(path)?;
            driver.read_band(1)
        }
        other => Err(IoError::UnsupportedFormat {
            format: other.to_string(),
            supported: supported_formats(),
        }),
    }
}

/// 按扩展名写出单波段栅格
pub fn write_raster(grid: &RasterGrid, path: &Path) -> IoResult<()> {
    match extension_of(path).as_str() {
        "asc" => asc::write_asc(grid, path),
        "tif" | "tiff" => gdal::write_gtiff(grid, path),
        other => Err(IoError::UnsupportedFormat {
            format: other.to_string(),
            supported: supported_formats(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_unsupported_extension() {
        let result = read_raster(&PathBuf::from("dem.png"));
        assert!(matches!(result, Err(IoError::UnsupportedFormat { .. })));
    }

    #[cfg(not(feature = "gdal"))]
    #[test]
    fn test_gtiff_requires_feature() {
        let result = read_raster(&PathBuf::from("dem.tif"));
        assert!(matches!(result, Err(IoError::NotAvailable { .. })));
    }
}
