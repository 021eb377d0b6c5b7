// crates/yh_io/src/drivers/gdal.rs

//! GDAL GeoTIFF 驱动
//!
//! 读取单波段栅格为 [`RasterGrid`]，写出 Float32 GeoTIFF 并保留
//! 地理变换、投影与无数据值。未启用 `gdal` 特性时为占位实现，
//! 所有操作返回 [`IoError::NotAvailable`]。

use crate::error::IoResult;
use std::path::Path;
use yh_terrain::grid::RasterGrid;

/// GDAL 栅格驱动
#[cfg(feature = "gdal")]
pub struct GdalDriver {
    dataset: gdal::Dataset,
    width: usize,
    height: usize,
    band_count: usize,
    geo_transform: [f64; 6],
    projection: Option<String>,
}

#[cfg(feature = "gdal")]
impl GdalDriver {
    /// 打开栅格文件
    pub fn open(path: impl AsRef<Path>) -> IoResult<Self> {
        use crate::error::IoError;
        use gdal::Dataset;

        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound(path.to_path_buf()));
        }

        let dataset = Dataset::open(path)?;
        let (width, height) = dataset.raster_size();
        let band_count = dataset.raster_count() as usize;
        let geo_transform = dataset.geo_transform()?;
        let projection = {
            let wkt = dataset.projection();
            if wkt.is_empty() { None } else { Some(wkt) }
        };

        Ok(Self {
            dataset,
            width,
            height,
            band_count,
            geo_transform,
            projection,
        })
    }

    /// 波段数
    pub fn band_count(&self) -> usize {
        self.band_count
    }

    /// 读取指定波段（从 1 开始）
    pub fn read_band(&self, band_idx: usize) -> IoResult<RasterGrid> {
        use crate::error::IoError;

        if band_idx == 0 || band_idx > self.band_count {
            return Err(IoError::Parse {
                file: Default::default(),
                line: 0,
                message: format!("波段 {} 不存在 (共 {} 个)", band_idx, self.band_count),
            });
        }

        let band = self.dataset.rasterband(band_idx as isize)?;
        let nodata = band.no_data_value().unwrap_or(f64::NAN);

        let buffer = band.read_as::<f64>(
            (0, 0),
            (self.width, self.height),
            (self.width, self.height),
            None,
        )?;

        let mut grid = RasterGrid::from_data(
            buffer.data,
            self.width,
            self.height,
            nodata,
            self.geo_transform,
        )?;
        grid.projection = self.projection.clone();
        Ok(grid)
    }
}

/// 写出 Float32 GeoTIFF
///
/// 沿用栅格的地理变换与投影，无数据值写入波段元数据。
#[cfg(feature = "gdal")]
pub fn write_gtiff(grid: &RasterGrid, path: &Path) -> IoResult<()> {
    use gdal::raster::Buffer;
    use gdal::DriverManager;

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dataset = driver.create_with_band_type::<f32, _>(
        path,
        grid.width as isize,
        grid.height as isize,
        1,
    )?;

    dataset.set_geo_transform(&grid.geo_transform)?;
    if let Some(wkt) = &grid.projection {
        dataset.set_projection(wkt)?;
    }

    let mut band = dataset.rasterband(1)?;
    band.set_no_data_value(Some(grid.nodata))?;

    let data: Vec<f32> = grid.data.iter().map(|&v| v as f32).collect();
    let buffer = Buffer::new((grid.width, grid.height), data);
    band.write((0, 0), (grid.width, grid.height), &buffer)?;

    Ok(())
}

/// 无 GDAL 支持时的占位实现
#[cfg(not(feature = "gdal"))]
pub struct GdalDriver;

#[cfg(not(feature = "gdal"))]
impl GdalDriver {
    /// 打开栅格文件（无 GDAL 支持）
    pub fn open(_path: impl AsRef<Path>) -> IoResult<Self> {
        Err(crate::error::IoError::NotAvailable { feature: "gdal" })
    }

    /// 读取指定波段（无 GDAL 支持）
    pub fn read_band(&self, _band_idx: usize) -> IoResult<RasterGrid> {
        Err(crate::error::IoError::NotAvailable { feature: "gdal" })
    }
}

/// 写出 GeoTIFF（无 GDAL 支持）
#[cfg(not(feature = "gdal"))]
pub fn write_gtiff(_grid: &RasterGrid, _path: &Path) -> IoResult<()> {
    Err(crate::error::IoError::NotAvailable { feature: "gdal" })
}
