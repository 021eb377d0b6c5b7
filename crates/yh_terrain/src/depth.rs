// crates/yh_terrain/src/depth.rs

//! 淹没深度栅格构建
//!
//! 用收敛的水面高程减去有效像元高程得到逐像元淹没深度，
//! 负值截断为零；无效像元写入哨兵值。
//!
//! 哨兵值默认 0（与原始产出约定一致），但 0 同时意味着"无淹没"，
//! 当真实深度接近零时两种含义会在合并结果中混淆；配置可选用
//! 独立哨兵（如 -9999）区分。

use crate::grid::RasterGrid;
use crate::sample::WatershedSample;

/// 构建与 DEM 瓦片同构的淹没深度栅格
///
/// - 有效像元: `max(surface - z, 0)`
/// - 无效像元: `sentinel`
///
/// 结果沿用 DEM 的形状与地理变换，`nodata` 置为哨兵值。
pub fn build_depth_grid(
    dem: &RasterGrid,
    sample: &WatershedSample,
    surface: f64,
    sentinel: f64,
) -> RasterGrid {
    let mut grid = RasterGrid::new(dem.width, dem.height, sentinel, dem.geo_transform);
    grid.projection = dem.projection.clone();

    for (&idx, &z) in sample.indices.iter().zip(&sample.elevations) {
        grid.data[idx] = (surface - z).max(0.0);
    }

    grid
}

/// 统计深度大于零的像元数
pub fn flooded_cells(grid: &RasterGrid) -> usize {
    grid.data
        .iter()
        .filter(|&&v| !grid.is_nodata(v) && v > 0.0)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::WatershedSample;
    use approx::assert_relative_eq;
    use yh_hydrology::remap::CnMapping;

    fn gt() -> [f64; 6] {
        [0.0, 30.0, 0.0, 60.0, 0.0, -30.0]
    }

    fn make_sample() -> (RasterGrid, WatershedSample) {
        // 2x2: 一个 nodata，高程 10/20/30
        let dem =
            RasterGrid::from_data(vec![-9999.0, 10.0, 20.0, 30.0], 2, 2, -9999.0, gt()).unwrap();
        let lu = RasterGrid::from_data(vec![5.0, 5.0, 5.0, 5.0], 2, 2, 0.0, gt()).unwrap();
        let sample = WatershedSample::extract(&dem, &lu, &CnMapping::default()).unwrap();
        (dem, sample)
    }

    #[test]
    fn test_depth_clips_negative_to_zero() {
        let (dem, sample) = make_sample();
        let grid = build_depth_grid(&dem, &sample, 25.0, 0.0);

        // nodata 像元 => 哨兵 0
        assert_eq!(grid.data[0], 0.0);
        // 高程 10 => 深度 15；高程 20 => 5；高程 30 在水面之上 => 0
        assert_relative_eq!(grid.data[1], 15.0, max_relative = 1e-12);
        assert_relative_eq!(grid.data[2], 5.0, max_relative = 1e-12);
        assert_eq!(grid.data[3], 0.0);
    }

    #[test]
    fn test_distinct_sentinel() {
        let (dem, sample) = make_sample();
        let grid = build_depth_grid(&dem, &sample, 25.0, -9999.0);

        // 无效像元拿哨兵，干的有效像元保留有意义的 0
        assert_eq!(grid.data[0], -9999.0);
        assert_eq!(grid.data[3], 0.0);
        assert_eq!(grid.nodata, -9999.0);
    }

    #[test]
    fn test_geo_transform_preserved() {
        let (dem, sample) = make_sample();
        let grid = build_depth_grid(&dem, &sample, 25.0, 0.0);
        assert_eq!(grid.geo_transform, dem.geo_transform);
        assert_eq!(grid.width, dem.width);
        assert_eq!(grid.height, dem.height);
    }

    #[test]
    fn test_flooded_cells() {
        let (dem, sample) = make_sample();
        let grid = build_depth_grid(&dem, &sample, 25.0, 0.0);
        assert_eq!(flooded_cells(&grid), 2);

        let dry = build_depth_grid(&dem, &sample, 5.0, 0.0);
        assert_eq!(flooded_cells(&dry), 0);
    }
}
