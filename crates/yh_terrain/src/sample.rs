// crates/yh_terrain/src/sample.rs

//! 流域有效样本提取
//!
//! 从逐像元对应的 DEM 与土地利用栅格中提取有效样本：
//! 有效像元 = DEM 有值 且 土地利用代码非零。提取结果持有每个有效
//! 像元的高程、CN 值和平铺索引，供求解器与深度栅格回写使用。

use crate::grid::RasterGrid;
use yh_foundation::error::{YhError, YhResult};
use yh_foundation::numerics::mean;
use yh_hydrology::remap::CnMapping;

/// 流域有效样本
///
/// 一次性构建后只读，生命周期不超过单个（流域, 情景）求值。
#[derive(Debug, Clone)]
pub struct WatershedSample {
    /// 有效像元高程
    pub elevations: Vec<f64>,
    /// 有效像元 CN 值（与 `elevations` 对应）
    pub cn_values: Vec<f64>,
    /// 有效像元在源栅格中的平铺索引（与 `elevations` 对应）
    pub indices: Vec<usize>,
    /// 单个像元平面面积 [m^2]
    pub cell_area: f64,
}

impl WatershedSample {
    /// 从 DEM 与土地利用栅格提取有效样本
    ///
    /// 两栅格必须逐像元对应（形状、分辨率、原点一致），
    /// 否则返回 [`YhError::GridMismatch`]。
    pub fn extract(
        dem: &RasterGrid,
        landuse: &RasterGrid,
        mapping: &CnMapping,
    ) -> YhResult<Self> {
        dem.check_congruent(landuse)?;

        let n = dem.data.len();
        let mut elevations = Vec::new();
        let mut cn_values = Vec::new();
        let mut indices = Vec::new();

        for i in 0..n {
            let z = dem.data[i];
            if dem.is_nodata(z) {
                continue;
            }
            let lu = landuse.data[i];
            if landuse.is_nodata(lu) || !(lu > 0.0) {
                continue;
            }
            let code = lu.round() as u32;
            elevations.push(z);
            cn_values.push(mapping.lookup(code));
            indices.push(i);
        }

        Ok(Self {
            elevations,
            cn_values,
            indices,
            cell_area: dem.pixel_area(),
        })
    }

    /// 有效像元数量
    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    /// 是否没有任何有效像元
    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    /// 汇水面积（有效像元数 × 像元面积）[m^2]
    pub fn area(&self) -> f64 {
        self.len() as f64 * self.cell_area
    }

    /// 流域平均 CN 值
    ///
    /// 空样本是前置条件违例。
    pub fn mean_cn(&self) -> YhResult<f64> {
        mean(&self.cn_values)
            .ok_or_else(|| YhError::invalid_input("样本为空，无法计算平均CN"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gt() -> [f64; 6] {
        [0.0, 30.0, 0.0, 90.0, 0.0, -30.0]
    }

    /// 3x3 DEM：一个 nodata 角，其余 1..=8
    fn dem() -> RasterGrid {
        RasterGrid::from_data(
            vec![-9999.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
            3,
            3,
            -9999.0,
            gt(),
        )
        .unwrap()
    }

    /// 3x3 土地利用：最后一个像元代码 0（无效），其余代码 5
    fn landuse() -> RasterGrid {
        RasterGrid::from_data(
            vec![5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 0.0],
            3,
            3,
            0.0,
            gt(),
        )
        .unwrap()
    }

    #[test]
    fn test_extract_filters_both_masks() {
        let sample = WatershedSample::extract(&dem(), &landuse(), &CnMapping::default()).unwrap();
        // 9 个像元里去掉 DEM nodata 一个、土地利用 0 一个
        assert_eq!(sample.len(), 7);
        assert_eq!(sample.elevations, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(sample.indices, vec![1, 2, 3, 4, 5, 6, 7]);
        // 代码 5 => CN 100
        assert!(sample.cn_values.iter().all(|&cn| cn == 100.0));
        assert_eq!(sample.cell_area, 900.0);
    }

    #[test]
    fn test_area_and_mean_cn() {
        let sample = WatershedSample::extract(&dem(), &landuse(), &CnMapping::default()).unwrap();
        assert_relative_eq!(sample.area(), 7.0 * 900.0, max_relative = 1e-12);
        assert_relative_eq!(sample.mean_cn().unwrap(), 100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_mixed_codes_mean() {
        let dem = RasterGrid::from_data(vec![1.0, 2.0], 2, 1, -9999.0, gt()).unwrap();
        // 代码 5 => 100，代码 7 => 30
        let lu = RasterGrid::from_data(vec![5.0, 7.0], 2, 1, 0.0, gt()).unwrap();
        let sample = WatershedSample::extract(&dem, &lu, &CnMapping::default()).unwrap();
        assert_relative_eq!(sample.mean_cn().unwrap(), 65.0, max_relative = 1e-12);
    }

    #[test]
    fn test_all_invalid_gives_empty_sample() {
        let dem = RasterGrid::from_data(vec![-9999.0, -9999.0], 2, 1, -9999.0, gt()).unwrap();
        let lu = RasterGrid::from_data(vec![5.0, 5.0], 2, 1, 0.0, gt()).unwrap();
        let sample = WatershedSample::extract(&dem, &lu, &CnMapping::default()).unwrap();
        assert!(sample.is_empty());
        assert!(sample.mean_cn().is_err());
    }

    #[test]
    fn test_incongruent_grids_rejected() {
        let dem = RasterGrid::new(3, 3, -9999.0, gt());
        let lu = RasterGrid::new(2, 3, 0.0, gt());
        assert!(WatershedSample::extract(&dem, &lu, &CnMapping::default()).is_err());
    }
}
