// crates/yh_io/src/merge.rs

//! 同分辨率瓦片镶嵌
//!
//! 将逐流域深度瓦片合并为一幅情景栅格：取所有瓦片范围的并集，
//! 以输出无数据值填充空隙，再按顺序粘贴非无数据像元（后粘贴的
//! 覆盖先粘贴的）。瓦片必须同分辨率且落在同一像元格网上；
//! 镶嵌不做重采样。
//!
//! 瓦片自身的无数据像元视为空隙。当哨兵值为 0 时，零深度与空隙
//! 在合并结果中不可区分——这是沿用的产出约定，配置独立哨兵可避免。

use crate::error::{IoError, IoResult};
use yh_foundation::error::YhError;
use yh_terrain::grid::RasterGrid;

/// 格网对齐容差（相对单个像元的比例）
const ALIGN_TOLERANCE: f64 = 1e-6;

/// 镶嵌瓦片
///
/// # 参数
///
/// - `tiles`: 待合并瓦片，按粘贴顺序
/// - `nodata_out`: 输出栅格的无数据/填充值
///
/// # 错误
///
/// 瓦片列表为空、分辨率不同或未落在同一格网上时返回错误。
pub fn mosaic(tiles: &[RasterGrid], nodata_out: f64) -> IoResult<RasterGrid> {
    let first = tiles
        .first()
        .ok_or_else(|| IoError::Grid(YhError::invalid_input("没有可合并的瓦片")))?;

    let (res_x, res_y) = first.resolution();

    // 并集范围
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for tile in tiles {
        let (rx, ry) = tile.resolution();
        if (rx - res_x).abs() > ALIGN_TOLERANCE * res_x
            || (ry - res_y).abs() > ALIGN_TOLERANCE * res_y
        {
            return Err(IoError::Grid(YhError::grid_mismatch(format!(
                "瓦片分辨率不同: ({}, {}) vs ({}, {})",
                rx, ry, res_x, res_y
            ))));
        }
        let (x0, y0, x1, y1) = tile.extent();
        min_x = min_x.min(x0);
        min_y = min_y.min(y0);
        max_x = max_x.max(x1);
        max_y = max_y.max(y1);
    }

    let width = ((max_x - min_x) / res_x).round() as usize;
    let height = ((max_y - min_y) / res_y).round() as usize;
    let geo_transform = [min_x, res_x, 0.0, max_y, 0.0, -res_y];

    let mut out = RasterGrid::new(width, height, nodata_out, geo_transform);
    out.projection = first.projection.clone();

    for tile in tiles {
        // 瓦片原点相对输出原点的像元偏移，必须为整数
        let col_f = (tile.geo_transform[0] - min_x) / res_x;
        let row_f = (max_y - tile.geo_transform[3]) / res_y;
        let col = col_f.round();
        let row = row_f.round();
        if (col_f - col).abs() > ALIGN_TOLERANCE || (row_f - row).abs() > ALIGN_TOLERANCE {
            return Err(IoError::Grid(YhError::grid_mismatch(format!(
                "瓦片未落在合并格网上: 偏移 ({:.6}, {:.6}) 像元",
                col_f, row_f
            ))));
        }
        let (col, row) = (col as usize, row as usize);

        for y in 0..tile.height {
            for x in 0..tile.width {
                let v = tile.data[y * tile.width + x];
                if tile.is_nodata(v) {
                    continue;
                }
                out.data[(row + y) * width + (col + x)] = v;
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x0: f64, y0: f64, values: Vec<f64>, w: usize, h: usize, nodata: f64) -> RasterGrid {
        RasterGrid::from_data(values, w, h, nodata, [x0, 30.0, 0.0, y0, 0.0, -30.0]).unwrap()
    }

    #[test]
    fn test_empty_tiles_rejected() {
        assert!(mosaic(&[], 0.0).is_err());
    }

    #[test]
    fn test_single_tile_identity() {
        let t = tile(0.0, 60.0, vec![1.0, 2.0, 3.0, 4.0], 2, 2, -9999.0);
        let merged = mosaic(&[t.clone()], -9999.0).unwrap();
        assert_eq!(merged.width, 2);
        assert_eq!(merged.height, 2);
        assert_eq!(merged.data, t.data);
        assert_eq!(merged.geo_transform, t.geo_transform);
    }

    #[test]
    fn test_disjoint_tiles_with_gap() {
        // 两块 1x1 瓦片，中间隔一个像元
        let a = tile(0.0, 30.0, vec![1.0], 1, 1, -9999.0);
        let b = tile(60.0, 30.0, vec![2.0], 1, 1, -9999.0);
        let merged = mosaic(&[a, b], 0.0).unwrap();

        assert_eq!(merged.width, 3);
        assert_eq!(merged.height, 1);
        assert_eq!(merged.data, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_overlap_later_tile_wins() {
        let a = tile(0.0, 30.0, vec![1.0, 1.0], 2, 1, -9999.0);
        let b = tile(30.0, 30.0, vec![2.0, 2.0], 2, 1, -9999.0);
        let merged = mosaic(&[a, b], 0.0).unwrap();

        assert_eq!(merged.width, 3);
        assert_eq!(merged.data, vec![1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_tile_nodata_is_gap() {
        // 瓦片里的无数据像元不覆盖底图
        let a = tile(0.0, 30.0, vec![1.0, 1.0], 2, 1, -9999.0);
        let b = tile(0.0, 30.0, vec![-9999.0, 5.0], 2, 1, -9999.0);
        let merged = mosaic(&[a, b], 0.0).unwrap();

        assert_eq!(merged.data, vec![1.0, 5.0]);
    }

    #[test]
    fn test_zero_sentinel_convention() {
        // 哨兵为 0 时：瓦片中的 0（无淹没）视为空隙，不参与覆盖
        let a = tile(0.0, 30.0, vec![3.0], 1, 1, 0.0);
        let b = tile(0.0, 30.0, vec![0.0], 1, 1, 0.0);
        let merged = mosaic(&[a, b], 0.0).unwrap();
        assert_eq!(merged.data, vec![3.0]);
    }

    #[test]
    fn test_misaligned_tile_rejected() {
        let a = tile(0.0, 30.0, vec![1.0], 1, 1, -9999.0);
        let b = tile(45.0, 30.0, vec![2.0], 1, 1, -9999.0);
        assert!(mosaic(&[a, b], 0.0).is_err());
    }

    #[test]
    fn test_different_resolution_rejected() {
        let a = tile(0.0, 30.0, vec![1.0], 1, 1, -9999.0);
        let b = RasterGrid::from_data(vec![2.0], 1, 1, -9999.0, [0.0, 10.0, 0.0, 10.0, 0.0, -10.0])
            .unwrap();
        assert!(mosaic(&[a, b], 0.0).is_err());
    }

    #[test]
    fn test_two_dimensional_offset() {
        // 2x2 输出：左上与右下各一块瓦片
        let a = tile(0.0, 60.0, vec![1.0], 1, 1, -9999.0);
        let b = tile(30.0, 30.0, vec![2.0], 1, 1, -9999.0);
        let merged = mosaic(&[a, b], 0.0).unwrap();

        assert_eq!(merged.width, 2);
        assert_eq!(merged.height, 2);
        assert_eq!(merged.data, vec![1.0, 0.0, 0.0, 2.0]);
    }
}
