// crates/yh_terrain/src/grid.rs

//! 栅格数据管理
//!
//! 提供带地理变换的栅格数据存储和访问。地理变换采用六参数形式
//! `[x_origin, x_res, x_rot, y_origin, y_rot, y_res]`，本项目只处理
//! 无旋转的北朝上栅格（x_rot = y_rot = 0，y_res 为负）。

use yh_foundation::error::{YhError, YhResult};

/// 对齐判断容差（相对单个像元的比例）
const ALIGN_TOLERANCE: f64 = 1e-6;

/// 栅格数据
#[derive(Debug, Clone)]
pub struct RasterGrid {
    /// 行优先数据
    pub data: Vec<f64>,
    /// 宽度（列数）
    pub width: usize,
    /// 高度（行数）
    pub height: usize,
    /// 无数据值
    pub nodata: f64,
    /// 地理变换参数 [x_origin, x_res, x_rot, y_origin, y_rot, y_res]
    pub geo_transform: [f64; 6],
    /// 投影 WKT（ASC 格式无投影信息时为 None）
    pub projection: Option<String>,
}

impl RasterGrid {
    /// 创建填充无数据值的栅格
    pub fn new(width: usize, height: usize, nodata: f64, geo_transform: [f64; 6]) -> Self {
        Self {
            data: vec![nodata; width * height],
            width,
            height,
            nodata,
            geo_transform,
            projection: None,
        }
    }

    /// 从数据创建
    pub fn from_data(
        data: Vec<f64>,
        width: usize,
        height: usize,
        nodata: f64,
        geo_transform: [f64; 6],
    ) -> YhResult<Self> {
        YhError::check_size("raster data", width * height, data.len())?;
        Ok(Self {
            data,
            width,
            height,
            nodata,
            geo_transform,
            projection: None,
        })
    }

    /// 附加投影 WKT
    pub fn with_projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = Some(projection.into());
        self
    }

    /// 获取像素值
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// 设置像素值
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// 判断是否为无数据
    #[inline]
    pub fn is_nodata(&self, value: f64) -> bool {
        value.is_nan() || (self.nodata.is_finite() && (value - self.nodata).abs() < 1e-10)
    }

    /// 获取像素分辨率 (x, y)，恒为正
    pub fn resolution(&self) -> (f64, f64) {
        (self.geo_transform[1].abs(), self.geo_transform[5].abs())
    }

    /// 单个像元的平面面积
    pub fn pixel_area(&self) -> f64 {
        (self.geo_transform[1] * self.geo_transform[5]).abs()
    }

    /// 获取地理范围 (min_x, min_y, max_x, max_y)
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        let x0 = self.geo_transform[0];
        let y0 = self.geo_transform[3];
        let x1 = x0 + self.width as f64 * self.geo_transform[1];
        let y1 = y0 + self.height as f64 * self.geo_transform[5];

        (x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// 检查与另一栅格形状、分辨率与原点完全一致
    ///
    /// 提取样本前的前置条件：两栅格必须逐像元对应。
    pub fn check_congruent(&self, other: &RasterGrid) -> YhResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(YhError::grid_mismatch(format!(
                "形状不同: {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        self.check_same_resolution(other)?;
        let (dx, dy) = self.origin_offset(other);
        if dx.abs() > ALIGN_TOLERANCE || dy.abs() > ALIGN_TOLERANCE {
            return Err(YhError::grid_mismatch(format!(
                "原点未对齐: 偏移 ({:.2e}, {:.2e}) 像元",
                dx, dy
            )));
        }
        Ok(())
    }

    /// 提取与 `target` 范围对应的子栅格
    ///
    /// 要求两栅格分辨率相同且像元对齐；不做任何重采样或重投影，
    /// 不满足前提时返回 [`YhError::GridMismatch`]。
    pub fn window_of(&self, target: &RasterGrid) -> YhResult<RasterGrid> {
        self.check_same_resolution(target)?;

        let (col_f, row_f) = self.origin_offset(target);
        let col = col_f.round();
        let row = row_f.round();
        if (col_f - col).abs() > ALIGN_TOLERANCE || (row_f - row).abs() > ALIGN_TOLERANCE {
            return Err(YhError::grid_mismatch(format!(
                "像元未对齐: 偏移 ({:.6}, {:.6}) 像元，无法按窗口提取",
                col_f, row_f
            )));
        }
        if col < 0.0 || row < 0.0 {
            return Err(YhError::grid_mismatch(format!(
                "目标范围超出源栅格: 起始偏移 ({}, {})",
                col, row
            )));
        }
        let (col, row) = (col as usize, row as usize);
        if col + target.width > self.width || row + target.height > self.height {
            return Err(YhError::grid_mismatch(format!(
                "目标范围超出源栅格: {}x{} 窗口起于 ({}, {})，源为 {}x{}",
                target.width, target.height, col, row, self.width, self.height
            )));
        }

        let mut data = Vec::with_capacity(target.width * target.height);
        for r in 0..target.height {
            let start = (row + r) * self.width + col;
            data.extend_from_slice(&self.data[start..start + target.width]);
        }

        Ok(RasterGrid {
            data,
            width: target.width,
            height: target.height,
            nodata: self.nodata,
            geo_transform: target.geo_transform,
            projection: self.projection.clone(),
        })
    }

    /// `other` 原点相对本栅格原点的像元偏移
    fn origin_offset(&self, other: &RasterGrid) -> (f64, f64) {
        let dx = (other.geo_transform[0] - self.geo_transform[0]) / self.geo_transform[1];
        let dy = (other.geo_transform[3] - self.geo_transform[3]) / self.geo_transform[5];
        (dx, dy)
    }

    fn check_same_resolution(&self, other: &RasterGrid) -> YhResult<()> {
        let (rx, ry) = self.resolution();
        let (ox, oy) = other.resolution();
        if (rx - ox).abs() > ALIGN_TOLERANCE * rx || (ry - oy).abs() > ALIGN_TOLERANCE * ry {
            return Err(YhError::grid_mismatch(format!(
                "分辨率不同: ({}, {}) vs ({}, {})",
                rx, ry, ox, oy
            )));
        }
        Ok(())
    }
}
