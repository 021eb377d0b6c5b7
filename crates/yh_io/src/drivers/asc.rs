// crates/yh_io/src/drivers/asc.rs

//! ESRI ASCII 栅格驱动
//!
//! 纯 Rust 实现的 `.asc` 读写，作为无 GDAL 环境下的默认格式。
//! 头部为 `ncols/nrows/xllcorner/yllcorner/cellsize/NODATA_value`，
//! 数据按行优先、自北向南排列。该格式只支持方形像元，且不携带
//! 投影信息。

use crate::error::{IoError, IoResult};
use std::fmt::Write as _;
use std::path::Path;
use yh_terrain::grid::RasterGrid;

/// 缺省无数据值（头部未声明 NODATA_value 时）
const DEFAULT_NODATA: f64 = -9999.0;

/// 读取 ASC 栅格
pub fn read_asc(path: &Path) -> IoResult<RasterGrid> {
    if !path.exists() {
        return Err(IoError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_asc_string(&content, path)
}

/// 从字符串解析 ASC 栅格
pub fn parse_asc_string(content: &str, path: &Path) -> IoResult<RasterGrid> {
    let mut ncols: Option<usize> = None;
    let mut nrows: Option<usize> = None;
    let mut xllcorner: Option<f64> = None;
    let mut yllcorner: Option<f64> = None;
    let mut cellsize: Option<f64> = None;
    let mut nodata = DEFAULT_NODATA;

    let mut data: Vec<f64> = Vec::new();
    let mut in_header = true;

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if in_header {
            let mut parts = trimmed.split_whitespace();
            let key = parts.next().unwrap_or("").to_ascii_lowercase();
            let is_header_key = matches!(
                key.as_str(),
                "ncols" | "nrows" | "xllcorner" | "yllcorner" | "cellsize" | "nodata_value"
            );
            if is_header_key {
                let value = parts.next().ok_or_else(|| {
                    IoError::parse(path, line_num + 1, format!("头部项 {} 缺少值", key))
                })?;
                match key.as_str() {
                    "ncols" => ncols = Some(parse_usize(value, path, line_num)?),
                    "nrows" => nrows = Some(parse_usize(value, path, line_num)?),
                    "xllcorner" => xllcorner = Some(parse_f64(value, path, line_num)?),
                    "yllcorner" => yllcorner = Some(parse_f64(value, path, line_num)?),
                    "cellsize" => cellsize = Some(parse_f64(value, path, line_num)?),
                    "nodata_value" => nodata = parse_f64(value, path, line_num)?,
                    _ => unreachable!(),
                }
                continue;
            }
            in_header = false;
        }

        for token in trimmed.split_whitespace() {
            data.push(parse_f64(token, path, line_num)?);
        }
    }

    let ncols = ncols.ok_or_else(|| IoError::parse(path, 1, "头部缺少 ncols"))?;
    let nrows = nrows.ok_or_else(|| IoError::parse(path, 1, "头部缺少 nrows"))?;
    let xll = xllcorner.ok_or_else(|| IoError::parse(path, 1, "头部缺少 xllcorner"))?;
    let yll = yllcorner.ok_or_else(|| IoError::parse(path, 1, "头部缺少 yllcorner"))?;
    let cell = cellsize.ok_or_else(|| IoError::parse(path, 1, "头部缺少 cellsize"))?;

    if !(cell > 0.0) {
        return Err(IoError::parse(path, 1, format!("cellsize 必须为正: {}", cell)));
    }
    if data.len() != ncols * nrows {
        return Err(IoError::parse(
            path,
            1,
            format!("数据量不符: 期望 {}x{}={}, 实际 {}", ncols, nrows, ncols * nrows, data.len()),
        ));
    }

    // 左下角原点换算为左上角北朝上地理变换
    let geo_transform = [xll, cell, 0.0, yll + nrows as f64 * cell, 0.0, -cell];

    RasterGrid::from_data(data, ncols, nrows, nodata, geo_transform).map_err(IoError::Grid)
}

/// 写出 ASC 栅格
///
/// 仅支持方形像元、无旋转的北朝上栅格。投影信息（若有）会被丢弃，
/// 记录一条警告。
pub fn write_asc(grid: &RasterGrid, path: &Path) -> IoResult<()> {
    let content = format_asc_string(grid)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// 将栅格编码为 ASC 文本
pub fn format_asc_string(grid: &RasterGrid) -> IoResult<String> {
    let (rx, ry) = grid.resolution();
    if (rx - ry).abs() > 1e-9 * rx {
        return Err(IoError::UnsupportedFormat {
            format: format!("非方形像元 ({}, {})", rx, ry),
            supported: vec!["方形像元 ASC".to_string()],
        });
    }
    if grid.geo_transform[2] != 0.0 || grid.geo_transform[4] != 0.0 {
        return Err(IoError::UnsupportedFormat {
            format: "带旋转的地理变换".to_string(),
            supported: vec!["北朝上栅格".to_string()],
        });
    }
    if grid.projection.is_some() {
        log::warn!("ASC 格式不携带投影信息，输出将丢弃投影 WKT");
    }

    let yll = grid.geo_transform[3] + grid.height as f64 * grid.geo_transform[5];

    let mut out = String::new();
    let _ = writeln!(out, "ncols {}", grid.width);
    let _ = writeln!(out, "nrows {}", grid.height);
    let _ = writeln!(out, "xllcorner {}", grid.geo_transform[0]);
    let _ = writeln!(out, "yllcorner {}", yll);
    let _ = writeln!(out, "cellsize {}", rx);
    let _ = writeln!(out, "NODATA_value {}", grid.nodata);

    for row in grid.data.chunks(grid.width) {
        let mut first = true;
        for v in row {
            if !first {
                out.push(' ');
            }
            let _ = write!(out, "{}", v);
            first = false;
        }
        out.push('\n');
    }

    Ok(out)
}

fn parse_usize(token: &str, path: &Path, line_num: usize) -> IoResult<usize> {
    token
        .parse::<usize>()
        .map_err(|_| IoError::parse(path, line_num + 1, format!("无法解析整数: {}", token)))
}

fn parse_f64(token: &str, path: &Path, line_num: usize) -> IoResult<f64> {
    token
        .parse::<f64>()
        .map_err(|_| IoError::parse(path, line_num + 1, format!("无法解析数值: {}", token)))
}
