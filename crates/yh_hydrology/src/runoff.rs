// crates/yh_hydrology/src/runoff.rs

//! SCS-CN 径流体积模型
//!
//! 根据降雨深度、流域平均 CN 值和汇水面积计算总径流体积。
//! 采用公制 SCS-CN 公式：
//!
//! ```text
//! S  = 25400 / CN - 254        最大潜在滞留量 [mm]
//! Ia = 0.2 * S                 初损 [mm]
//! Q  = (P - Ia)^2 / (P - Ia + S)   当 P > Ia，否则 Q = 0
//! V  = Q / 1000 * A            径流体积 [m^3]
//! ```
//!
//! CN 值超出 (10, 100] 视为不可靠，此时返回零体积而不是报错，
//! 对应流域在该情景下不产生淹没。上边界采用"CN > 100 才拒绝"：
//! CN = 100 物理上有意义（S = 0，降雨全部转为径流），予以接受。

/// CN 下界，低于等于此值视为不可靠
pub const CN_MIN_VALID: f64 = 10.0;

/// CN 上界，高于此值视为不可靠（恰好 100 合法）
pub const CN_MAX_VALID: f64 = 100.0;

/// 公制滞留量公式分子 [mm]
const RETENTION_NUMERATOR_MM: f64 = 25400.0;

/// 公制滞留量公式偏移 [mm]
const RETENTION_OFFSET_MM: f64 = 254.0;

/// 初损比例 Ia = 0.2 * S
const INITIAL_ABSTRACTION_RATIO: f64 = 0.2;

/// CN 值是否处于模型有效区间 (10, 100]
///
/// NaN 返回 false。
#[inline]
pub fn cn_is_valid(cn: f64) -> bool {
    cn > CN_MIN_VALID && cn <= CN_MAX_VALID
}

/// 最大潜在滞留量 S [mm]
///
/// 仅对有效 CN 调用；CN = 100 时为 0。
#[inline]
pub fn potential_retention(cn: f64) -> f64 {
    RETENTION_NUMERATOR_MM / cn - RETENTION_OFFSET_MM
}

/// SCS-CN 径流深度 [mm]
///
/// CN 超出有效区间或 P 不超过初损时返回 0。
pub fn runoff_depth_mm(rainfall_mm: f64, avg_cn: f64) -> f64 {
    if !cn_is_valid(avg_cn) {
        return 0.0;
    }
    let s = potential_retention(avg_cn);
    let ia = INITIAL_ABSTRACTION_RATIO * s;
    if rainfall_mm <= ia {
        return 0.0;
    }
    let excess = rainfall_mm - ia;
    excess * excess / (excess + s)
}

/// 总径流体积 [m^3]
///
/// # 参数
///
/// - `rainfall_mm`: 情景降雨深度 [mm]
/// - `avg_cn`: 流域平均 CN 值
/// - `area_m2`: 汇水面积（有效像元数 × 像元面积）[m^2]
///
/// # 返回
///
/// 非负的径流体积。CN 不可靠时恒为 0，调用方不会看到错误。
pub fn runoff_volume(rainfall_mm: f64, avg_cn: f64, area_m2: f64) -> f64 {
    runoff_depth_mm(rainfall_mm, avg_cn) / 1000.0 * area_m2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degenerate_cn_returns_zero() {
        for cn in [0.0, 5.0, 10.0, 100.1, 150.0, -20.0, f64::NAN] {
            assert_eq!(runoff_volume(230.0, cn, 1.0e6), 0.0, "cn={}", cn);
        }
    }

    #[test]
    fn test_cn_boundary_100_accepted() {
        // CN = 100 => S = 0, Ia = 0, Q = P
        assert_relative_eq!(runoff_depth_mm(50.0, 100.0), 50.0, max_relative = 1e-12);
    }

    #[test]
    fn test_rainfall_below_initial_abstraction() {
        // CN = 70 => S ≈ 108.857, Ia ≈ 21.771
        let ia = INITIAL_ABSTRACTION_RATIO * potential_retention(70.0);
        assert_eq!(runoff_depth_mm(ia, 70.0), 0.0);
        assert_eq!(runoff_depth_mm(ia - 1.0, 70.0), 0.0);
        assert!(runoff_depth_mm(ia + 1.0, 70.0) > 0.0);
    }

    #[test]
    fn test_zero_rainfall() {
        assert_eq!(runoff_volume(0.0, 70.0, 1.0e6), 0.0);
    }

    #[test]
    fn test_reference_case_beijing_100yr() {
        // P=230mm, CN=70, 面积 1 km²:
        // S = 25400/70 - 254 = 108.8571...
        // Ia = 21.7714...
        // Q = 208.2286^2 / 317.0857 = 136.74mm
        // V = 136.74/1000 * 1e6 ≈ 136 743 m³
        let vol = runoff_volume(230.0, 70.0, 1.0e6);
        assert_relative_eq!(vol, 136_743.0, max_relative = 5e-3);
    }

    #[test]
    fn test_monotone_in_rainfall() {
        let mut prev = 0.0;
        for p in 0..500 {
            let q = runoff_depth_mm(p as f64, 70.0);
            assert!(q >= prev, "P={} 处径流深度下降", p);
            prev = q;
        }
    }

    #[test]
    fn test_volume_scales_with_area() {
        let v1 = runoff_volume(230.0, 70.0, 1.0e6);
        let v2 = runoff_volume(230.0, 70.0, 2.0e6);
        assert_relative_eq!(v2, 2.0 * v1, max_relative = 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let a = runoff_volume(297.343, 62.5, 3.7e7);
        let b = runoff_volume(297.343, 62.5, 3.7e7);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
