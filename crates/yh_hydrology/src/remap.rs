// crates/yh_hydrology/src/remap.rs

//! 土地利用代码 → CN 值映射
//!
//! 将土地利用分类代码按有序规则表映射为 CN 值，未匹配的代码使用
//! 默认 CN。规则按声明顺序匹配，第一条命中的规则生效；
//! [`CnMapping::validate`] 要求各规则的代码集合互不重叠，
//! 避免结果依赖规则顺序。
//!
//! 默认规则表来自北京六区多情景项目的合作方系数
//! （原系数乘以 100 以适配 SCS 模型）。

use crate::error::{HydroError, HydroResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 单条映射规则：代码集合 → CN 值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CnRule {
    /// 土地利用分类代码列表
    pub codes: Vec<u32>,
    /// 对应的 CN 值
    pub cn: f64,
}

/// 土地利用 → CN 映射表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CnMapping {
    /// 有序规则表，第一条命中的规则生效
    pub rules: Vec<CnRule>,
    /// 未匹配代码的默认 CN 值
    #[serde(default = "default_cn")]
    pub default_cn: f64,
}

fn default_cn() -> f64 {
    50.0
}

impl Default for CnMapping {
    /// 北京六区项目的映射表：
    /// 代码 1-4 → 15，5 → 100，7 → 30，8 → 85，默认 50
    fn default() -> Self {
        Self {
            rules: vec![
                CnRule {
                    codes: vec![1, 2, 3, 4],
                    cn: 15.0,
                },
                CnRule {
                    codes: vec![5],
                    cn: 100.0,
                },
                CnRule {
                    codes: vec![7],
                    cn: 30.0,
                },
                CnRule {
                    codes: vec![8],
                    cn: 85.0,
                },
            ],
            default_cn: default_cn(),
        }
    }
}

impl CnMapping {
    /// 校验映射表
    ///
    /// - 各规则 CN 与默认 CN 必须在 (0, 100] 内
    /// - 规则的代码集合互不重叠（保证映射与规则顺序无关）
    /// - 规则不得为空代码集合
    pub fn validate(&self) -> HydroResult<()> {
        let mut seen: HashSet<u32> = HashSet::new();
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.codes.is_empty() {
                return Err(HydroError::InvalidMapping {
                    message: format!("规则{}的代码集合为空", i),
                });
            }
            if !(rule.cn > 0.0 && rule.cn <= 100.0) {
                return Err(HydroError::InvalidMapping {
                    message: format!("规则{}的CN值{}超出(0, 100]", i, rule.cn),
                });
            }
            for &code in &rule.codes {
                if !seen.insert(code) {
                    return Err(HydroError::InvalidMapping {
                        message: format!("代码{}出现在多条规则中", code),
                    });
                }
            }
        }
        if !(self.default_cn > 0.0 && self.default_cn <= 100.0) {
            return Err(HydroError::InvalidMapping {
                message: format!("默认CN值{}超出(0, 100]", self.default_cn),
            });
        }
        Ok(())
    }

    /// 查询单个代码对应的 CN 值
    ///
    /// 第一条命中的规则生效；未匹配返回默认 CN。
    pub fn lookup(&self, code: u32) -> f64 {
        for rule in &self.rules {
            if rule.codes.contains(&code) {
                return rule.cn;
            }
        }
        self.default_cn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping_table() {
        let mapping = CnMapping::default();
        assert!(mapping.validate().is_ok());

        assert_eq!(mapping.lookup(1), 15.0);
        assert_eq!(mapping.lookup(4), 15.0);
        assert_eq!(mapping.lookup(5), 100.0);
        assert_eq!(mapping.lookup(7), 30.0);
        assert_eq!(mapping.lookup(8), 85.0);
        // 未定义的代码走默认值
        assert_eq!(mapping.lookup(6), 50.0);
        assert_eq!(mapping.lookup(99), 50.0);
    }

    #[test]
    fn test_overlapping_codes_rejected() {
        let mapping = CnMapping {
            rules: vec![
                CnRule {
                    codes: vec![1, 2],
                    cn: 15.0,
                },
                CnRule {
                    codes: vec![2, 3],
                    cn: 85.0,
                },
            ],
            default_cn: 50.0,
        };
        assert!(matches!(
            mapping.validate(),
            Err(HydroError::InvalidMapping { .. })
        ));
    }

    #[test]
    fn test_invalid_cn_rejected() {
        let mapping = CnMapping {
            rules: vec![CnRule {
                codes: vec![1],
                cn: 120.0,
            }],
            default_cn: 50.0,
        };
        assert!(mapping.validate().is_err());

        let mapping = CnMapping {
            rules: vec![],
            default_cn: 0.0,
        };
        assert!(mapping.validate().is_err());
    }

    #[test]
    fn test_empty_rule_rejected() {
        let mapping = CnMapping {
            rules: vec![CnRule {
                codes: vec![],
                cn: 50.0,
            }],
            default_cn: 50.0,
        };
        assert!(mapping.validate().is_err());
    }

    #[test]
    fn test_first_rule_wins() {
        // validate 会拒绝重叠，但 lookup 本身按顺序匹配
        let mapping = CnMapping {
            rules: vec![
                CnRule {
                    codes: vec![7],
                    cn: 30.0,
                },
                CnRule {
                    codes: vec![7],
                    cn: 90.0,
                },
            ],
            default_cn: 50.0,
        };
        assert_eq!(mapping.lookup(7), 30.0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mapping = CnMapping::default();
        let json = serde_json::to_string(&mapping).unwrap();
        let parsed: CnMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.rules.len(), mapping.rules.len());
        assert_eq!(parsed.default_cn, mapping.default_cn);
        assert_eq!(parsed.lookup(5), 100.0);
    }
}
