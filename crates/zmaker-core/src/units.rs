//! 单位系统
//!
//! 单位换算表是一张对称的两两比例表，以毫米为基准单位：
//! - 首次使用时写入已知的基准换算（厘米、米、英寸、英尺），正反两个方向同时写入；
//! - 其余单位对在首次查询时经由基准单位推导，并连同倒数一起缓存。
//!
//! 表只增不改。`UnitConverter` 用互斥锁保护内部表，进程级默认实例由 `OnceLock` 惰性创建，
//! 测试可以各自构造独立实例。

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 绘图单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    /// 毫米（基准单位）
    #[serde(rename = "mm")]
    Millimeter,
    /// 厘米
    #[serde(rename = "cm")]
    Centimeter,
    /// 米
    #[serde(rename = "m")]
    Meter,
    /// 英寸
    #[serde(rename = "inch")]
    Inch,
    /// 英尺
    #[serde(rename = "foot")]
    Foot,
}

impl UnitType {
    /// 全部单位
    pub const ALL: [UnitType; 5] = [
        UnitType::Millimeter,
        UnitType::Centimeter,
        UnitType::Meter,
        UnitType::Inch,
        UnitType::Foot,
    ];

    /// 换算的基准单位
    pub const BASE: UnitType = UnitType::Millimeter;

    /// 单位标签
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Millimeter => "mm",
            UnitType::Centimeter => "cm",
            UnitType::Meter => "m",
            UnitType::Inch => "inch",
            UnitType::Foot => "foot",
        }
    }

    /// 获取单位名称
    pub fn name(&self) -> &'static str {
        match self {
            UnitType::Millimeter => "Millimeter",
            UnitType::Centimeter => "Centimeter",
            UnitType::Meter => "Meter",
            UnitType::Inch => "Inch",
            UnitType::Foot => "Foot",
        }
    }

    /// 是否是公制单位
    pub fn is_metric(&self) -> bool {
        matches!(
            self,
            UnitType::Millimeter | UnitType::Centimeter | UnitType::Meter
        )
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(UnitType::Millimeter),
            "cm" => Ok(UnitType::Centimeter),
            "m" => Ok(UnitType::Meter),
            "inch" => Ok(UnitType::Inch),
            "foot" => Ok(UnitType::Foot),
            other => Err(CoreError::UnknownUnit(other.to_string())),
        }
    }
}

type Table = HashMap<UnitType, HashMap<UnitType, f64>>;

/// 单位换算表
#[derive(Debug, Default)]
pub struct UnitConverter {
    table: Mutex<Option<Table>>,
}

impl UnitConverter {
    /// 创建空的换算表，首次查询时才填充
    pub fn new() -> Self {
        Self::default()
    }

    /// 进程级默认实例
    pub fn global() -> &'static UnitConverter {
        static CONVERTER: OnceLock<UnitConverter> = OnceLock::new();
        CONVERTER.get_or_init(UnitConverter::new)
    }

    /// 源单位到目标单位的换算比例：`值(目标) = 值(源) × 比例`
    pub fn conversion_scale(&self, src: UnitType, dest: UnitType) -> f64 {
        if src == dest {
            return 1.0;
        }

        // 表只增不改，锁中毒时内容仍然有效
        let mut guard = self.table.lock().unwrap_or_else(|e| e.into_inner());
        let table = guard.get_or_insert_with(init_table);

        if let Some(value) = lookup(table, src, dest) {
            return value;
        }

        let base = UnitType::BASE;
        let (Some(to_base), Some(from_base)) = (lookup(table, src, base), lookup(table, base, dest)) else {
            unreachable!("每个单位都应在初始化时写入与 {} 的换算", base);
        };
        let value = to_base * from_base;
        tracing::debug!("缓存单位换算 {} -> {}: {}", src, dest, value);
        add_conversion(table, src, dest, value);
        value
    }

    /// 换算一个数值
    pub fn convert(&self, value: f64, src: UnitType, dest: UnitType) -> f64 {
        value * self.conversion_scale(src, dest)
    }

    /// 当前已缓存的有向单位对数量
    pub fn cached_pairs(&self) -> usize {
        let guard = self.table.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .as_ref()
            .map(|table| table.values().map(HashMap::len).sum())
            .unwrap_or(0)
    }
}

fn lookup(table: &Table, src: UnitType, dest: UnitType) -> Option<f64> {
    table.get(&src).and_then(|row| row.get(&dest)).copied()
}

/// 写入一个换算比例及其倒数
fn add_conversion(table: &mut Table, src: UnitType, dest: UnitType, value: f64) {
    table.entry(src).or_default().insert(dest, value);
    table.entry(dest).or_default().insert(src, 1.0 / value);
}

/// 写入已知的基准换算
fn init_table() -> Table {
    let mut table = Table::new();
    let base = UnitType::BASE;
    add_conversion(&mut table, UnitType::Centimeter, base, 10.0);
    add_conversion(&mut table, UnitType::Meter, base, 1000.0);
    add_conversion(&mut table, UnitType::Inch, base, 25.4);
    add_conversion(&mut table, UnitType::Foot, base, 25.4 * 12.0);
    tracing::debug!("初始化单位换算表");
    table
}

/// 使用进程级默认换算表获取换算比例
pub fn conversion_scale(src: UnitType, dest: UnitType) -> f64 {
    UnitConverter::global().conversion_scale(src, dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_unit_tags() {
        for unit in UnitType::ALL {
            assert_eq!(unit.as_str().parse::<UnitType>().unwrap(), unit);
            let json = serde_json::to_string(&unit).unwrap();
            assert_eq!(json, format!("\"{}\"", unit.as_str()));
        }
        assert!(matches!("yard".parse::<UnitType>(), Err(CoreError::UnknownUnit(_))));
    }

    #[test]
    fn test_base_conversions() {
        let converter = UnitConverter::new();
        assert!(close(converter.conversion_scale(UnitType::Inch, UnitType::Millimeter), 25.4));
        assert!(close(converter.conversion_scale(UnitType::Millimeter, UnitType::Meter), 0.001));
        assert!(close(converter.conversion_scale(UnitType::Foot, UnitType::Inch), 12.0));
        assert!(close(converter.convert(3.0, UnitType::Meter, UnitType::Centimeter), 300.0));
        assert_eq!(converter.conversion_scale(UnitType::Inch, UnitType::Inch), 1.0);
    }

    #[test]
    fn test_lazy_init_and_memoization() {
        let converter = UnitConverter::new();
        assert_eq!(converter.cached_pairs(), 0);

        converter.conversion_scale(UnitType::Inch, UnitType::Millimeter);
        assert_eq!(converter.cached_pairs(), 8);

        converter.conversion_scale(UnitType::Inch, UnitType::Centimeter);
        assert_eq!(converter.cached_pairs(), 10);

        // 反方向已缓存
        converter.conversion_scale(UnitType::Centimeter, UnitType::Inch);
        assert_eq!(converter.cached_pairs(), 10);
    }

    #[test]
    fn test_inverse_pairs() {
        let converter = UnitConverter::new();
        for a in UnitType::ALL {
            for b in UnitType::ALL {
                let ab = converter.conversion_scale(a, b);
                let ba = converter.conversion_scale(b, a);
                assert!(close(ab * ba, 1.0), "{} <-> {}", a, b);
                assert!(close(ab, 1.0 / ba), "{} <-> {}", a, b);
            }
        }
    }

    #[test]
    fn test_transitive_triples() {
        let converter = UnitConverter::new();
        for a in UnitType::ALL {
            for b in UnitType::ALL {
                for c in UnitType::ALL {
                    let direct = converter.conversion_scale(a, c);
                    let via = converter.conversion_scale(a, b) * converter.conversion_scale(b, c);
                    assert!(close(direct, via), "{} -> {} -> {}", a, b, c);
                }
            }
        }
    }

    #[test]
    fn test_every_unit_seeded_against_base() {
        let table = init_table();
        for unit in UnitType::ALL.into_iter().filter(|u| *u != UnitType::BASE) {
            assert!(lookup(&table, unit, UnitType::BASE).is_some(), "{}", unit);
            assert!(lookup(&table, UnitType::BASE, unit).is_some(), "{}", unit);
        }
    }

    #[test]
    fn test_global_converter() {
        assert!(close(conversion_scale(UnitType::Foot, UnitType::Meter), 0.3048));
    }
}
