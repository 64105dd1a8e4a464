//! 数学基础类型
//!
//! 基于 nalgebra 提供的点类型别名，以及包围盒测量结果。

use nalgebra as na;
use serde::{Deserialize, Serialize};

/// 2D点类型（序列化为 `[x, y]`）
pub type Point2 = na::Point2<f64>;

/// 数值容差，用于几何比较
pub const EPSILON: f64 = 1e-10;

/// 默认取整精度
pub const DEFAULT_ACCURACY: f64 = 1e-7;

/// 判断两个浮点数是否近似相等
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// 判断两个2D点是否近似相等
#[inline]
pub fn points_approx_eq(a: &Point2, b: &Point2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// 数值取整
///
/// `accuracy` 是小数位的样例值，例如 `0.001` 保留三位小数。
pub fn round(n: f64, accuracy: f64) -> f64 {
    let places = 1.0 / accuracy;
    (n * places).round() / places
}

/// 轴对齐包围盒，以低/高两个角点表示
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub low: Point2,
    pub high: Point2,
}

impl Measurement {
    /// 创建新的包围盒
    pub fn new(low: Point2, high: Point2) -> Self {
        Self { low, high }
    }

    /// 由两个任意角点创建包围盒（逐分量取最小/最大值）
    pub fn from_corners(a: &Point2, b: &Point2) -> Self {
        Self {
            low: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            high: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// 合并两个包围盒
    pub fn union(&self, other: &Self) -> Self {
        Self {
            low: Point2::new(self.low.x.min(other.low.x), self.low.y.min(other.low.y)),
            high: Point2::new(self.high.x.max(other.high.x), self.high.y.max(other.high.y)),
        }
    }

    /// 平移包围盒
    pub fn offset(&self, delta: &Point2) -> Self {
        Self {
            low: Point2::new(self.low.x + delta.x, self.low.y + delta.y),
            high: Point2::new(self.high.x + delta.x, self.high.y + delta.y),
        }
    }

    /// 检查是否包含指定点
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.low.x
            && point.x <= self.high.x
            && point.y >= self.low.y
            && point.y <= self.high.y
    }

    /// 获取中心点
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.low.x + self.high.x) / 2.0,
            (self.low.y + self.high.y) / 2.0,
        )
    }

    /// 获取宽度
    pub fn width(&self) -> f64 {
        self.high.x - self.low.x
    }

    /// 获取高度
    pub fn height(&self) -> f64 {
        self.high.y - self.low.y
    }
}
