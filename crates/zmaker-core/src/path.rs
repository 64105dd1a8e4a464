//! 路径图元定义
//!
//! 支持的基本图元：
//! - 线段 (Line)
//! - 圆 (Circle)
//! - 圆弧 (Arc)
//!
//! 序列化时以 `type` 字段区分变体，取值为 `"line"`、`"circle"`、`"arc"`，
//! 这是对外的数据契约，导入导出都依赖这些字面量。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::math::Point2;

/// 路径类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    Line,
    Circle,
    Arc,
}

impl PathType {
    pub const LINE: &'static str = "line";
    pub const CIRCLE: &'static str = "circle";
    pub const ARC: &'static str = "arc";

    /// 类型标签
    pub fn as_str(&self) -> &'static str {
        match self {
            PathType::Line => Self::LINE,
            PathType::Circle => Self::CIRCLE,
            PathType::Arc => Self::ARC,
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::LINE => Ok(PathType::Line),
            Self::CIRCLE => Ok(PathType::Circle),
            Self::ARC => Ok(PathType::Arc),
            other => Err(CoreError::UnsupportedPathVariant(other.to_string())),
        }
    }
}

/// 路径：线段、圆或圆弧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Path {
    Line(Line),
    Circle(Circle),
    Arc(Arc),
}

impl Path {
    /// 获取路径类型
    pub fn path_type(&self) -> PathType {
        match self {
            Path::Line(_) => PathType::Line,
            Path::Circle(_) => PathType::Circle,
            Path::Arc(_) => PathType::Arc,
        }
    }

    /// 路径标识（不要求唯一）
    pub fn id(&self) -> &str {
        match self {
            Path::Line(l) => &l.id,
            Path::Circle(c) => &c.id,
            Path::Arc(a) => &a.id,
        }
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        match self {
            Path::Line(l) => l.id = id,
            Path::Circle(c) => c.id = id,
            Path::Arc(a) => a.id = id,
        }
    }

    /// 路径原点（相对于所属模型）
    pub fn origin(&self) -> Point2 {
        match self {
            Path::Line(l) => l.origin,
            Path::Circle(c) => c.origin,
            Path::Arc(a) => a.origin,
        }
    }

    pub fn origin_mut(&mut self) -> &mut Point2 {
        match self {
            Path::Line(l) => &mut l.origin,
            Path::Circle(c) => &mut c.origin,
            Path::Arc(a) => &mut a.origin,
        }
    }
}

impl From<Line> for Path {
    fn from(line: Line) -> Self {
        Path::Line(line)
    }
}

impl From<Circle> for Path {
    fn from(circle: Circle) -> Self {
        Path::Circle(circle)
    }
}

impl From<Arc> for Path {
    fn from(arc: Arc) -> Self {
        Path::Arc(arc)
    }
}

/// 线段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub id: String,
    pub origin: Point2,
    pub end: Point2,
}

impl Line {
    pub fn new(id: impl Into<String>, origin: Point2, end: Point2) -> Self {
        Self {
            id: id.into(),
            origin,
            end,
        }
    }
}

/// 圆
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(default)]
    pub id: String,
    pub origin: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(id: impl Into<String>, origin: Point2, radius: f64) -> Self {
        Self {
            id: id.into(),
            origin,
            radius,
        }
    }
}

/// 圆弧
///
/// 从起始角逆时针扫到终止角；终止角小于起始角时跨越 360°。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arc {
    #[serde(default)]
    pub id: String,
    pub origin: Point2,
    pub radius: f64,
    /// 起始角度（角度制）
    pub start_angle: f64,
    /// 终止角度（角度制）
    pub end_angle: f64,
}

impl Arc {
    pub fn new(
        id: impl Into<String>,
        origin: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Self {
            id: id.into(),
            origin,
            radius,
            start_angle,
            end_angle,
        }
    }
}

/// 创建线段路径
pub fn create_line(id: impl Into<String>, origin: Point2, end: Point2) -> Path {
    Path::Line(Line::new(id, origin, end))
}

/// 创建圆路径
pub fn create_circle(id: impl Into<String>, origin: Point2, radius: f64) -> Path {
    Path::Circle(Circle::new(id, origin, radius))
}

/// 创建圆弧路径
pub fn create_arc(
    id: impl Into<String>,
    origin: Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> Path {
    Path::Arc(Arc::new(id, origin, radius, start_angle, end_angle))
}

/// 按标识查找路径，返回下标和路径
pub fn find_by_id<'a>(paths: &'a [Path], id: &str) -> Option<(usize, &'a Path)> {
    paths.iter().enumerate().find(|(_, p)| p.id() == id)
}
