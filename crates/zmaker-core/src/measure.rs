//! 测量
//!
//! 路径长度、圆弧扫掠角、路径与模型树的包围盒。

use std::f64::consts::PI;

use crate::angle;
use crate::math::{Measurement, Point2};
use crate::model::Model;
use crate::path::{Arc, Path};
use crate::point;

/// 圆弧的扫掠角（角度制），不小于 0
pub fn arc_angle(arc: &Arc) -> f64 {
    angle::arc_end_angle_past_zero(arc) - arc.start_angle
}

/// 两点之间的距离
pub fn point_distance(a: &Point2, b: &Point2) -> f64 {
    point::distance(a, b)
}

/// 路径长度
pub fn path_length(path: &Path) -> f64 {
    match path {
        Path::Line(line) => point_distance(&line.origin, &line.end),
        Path::Circle(circle) => 2.0 * PI * circle.radius,
        Path::Arc(arc) => 2.0 * PI * arc.radius * arc_angle(arc) / 360.0,
    }
}

/// 模型树中所有路径的长度之和
pub fn model_path_length(model: &Model) -> f64 {
    model.paths.iter().map(path_length).sum::<f64>()
        + model.models.iter().map(model_path_length).sum::<f64>()
}

/// 路径的包围盒（在路径所属模型的坐标系中）
pub fn path_extents(path: &Path) -> Measurement {
    match path {
        Path::Line(line) => Measurement::from_corners(&line.origin, &line.end),
        Path::Circle(circle) => {
            let r = circle.radius;
            Measurement::new(
                point::add(&circle.origin, Some(&Point2::new(-r, -r)), false),
                point::add(&circle.origin, Some(&Point2::new(r, r)), false),
            )
        }
        Path::Arc(arc) => arc_extents(arc),
    }
}

/// 圆弧包围盒
///
/// 从两个端点出发；若某个坐标轴方向的极值角（90°/180°/270°/360°）严格落在扫掠范围内，
/// 该方向取 `origin ± radius`。扫掠角达到 360° 时按整圆处理。
fn arc_extents(arc: &Arc) -> Measurement {
    let r = arc.radius;

    if arc_angle(arc) >= 360.0 {
        tracing::debug!("圆弧 '{}' 扫掠角不小于 360°，按整圆计算包围盒", arc.id);
        return Measurement::new(
            point::add(&arc.origin, Some(&Point2::new(-r, -r)), false),
            point::add(&arc.origin, Some(&Point2::new(r, r)), false),
        );
    }

    let start_point = point::from_polar(angle::to_radians(arc.start_angle), r);
    let end_point = point::from_polar(angle::to_radians(arc.end_angle), r);

    // 起始角规范到 [0, 360)，终止角随之平移
    let shift = arc.start_angle.rem_euclid(360.0) - arc.start_angle;
    let start_angle = arc.start_angle + shift;
    let end_angle = angle::arc_end_angle_past_zero(arc) + shift;

    let crosses = |cardinal: f64| {
        [cardinal, cardinal + 360.0]
            .iter()
            .any(|&a| start_angle < a && a < end_angle)
    };

    let corners = Measurement::from_corners(&start_point, &end_point);
    let mut low = corners.low;
    let mut high = corners.high;

    if crosses(180.0) {
        low.x = -r;
    }
    if crosses(270.0) {
        low.y = -r;
    }
    if crosses(360.0) {
        high.x = r;
    }
    if crosses(90.0) {
        high.y = r;
    }

    Measurement::new(
        point::add(&arc.origin, Some(&low), false),
        point::add(&arc.origin, Some(&high), false),
    )
}

/// 模型树的包围盒
///
/// 每条路径的包围盒先加上祖先原点之和再累积；整棵树没有路径时返回 `None`。
pub fn model_extents(model: &Model) -> Option<Measurement> {
    fn measure(model: &Model, offset_origin: &Point2, total: &mut Option<Measurement>) {
        let new_origin = point::add(&model.origin_or_zero(), Some(offset_origin), false);

        for path in &model.paths {
            let extents = path_extents(path).offset(&new_origin);
            *total = Some(match total {
                Some(current) => current.union(&extents),
                None => extents,
            });
        }
        for child in &model.models {
            measure(child, &new_origin, total);
        }
    }

    let mut total = None;
    measure(model, &point::zero(), &mut total);
    total
}
