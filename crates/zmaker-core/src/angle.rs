//! 角度工具
//!
//! 圆弧角度一律使用角度制，且不限定范围（可为负或大于 360）。

use std::f64::consts::PI;

use crate::math::Point2;
use crate::path::Arc;
use crate::point;

/// 角度转弧度，360° 规范化为 0
pub fn to_radians(angle_in_degrees: f64) -> f64 {
    if angle_in_degrees == 360.0 {
        return 0.0;
    }
    angle_in_degrees * PI / 180.0
}

/// 弧度转角度
pub fn to_degrees(angle_in_radians: f64) -> f64 {
    angle_in_radians * 180.0 / PI
}

/// 圆弧的终止角度，保证不小于起始角度
///
/// 终止角小于起始角时补足 360 的整数倍，便于直接计算扫掠角。
pub fn arc_end_angle_past_zero(arc: &Arc) -> f64 {
    if arc.end_angle < arc.start_angle {
        let turns = ((arc.start_angle - arc.end_angle) / 360.0).ceil();
        return arc.end_angle + 360.0 * turns;
    }
    arc.end_angle
}

/// 经过某点的直线相对 `origin` 的角度（弧度）
pub fn from_point_to_radians(point_to_find_angle: &Point2, origin: &Point2) -> f64 {
    let d = point::subtract(point_to_find_angle, origin);
    d.y.atan2(d.x)
}

/// 沿 x 轴和/或 y 轴镜像角度
///
/// 先处理 `mirror_y`（`360 - a`），再处理 `mirror_x`（`180 - a` 或 `540 - a`）。
pub fn mirror(angle_in_degrees: f64, mirror_x: bool, mirror_y: bool) -> f64 {
    let mut angle = angle_in_degrees;
    if mirror_y {
        angle = 360.0 - angle;
    }
    if mirror_x {
        angle = (if angle < 180.0 { 180.0 } else { 540.0 }) - angle;
    }
    angle
}
