//! 点运算
//!
//! 所有函数都返回新的点，不修改输入。

use crate::angle;
use crate::math::Point2;
use crate::path::Arc;

/// 两点相加；`subtract` 为真时改为相减。`b` 缺省时返回 `a` 的副本。
pub fn add(a: &Point2, b: Option<&Point2>, subtract: bool) -> Point2 {
    match b {
        None => *a,
        Some(b) if subtract => Point2::new(a.x - b.x, a.y - b.y),
        Some(b) => Point2::new(a.x + b.x, a.y + b.y),
    }
}

/// 两点相减
pub fn subtract(a: &Point2, b: &Point2) -> Point2 {
    add(a, Some(b), true)
}

/// 原点 (0, 0)
pub fn zero() -> Point2 {
    Point2::origin()
}

/// 由极坐标创建点
pub fn from_polar(angle_in_radians: f64, radius: f64) -> Point2 {
    Point2::new(
        radius * angle_in_radians.cos(),
        radius * angle_in_radians.sin(),
    )
}

/// 圆弧的两个端点：`[起点, 终点]`
pub fn from_arc(arc: &Arc) -> [Point2; 2] {
    let point_at = |degrees: f64| {
        let p = from_polar(angle::to_radians(degrees), arc.radius);
        add(&arc.origin, Some(&p), false)
    };
    [point_at(arc.start_angle), point_at(arc.end_angle)]
}

/// 沿 x 轴和/或 y 轴镜像。`mirror_x` 取反 x 分量，`mirror_y` 取反 y 分量。
pub fn mirror(point: &Point2, mirror_x: bool, mirror_y: bool) -> Point2 {
    let mut p = *point;
    if mirror_x {
        p.x = -p.x;
    }
    if mirror_y {
        p.y = -p.y;
    }
    p
}

/// 绕指定中心旋转（角度制）
///
/// 点与中心重合时 atan2(0, 0) = 0，结果仍是中心本身。
pub fn rotate(point: &Point2, angle_in_degrees: f64, rotation_origin: &Point2) -> Point2 {
    let point_angle = angle::from_point_to_radians(point, rotation_origin);
    let d = distance(rotation_origin, point);
    let rotated = from_polar(point_angle + angle::to_radians(angle_in_degrees), d);
    add(rotation_origin, Some(&rotated), false)
}

/// 坐标逐分量缩放
pub fn scale(point: &Point2, scale_value: f64) -> Point2 {
    Point2::new(point.x * scale_value, point.y * scale_value)
}

/// 两点之间的距离
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, points_approx_eq};

    #[test]
    fn test_add_and_subtract() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(3.0, -4.0);

        assert!(points_approx_eq(&add(&a, Some(&b), false), &Point2::new(4.0, -2.0)));
        assert!(points_approx_eq(&subtract(&a, &b), &Point2::new(-2.0, 6.0)));
        assert!(points_approx_eq(&add(&a, None, true), &a));
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        let p = Point2::new(3.5, -7.25);
        for (mx, my) in [(true, false), (false, true), (true, true), (false, false)] {
            let back = mirror(&mirror(&p, mx, my), mx, my);
            assert!(points_approx_eq(&back, &p));
        }
        assert!(points_approx_eq(&mirror(&p, true, false), &Point2::new(-3.5, -7.25)));
        assert!(points_approx_eq(&mirror(&p, false, true), &Point2::new(3.5, 7.25)));
    }

    #[test]
    fn test_rotate_about_center() {
        let center = Point2::new(1.0, 1.0);
        let rotated = rotate(&Point2::new(2.0, 1.0), 90.0, &center);
        assert!(points_approx_eq(&rotated, &Point2::new(1.0, 2.0)));

        let half_turn = rotate(&Point2::new(2.0, 1.0), 180.0, &center);
        assert!(points_approx_eq(&half_turn, &Point2::new(0.0, 1.0)));
    }

    #[test]
    fn test_rotate_degenerate_center() {
        let center = Point2::new(4.0, -2.0);
        let rotated = rotate(&center, 45.0, &center);
        assert!(points_approx_eq(&rotated, &center));
    }

    #[test]
    fn test_full_turn_uses_zero_radians() {
        let p = Point2::new(5.0, 0.0);
        let rotated = rotate(&p, 360.0, &zero());
        assert_eq!(rotated, p);
    }

    #[test]
    fn test_distance_and_scale() {
        assert!(approx_eq(distance(&zero(), &Point2::new(3.0, 4.0)), 5.0));
        assert!(points_approx_eq(&scale(&Point2::new(1.5, -2.0), 2.0), &Point2::new(3.0, -4.0)));
    }

    #[test]
    fn test_from_arc_endpoints() {
        let arc = Arc::new("a", Point2::new(1.0, 1.0), 2.0, 0.0, 90.0);
        let [start, end] = from_arc(&arc);
        assert!(points_approx_eq(&start, &Point2::new(3.0, 1.0)));
        assert!(points_approx_eq(&end, &Point2::new(1.0, 3.0)));
    }
}
