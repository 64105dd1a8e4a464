//! 常用形状构造
//!
//! 每个函数独立返回一个模型，彼此之间只共享路径构造函数。

use std::f64::consts::PI;

use crate::angle;
use crate::math::Point2;
use crate::model::Model;
use crate::path::{create_arc, create_circle, create_line};
use crate::point;

/// 螺栓孔圆周分布
pub fn bolt_circle(bolt_radius: f64, hole_radius: f64, bolt_count: usize, first_bolt_angle: f64) -> Model {
    let a1 = angle::to_radians(first_bolt_angle);
    let a = 2.0 * PI / bolt_count as f64;

    let paths = (0..bolt_count)
        .map(|i| {
            let o = point::from_polar(a * i as f64 + a1, bolt_radius);
            create_circle(format!("bolt {}", i), o, hole_radius)
        })
        .collect();

    Model::from_paths(paths).with_type("BoltCircle")
}

/// 矩形四角的螺栓孔
pub fn bolt_rectangle(width: f64, height: f64, hole_radius: f64) -> Model {
    let holes = [
        ("BottomLeft", Point2::new(0.0, 0.0)),
        ("BottomRight", Point2::new(width, 0.0)),
        ("TopRight", Point2::new(width, height)),
        ("TopLeft", Point2::new(0.0, height)),
    ];

    let paths = holes
        .into_iter()
        .map(|(id, o)| create_circle(format!("{}_bolt", id), o, hole_radius))
        .collect();

    Model::from_paths(paths).with_type("BoltRectangle")
}

/// 依次连接各点的折线；闭合且点数大于 2 时连接首尾
pub fn connect_the_dots(is_closed: bool, points: &[Point2]) -> Model {
    let mut paths = Vec::with_capacity(points.len());

    for i in 1..points.len() {
        paths.push(create_line(format!("ShapeLine{}", i), points[i - 1], points[i]));
    }
    if is_closed && points.len() > 2 {
        paths.push(create_line(
            format!("ShapeLine{}", points.len()),
            points[points.len() - 1],
            points[0],
        ));
    }

    Model::from_paths(paths).with_type("ConnectTheDots")
}

/// 矩形，左下角位于原点
pub fn rectangle(width: f64, height: f64) -> Model {
    let corners = [
        Point2::new(0.0, 0.0),
        Point2::new(width, 0.0),
        Point2::new(width, height),
        Point2::new(0.0, height),
    ];
    connect_the_dots(true, &corners).with_type("Rectangle")
}

/// 正方形
pub fn square(side: f64) -> Model {
    rectangle(side, side).with_type("Square")
}

/// 圆角矩形
///
/// 圆角半径不超过短边的一半；半径为 0 时不生成圆弧，边长为 0 时不生成直边。
pub fn round_rectangle(width: f64, height: f64, radius: f64) -> Model {
    let radius = radius.min(height.min(width) / 2.0);
    let wr = width - radius;
    let hr = height - radius;
    let mut model = Model::new().with_type("RoundRectangle");

    if radius > 0.0 {
        model.add_path(create_arc("BottomLeft", Point2::new(radius, radius), radius, 180.0, 270.0));
        model.add_path(create_arc("BottomRight", Point2::new(wr, radius), radius, 270.0, 0.0));
        model.add_path(create_arc("TopRight", Point2::new(wr, hr), radius, 0.0, 90.0));
        model.add_path(create_arc("TopLeft", Point2::new(radius, hr), radius, 90.0, 180.0));
    }
    if wr - radius > 0.0 {
        model.add_path(create_line("Bottom", Point2::new(radius, 0.0), Point2::new(wr, 0.0)));
        model.add_path(create_line("Top", Point2::new(wr, height), Point2::new(radius, height)));
    }
    if hr - radius > 0.0 {
        model.add_path(create_line("Right", Point2::new(width, radius), Point2::new(width, hr)));
        model.add_path(create_line("Left", Point2::new(0.0, hr), Point2::new(0.0, radius)));
    }

    model
}

/// 椭圆形（两端为半圆的圆角矩形）
pub fn oval(width: f64, height: f64) -> Model {
    round_rectangle(width, height, (height / 2.0).min(width / 2.0)).with_type("Oval")
}

/// 沿圆弧扫掠的长槽
pub fn oval_arc(start_angle: f64, end_angle: f64, sweep_radius: f64, slot_radius: f64) -> Model {
    let mut model = Model::new().with_type("OvalArc");

    for (id, offset_radius) in [("Inner", -slot_radius), ("Outer", slot_radius)] {
        model.add_path(create_arc(
            id,
            point::zero(),
            sweep_radius + offset_radius,
            start_angle,
            end_angle,
        ));
    }

    let caps = [
        ("StartCap", start_angle, 180.0, 0.0),
        ("EndCap", end_angle, 0.0, 180.0),
    ];
    for (id, tilt_angle, offset_start, offset_end) in caps {
        let p = point::from_polar(angle::to_radians(tilt_angle), sweep_radius);
        model.add_path(create_arc(
            id,
            p,
            slot_radius,
            tilt_angle + offset_start,
            tilt_angle + offset_end,
        ));
    }

    model
}

/// S 形曲线：两段相切圆弧，从 (0, 0) 到 (width, height)
pub fn s_curve(width: f64, height: f64) -> Model {
    fn find_radius(x: f64, y: f64) -> f64 {
        x + (y * y - x * x) / (2.0 * x)
    }

    let h2 = height / 2.0;
    let w2 = width / 2.0;

    let (radius, start_angle, end_angle, arc_origin) = if width > height {
        let radius = find_radius(h2, w2);
        let end = 360.0 - angle::to_degrees((w2 / radius).acos());
        (radius, 270.0, end, Point2::new(0.0, radius))
    } else {
        let radius = find_radius(w2, h2);
        let start = 180.0 - angle::to_degrees((h2 / radius).asin());
        (radius, start, 180.0, Point2::new(radius, 0.0))
    };

    let curve = create_arc("curve_start", arc_origin, radius, start_angle, end_angle);
    let mut curve_end = curve.mirrored(true, true, Some("curve_end"));
    curve_end.move_relative(&Point2::new(width, height));

    Model::from_paths(vec![curve, curve_end]).with_type("SCurve")
}
