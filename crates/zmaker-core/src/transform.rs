//! 路径变换
//!
//! 镜像产生新的路径；平移、旋转、缩放原地修改并返回自身以便链式调用。

use crate::angle;
use crate::math::Point2;
use crate::path::{Arc, Circle, Line, Path};
use crate::point;

impl Path {
    /// 沿 x 轴和/或 y 轴镜像，返回新路径
    ///
    /// 单轴镜像会反转圆弧的绕行方向，此时交换起止角以保持逆时针扫掠。
    pub fn mirrored(&self, mirror_x: bool, mirror_y: bool, new_id: Option<&str>) -> Path {
        let origin = point::mirror(&self.origin(), mirror_x, mirror_y);
        let id = new_id.unwrap_or_else(|| self.id()).to_string();

        match self {
            Path::Line(line) => Path::Line(Line {
                id,
                origin,
                end: point::mirror(&line.end, mirror_x, mirror_y),
            }),
            Path::Circle(circle) => Path::Circle(Circle {
                id,
                origin,
                radius: circle.radius,
            }),
            Path::Arc(arc) => {
                let start_angle = angle::mirror(arc.start_angle, mirror_x, mirror_y);
                let end_angle =
                    angle::mirror(angle::arc_end_angle_past_zero(arc), mirror_x, mirror_y);
                let xor = mirror_x != mirror_y;

                Path::Arc(Arc {
                    id,
                    origin,
                    radius: arc.radius,
                    start_angle: if xor { end_angle } else { start_angle },
                    end_angle: if xor { start_angle } else { end_angle },
                })
            }
        }
    }

    /// 相对平移
    pub fn move_relative(&mut self, delta: &Point2) -> &mut Self {
        let origin = self.origin_mut();
        *origin = point::add(origin, Some(delta), false);

        if let Path::Line(line) = self {
            line.end = point::add(&line.end, Some(delta), false);
        }
        self
    }

    /// 绕指定中心旋转（角度制）
    pub fn rotate(&mut self, angle_in_degrees: f64, rotation_origin: &Point2) -> &mut Self {
        if angle_in_degrees == 0.0 {
            return self;
        }

        let origin = self.origin_mut();
        *origin = point::rotate(origin, angle_in_degrees, rotation_origin);

        match self {
            Path::Line(line) => {
                line.end = point::rotate(&line.end, angle_in_degrees, rotation_origin);
            }
            Path::Arc(arc) => {
                arc.start_angle += angle_in_degrees;
                arc.end_angle += angle_in_degrees;
            }
            Path::Circle(_) => {}
        }
        self
    }

    /// 均匀缩放（相对坐标原点）
    pub fn scale(&mut self, scale_value: f64) -> &mut Self {
        if scale_value == 1.0 {
            return self;
        }

        let origin = self.origin_mut();
        *origin = point::scale(origin, scale_value);

        match self {
            Path::Line(line) => line.end = point::scale(&line.end, scale_value),
            Path::Circle(circle) => circle.radius *= scale_value,
            Path::Arc(arc) => arc.radius *= scale_value,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, points_approx_eq};
    use crate::path::{create_arc, create_circle, create_line};

    fn sample_paths() -> Vec<Path> {
        vec![
            create_line("l", Point2::new(1.0, 2.0), Point2::new(-3.0, 4.0)),
            create_circle("c", Point2::new(5.0, 5.0), 2.0),
            create_arc("a", Point2::new(-1.0, 0.5), 3.0, 30.0, 300.0),
        ]
    }

    #[test]
    fn test_identity_transforms() {
        for original in sample_paths() {
            let mut p = original.clone();
            p.scale(1.0);
            assert_eq!(p, original);

            p.rotate(0.0, &Point2::new(17.0, -3.0));
            assert_eq!(p, original);
        }
    }

    #[test]
    fn test_move_relative() {
        let mut line = create_line("l", Point2::new(1.0, 1.0), Point2::new(2.0, 3.0));
        line.move_relative(&Point2::new(10.0, -1.0));
        let Path::Line(l) = &line else { panic!("expected line") };
        assert!(points_approx_eq(&l.origin, &Point2::new(11.0, 0.0)));
        assert!(points_approx_eq(&l.end, &Point2::new(12.0, 2.0)));

        let mut arc = create_arc("a", Point2::new(0.0, 0.0), 1.0, 10.0, 20.0);
        arc.move_relative(&Point2::new(2.0, 2.0));
        let Path::Arc(a) = &arc else { panic!("expected arc") };
        assert!(points_approx_eq(&a.origin, &Point2::new(2.0, 2.0)));
        assert!(approx_eq(a.start_angle, 10.0));
        assert!(approx_eq(a.radius, 1.0));
    }

    #[test]
    fn test_rotate() {
        let mut line = create_line("l", Point2::new(1.0, 0.0), Point2::new(2.0, 0.0));
        line.rotate(90.0, &Point2::origin());
        let Path::Line(l) = &line else { panic!("expected line") };
        assert!(points_approx_eq(&l.origin, &Point2::new(0.0, 1.0)));
        assert!(points_approx_eq(&l.end, &Point2::new(0.0, 2.0)));

        let mut arc = create_arc("a", Point2::new(1.0, 0.0), 1.0, 0.0, 90.0);
        arc.rotate(90.0, &Point2::origin());
        let Path::Arc(a) = &arc else { panic!("expected arc") };
        assert!(points_approx_eq(&a.origin, &Point2::new(0.0, 1.0)));
        assert!(approx_eq(a.start_angle, 90.0));
        assert!(approx_eq(a.end_angle, 180.0));
    }

    #[test]
    fn test_scale() {
        let mut circle = create_circle("c", Point2::new(1.0, 2.0), 3.0);
        circle.scale(2.0);
        let Path::Circle(c) = &circle else { panic!("expected circle") };
        assert!(points_approx_eq(&c.origin, &Point2::new(2.0, 4.0)));
        assert!(approx_eq(c.radius, 6.0));

        let mut arc = create_arc("a", Point2::new(1.0, 1.0), 1.0, 45.0, 135.0);
        arc.scale(0.5);
        let Path::Arc(a) = &arc else { panic!("expected arc") };
        assert!(approx_eq(a.radius, 0.5));
        assert!(approx_eq(a.start_angle, 45.0));
        assert!(approx_eq(a.end_angle, 135.0));
    }

    #[test]
    fn test_mirror_does_not_mutate_and_renames() {
        let original = create_line("l", Point2::new(1.0, 2.0), Point2::new(3.0, 4.0));
        let mirrored = original.mirrored(true, false, Some("l2"));

        assert_eq!(original.id(), "l");
        assert_eq!(mirrored.id(), "l2");
        let Path::Line(l) = &mirrored else { panic!("expected line") };
        assert!(points_approx_eq(&l.origin, &Point2::new(-1.0, 2.0)));
        assert!(points_approx_eq(&l.end, &Point2::new(-3.0, 4.0)));

        assert_eq!(original.mirrored(false, true, None).id(), "l");
    }

    #[test]
    fn test_mirror_arc_preserves_winding() {
        let arc = create_arc("a", Point2::origin(), 1.0, 0.0, 90.0);
        let Path::Arc(source) = &arc else { panic!("expected arc") };

        for (mx, my) in [(true, false), (false, true), (true, true)] {
            let Path::Arc(m) = arc.mirrored(mx, my, None) else { panic!("expected arc") };

            // 采样中点：镜像后的中点应等于原中点的镜像
            let mid = |a: &Arc| {
                let sweep = angle::arc_end_angle_past_zero(a) - a.start_angle;
                point::from_polar(angle::to_radians(a.start_angle + sweep / 2.0), a.radius)
            };
            let expected_mid = point::mirror(&mid(source), mx, my);
            assert!(points_approx_eq(&mid(&m), &expected_mid));

            // 扫掠角不变
            let sweep = angle::arc_end_angle_past_zero(&m) - m.start_angle;
            assert!(approx_eq(sweep, 90.0));

            // 端点集合是原端点的镜像
            let [s, e] = point::from_arc(&m);
            let [os, oe] = point::from_arc(source);
            let (ms, me) = (point::mirror(&os, mx, my), point::mirror(&oe, mx, my));
            assert!(
                (points_approx_eq(&s, &ms) && points_approx_eq(&e, &me))
                    || (points_approx_eq(&s, &me) && points_approx_eq(&e, &ms))
            );
        }
    }

    #[test]
    fn test_mirror_x_arc_occupies_second_quadrant() {
        let arc = create_arc("a", Point2::origin(), 1.0, 0.0, 90.0);
        let Path::Arc(m) = arc.mirrored(true, false, None) else { panic!("expected arc") };
        assert!(approx_eq(m.start_angle, 90.0));
        assert!(approx_eq(m.end_angle, 180.0));
    }
}
