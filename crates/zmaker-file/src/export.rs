//! SVG 导出
//!
//! 模型坐标系 Y 轴向上，SVG 坐标系 Y 轴向下：导出时先沿 Y 轴镜像再缩放，
//! 并以包围盒左上角作为默认参考原点，使图形落在 SVG 可视区内。

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use zmaker_core::exporter::{Exportable, PathVisitor, Walker};
use zmaker_core::math::{round, Measurement, Point2, DEFAULT_ACCURACY};
use zmaker_core::measure::{arc_angle, model_extents};
use zmaker_core::path::{Arc, Circle, Line, Path};
use zmaker_core::point;
use zmaker_core::units::{conversion_scale, UnitType};

use crate::error::Result;
use crate::xml::XmlTag;

/// 默认线宽（毫米）
pub const DEFAULT_STROKE_WIDTH: f64 = 0.2;

/// SVG 导出选项
///
/// 未指定的原点、单位和线宽在导出时补全，并写回选项。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SvgOptions {
    /// 以文本标注路径标识
    pub annotate: bool,
    /// 参考原点（SVG 坐标）
    pub origin: Option<Point2>,
    /// 缩放比例
    pub scale: f64,
    /// 线条颜色
    pub stroke: String,
    /// 线宽，与 `units` 同一单位
    pub stroke_width: Option<f64>,
    /// 单位制
    pub units: Option<UnitType>,
    /// 全部使用 `<path>` 元素
    pub use_svg_path_only: bool,
    /// 输出 `width`/`height`/`viewBox`
    pub view_box: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            annotate: false,
            origin: None,
            scale: 1.0,
            stroke: "#000".to_string(),
            stroke_width: None,
            units: None,
            use_svg_path_only: true,
            view_box: true,
        }
    }
}

impl SvgOptions {
    /// 补全未指定的选项
    fn resolve(&mut self, item: &Exportable<'_>, size: &Measurement) {
        if self.origin.is_none() {
            self.origin = Some(Point2::new(
                -size.low.x * self.scale,
                size.high.y * self.scale,
            ));
        }

        if self.units.is_none() {
            self.units = item.model_units();
        }

        if self.stroke_width.is_none() {
            self.stroke_width = Some(match self.units {
                Some(units) => round(
                    conversion_scale(UnitType::Millimeter, units) * DEFAULT_STROKE_WIDTH,
                    0.001,
                ),
                None => DEFAULT_STROKE_WIDTH,
            });
        }
    }
}

/// SVG 支持的长度单位后缀
fn svg_unit(units: Option<UnitType>) -> &'static str {
    match units {
        Some(UnitType::Inch) => "in",
        Some(UnitType::Millimeter) => "mm",
        Some(UnitType::Centimeter) => "cm",
        _ => "",
    }
}

/// 格式化坐标值
fn num(n: f64) -> String {
    // 加 0.0 消除负零
    (round(n, DEFAULT_ACCURACY) + 0.0).to_string()
}

struct SvgRenderer<'o> {
    options: &'o SvgOptions,
    stroke_width: f64,
    elements: Vec<String>,
}

impl<'o> SvgRenderer<'o> {
    fn push(&mut self, tag: XmlTag) {
        let tag = tag
            .attr("fill", "none")
            .attr("stroke", &self.options.stroke)
            .attr("stroke-width", self.stroke_width);
        self.elements.push(tag.to_string());
    }

    fn draw_text(&mut self, id: &str, x: f64, y: f64) {
        let tag = XmlTag::new("text")
            .attr("id", format!("{}_text", id))
            .attr("x", num(x))
            .attr("y", num(y))
            .text(id);
        self.elements.push(tag.to_string());
    }

    fn draw_path(&mut self, id: &str, start: &Point2, d: &[String]) {
        let mut data = vec!["M".to_string(), num(start.x), num(start.y)];
        data.extend_from_slice(d);
        self.push(XmlTag::new("path").attr("id", id).attr("d", data.join(" ")));
    }
}

/// SVG 圆弧指令参数
fn arc_data(radius: f64, end: &Point2, large_arc: bool) -> Vec<String> {
    vec![
        num(radius),
        num(radius),
        "0".to_string(),
        if large_arc { "1" } else { "0" }.to_string(),
        // 路径均为逆时针，翻转 Y 轴后沿角度增加方向绘制
        "1".to_string(),
        num(end.x),
        num(end.y),
    ]
}

impl PathVisitor for SvgRenderer<'_> {
    fn line(&mut self, line: &Line, _offset: &Point2) {
        let (start, end) = (&line.origin, &line.end);
        if self.options.use_svg_path_only {
            let d = ["L".to_string(), num(end.x), num(end.y)];
            self.draw_path(&line.id, start, &d);
        } else {
            self.push(
                XmlTag::new("line")
                    .attr("id", &line.id)
                    .attr("x1", num(start.x))
                    .attr("y1", num(start.y))
                    .attr("x2", num(end.x))
                    .attr("y2", num(end.y)),
            );
        }
        if self.options.annotate {
            self.draw_text(&line.id, (start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
        }
    }

    fn circle(&mut self, circle: &Circle, _offset: &Point2) {
        let center = &circle.origin;
        let r = circle.radius;
        if self.options.use_svg_path_only {
            // 两个半圆拼成整圆
            let mut d = vec!["m".to_string(), num(-r), "0".to_string()];
            for sign in [1.0, -1.0] {
                d.push("a".to_string());
                d.extend(arc_data(r, &Point2::new(2.0 * r * sign, 0.0), false));
            }
            self.draw_path(&circle.id, center, &d);
        } else {
            self.push(
                XmlTag::new("circle")
                    .attr("id", &circle.id)
                    .attr("r", num(r))
                    .attr("cx", num(center.x))
                    .attr("cy", num(center.y)),
            );
        }
        if self.options.annotate {
            self.draw_text(&circle.id, center.x, center.y);
        }
    }

    fn arc(&mut self, arc: &Arc, _offset: &Point2) {
        let [start, end] = point::from_arc(arc);
        let mut d = vec!["A".to_string()];
        d.extend(arc_data(arc.radius, &end, arc_angle(arc) > 180.0));
        self.draw_path(&arc.id, &start, &d);
        if self.options.annotate {
            self.draw_text(&arc.id, start.x, start.y);
        }
    }

    fn fix_point(&self, point: &Point2) -> Point2 {
        point::scale(&point::mirror(point, false, true), self.options.scale)
    }

    fn fix_path<'a>(&self, path: &'a Path, offset: &Point2) -> Cow<'a, Path> {
        let mut fixed = path.mirrored(false, true, None);
        fixed.scale(self.options.scale).move_relative(offset);
        Cow::Owned(fixed)
    }
}

/// 将对象渲染为 SVG 文本
///
/// 对象可以是路径、路径数组、模型或它们的集合。
pub fn to_svg(item: &Exportable<'_>, options: &mut SvgOptions) -> String {
    let size = model_extents(&item.to_model())
        .unwrap_or_else(|| Measurement::new(point::zero(), point::zero()));
    options.resolve(item, &size);

    let origin = options.origin.unwrap_or_else(point::zero);
    let mut renderer = SvgRenderer {
        options: &*options,
        stroke_width: options.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
        elements: Vec::new(),
    };
    Walker::new(&mut renderer).export_item(item, &origin);

    tracing::info!("导出 SVG: {} 个元素", renderer.elements.len());

    let mut svg = XmlTag::new("svg").attr("xmlns", "http://www.w3.org/2000/svg");
    if options.view_box {
        let width = num(size.width() * options.scale);
        let height = num(size.height() * options.scale);
        let unit = svg_unit(options.units);
        svg = svg
            .attr("width", format!("{}{}", width, unit))
            .attr("height", format!("{}{}", height, unit))
            .attr("viewBox", format!("0 0 {} {}", width, height));
    }
    svg.inner_text = Some(renderer.elements.concat());
    svg.inner_text_escaped = true;
    svg.to_string()
}

/// 导出为 SVG 文件
pub fn export_to_file(
    item: &Exportable<'_>,
    options: &mut SvgOptions,
    path: &std::path::Path,
) -> Result<()> {
    let svg = to_svg(item, options);
    std::fs::write(path, svg)?;
    Ok(())
}
