//! DXF导出
//!
//! 每条路径对应一个 LINE/CIRCLE/ARC 实体，坐标为绝对坐标，路径标识作为图层名。
//! 单位制写入头部的 `$INSUNITS`。

use serde::{Deserialize, Serialize};
use zmaker_core::exporter::{Exportable, PathVisitor, Walker};
use zmaker_core::math::Point2;
use zmaker_core::path::{Arc, Circle, Line};
use zmaker_core::point;
use zmaker_core::units::UnitType;

use crate::error::{FileError, Result};

/// DXF 导出选项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DxfOptions {
    /// 单位制，未指定时取模型的单位
    pub units: Option<UnitType>,
}

/// 单位制对应的 `$INSUNITS` 取值
fn dxf_units(units: Option<UnitType>) -> dxf::enums::Units {
    match units {
        Some(UnitType::Inch) => dxf::enums::Units::Inches,
        Some(UnitType::Foot) => dxf::enums::Units::Feet,
        Some(UnitType::Millimeter) => dxf::enums::Units::Millimeters,
        Some(UnitType::Centimeter) => dxf::enums::Units::Centimeters,
        Some(UnitType::Meter) => dxf::enums::Units::Meters,
        None => dxf::enums::Units::Unitless,
    }
}

fn to_dxf_point(p: &Point2, offset: &Point2) -> dxf::Point {
    let abs = point::add(p, Some(offset), false);
    dxf::Point::new(abs.x, abs.y, 0.0)
}

#[derive(Default)]
struct DxfWriter {
    entities: Vec<dxf::entities::Entity>,
    layers: Vec<String>,
}

impl DxfWriter {
    fn push(&mut self, layer: &str, specific: dxf::entities::EntityType) {
        let mut entity = dxf::entities::Entity::new(specific);
        // 没有标识的路径留在默认图层 "0"
        if !layer.is_empty() {
            entity.common.layer = layer.to_string();
            if !self.layers.iter().any(|l| l == layer) {
                self.layers.push(layer.to_string());
            }
        }
        self.entities.push(entity);
    }
}

impl PathVisitor for DxfWriter {
    fn line(&mut self, line: &Line, offset: &Point2) {
        let mut dxf_line = dxf::entities::Line::default();
        dxf_line.p1 = to_dxf_point(&line.origin, offset);
        dxf_line.p2 = to_dxf_point(&line.end, offset);
        self.push(&line.id, dxf::entities::EntityType::Line(dxf_line));
    }

    fn circle(&mut self, circle: &Circle, offset: &Point2) {
        let mut dxf_circle = dxf::entities::Circle::default();
        dxf_circle.center = to_dxf_point(&circle.origin, offset);
        dxf_circle.radius = circle.radius;
        self.push(&circle.id, dxf::entities::EntityType::Circle(dxf_circle));
    }

    fn arc(&mut self, arc: &Arc, offset: &Point2) {
        let mut dxf_arc = dxf::entities::Arc::default();
        dxf_arc.center = to_dxf_point(&arc.origin, offset);
        dxf_arc.radius = arc.radius;
        dxf_arc.start_angle = arc.start_angle;
        dxf_arc.end_angle = arc.end_angle;
        self.push(&arc.id, dxf::entities::EntityType::Arc(dxf_arc));
    }
}

/// 构造 DXF 图纸
///
/// 未指定的单位取自模型，并写回选项。
pub fn to_drawing(item: &Exportable<'_>, options: &mut DxfOptions) -> dxf::Drawing {
    if options.units.is_none() {
        options.units = item.model_units();
    }

    let mut writer = DxfWriter::default();
    Walker::new(&mut writer).export_item(item, &point::zero());

    let mut drawing = dxf::Drawing::new();
    // $INSUNITS 从 R2000 开始支持
    drawing.header.version = dxf::enums::AcadVersion::R2000;
    drawing.header.default_drawing_units = dxf_units(options.units);

    for name in writer.layers {
        let mut dxf_layer = dxf::tables::Layer::default();
        dxf_layer.name = name;
        drawing.add_layer(dxf_layer);
    }

    tracing::info!("导出 DXF: {} 个实体", writer.entities.len());
    for entity in writer.entities {
        drawing.add_entity(entity);
    }

    drawing
}

/// 将对象渲染为 DXF 文本
pub fn to_dxf(item: &Exportable<'_>, options: &mut DxfOptions) -> Result<String> {
    let drawing = to_drawing(item, options);

    let mut buffer = Vec::new();
    drawing
        .save(&mut buffer)
        .map_err(|e| FileError::Dxf(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| FileError::Dxf(e.to_string()))
}

/// 导出到DXF文件
pub fn export(item: &Exportable<'_>, options: &mut DxfOptions, path: &std::path::Path) -> Result<()> {
    to_drawing(item, options)
        .save_file(path)
        .map_err(|e| FileError::Dxf(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zmaker_core::model::Model;
    use zmaker_core::path::{create_arc, create_circle, create_line};

    fn sample() -> Model {
        let mut child = Model::new().with_origin(Point2::new(10.0, 0.0));
        child.add_path(create_circle("hole", Point2::new(1.0, 1.0), 0.5));
        child.add_path(create_arc("bend", Point2::origin(), 2.0, 0.0, 90.0));

        let mut model = Model::new()
            .with_origin(Point2::new(1.0, 2.0))
            .with_units(UnitType::Inch);
        model.add_path(create_line("edge", Point2::origin(), Point2::new(5.0, 0.0)));
        model.add_model(child);
        model
    }

    fn reload(text: &str) -> dxf::Drawing {
        dxf::Drawing::load(&mut Cursor::new(text.as_bytes())).unwrap()
    }

    #[test]
    fn test_units_mapping() {
        assert_eq!(dxf_units(Some(UnitType::Inch)), dxf::enums::Units::Inches);
        assert_eq!(dxf_units(Some(UnitType::Meter)), dxf::enums::Units::Meters);
        assert_eq!(dxf_units(None), dxf::enums::Units::Unitless);
    }

    #[test]
    fn test_entities_use_absolute_coordinates() {
        let model = sample();
        let mut options = DxfOptions::default();
        let text = to_dxf(&Exportable::Model(&model), &mut options).unwrap();
        assert!(text.contains("$INSUNITS"));

        let drawing = reload(&text);
        let entities: Vec<_> = drawing.entities().collect();
        assert_eq!(entities.len(), 3);

        match &entities[0].specific {
            dxf::entities::EntityType::Line(line) => {
                assert_eq!(entities[0].common.layer, "edge");
                assert_eq!((line.p1.x, line.p1.y), (1.0, 2.0));
                assert_eq!((line.p2.x, line.p2.y), (6.0, 2.0));
            }
            other => panic!("expected line, got {:?}", other),
        }
        match &entities[1].specific {
            dxf::entities::EntityType::Circle(circle) => {
                assert_eq!((circle.center.x, circle.center.y), (12.0, 3.0));
                assert_eq!(circle.radius, 0.5);
            }
            other => panic!("expected circle, got {:?}", other),
        }
        match &entities[2].specific {
            dxf::entities::EntityType::Arc(arc) => {
                assert_eq!(entities[2].common.layer, "bend");
                assert_eq!((arc.start_angle, arc.end_angle), (0.0, 90.0));
            }
            other => panic!("expected arc, got {:?}", other),
        }
    }

    #[test]
    fn test_units_resolved_from_model() {
        let model = sample();
        let mut options = DxfOptions::default();
        let drawing = to_drawing(&Exportable::Model(&model), &mut options);

        assert_eq!(options.units, Some(UnitType::Inch));
        assert_eq!(drawing.header.default_drawing_units, dxf::enums::Units::Inches);
    }

    #[test]
    fn test_explicit_units_override_model() {
        let model = sample();
        let mut options = DxfOptions {
            units: Some(UnitType::Millimeter),
        };
        let drawing = to_drawing(&Exportable::Model(&model), &mut options);
        assert_eq!(drawing.header.default_drawing_units, dxf::enums::Units::Millimeters);
    }

    #[test]
    fn test_loose_paths_without_ids() {
        let paths = [
            create_line("", Point2::origin(), Point2::new(1.0, 1.0)),
            create_line("", Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)),
        ];
        let drawing = to_drawing(&Exportable::Paths(&paths), &mut DxfOptions::default());
        let layers: Vec<&str> = drawing.entities().map(|e| e.common.layer.as_str()).collect();
        assert_eq!(layers, ["0", "0"]);
    }

    #[test]
    fn test_export_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("part.dxf");
        let model = sample();
        export(&Exportable::Model(&model), &mut DxfOptions::default(), &file).unwrap();

        let drawing = dxf::Drawing::load_file(&file).unwrap();
        assert_eq!(drawing.entities().count(), 3);
    }
}
