//! 模型树遍历
//!
//! 导出器实现 [`PathVisitor`]，每种路径一个方法；[`Walker`] 负责遍历路径、模型或混合集合，
//! 并把累积的绝对偏移传给访问者。
//!
//! 访问者还可以提供两个修正钩子：`fix_point` 在累加模型原点前修正原点，
//! `fix_path` 在渲染前返回路径的修正副本（例如翻转 y 轴）。

use std::borrow::Cow;

use crate::math::Point2;
use crate::model::Model;
use crate::path::{Arc, Circle, Line, Path};
use crate::point;
use crate::units::UnitType;

/// 路径访问者
pub trait PathVisitor {
    fn line(&mut self, line: &Line, offset: &Point2);

    fn circle(&mut self, circle: &Circle, offset: &Point2);

    fn arc(&mut self, arc: &Arc, offset: &Point2);

    /// 修正模型原点
    fn fix_point(&self, point: &Point2) -> Point2 {
        *point
    }

    /// 渲染前修正路径
    fn fix_path<'a>(&self, path: &'a Path, _offset: &Point2) -> Cow<'a, Path> {
        Cow::Borrowed(path)
    }
}

/// 可导出的对象：路径、模型或它们的混合集合
#[derive(Debug, Clone, Copy)]
pub enum Exportable<'a> {
    Path(&'a Path),
    Paths(&'a [Path]),
    Model(&'a Model),
    Models(&'a [Model]),
    Collection(&'a [Exportable<'a>]),
}

impl<'a> Exportable<'a> {
    /// 对象为模型时，返回其单位制
    pub fn model_units(&self) -> Option<UnitType> {
        match self {
            Exportable::Model(model) => model.units,
            _ => None,
        }
    }

    /// 将对象整理成一个临时模型，供测量使用
    pub fn to_model(&self) -> Model {
        match self {
            Exportable::Path(path) => Model::from_paths(vec![(*path).clone()]),
            Exportable::Paths(paths) => Model::from_paths(paths.to_vec()),
            Exportable::Model(model) => (*model).clone(),
            Exportable::Models(models) => Model {
                models: models.to_vec(),
                ..Model::default()
            },
            Exportable::Collection(items) => Model {
                models: items.iter().map(Exportable::to_model).collect(),
                ..Model::default()
            },
        }
    }
}

impl<'a> From<&'a Path> for Exportable<'a> {
    fn from(path: &'a Path) -> Self {
        Exportable::Path(path)
    }
}

impl<'a> From<&'a Model> for Exportable<'a> {
    fn from(model: &'a Model) -> Self {
        Exportable::Model(model)
    }
}

impl<'a> From<&'a [Path]> for Exportable<'a> {
    fn from(paths: &'a [Path]) -> Self {
        Exportable::Paths(paths)
    }
}

impl<'a> From<&'a [Model]> for Exportable<'a> {
    fn from(models: &'a [Model]) -> Self {
        Exportable::Models(models)
    }
}

/// 遍历器
pub struct Walker<'v, V: PathVisitor> {
    visitor: &'v mut V,
}

impl<'v, V: PathVisitor> Walker<'v, V> {
    pub fn new(visitor: &'v mut V) -> Self {
        Self { visitor }
    }

    /// 导出一条路径
    pub fn export_path(&mut self, path: &Path, offset: &Point2) {
        let fixed = self.visitor.fix_path(path, offset);
        match fixed.as_ref() {
            Path::Line(line) => self.visitor.line(line, offset),
            Path::Circle(circle) => self.visitor.circle(circle, offset),
            Path::Arc(arc) => self.visitor.arc(arc, offset),
        }
    }

    /// 导出一个模型及其全部子节点
    pub fn export_model(&mut self, model: &Model, offset: &Point2) {
        let origin = self.visitor.fix_point(&model.origin_or_zero());
        let new_offset = point::add(&origin, Some(offset), false);

        for path in &model.paths {
            self.export_path(path, &new_offset);
        }
        for child in &model.models {
            self.export_model(child, &new_offset);
        }
    }

    /// 导出任意对象
    pub fn export_item(&mut self, item: &Exportable<'_>, origin: &Point2) {
        match item {
            Exportable::Path(path) => self.export_path(path, origin),
            Exportable::Paths(paths) => {
                for path in paths.iter() {
                    self.export_path(path, origin);
                }
            }
            Exportable::Model(model) => self.export_model(model, origin),
            Exportable::Models(models) => {
                for model in models.iter() {
                    self.export_model(model, origin);
                }
            }
            Exportable::Collection(items) => {
                for item in items.iter() {
                    self.export_item(item, origin);
                }
            }
        }
    }
}
