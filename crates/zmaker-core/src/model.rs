//! 模型树
//!
//! 模型是路径与子模型的递归分组。每个路径/子模型的坐标都相对于其直接父模型的原点，
//! 绝对位置是从根到该节点路径上所有原点之和。
//!
//! 子模型以 `Vec<Model>` 持有，因此模型树天然无环。

use serde::{Deserialize, Serialize};

use crate::math::Point2;
use crate::path::Path;
use crate::point;
use crate::units::UnitType;

/// 模型节点
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// 标识（不要求唯一）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// 类型元数据，内核不解释
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,

    /// 原点，缺省视为 (0, 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Point2>,

    /// 单位制
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitType>,

    /// 子路径
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<Path>,

    /// 子模型
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<Model>,
}

impl Model {
    /// 创建空模型
    pub fn new() -> Self {
        Self::default()
    }

    /// 由路径列表创建模型
    pub fn from_paths(paths: Vec<Path>) -> Self {
        Self {
            paths,
            ..Self::default()
        }
    }

    /// 使用指定的标识
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// 使用指定的类型元数据
    pub fn with_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = Some(model_type.into());
        self
    }

    /// 使用指定的原点
    pub fn with_origin(mut self, origin: Point2) -> Self {
        self.origin = Some(origin);
        self
    }

    /// 使用指定的单位制
    pub fn with_units(mut self, units: UnitType) -> Self {
        self.units = Some(units);
        self
    }

    /// 添加路径
    pub fn add_path(&mut self, path: impl Into<Path>) {
        self.paths.push(path.into());
    }

    /// 添加子模型
    pub fn add_model(&mut self, model: Model) {
        self.models.push(model);
    }

    /// 原点，缺省时为零点
    pub fn origin_or_zero(&self) -> Point2 {
        self.origin.unwrap_or_else(point::zero)
    }

    /// 模型声明的单位制
    pub fn units(&self) -> Option<UnitType> {
        self.units
    }

    /// 模型树中的路径总数
    pub fn path_count(&self) -> usize {
        self.paths.len() + self.models.iter().map(Model::path_count).sum::<usize>()
    }

    /// 移动到绝对位置，子节点坐标是相对的，不受影响
    pub fn move_to(&mut self, origin: &Point2) -> &mut Self {
        self.origin = Some(*origin);
        self
    }

    /// 旋转模型
    ///
    /// 旋转中心先换算到模型的局部坐标系（`center - origin`），
    /// 然后对直接路径和子模型递归应用同一局部中心；模型自身的原点不变。
    pub fn rotate(&mut self, angle_in_degrees: f64, rotation_origin: &Point2) -> &mut Self {
        let offset_origin = point::subtract(rotation_origin, &self.origin_or_zero());

        for path in &mut self.paths {
            path.rotate(angle_in_degrees, &offset_origin);
        }
        for child in &mut self.models {
            child.rotate(angle_in_degrees, &offset_origin);
        }
        self
    }

    /// 缩放模型
    ///
    /// `scale_origin` 控制是否缩放本模型的原点，根模型通常传 `false`；
    /// 子模型总是连同原点一起缩放。
    pub fn scale(&mut self, scale_value: f64, scale_origin: bool) -> &mut Self {
        if scale_origin {
            if let Some(origin) = &mut self.origin {
                *origin = point::scale(origin, scale_value);
            }
        }

        for path in &mut self.paths {
            path.scale(scale_value);
        }
        for child in &mut self.models {
            child.scale(scale_value, true);
        }
        self
    }

    /// 沿 x 轴和/或 y 轴镜像，返回新模型
    ///
    /// 源模型中缺省的字段在结果中同样缺省。
    pub fn mirrored(&self, mirror_x: bool, mirror_y: bool) -> Model {
        Model {
            id: self.id.as_ref().map(|id| format!("{}_mirror", id)),
            model_type: self.model_type.clone(),
            origin: self
                .origin
                .map(|origin| point::mirror(&origin, mirror_x, mirror_y)),
            units: self.units,
            paths: self
                .paths
                .iter()
                .map(|p| p.mirrored(mirror_x, mirror_y, None))
                .collect(),
            models: self
                .models
                .iter()
                .map(|m| m.mirrored(mirror_x, mirror_y))
                .collect(),
        }
    }

    /// 将所有子节点移动到绝对位置
    ///
    /// 完成后子树中所有路径都是绝对坐标，所有模型原点都为零。再次调用不产生变化。
    pub fn flatten(&mut self, origin: Option<&Point2>) -> &mut Self {
        let new_origin = point::add(&self.origin_or_zero(), origin, false);

        for path in &mut self.paths {
            path.move_relative(&new_origin);
        }
        for child in &mut self.models {
            child.flatten(Some(&new_origin));
        }

        self.origin = Some(point::zero());
        self
    }
}

/// 按标识查找子模型，返回下标和模型
pub fn find_by_id<'a>(models: &'a [Model], id: &str) -> Option<(usize, &'a Model)> {
    models
        .iter()
        .enumerate()
        .find(|(_, m)| m.id.as_deref() == Some(id))
}
