//! 无类型数据的识别与解码
//!
//! 外部导入的数据（JSON）按结构判定是点、路径还是模型，再解码为强类型的 [`Path`]/[`Model`]。
//! 未知的路径类型或缺字段的节点按 [`Strictness`] 处理：宽松模式跳过该节点并记录警告，
//! 兄弟节点继续解码；严格模式直接返回错误。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::math::Point2;
use crate::measure::arc_angle;
use crate::model::Model;
use crate::path::{Arc, Circle, Line, Path, PathType};
use crate::units::UnitType;

/// 解码策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// 跳过无法识别的节点
    #[default]
    Permissive,
    /// 遇到无法识别的节点即报错
    Strict,
}

/// 是否是点：长度不小于 2 的序列
pub fn is_point(value: &Value) -> bool {
    value.as_array().is_some_and(|items| items.len() > 1)
}

/// 是否是路径：`type` 与 `origin` 都非空
pub fn is_path(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| {
        obj.get("type").is_some_and(|v| !v.is_null())
            && obj.get("origin").is_some_and(|v| !v.is_null())
    })
}

/// 是否是模型：带有 `paths` 或 `models` 集合
pub fn is_model(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| {
        obj.get("paths").is_some_and(|v| !v.is_null())
            || obj.get("models").is_some_and(|v| !v.is_null())
    })
}

fn to_point(value: &Value) -> Option<Point2> {
    if !is_point(value) {
        return None;
    }
    let items = value.as_array()?;
    Some(Point2::new(items[0].as_f64()?, items[1].as_f64()?))
}

/// 解码器
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    strictness: Strictness,
}

impl Decoder {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// 解码一条路径
    pub fn decode_path(&self, value: &Value) -> Result<Path> {
        let id = value.get("id").and_then(Value::as_str).map(str::to_string);
        let malformed = |reason: String| CoreError::MalformedPath {
            id: id.clone(),
            reason,
        };

        let obj = value
            .as_object()
            .ok_or_else(|| malformed("expected an object".to_string()))?;
        let tag = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("missing type".to_string()))?;
        let path_type: PathType = tag.parse()?;

        if !obj.get("origin").is_some_and(is_point) {
            return Err(malformed("missing or invalid origin".to_string()));
        }

        let path = match path_type {
            PathType::Line => serde_json::from_value::<Line>(value.clone()).map(Path::Line),
            PathType::Circle => serde_json::from_value::<Circle>(value.clone()).map(Path::Circle),
            PathType::Arc => serde_json::from_value::<Arc>(value.clone()).map(Path::Arc),
        }
        .map_err(|e| malformed(e.to_string()))?;

        if let (Path::Arc(arc), Strictness::Strict) = (&path, self.strictness) {
            let sweep = arc_angle(arc);
            if sweep > 360.0 {
                return Err(CoreError::InvalidArcSweep { sweep });
            }
        }

        Ok(path)
    }

    /// 解码一个模型（递归）
    pub fn decode_model(&self, value: &Value) -> Result<Model> {
        let id = value.get("id").and_then(Value::as_str).map(str::to_string);
        let obj = value.as_object().ok_or_else(|| CoreError::MalformedModel {
            id: id.clone(),
            reason: "expected an object".to_string(),
        })?;

        let mut model = Model {
            id: id.clone(),
            model_type: obj.get("type").and_then(Value::as_str).map(str::to_string),
            ..Model::default()
        };

        if let Some(origin) = obj.get("origin").filter(|v| !v.is_null()) {
            model.origin = Some(to_point(origin).ok_or_else(|| CoreError::MalformedModel {
                id: id.clone(),
                reason: "invalid origin".to_string(),
            })?);
        }

        if let Some(units) = obj.get("units").and_then(Value::as_str) {
            match units.parse::<UnitType>() {
                Ok(units) => model.units = Some(units),
                Err(e) => self.tolerate(e)?,
            }
        }

        for (key, item) in collection(obj, "paths", &id)? {
            match self.decode_path(item) {
                Ok(mut path) => {
                    if let Some(key) = key.filter(|_| path.id().is_empty()) {
                        path.set_id(key);
                    }
                    model.paths.push(path);
                }
                Err(e) => self.tolerate(e)?,
            }
        }

        for (key, item) in collection(obj, "models", &id)? {
            match self.decode_model(item) {
                Ok(mut child) => {
                    if child.id.is_none() {
                        child.id = key.map(str::to_string);
                    }
                    model.models.push(child);
                }
                Err(e) => self.tolerate(e)?,
            }
        }

        Ok(model)
    }

    /// 宽松模式下记录并跳过错误，严格模式下返回错误
    fn tolerate(&self, error: CoreError) -> Result<()> {
        match self.strictness {
            Strictness::Strict => Err(error),
            Strictness::Permissive => {
                tracing::warn!("跳过无法解码的节点: {}", error);
                Ok(())
            }
        }
    }
}

/// 读取 `paths`/`models` 集合，支持数组或以标识为键的对象
///
/// 对象形式按文件中的书写顺序返回，并附带键名。
fn collection<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    id: &Option<String>,
) -> Result<Vec<(Option<&'a str>, &'a Value)>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().map(|item| (None, item)).collect()),
        Some(Value::Object(map)) => Ok(map.iter().map(|(k, v)| (Some(k.as_str()), v)).collect()),
        Some(_) => Err(CoreError::MalformedModel {
            id: id.clone(),
            reason: format!("'{}' must be an array or an object", key),
        }),
    }
}
