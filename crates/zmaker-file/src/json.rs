//! JSON 模型文件
//!
//! 读取时经由 [`Decoder`] 解码，按 [`Strictness`] 处理无法识别的节点；
//! 写入时直接序列化强类型模型。

use std::path::Path;

use serde_json::Value;
use zmaker_core::interop::{Decoder, Strictness};
use zmaker_core::model::Model;

use crate::error::Result;

/// 从 JSON 文本解析模型
pub fn parse_model(text: &str, strictness: Strictness) -> Result<Model> {
    let value: Value = serde_json::from_str(text)?;
    Ok(Decoder::new(strictness).decode_model(&value)?)
}

/// 读取模型文件
pub fn read_model(path: &Path, strictness: Strictness) -> Result<Model> {
    let text = std::fs::read_to_string(path)?;
    let model = parse_model(&text, strictness)?;
    tracing::debug!("读取模型 {}: {} 条路径", path.display(), model.path_count());
    Ok(model)
}

/// 将模型序列化为 JSON 文本
pub fn model_to_string(model: &Model) -> Result<String> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// 写入模型文件
pub fn write_model(model: &Model, path: &Path) -> Result<()> {
    std::fs::write(path, model_to_string(model)?)?;
    tracing::info!("保存模型 {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileError;
    use zmaker_core::math::Point2;
    use zmaker_core::shapes;
    use zmaker_core::units::UnitType;
    use zmaker_core::CoreError;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plate.json");

        let mut model = shapes::round_rectangle(20.0, 10.0, 2.0)
            .with_id("plate")
            .with_units(UnitType::Millimeter);
        model.add_model(shapes::bolt_rectangle(16.0, 6.0, 0.5).with_origin(Point2::new(2.0, 2.0)));

        write_model(&model, &file).unwrap();
        let loaded = read_model(&file, Strictness::Strict).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_parse_skips_unknown_paths() {
        let text = r#"{
            "paths": [
                {"type": "line", "id": "a", "origin": [0, 0], "end": [1, 0]},
                {"type": "bezier", "id": "b", "origin": [0, 0]}
            ]
        }"#;

        let model = parse_model(text, Strictness::Permissive).unwrap();
        assert_eq!(model.paths.len(), 1);

        let err = parse_model(text, Strictness::Strict).unwrap_err();
        assert!(matches!(err, FileError::Core(CoreError::UnsupportedPathVariant(_))));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_model("{ not json", Strictness::Permissive).unwrap_err();
        assert!(matches!(err, FileError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_model(&dir.path().join("nope.json"), Strictness::Permissive).unwrap_err();
        assert!(matches!(err, FileError::Io(_)));
    }
}
