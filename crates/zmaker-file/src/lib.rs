//! ZMaker 文件格式处理
//!
//! 支持：
//! - `.svg` 导出
//! - `.dxf` 导出
//! - `.json` 模型文件读写

pub mod dxf_io;
pub mod error;
pub mod export;
pub mod json;
pub mod xml;

use std::path::Path;

pub use dxf_io::DxfOptions;
pub use error::FileError;
pub use export::SvgOptions;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Dxf,
}

impl ExportFormat {
    /// 根据文件扩展名判断导出格式
    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "dxf" => Ok(ExportFormat::Dxf),
            _ => Err(FileError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a.svg")).unwrap(), ExportFormat::Svg);
        assert_eq!(ExportFormat::from_path(Path::new("out/B.DXF")).unwrap(), ExportFormat::Dxf);
        assert!(matches!(
            ExportFormat::from_path(Path::new("a.pdf")),
            Err(FileError::UnsupportedFormat(_))
        ));
        assert!(ExportFormat::from_path(Path::new("noext")).is_err());
    }
}
