//! 文件操作错误定义

use thiserror::Error;
use zmaker_core::CoreError;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Core(#[from] CoreError),

    #[error("DXF error: {0}")]
    Dxf(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, FileError>;
