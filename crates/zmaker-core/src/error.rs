//! 核心错误定义

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unsupported path variant: {0}")]
    UnsupportedPathVariant(String),

    #[error("Malformed path{}: {reason}", id_suffix(.id))]
    MalformedPath { id: Option<String>, reason: String },

    #[error("Malformed model{}: {reason}", id_suffix(.id))]
    MalformedModel { id: Option<String>, reason: String },

    #[error("Invalid arc sweep of {sweep} degrees (must not exceed 360)")]
    InvalidArcSweep { sweep: f64 },

    #[error("Unknown unit type: {0}")]
    UnknownUnit(String),
}

fn id_suffix(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" '{}'", id),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
