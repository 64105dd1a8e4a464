//! ZMaker 核心几何引擎
//!
//! 提供2D参数化图形的点、路径、模型树，以及变换、测量和单位换算功能。
//!
//! # 架构设计
//!
//! 图形以模型树组织：
//! - `Path`: 直线、圆、圆弧三种基本路径，坐标相对于所属模型
//! - `Model`: 带原点的路径集合，可以嵌套子模型
//! - `Measurement`: 轴对齐包围盒
//!
//! 变换直接修改原对象并返回自身引用，便于链式调用；镜像返回新的对象。
//!
//! # 示例
//!
//! ```rust
//! use zmaker_core::prelude::*;
//!
//! // 一个带圆孔的矩形
//! let mut plate = shapes::rectangle(100.0, 50.0);
//! plate.add_path(create_circle("hole", Point2::new(50.0, 25.0), 10.0));
//! plate.rotate(90.0, &Point2::origin());
//!
//! let extents = model_extents(&plate).unwrap();
//! println!("Size: {} x {}", extents.width(), extents.height());
//! ```

pub mod angle;
pub mod error;
pub mod exporter;
pub mod interop;
pub mod math;
pub mod measure;
pub mod model;
pub mod path;
pub mod point;
pub mod shapes;
pub mod transform;
pub mod units;

pub use error::{CoreError, Result};

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::error::CoreError;
    pub use crate::exporter::{Exportable, PathVisitor, Walker};
    pub use crate::interop::{Decoder, Strictness};
    pub use crate::math::{Measurement, Point2};
    pub use crate::measure::{model_extents, path_extents, path_length};
    pub use crate::model::Model;
    pub use crate::path::{create_arc, create_circle, create_line, Arc, Circle, Line, Path, PathType};
    pub use crate::shapes;
    pub use crate::units::{conversion_scale, UnitType};
}
