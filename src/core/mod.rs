pub mod annotation;
pub mod audit;
pub mod etl;
pub mod expand;
pub mod pipeline;
pub mod score;
pub mod transition;

pub use crate::domain::model::{PointLog, PointRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
