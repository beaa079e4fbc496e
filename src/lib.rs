pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use adapters::LocalStorage;
pub use config::JobConfig;

pub use crate::core::{etl::EtlEngine, expand::expand_rows, pipeline::PointLogPipeline};
pub use domain::model::{
    Annotation, Classification, FaultType, LadderValue, PointLog, PointRecord, RawPointRow,
    ScorePair, ServeDirection, UnknownReason,
};
pub use utils::error::{PointLogError, Result};
