pub mod aggregate;
pub mod engine;
pub mod generator;
pub mod pipeline;
pub mod verify;

pub use crate::domain::model::{GeneratedBatch, ScanData};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
