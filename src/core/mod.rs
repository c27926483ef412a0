pub mod emit;
pub mod etl;
pub mod extract;
pub mod merge;
pub mod pipeline;

pub use crate::domain::model::{PropertyTable, Range, SourceDocument, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
