pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{http::DEFAULT_SOURCE_URL, storage::LocalStorage};
pub use crate::core::{
    emit::{render, OutputFormat},
    etl::EtlEngine,
    extract::extract_ranges,
    merge::{merge_ranges, MergePolicy},
    pipeline::TablePipeline,
};
pub use crate::domain::model::{CodePoint, PropertyTable, Range};
pub use crate::utils::error::{EtlError, Result};
