use crate::core::emit::OutputFormat;
use crate::core::merge::MergePolicy;
use crate::domain::model::{SourceDocument, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Path understood by every `Storage` as standard output.
pub const STDOUT_PATH: &str = "-";

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    /// Local property file that replaces the network fetch.
    fn source_file(&self) -> Option<&str>;
    fn properties(&self) -> &[String];
    fn merge_policy(&self) -> MergePolicy;
    fn output_formats(&self) -> &[OutputFormat];
    /// `None` sends everything to stdout.
    fn output_dir(&self) -> Option<&str>;
    fn file_stem(&self) -> &str;
    fn archive_name(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceDocument>;
    async fn transform(&self, source: SourceDocument) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
