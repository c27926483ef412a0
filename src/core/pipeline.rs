use crate::adapters::http::{decode_document, fetch_document};
use crate::core::emit::{render, OutputFormat};
use crate::core::extract::extract_ranges;
use crate::core::merge::merge_ranges;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{PropertyTable, SourceDocument, TransformResult};
use crate::domain::ports::STDOUT_PATH;
use crate::utils::error::Result;
use reqwest::Client;
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

const TIMESTAMP_PLACEHOLDER: &str = "{timestamp}";

pub struct TablePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> TablePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    /// Renders every configured format before anything is written, so a
    /// failing renderer leaves no partial output behind.
    fn render_all(&self, result: &TransformResult) -> Result<Vec<(OutputFormat, String)>> {
        self.config
            .output_formats()
            .iter()
            .map(|format| {
                render(*format, &result.origin, &result.tables).map(|text| (*format, text))
            })
            .collect()
    }

    fn resolve_file_stem(&self) -> String {
        let stem = self.config.file_stem();
        if stem.contains(TIMESTAMP_PLACEHOLDER) {
            let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
            stem.replace(TIMESTAMP_PLACEHOLDER, &timestamp)
        } else {
            stem.to_string()
        }
    }
}

fn bundle_archive(files: &[(String, String)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, content) in files {
        zip.start_file(name.as_str(), SimpleFileOptions::default())?;
        zip.write_all(content.as_bytes())?;
    }

    // 完成並取回底層 Vec<u8>
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TablePipeline<S, C> {
    async fn extract(&self) -> Result<SourceDocument> {
        match self.config.source_file() {
            Some(path) => {
                tracing::debug!("Reading property table from file: {}", path);
                let bytes = self.storage.read_file(path).await?;
                decode_document(path, bytes)
            }
            None => {
                tracing::info!("Downloading data from {} ...", self.config.source_url());
                fetch_document(&self.client, self.config.source_url()).await
            }
        }
    }

    async fn transform(&self, source: SourceDocument) -> Result<TransformResult> {
        let policy = self.config.merge_policy();
        let mut tables = Vec::with_capacity(self.config.properties().len());
        let mut raw_range_count = 0;

        for property in self.config.properties() {
            let raw = extract_ranges(&source.text, property)?;
            raw_range_count += raw.len();

            let raw_len = raw.len();
            let table = PropertyTable::new(property.as_str(), merge_ranges(raw, policy));

            if table.is_empty() {
                tracing::warn!("No records found for property {}", property);
            }
            tracing::debug!(
                "{}: {} raw ranges -> {} merged ranges ({} code points, policy {})",
                property,
                raw_len,
                table.len(),
                table.code_point_count(),
                policy
            );

            tables.push(table);
        }

        Ok(TransformResult {
            origin: source.origin,
            tables,
            raw_range_count,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let rendered = self.render_all(&result)?;

        let Some(output_dir) = self.config.output_dir() else {
            let combined: String = rendered.into_iter().map(|(_, text)| text).collect();
            self.storage
                .write_file(STDOUT_PATH, combined.as_bytes())
                .await?;
            return Ok("stdout".to_string());
        };

        let stem = self.resolve_file_stem();
        let files: Vec<(String, String)> = rendered
            .into_iter()
            .map(|(format, text)| (format!("{}.{}", stem, format.extension()), text))
            .collect();

        if let Some(archive) = self.config.archive_name() {
            let zip_data = bundle_archive(&files)?;
            let path = Path::new(output_dir).join(archive);
            let path = path.to_string_lossy();

            tracing::debug!(
                "Writing archive with {} files ({} bytes) to {}",
                files.len(),
                zip_data.len(),
                path
            );
            self.storage.write_file(&path, &zip_data).await?;
            return Ok(path.into_owned());
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, text) in &files {
            let path = Path::new(output_dir).join(name);
            let path = path.to_string_lossy();
            tracing::debug!("Writing {} ({} bytes)", path, text.len());
            self.storage.write_file(&path, text.as_bytes()).await?;
            written.push(path.into_owned());
        }

        Ok(written.join(", "))
    }
}
