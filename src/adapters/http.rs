use crate::domain::model::SourceDocument;
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

/// Default location of the derived core properties table.
pub const DEFAULT_SOURCE_URL: &str =
    "https://www.unicode.org/Public/UCD/latest/ucd/DerivedCoreProperties.txt";

/// Single GET of a UTF-8 text document. Any failure is returned as-is; there is
/// no retry and no cache.
pub async fn fetch_document(client: &Client, url: &str) -> Result<SourceDocument> {
    tracing::debug!("Requesting {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    tracing::debug!("Source response status: {}", status);
    if !status.is_success() {
        return Err(EtlError::HttpStatusError {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    decode_document(url, body.to_vec())
}

pub fn decode_document(origin: &str, bytes: Vec<u8>) -> Result<SourceDocument> {
    let text = String::from_utf8(bytes).map_err(|e| EtlError::DecodeError {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;

    Ok(SourceDocument {
        origin: origin.to_string(),
        text,
    })
}
