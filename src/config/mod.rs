#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;

/// One-line description of what a run with `config` will do.
pub fn describe<C: ConfigProvider>(config: &C) -> String {
    let source = match config.source_file() {
        Some(file) => format!("file {}", file),
        None => config.source_url().to_string(),
    };
    let formats: Vec<String> = config
        .output_formats()
        .iter()
        .map(|format| format.to_string())
        .collect();
    let destination = match (config.output_dir(), config.archive_name()) {
        (Some(dir), Some(archive)) => format!("{}/{}", dir, archive),
        (Some(dir), None) => format!("{}/{}.*", dir, config.file_stem()),
        (None, _) => "stdout".to_string(),
    };

    format!(
        "source={} properties=[{}] merge={} formats=[{}] output={}",
        source,
        config.properties().join(", "),
        config.merge_policy(),
        formats.join(", "),
        destination
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_default_toml_config() {
        let config = TomlConfig::from_toml_str("[pipeline]\nname = \"xid\"\n").unwrap();

        assert_eq!(
            describe(&config),
            format!(
                "source={} properties=[XID_Start, XID_Continue] merge=overlap-safe formats=[c] output=stdout",
                crate::adapters::http::DEFAULT_SOURCE_URL
            )
        );
    }
}
