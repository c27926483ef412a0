use crate::adapters::http::DEFAULT_SOURCE_URL;
use crate::core::emit::OutputFormat;
use crate::core::merge::MergePolicy;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "xid-tablegen")]
#[command(about = "Generate XID_Start / XID_Continue range tables from the Unicode character database")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// Read a local DerivedCoreProperties.txt instead of downloading it
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, value_delimiter = ',', default_value = "XID_Start,XID_Continue")]
    pub properties: Vec<String>,

    #[arg(long = "format", value_enum, value_delimiter = ',', default_value = "c")]
    pub formats: Vec<OutputFormat>,

    #[arg(long, value_enum, default_value_t = MergePolicy::OverlapSafe)]
    pub merge_policy: MergePolicy,

    /// Write files here instead of printing to stdout
    #[arg(long)]
    pub output_dir: Option<String>,

    #[arg(long, default_value = "xid_tables")]
    pub file_stem: String,

    /// Bundle every rendered format into this zip inside the output directory
    #[arg(long)]
    pub archive: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log per-phase timing and memory statistics")]
    pub monitor: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            input: None,
            properties: vec!["XID_Start".to_string(), "XID_Continue".to_string()],
            formats: vec![OutputFormat::C],
            merge_policy: MergePolicy::default(),
            output_dir: None,
            file_stem: "xid_tables".to_string(),
            archive: None,
            verbose: false,
            json_logs: false,
            monitor: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn source_url(&self) -> &str {
        &self.source_url
    }

    fn source_file(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn properties(&self) -> &[String] {
        &self.properties
    }

    fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn output_dir(&self) -> Option<&str> {
        self.output_dir.as_deref()
    }

    fn file_stem(&self) -> &str {
        &self.file_stem
    }

    fn archive_name(&self) -> Option<&str> {
        self.archive.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.input {
            Some(path) => validation::validate_path("input", path)?,
            None => validation::validate_url("source_url", &self.source_url)?,
        }

        validation::validate_properties("properties", &self.properties)?;
        validation::validate_non_empty("format", &self.formats)?;
        validation::validate_non_empty_string("file_stem", &self.file_stem)?;

        if let Some(dir) = &self.output_dir {
            validation::validate_path("output_dir", dir)?;
        }
        if let Some(archive) = &self.archive {
            validation::validate_path("archive", archive)?;
            validation::validate_required_field("output_dir", &self.output_dir)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;

    #[test]
    fn test_defaults_reproduce_plain_run() {
        let config = CliConfig::parse_from(["xid-tablegen"]);

        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.properties, vec!["XID_Start", "XID_Continue"]);
        assert_eq!(config.formats, vec![OutputFormat::C]);
        assert_eq!(config.merge_policy, MergePolicy::OverlapSafe);
        assert!(config.output_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_lists_and_policy() {
        let config = CliConfig::parse_from([
            "xid-tablegen",
            "--properties",
            "ID_Start,ID_Continue",
            "--format",
            "rust,json",
            "--merge-policy",
            "strict-adjacency",
            "--output-dir",
            "out",
            "--archive",
            "tables.zip",
        ]);

        assert_eq!(config.properties, vec!["ID_Start", "ID_Continue"]);
        assert_eq!(config.formats, vec![OutputFormat::Rust, OutputFormat::Json]);
        assert_eq!(config.merge_policy, MergePolicy::StrictAdjacency);
        assert_eq!(config.archive_name(), Some("tables.zip"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_archive_requires_output_dir() {
        let config = CliConfig {
            archive: Some("tables.zip".to_string()),
            ..CliConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(EtlError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_property_and_url() {
        let config = CliConfig {
            properties: vec!["XID Start".to_string()],
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            source_url: "ftp://www.unicode.org/ucd.txt".to_string(),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_local_input_skips_url_check() {
        let config = CliConfig {
            source_url: String::new(),
            input: Some("DerivedCoreProperties.txt".to_string()),
            ..CliConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
