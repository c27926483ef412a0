use crate::adapters::http::DEFAULT_SOURCE_URL;
use crate::core::emit::OutputFormat;
use crate::core::merge::MergePolicy;
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    /// 本地檔案優先於 url
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_properties")]
    pub properties: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default)]
    pub merge_policy: MergePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<OutputFormat>,
    pub output_dir: Option<String>,
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
    pub archive: Option<ArchiveConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_properties() -> Vec<String> {
    vec!["XID_Start".to_string(), "XID_Continue".to_string()]
}

fn default_output_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::C]
}

fn default_file_stem() -> String {
    "xid_tables".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            file: None,
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            properties: default_properties(),
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_formats: default_output_formats(),
            output_dir: None,
            file_stem: default_file_stem(),
            archive: None,
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern compiles"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${UCD_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn source_url(&self) -> &str {
        &self.source.url
    }

    fn source_file(&self) -> Option<&str> {
        self.source.file.as_deref()
    }

    fn properties(&self) -> &[String] {
        &self.extract.properties
    }

    fn merge_policy(&self) -> MergePolicy {
        self.transform.merge_policy
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.load.output_formats
    }

    fn output_dir(&self) -> Option<&str> {
        self.load.output_dir.as_deref()
    }

    fn file_stem(&self) -> &str {
        &self.load.file_stem
    }

    fn archive_name(&self) -> Option<&str> {
        self.load
            .archive
            .as_ref()
            .filter(|archive| archive.enabled)
            .map(|archive| archive.filename.as_str())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;

        match &self.source.file {
            Some(file) => validation::validate_path("source.file", file)?,
            None => validation::validate_url("source.url", &self.source.url)?,
        }

        validation::validate_properties("extract.properties", &self.extract.properties)?;
        validation::validate_non_empty("load.output_formats", &self.load.output_formats)?;
        validation::validate_non_empty_string("load.file_stem", &self.load.file_stem)?;

        if let Some(dir) = &self.load.output_dir {
            validation::validate_path("load.output_dir", dir)?;
        }
        if let Some(archive) = self.archive_name() {
            validation::validate_path("load.archive.filename", archive)?;
            validation::validate_required_field("load.output_dir", &self.load.output_dir)?;
        }

        Ok(())
    }
}
