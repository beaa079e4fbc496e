use crate::config::{
    validate_distinct_outputs, JobConfig, DEFAULT_INFO_COLUMN, DEFAULT_SCORE_COLUMN,
};
use crate::domain::ports::ColumnSelector;
use crate::utils::error::{PointLogError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_required_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub columns: Option<ColumnsConfig>,
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub inputs: Option<Vec<String>>,
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsConfig {
    pub score: Option<ColumnSelector>,
    pub info: Option<ColumnSelector>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PointLogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PointLogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MATCH_DIR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn inputs(&self) -> &[String] {
        self.source.inputs.as_deref().unwrap_or(&[])
    }

    pub fn score_column(&self) -> ColumnSelector {
        self.columns
            .as_ref()
            .and_then(|c| c.score.clone())
            .unwrap_or_else(|| ColumnSelector::Name(DEFAULT_SCORE_COLUMN.to_string()))
    }

    pub fn info_column(&self) -> ColumnSelector {
        self.columns
            .as_ref()
            .and_then(|c| c.info.clone())
            .unwrap_or(ColumnSelector::Index(DEFAULT_INFO_COLUMN))
    }

    pub fn compression_enabled(&self) -> bool {
        self.load.compression.as_ref().is_some_and(|c| c.enabled)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn output_path(&self) -> &str {
        &self.load.output_path
    }

    pub fn jobs(&self) -> Vec<JobConfig> {
        self.inputs()
            .iter()
            .map(|input| {
                let job = JobConfig {
                    input_path: input.clone(),
                    output_path: self.load.output_path.clone(),
                    score_column: self.score_column(),
                    info_column: self.info_column(),
                    delimiter: self.source.delimiter.unwrap_or(','),
                    output_formats: self.load.output_formats.clone(),
                    compress: self.compression_enabled(),
                };
                if self.source.delimiter.is_some() {
                    job
                } else {
                    job.with_inferred_delimiter()
                }
            })
            .collect()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        let inputs = validate_required_field("source.inputs", &self.source.inputs)?;
        if inputs.is_empty() {
            return Err(PointLogError::MissingConfigError {
                field: "source.inputs".to_string(),
            });
        }

        let jobs = self.jobs();
        for job in &jobs {
            job.validate()?;
        }
        validate_distinct_outputs("source.inputs", &jobs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
