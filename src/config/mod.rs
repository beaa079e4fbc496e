#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::pipeline::output_stem;
use crate::domain::ports::{ColumnSelector, ConfigProvider};
use crate::utils::error::{PointLogError, Result};
use std::collections::HashMap;
use crate::utils::validation::{
    validate_delimiter, validate_file_extensions, validate_output_formats, validate_path, Validate,
};

pub const DEFAULT_SCORE_COLUMN: &str = "Points";
/// The scraped table keeps its commentary in the fifth column.
pub const DEFAULT_INFO_COLUMN: usize = 4;

/// Settings for processing a single match log.
#[derive(Debug, Clone, PartialEq)]
pub struct JobConfig {
    pub input_path: String,
    pub output_path: String,
    pub score_column: ColumnSelector,
    pub info_column: ColumnSelector,
    pub delimiter: char,
    pub output_formats: Vec<String>,
    pub compress: bool,
}

impl JobConfig {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            score_column: ColumnSelector::Name(DEFAULT_SCORE_COLUMN.to_string()),
            info_column: ColumnSelector::Index(DEFAULT_INFO_COLUMN),
            delimiter: ',',
            output_formats: vec!["csv".to_string()],
            compress: false,
        }
    }

    /// TSV exports are read with a tab delimiter unless one was given explicitly.
    pub fn with_inferred_delimiter(mut self) -> Self {
        if self.delimiter == ','
            && std::path::Path::new(&self.input_path)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"))
        {
            self.delimiter = '\t';
        }
        self
    }
}

/// Rejects job lists where two inputs would write the same output files.
pub fn validate_distinct_outputs(field_name: &str, jobs: &[JobConfig]) -> Result<()> {
    let mut seen: HashMap<(&str, String), &str> = HashMap::new();
    for job in jobs {
        let key = (job.output_path.as_str(), output_stem(&job.input_path));
        if let Some(previous) = seen.insert(key, &job.input_path) {
            return Err(PointLogError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: job.input_path.clone(),
                reason: format!(
                    "Outputs would overwrite those of '{}'; rename one input or process it separately",
                    previous
                ),
            });
        }
    }
    Ok(())
}

impl ConfigProvider for JobConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn score_column(&self) -> &ColumnSelector {
        &self.score_column
    }

    fn info_column(&self) -> &ColumnSelector {
        &self.info_column
    }

    fn delimiter(&self) -> Result<u8> {
        validate_delimiter("delimiter", self.delimiter)?;
        Ok(self.delimiter as u8)
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn compress(&self) -> bool {
        self.compress
    }
}

impl Validate for JobConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_file_extensions("input", std::slice::from_ref(&self.input_path), &["csv", "tsv"])?;
        validate_path("output_path", &self.output_path)?;
        validate_delimiter("delimiter", self.delimiter)?;
        validate_output_formats("formats", &self.output_formats)?;
        Ok(())
    }
}
