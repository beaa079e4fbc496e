use crate::config::{validate_distinct_outputs, JobConfig, DEFAULT_SCORE_COLUMN};
use crate::domain::ports::ColumnSelector;
use crate::utils::error::{PointLogError, Result};
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "tennis-pointlog")]
#[command(about = "Normalize scraped tennis point logs into one record per serve")]
pub struct CliConfig {
    /// Exported point-log tables (CSV or TSV), comma separated
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub input: Vec<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Score column: header name or 0-based index
    #[arg(long, default_value = DEFAULT_SCORE_COLUMN)]
    pub score_column: ColumnSelector,

    /// Commentary column: header name or 0-based index
    #[arg(long, default_value = "4")]
    pub info_column: ColumnSelector,

    /// Input delimiter; `.tsv` inputs default to tab
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    #[arg(long, value_delimiter = ',', default_value = "csv")]
    pub formats: Vec<String>,

    /// Pack every output of a match into one ZIP file
    #[arg(long)]
    pub zip: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// One job per input file.
    pub fn jobs(&self) -> Vec<JobConfig> {
        self.input
            .iter()
            .map(|input| {
                JobConfig {
                    input_path: input.clone(),
                    output_path: self.output_path.clone(),
                    score_column: self.score_column.clone(),
                    info_column: self.info_column.clone(),
                    delimiter: self.delimiter,
                    output_formats: self.formats.clone(),
                    compress: self.zip,
                }
                .with_inferred_delimiter()
            })
            .collect()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.input.is_empty() {
            return Err(PointLogError::MissingConfigError {
                field: "input".to_string(),
            });
        }
        let jobs = self.jobs();
        for job in &jobs {
            job.validate()?;
        }
        validate_distinct_outputs("input", &jobs)
    }
}
