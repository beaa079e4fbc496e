use crate::core::audit::AuditSummary;
use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::{Duration, Instant};

/// What one engine run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_paths: Vec<String>,
    pub audit: AuditSummary,
    pub elapsed: Duration,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunReport> {
        let start = Instant::now();
        tracing::info!("Starting point-log ETL process...");

        // Extract
        let log = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", log.rows.len());

        // Transform
        let result = self.pipeline.transform(log).await?;
        tracing::info!(
            "Transformed into {} serve records ({} second serves)",
            result.records.len(),
            result.audit.second_serves
        );
        let audit = result.audit.clone();

        // Load
        let output_paths = self.pipeline.load(result).await?;
        for path in &output_paths {
            tracing::info!("📁 Output saved to: {}", path);
        }

        Ok(RunReport {
            output_paths,
            audit,
            elapsed: start.elapsed(),
        })
    }
}
