use crate::adapters::table;
use crate::core::audit::AuditSummary;
use crate::core::expand::expand_rows;
use crate::core::{ConfigProvider, Pipeline, PointLog, Storage, TransformResult};
use crate::utils::error::{PointLogError, Result};
use std::io::Write;
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};

/// File stem shared by every output of a match log. Two inputs with the same
/// stem and output directory would overwrite each other.
pub fn output_stem(input_path: &str) -> String {
    Path::new(input_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("pointlog")
        .to_string()
}

/// Reads one exported point log, expands it into serve records and writes
/// the flat tables plus an audit summary next to each other.
pub struct PointLogPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PointLogPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn output_stem(&self) -> String {
        output_stem(self.config.input_path())
    }

    fn output_location(&self, file_name: &str) -> String {
        Path::new(self.config.output_path())
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }

    fn render_outputs(&self, result: &TransformResult) -> Result<Vec<(String, Vec<u8>)>> {
        let stem = self.output_stem();
        let mut files = Vec::new();

        for format in self.config.output_formats() {
            let data = match format.as_str() {
                "csv" => table::write_delimited(&result.headers, &result.records, b',')?,
                "tsv" => table::write_delimited(&result.headers, &result.records, b'\t')?,
                "json" => table::write_json(&result.headers, &result.records)?,
                other => {
                    tracing::warn!("Skipping unsupported output format: {}", other);
                    continue;
                }
            };
            files.push((format!("{}_points.{}", stem, format), data));
        }

        files.push((
            format!("{}_audit.json", stem),
            serde_json::to_vec_pretty(&result.audit)?,
        ));
        Ok(files)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PointLogPipeline<S, C> {
    async fn extract(&self) -> Result<PointLog> {
        tracing::debug!("Reading point log from: {}", self.config.input_path());
        let delimiter = self.config.delimiter()?;
        let data = self
            .storage
            .read_file(self.config.input_path())
            .await
            .map_err(|e| match e {
                // 讀取失敗屬於輸入問題，不是寫出失敗
                PointLogError::IoError(source) => PointLogError::InputReadError {
                    path: self.config.input_path().to_string(),
                    source,
                },
                other => other,
            })?;

        let log = table::read_point_log(
            &data,
            delimiter,
            self.config.score_column(),
            self.config.info_column(),
        )?;

        if log.rows.is_empty() {
            tracing::warn!("Point log {} has no rows", self.config.input_path());
        }
        Ok(log)
    }

    async fn transform(&self, log: PointLog) -> Result<TransformResult> {
        let records = expand_rows(&log.rows);
        let audit = AuditSummary::from_records(self.config.input_path(), log.rows.len(), &records);

        if audit.unknown_total() > 0 {
            tracing::warn!(
                "{} of {} points could not be classified: {:?}",
                audit.unknown_total(),
                audit.input_rows,
                audit.unknown
            );
        }

        Ok(TransformResult {
            headers: log.headers,
            records,
            audit,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<Vec<String>> {
        let files = self.render_outputs(&result)?;

        if !self.config.compress() {
            let mut written = Vec::with_capacity(files.len());
            for (name, data) in files {
                let location = self.output_location(&name);
                tracing::debug!("Writing {} ({} bytes)", location, data.len());
                self.storage.write_file(&location, &data).await?;
                written.push(location);
            }
            return Ok(written);
        }

        tracing::debug!("Creating ZIP file with {} files", files.len());

        // 創建ZIP文件
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, data) in &files {
                zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                zip.write_all(data)?;
            }
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        let location = self.output_location(&format!("{}_points.zip", self.output_stem()));
        tracing::debug!("Writing ZIP file ({} bytes) to {}", zip_data.len(), location);
        self.storage.write_file(&location, &zip_data).await?;

        Ok(vec![location])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Classification;
    use crate::domain::ports::ColumnSelector;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                PointLogError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
        score_column: ColumnSelector,
        info_column: ColumnSelector,
        output_formats: Vec<String>,
        compress: bool,
    }

    impl MockConfig {
        fn new(input_path: &str) -> Self {
            Self {
                input_path: input_path.to_string(),
                output_path: "out".to_string(),
                score_column: ColumnSelector::Name("Points".to_string()),
                info_column: ColumnSelector::Index(4),
                output_formats: vec!["csv".to_string()],
                compress: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
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
            Ok(b',')
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn compress(&self) -> bool {
            self.compress
        }
    }

    const MATCH_LOG: &str = "Set,Game,Server,Points,Commentary\n\
        1,1,A,0-0,\"1st serve wide, fault (net). 2nd serve to body; backhand error\"\n\
        1,1,A,15-0,serve down the T; ace\n\
        1,1,A,30-0,serve wide; forehand winner\n\
        1,1,A,40-0,serve to body; return error\n\
        ,,,,\n\
        1,2,B,0-0,serve wide\n";

    #[tokio::test]
    async fn test_extract_reads_rows() {
        let storage = MockStorage::with_file("match.csv", MATCH_LOG);
        let pipeline = PointLogPipeline::new(storage, MockConfig::new("match.csv"));

        let log = pipeline.extract().await.unwrap();

        assert_eq!(log.headers[3], "Points");
        assert_eq!(log.rows.len(), 6);
        assert_eq!(log.rows[4].score, None);
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let storage = MockStorage::with_file("other.csv", MATCH_LOG);
        let pipeline = PointLogPipeline::new(storage, MockConfig::new("match.csv"));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(
            err,
            PointLogError::InputReadError { ref path, .. } if path == "match.csv"
        ));
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Input);
    }

    #[tokio::test]
    async fn test_extract_rejects_non_ascii_delimiter() {
        let storage = MockStorage::with_file("match.csv", MATCH_LOG);
        let mut job = crate::config::JobConfig::new("match.csv", "out");
        job.delimiter = '‖';
        let pipeline = PointLogPipeline::new(storage, job);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, PointLogError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_output_stem_ignores_directory_and_extension() {
        assert_eq!(output_stem("a/match.csv"), "match");
        assert_eq!(output_stem("b/match.tsv"), "match");
        assert_eq!(output_stem(""), "pointlog");
    }

    #[tokio::test]
    async fn test_transform_expands_and_audits() {
        let storage = MockStorage::with_file("match.csv", MATCH_LOG);
        let pipeline = PointLogPipeline::new(storage, MockConfig::new("match.csv"));

        let log = pipeline.extract().await.unwrap();
        let result = pipeline.transform(log).await.unwrap();

        assert_eq!(result.records.len(), 7);
        assert!(result.records[0].is_first_serve);
        assert!(!result.records[1].is_first_serve);
        assert_eq!(result.records[1].left_win, Classification::LeftWon);
        // 40-0 before the separator ends the game
        assert_eq!(result.records[4].left_win, Classification::LeftWon);
        assert_eq!(result.records[5].left_win, Classification::NotApplicable);
        assert_eq!(result.audit.left_won, 4);
        assert_eq!(result.audit.unknown_total(), 1);
        assert!(result.audit.is_consistent());
    }

    #[tokio::test]
    async fn test_load_writes_tables_and_audit() {
        let storage = MockStorage::with_file("match.csv", MATCH_LOG);
        let mut config = MockConfig::new("match.csv");
        config.output_formats = vec!["csv".to_string(), "json".to_string()];
        let pipeline = PointLogPipeline::new(storage.clone(), config);

        let log = pipeline.extract().await.unwrap();
        let result = pipeline.transform(log).await.unwrap();
        let written = pipeline.load(result).await.unwrap();

        let expected: Vec<String> = ["match_points.csv", "match_points.json", "match_audit.json"]
            .iter()
            .map(|name| Path::new("out").join(name).to_string_lossy().into_owned())
            .collect();
        assert_eq!(written, expected);

        let csv = storage.get_file(&expected[0]).await.unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert_eq!(csv.lines().count(), 8);
        assert!(csv
            .lines()
            .next()
            .unwrap()
            .ends_with("Commentary,left_win,serve,fault,is_first_serve"));
    }

    #[tokio::test]
    async fn test_load_with_compression() {
        let storage = MockStorage::with_file("match.csv", MATCH_LOG);
        let mut config = MockConfig::new("match.csv");
        config.output_formats = vec!["csv".to_string(), "tsv".to_string()];
        config.compress = true;
        let pipeline = PointLogPipeline::new(storage.clone(), config);

        let log = pipeline.extract().await.unwrap();
        let result = pipeline.transform(log).await.unwrap();
        let written = pipeline.load(result).await.unwrap();

        assert_eq!(written.len(), 1);
        let zip_bytes = storage.get_file(&written[0]).await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();

        let mut file_names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        file_names.sort();

        assert_eq!(
            file_names,
            vec!["match_audit.json", "match_points.csv", "match_points.tsv"]
        );
    }
}
