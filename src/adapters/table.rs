use crate::domain::model::{PointLog, PointRecord, RawPointRow};
use crate::domain::ports::ColumnSelector;
use crate::utils::error::{PointLogError, Result};

/// Column positions resolved against the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub score: usize,
    pub info: usize,
}

impl ColumnMap {
    pub fn resolve(
        headers: &[String],
        score: &ColumnSelector,
        info: &ColumnSelector,
    ) -> Result<Self> {
        Ok(Self {
            score: resolve_column(headers, score)?,
            info: resolve_column(headers, info)?,
        })
    }
}

fn resolve_column(headers: &[String], selector: &ColumnSelector) -> Result<usize> {
    let found = match selector {
        ColumnSelector::Index(index) => (*index < headers.len()).then_some(*index),
        ColumnSelector::Name(name) => headers.iter().position(|h| h.trim() == name.as_str()),
    };
    found.ok_or_else(|| PointLogError::MissingColumnError {
        column: selector.to_string(),
        available: headers.join(", "),
    })
}

fn non_empty(cell: Option<&str>) -> Option<&str> {
    cell.filter(|c| !c.trim().is_empty())
}

/// Reads an exported point-log table. Blank cells become `None`.
pub fn read_point_log(
    data: &[u8],
    delimiter: u8,
    score: &ColumnSelector,
    info: &ColumnSelector,
) -> Result<PointLog> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(data);

    let mut headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = ColumnMap::resolve(&headers, score, info)?;
    tracing::debug!(
        "Resolved columns: score={} (#{}), info={} (#{})",
        headers[columns.score],
        columns.score,
        headers[columns.info],
        columns.info
    );

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RawPointRow::new(
            non_empty(record.get(columns.score)),
            non_empty(record.get(columns.info)),
            record.iter().map(str::to_string).collect(),
        ));
    }

    // 多出來的儲存格保留下來，補上表頭名稱
    let width = rows
        .iter()
        .map(|row| row.passthrough.len())
        .max()
        .unwrap_or(0);
    if width > headers.len() {
        tracing::warn!(
            "Point log has rows with {} cells but only {} headers; naming the extra columns",
            width,
            headers.len()
        );
        headers.extend((headers.len()..width).map(|index| format!("unnamed_{}", index)));
    }

    // 分隔列常常比表頭少欄位，補空字串維持欄位對齊
    for row in &mut rows {
        if row.passthrough.len() < headers.len() {
            row.passthrough.resize(headers.len(), String::new());
        }
    }

    Ok(PointLog { headers, rows })
}

/// Flat table of expanded records: passthrough columns, then the derived ones.
pub fn write_delimited(
    headers: &[String],
    records: &[PointRecord],
    delimiter: u8,
) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(
        headers
            .iter()
            .map(String::as_str)
            .chain(PointRecord::DERIVED_COLUMNS),
    )?;

    for record in records {
        let derived = record.derived_cells();
        writer.write_record(
            record
                .passthrough
                .iter()
                .map(String::as_str)
                .chain(derived.iter().map(String::as_str)),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| PointLogError::IoError(e.into_error()))
}

/// JSON array of records keyed by header name.
pub fn write_json(headers: &[String], records: &[PointRecord]) -> Result<Vec<u8>> {
    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|record| -> std::result::Result<serde_json::Value, serde_json::Error> {
            let mut object = serde_json::Map::new();
            for (header, cell) in headers.iter().zip(&record.passthrough) {
                object.insert(header.clone(), serde_json::Value::String(cell.clone()));
            }
            object.insert("left_win".to_string(), serde_json::to_value(record.left_win)?);
            object.insert("serve".to_string(), serde_json::to_value(record.serve)?);
            object.insert("fault".to_string(), serde_json::to_value(record.fault)?);
            object.insert(
                "is_first_serve".to_string(),
                serde_json::Value::Bool(record.is_first_serve),
            );
            Ok(serde_json::Value::Object(object))
        })
        .collect::<std::result::Result<_, _>>()?;

    Ok(serde_json::to_vec_pretty(&rows)?)
}
