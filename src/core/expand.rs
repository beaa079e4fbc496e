use crate::core::annotation::extract_annotation;
use crate::core::score::{parse_score, ParsedScore};
use crate::core::transition::classify;
use crate::domain::model::{Classification, PointRecord, RawPointRow, ServeSlot};

/// Turns the ordered point log into one record per serve event.
///
/// Rows whose commentary mentions a second serve become two records, first
/// serve before second, sharing the row's classification. Every other row
/// becomes exactly one first-serve record. Source order is kept.
pub fn expand_rows(rows: &[RawPointRow]) -> Vec<PointRecord> {
    let mut records = Vec::with_capacity(rows.len());
    let mut scores = rows.iter().map(|row| parse_score(row.score.as_deref()));
    let mut lookahead: Option<ParsedScore> = scores.next();

    for (index, row) in rows.iter().enumerate() {
        let Some(current) = lookahead.take() else {
            break;
        };
        lookahead = scores.next();
        let next = lookahead.clone().unwrap_or(Ok(None));

        let left_win = classify(&current, &next);
        if let Classification::Unknown(reason) = left_win {
            tracing::warn!(
                row = index,
                score = row.score.as_deref().unwrap_or(""),
                "⚠️ Could not classify point: {}",
                reason
            );
        }

        let annotation = extract_annotation(row.info.as_deref());
        records.push(record_for(row, left_win, annotation.first, true));
        if annotation.has_second_serve() {
            records.push(record_for(row, left_win, annotation.second, false));
        }
    }

    tracing::debug!(
        "Expanded {} rows into {} serve records",
        rows.len(),
        records.len()
    );
    records
}

fn record_for(
    row: &RawPointRow,
    left_win: Classification,
    slot: ServeSlot,
    is_first_serve: bool,
) -> PointRecord {
    PointRecord {
        passthrough: row.passthrough.clone(),
        left_win,
        serve: slot.serve,
        fault: slot.fault,
        is_first_serve,
    }
}
