use crate::domain::model::{Classification, PointRecord, UnknownReason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Data-quality counts for one expanded point log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub input_rows: usize,
    pub output_records: usize,
    pub second_serves: usize,
    pub separators: usize,
    pub left_won: usize,
    pub right_won: usize,
    pub unknown: BTreeMap<UnknownReason, usize>,
}

impl AuditSummary {
    /// Counts are per source point, so second-serve duplicates are not counted twice.
    pub fn from_records(source: &str, input_rows: usize, records: &[PointRecord]) -> Self {
        let mut summary = Self {
            source: source.to_string(),
            generated_at: Utc::now(),
            input_rows,
            output_records: records.len(),
            second_serves: 0,
            separators: 0,
            left_won: 0,
            right_won: 0,
            unknown: BTreeMap::new(),
        };

        for record in records {
            if !record.is_first_serve {
                summary.second_serves += 1;
                continue;
            }
            match record.left_win {
                Classification::LeftWon => summary.left_won += 1,
                Classification::RightWon => summary.right_won += 1,
                Classification::NotApplicable => summary.separators += 1,
                Classification::Unknown(reason) => {
                    *summary.unknown.entry(reason).or_insert(0) += 1;
                }
            }
        }

        summary
    }

    pub fn unknown_total(&self) -> usize {
        self.unknown.values().sum()
    }

    /// Input rows plus one per second serve must equal the emitted records.
    pub fn is_consistent(&self) -> bool {
        self.input_rows + self.second_serves == self.output_records
    }
}
