use crate::domain::model::{LadderValue, ScorePair, UnknownReason};
use thiserror::Error;

/// A non-empty score cell that does not describe a valid ladder pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreParseError {
    #[error("malformed score pair: {0:?}")]
    MalformedPair(String),

    #[error("invalid score token {token:?} in {cell:?}")]
    InvalidToken { cell: String, token: String },
}

impl ScoreParseError {
    pub fn reason(&self) -> UnknownReason {
        match self {
            ScoreParseError::MalformedPair(_) => UnknownReason::MalformedPair,
            ScoreParseError::InvalidToken { .. } => UnknownReason::InvalidScoreToken,
        }
    }
}

/// Outcome of parsing one score cell. `Ok(None)` is a separator row.
pub type ParsedScore = std::result::Result<Option<ScorePair>, ScoreParseError>;

// 網頁上的比分常用非 ASCII 的連字號
const HYPHEN_VARIANTS: [char; 8] = [
    '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2212}', '\u{FE63}', '\u{FF0D}',
];

fn normalize_cell(cell: &str) -> String {
    cell.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if HYPHEN_VARIANTS.contains(&c) { '-' } else { c })
        .collect()
}

pub fn parse_score(cell: Option<&str>) -> ParsedScore {
    let normalized = match cell {
        Some(raw) => normalize_cell(raw),
        None => return Ok(None),
    };
    if normalized.is_empty() {
        return Ok(None);
    }

    let tokens: Vec<&str> = normalized.split('-').collect();
    let [left, right] = tokens.as_slice() else {
        return Err(ScoreParseError::MalformedPair(normalized.clone()));
    };

    let lookup = |token: &str| {
        LadderValue::from_token(token).ok_or_else(|| ScoreParseError::InvalidToken {
            cell: normalized.clone(),
            token: token.to_string(),
        })
    };

    Ok(Some(ScorePair::new(lookup(*left)?, lookup(*right)?)))
}
