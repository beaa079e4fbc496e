use serde::{Deserialize, Serialize};
use std::fmt;

/// Position on the game-score ladder of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LadderValue {
    Love,
    Fifteen,
    Thirty,
    Forty,
    Advantage,
}

impl LadderValue {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "0" => Some(LadderValue::Love),
            "15" => Some(LadderValue::Fifteen),
            "30" => Some(LadderValue::Thirty),
            "40" => Some(LadderValue::Forty),
            "AD" => Some(LadderValue::Advantage),
            _ => None,
        }
    }

    pub fn ordinal(self) -> i8 {
        match self {
            LadderValue::Love => 0,
            LadderValue::Fifteen => 1,
            LadderValue::Thirty => 2,
            LadderValue::Forty => 3,
            LadderValue::Advantage => 4,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            LadderValue::Love => "0",
            LadderValue::Fifteen => "15",
            LadderValue::Thirty => "30",
            LadderValue::Forty => "40",
            LadderValue::Advantage => "AD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScorePair {
    pub left: LadderValue,
    pub right: LadderValue,
}

impl ScorePair {
    pub const fn new(left: LadderValue, right: LadderValue) -> Self {
        Self { left, right }
    }
}

impl fmt::Display for ScorePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.left.as_token(), self.right.as_token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServeDirection {
    DownT,
    Wide,
    Body,
}

impl ServeDirection {
    /// Short code written to the flat output table.
    pub fn code(self) -> &'static str {
        match self {
            ServeDirection::DownT => "T",
            ServeDirection::Wide => "W",
            ServeDirection::Body => "B",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultType {
    Long,
    Wide,
    Net,
}

impl FaultType {
    pub fn code(self) -> &'static str {
        match self {
            FaultType::Long => "L",
            FaultType::Wide => "W",
            FaultType::Net => "N",
        }
    }
}

/// Serve direction and fault recorded for one serve of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServeSlot {
    pub serve: Option<ServeDirection>,
    pub fault: Option<FaultType>,
}

impl ServeSlot {
    pub fn is_empty(&self) -> bool {
        self.serve.is_none() && self.fault.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub first: ServeSlot,
    pub second: ServeSlot,
}

impl Annotation {
    pub fn has_second_serve(&self) -> bool {
        !self.second.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownReason {
    InvalidScoreToken,
    UnrecognizedTerminalScore,
    MalformedPair,
}

impl UnknownReason {
    pub fn as_str(self) -> &'static str {
        match self {
            UnknownReason::InvalidScoreToken => "invalid score token",
            UnknownReason::UnrecognizedTerminalScore => "unrecognized terminal score",
            UnknownReason::MalformedPair => "malformed pair",
        }
    }
}

impl fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who won the point a row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    LeftWon,
    RightWon,
    Unknown(UnknownReason),
    /// Separator row between games or sets.
    NotApplicable,
}

impl Classification {
    /// Cell value for the `left_win` output column.
    pub fn to_cell(self) -> String {
        match self {
            Classification::LeftWon => "true".to_string(),
            Classification::RightWon => "false".to_string(),
            Classification::Unknown(reason) => format!("unknown: {}", reason),
            Classification::NotApplicable => String::new(),
        }
    }
}

/// One scraped row of the point log.
///
/// `passthrough` holds every source cell verbatim, in header order, including
/// the score and info cells themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPointRow {
    pub score: Option<String>,
    pub info: Option<String>,
    pub passthrough: Vec<String>,
}

impl RawPointRow {
    pub fn new(score: Option<&str>, info: Option<&str>, passthrough: Vec<String>) -> Self {
        Self {
            score: score.map(str::to_string),
            info: info.map(str::to_string),
            passthrough,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointLog {
    pub headers: Vec<String>,
    pub rows: Vec<RawPointRow>,
}

/// A single serve event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    pub passthrough: Vec<String>,
    pub left_win: Classification,
    pub serve: Option<ServeDirection>,
    pub fault: Option<FaultType>,
    pub is_first_serve: bool,
}

impl PointRecord {
    pub const DERIVED_COLUMNS: [&'static str; 4] = ["left_win", "serve", "fault", "is_first_serve"];

    pub fn derived_cells(&self) -> [String; 4] {
        [
            self.left_win.to_cell(),
            self.serve.map(|s| s.code().to_string()).unwrap_or_default(),
            self.fault.map(|f| f.code().to_string()).unwrap_or_default(),
            self.is_first_serve.to_string(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub headers: Vec<String>,
    pub records: Vec<PointRecord>,
    pub audit: crate::core::audit::AuditSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_order_matches_ordinal() {
        assert!(LadderValue::Love < LadderValue::Advantage);
        assert_eq!(LadderValue::Forty.ordinal() + 1, LadderValue::Advantage.ordinal());
        for token in ["0", "15", "30", "40", "AD"] {
            let value = LadderValue::from_token(token).unwrap();
            assert_eq!(value.as_token(), token);
        }
        assert_eq!(LadderValue::from_token("ad"), None);
        assert_eq!(LadderValue::from_token("45"), None);
    }

    #[test]
    fn test_classification_cells() {
        assert_eq!(Classification::LeftWon.to_cell(), "true");
        assert_eq!(Classification::RightWon.to_cell(), "false");
        assert_eq!(Classification::NotApplicable.to_cell(), "");
        assert_eq!(
            Classification::Unknown(UnknownReason::MalformedPair).to_cell(),
            "unknown: malformed pair"
        );
    }

    #[test]
    fn test_classification_json_is_tagged() {
        let json =
            serde_json::to_value(Classification::Unknown(UnknownReason::InvalidScoreToken)).unwrap();
        assert_eq!(json, serde_json::json!({"unknown": "invalid_score_token"}));
        assert_eq!(
            serde_json::to_value(Classification::LeftWon).unwrap(),
            serde_json::json!("left_won")
        );
    }

    #[test]
    fn test_serve_direction_json_names() {
        assert_eq!(
            serde_json::to_value(ServeDirection::DownT).unwrap(),
            serde_json::json!("DOWN_T")
        );
        assert_eq!(serde_json::to_value(FaultType::Net).unwrap(), serde_json::json!("NET"));
    }
}
