use crate::core::score::ParsedScore;
use crate::domain::model::{Classification, ScorePair, UnknownReason};
use crate::domain::model::LadderValue::{Advantage, Fifteen, Forty, Love, Thirty};

/// Scores after which the game ends in favour of the left player.
const TERMINAL_LEFT: [ScorePair; 4] = [
    ScorePair::new(Forty, Love),
    ScorePair::new(Forty, Fifteen),
    ScorePair::new(Forty, Thirty),
    ScorePair::new(Advantage, Forty),
];

const TERMINAL_RIGHT: [ScorePair; 4] = [
    ScorePair::new(Love, Forty),
    ScorePair::new(Fifteen, Forty),
    ScorePair::new(Thirty, Forty),
    ScorePair::new(Forty, Advantage),
];

/// Decides who won the point that starts at `current`.
///
/// `next` is the parsed score of the following row, or `Ok(None)` when the
/// following row is a separator or there is none. A bad score on either side
/// yields `Unknown` with the parse failure's reason.
pub fn classify(current: &ParsedScore, next: &ParsedScore) -> Classification {
    let current = match current {
        Ok(Some(pair)) => *pair,
        Ok(None) => return Classification::NotApplicable,
        Err(e) => return Classification::Unknown(e.reason()),
    };

    match next {
        Ok(None) => classify_terminal(current),
        Ok(Some(next)) => classify_step(current, *next),
        Err(e) => Classification::Unknown(e.reason()),
    }
}

fn classify_terminal(current: ScorePair) -> Classification {
    if TERMINAL_LEFT.contains(&current) {
        Classification::LeftWon
    } else if TERMINAL_RIGHT.contains(&current) {
        Classification::RightWon
    } else {
        Classification::Unknown(UnknownReason::UnrecognizedTerminalScore)
    }
}

fn classify_step(current: ScorePair, next: ScorePair) -> Classification {
    let delta_left = next.left.ordinal() - current.left.ordinal();
    let delta_right = next.right.ordinal() - current.right.ordinal();

    match (current, next) {
        _ if delta_left == 1 && delta_right == 0 => Classification::LeftWon,
        // 右方的 AD 被扳回 deuce，ordinal 差值判斷不出來
        (
            ScorePair {
                left: Forty,
                right: Advantage,
            },
            ScorePair {
                left: Forty,
                right: Forty,
            },
        ) => Classification::LeftWon,
        _ => Classification::RightWon,
    }
}
