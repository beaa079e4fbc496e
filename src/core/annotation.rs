use crate::domain::model::{Annotation, FaultType, ServeDirection, ServeSlot};
use regex::Regex;
use std::sync::OnceLock;

static SERVE_PHRASES: [(&str, ServeDirection); 3] = [
    ("serve down the T", ServeDirection::DownT),
    ("serve wide", ServeDirection::Wide),
    ("serve to body", ServeDirection::Body),
];

static FAULT_PHRASES: [(&str, FaultType); 3] = [
    ("fault (long)", FaultType::Long),
    ("fault (wide)", FaultType::Wide),
    ("fault (net)", FaultType::Net),
];

/// Literal phrases compiled into one alternation so matches come back in text order.
struct PhraseScanner<T: Copy + 'static> {
    pattern: Regex,
    table: &'static [(&'static str, T)],
}

impl<T: Copy + 'static> PhraseScanner<T> {
    fn new(table: &'static [(&'static str, T)]) -> Self {
        let alternation = table
            .iter()
            .map(|(phrase, _)| regex::escape(phrase))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation).expect("escaped literal alternation is valid");
        Self { pattern, table }
    }

    /// First two tags in order of occurrence.
    fn first_two(&self, text: &str) -> (Option<T>, Option<T>) {
        let mut tags = self.pattern.find_iter(text).filter_map(|m| {
            self.table
                .iter()
                .find(|(phrase, _)| *phrase == m.as_str())
                .map(|(_, tag)| *tag)
        });
        (tags.next(), tags.next())
    }
}

fn serve_scanner() -> &'static PhraseScanner<ServeDirection> {
    static SCANNER: OnceLock<PhraseScanner<ServeDirection>> = OnceLock::new();
    SCANNER.get_or_init(|| PhraseScanner::new(&SERVE_PHRASES))
}

fn fault_scanner() -> &'static PhraseScanner<FaultType> {
    static SCANNER: OnceLock<PhraseScanner<FaultType>> = OnceLock::new();
    SCANNER.get_or_init(|| PhraseScanner::new(&FAULT_PHRASES))
}

/// Pulls the first- and second-serve tags out of a commentary cell.
pub fn extract_annotation(info: Option<&str>) -> Annotation {
    let Some(text) = info else {
        return Annotation::default();
    };

    let (serve_first, serve_second) = serve_scanner().first_two(text);
    let (fault_first, fault_second) = fault_scanner().first_two(text);

    Annotation {
        first: ServeSlot {
            serve: serve_first,
            fault: fault_first,
        },
        second: ServeSlot {
            serve: serve_second,
            fault: fault_second,
        },
    }
}
