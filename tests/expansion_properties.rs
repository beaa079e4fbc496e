use anyhow::Result;
use tennis_pointlog::core::annotation::extract_annotation;
use tennis_pointlog::core::score::parse_score;
use tennis_pointlog::core::transition::classify;
use tennis_pointlog::{expand_rows, Classification, RawPointRow, UnknownReason};

const LADDER: [&str; 5] = ["0", "15", "30", "40", "AD"];

fn transition(current: &str, next: Option<&str>) -> Classification {
    classify(&parse_score(Some(current)), &parse_score(next))
}

fn row(cells: &[&str], score: usize, info: usize) -> RawPointRow {
    let cell = |i: usize| Some(cells[i]).filter(|c| !c.is_empty());
    RawPointRow::new(
        cell(score),
        cell(info),
        cells.iter().map(|c| c.to_string()).collect(),
    )
}

#[test]
fn test_parser_accepts_exactly_the_ladder_grammar() {
    let score_grammar = regex::Regex::new(r"^(0|15|30|40|AD)-(0|15|30|40|AD)$").unwrap();
    let mut candidates: Vec<String> = Vec::new();
    for left in LADDER.iter().chain(&["1", "45", "A", "ad", ""]) {
        for right in LADDER.iter().chain(&["5", "Ad", ""]) {
            candidates.push(format!("{}-{}", left, right));
            candidates.push(format!("{}\u{2011}{}", left, right));
        }
    }
    candidates.extend(["40", "40-15-0", "deuce", "Game"].map(String::from));

    for cell in &candidates {
        let normalized = cell.replace('\u{2011}', "-");
        let parsed = parse_score(Some(cell));
        if score_grammar.is_match(&normalized) {
            assert!(matches!(parsed, Ok(Some(_))), "{:?} should parse", cell);
        } else {
            assert!(parsed.is_err(), "{:?} should fail", cell);
        }
    }
}

#[test]
fn test_documented_transitions() {
    assert_eq!(transition("40-0", None), Classification::LeftWon);
    assert_eq!(transition("0-40", None), Classification::RightWon);
    assert_eq!(transition("40-AD", Some("40-40")), Classification::LeftWon);
    assert_eq!(transition("40-40", Some("40-AD")), Classification::RightWon);
    assert_eq!(transition("AD-40", Some("40-40")), Classification::RightWon);
    assert_eq!(transition("30-30", Some("40-30")), Classification::LeftWon);
}

#[test]
fn test_full_deuce_game() -> Result<()> {
    let scores = [
        "0-0", "15-0", "15-15", "30-15", "30-30", "40-30", "40-40", "40-AD", "40-40", "AD-40",
    ];
    let rows: Vec<RawPointRow> = scores
        .iter()
        .map(|s| row(&[*s, "serve wide"], 0, 1))
        .collect();

    let winners: Vec<Classification> = expand_rows(&rows).iter().map(|r| r.left_win).collect();
    use Classification::{LeftWon, RightWon};
    assert_eq!(
        winners,
        vec![
            LeftWon, RightWon, LeftWon, RightWon, LeftWon, RightWon, RightWon, LeftWon, LeftWon,
            LeftWon
        ]
    );
    Ok(())
}

#[test]
fn test_row_count_fidelity_and_order() -> Result<()> {
    let infos = [
        "serve down the T; ace",
        "serve wide, fault (net). serve to body; rally",
        "",
        "fault (long). fault (wide)",
        "serve to body",
        "serve wide, fault (wide). serve wide, fault (long). serve wide",
    ];
    let scores = ["0-0", "15-0", "", "0-0", "0-15", "bogus"];
    let rows: Vec<RawPointRow> = scores
        .iter()
        .zip(infos)
        .map(|(score, info)| row(&[*score, info, "extra"], 0, 1))
        .collect();

    let second = rows
        .iter()
        .filter(|r| extract_annotation(r.info.as_deref()).has_second_serve())
        .count();
    let records = expand_rows(&rows);

    assert_eq!(records.len(), rows.len() + second);

    // every source row appears in order, first serve before second
    let mut source = rows.iter().peekable();
    let mut previous_first = false;
    for record in &records {
        if record.is_first_serve {
            let expected = source.next().expect("more records than rows");
            assert_eq!(&record.passthrough, &expected.passthrough);
        } else {
            assert!(previous_first);
        }
        previous_first = record.is_first_serve;
    }
    assert!(source.peek().is_none());

    assert_eq!(
        records.last().unwrap().left_win,
        Classification::Unknown(UnknownReason::MalformedPair)
    );
    Ok(())
}

#[test]
fn test_expansion_of_single_serve_rows_is_stable() {
    let rows: Vec<RawPointRow> = ["0-0", "15-0", "30-0", "40-0"]
        .iter()
        .map(|s| row(&[*s, "serve to body"], 0, 1))
        .collect();

    let once = expand_rows(&rows);
    assert_eq!(once.len(), rows.len());
    assert!(once.iter().all(|r| r.is_first_serve));

    let again_rows: Vec<RawPointRow> = once
        .iter()
        .map(|r| {
            let cells: Vec<&str> = r.passthrough.iter().map(String::as_str).collect();
            row(&cells, 0, 1)
        })
        .collect();
    assert_eq!(expand_rows(&again_rows), once);
}

#[test]
fn test_separator_rows_are_not_applicable() {
    let rows = vec![row(&["40-15", ""], 0, 1), row(&["", ""], 0, 1)];
    let records = expand_rows(&rows);

    assert_eq!(records[0].left_win, Classification::LeftWon);
    assert_eq!(records[1].left_win, Classification::NotApplicable);
    assert_eq!(records[1].serve, None);
}
