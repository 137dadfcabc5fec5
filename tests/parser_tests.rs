use wagerbook::application::parser::WagerTextParser;
use wagerbook::domain::parse::WagerField;

fn parser() -> WagerTextParser {
    WagerTextParser::new()
}

#[test]
fn range_shorthand_takes_the_second_number() {
    let fields = parser().parse("นก 100-300 ห้อง2 ดำ").unwrap();
    assert_eq!(fields.player_name, "นก");
    assert_eq!(fields.amount, 300);
    assert_eq!(fields.venue, "ห้อง2");
    assert_eq!(fields.competition_code, "ดำ");
}

#[test]
fn slash_separator_counts_as_a_range() {
    let fields = parser().parse("Lek 50/120 stadium red").unwrap();
    assert_eq!(fields.amount, 120);
}

#[test]
fn plain_amount_is_the_first_digit_run() {
    let fields = parser().parse("Lek สนามชล แดง 200 x3").unwrap();
    assert_eq!(fields.amount, 200);
}

#[test]
fn thai_digits_and_thousands_separators_are_read() {
    let fields = parser().parse("Lek สนามชล แดง ๑,๕๐๐").unwrap();
    assert_eq!(fields.amount, 1500);
}

#[test]
fn fields_may_come_in_any_order() {
    let fields = parser().parse("Lek แดง 200 สนามชล").unwrap();
    assert_eq!(fields.venue, "สนามชล");
    assert_eq!(fields.competition_code, "แดง");
}

#[test]
fn loose_scan_finds_markers_inside_words() {
    let fields = parser().parse("Lek บ้านสนาม สีแดง 90").unwrap();
    assert_eq!(fields.venue, "บ้านสนาม");
    assert_eq!(fields.competition_code, "สีแดง");
}

#[test]
fn every_missing_field_is_reported() {
    let failure = parser().parse("hello there").unwrap_err();
    assert!(failure.is_missing(WagerField::Amount));
    assert!(failure.is_missing(WagerField::CompetitionCode));
    assert!(failure.is_missing(WagerField::Venue));
    assert!(!failure.is_missing(WagerField::PlayerName));
}

#[test]
fn zero_amount_is_rejected() {
    let failure = parser().parse("Lek สนามชล แดง 0").unwrap_err();
    assert_eq!(failure.missing_fields, vec![WagerField::Amount]);
    assert!(failure.reason.contains("positive"));
}

#[test]
fn absent_text_is_a_failure_not_a_panic() {
    let failure = parser().parse_message(None).unwrap_err();
    assert_eq!(failure.missing_fields.len(), 4);
}

#[test]
fn configured_keywords_extend_the_built_in_ones() {
    let parser = parser().with_extra_keywords(&["court".into()], &["gold-star".into()]);
    let fields = parser.parse("Lek court black 40").unwrap();
    assert_eq!(fields.venue, "court");
    assert_eq!(fields.amount, 40);
    assert_eq!(fields.competition_code, "black");
}

#[test]
fn multiple_pairs_skip_leftovers() {
    let pairs = parser().parse_multiple("ท 310-35 ย 12/4 hello สนาม 5-6");
    let found: Vec<(&str, &str)> = pairs
        .iter()
        .map(|p| (p.venue.as_str(), p.competition_code.as_str()))
        .collect();
    assert_eq!(found, vec![("ท", "310-35"), ("ย", "12/4"), ("สนาม", "5-6")]);
}

#[test]
fn multiple_with_no_pairs_is_empty() {
    assert!(parser().parse_multiple("just words here").is_empty());
}
