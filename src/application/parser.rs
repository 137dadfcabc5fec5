//! Free-text wager parsing.
//!
//! Chat messages follow no grammar. A wager line mixes digit runs with
//! shorthand words and `-` or `/` separators in any order, for example
//! `Lek สนามชล แดง 200` or `นก 100-300 ห้อง2 ดำ`. The parser recovers the
//! player name, amount, competition code and venue, or reports every field
//! it could not find.
//!
//! Strategy, first match wins:
//!
//! 1. Collect every maximal digit run.
//! 2. If a `digits-separator-digits` pair exists, the amount is the second
//!    number of the first such pair; otherwise it is the first digit run.
//! 3. The first token without digits is the player-name candidate.
//! 4. The first token after the player that starts with a code marker is the
//!    competition code; likewise for venue markers. A field still missing
//!    after that gets one loose scan over every token of the message.

use crate::domain::parse::{ParseFailure, VenueCode, WagerField, WagerFields};
use crate::domain::wager::MAX_AMOUNT;

/// Color and tube markers that identify a competition code.
const CODE_MARKERS: &[&str] = &[
    "แดง", "ดำ", "น้ำเงิน", "เขียว", "เหลือง", "ขาว", "ฟ้า", "ชมพู", "ม่วง", "ส้ม", "เทา",
    "ทอง", "บั้ง", "หลอด", "ท่อ", "red", "black", "blue", "green", "yellow", "white", "tube",
];

/// Place-name, stadium and room markers that identify a venue.
const VENUE_MARKERS: &[&str] = &[
    "สนาม", "ห้อง", "สเตเดียม", "บ่อ", "ชลบุรี", "บางแสน", "พัทยา", "ระยอง", "stadium",
    "room", "arena", "field",
];

const SEPARATORS: [char; 2] = ['-', '/'];

/// Parses wager messages against fixed keyword sets.
///
/// Pure and cheap to clone. Never panics on malformed input.
#[derive(Debug, Clone)]
pub struct WagerTextParser {
    code_markers: Vec<String>,
    venue_markers: Vec<String>,
}

impl Default for WagerTextParser {
    fn default() -> Self {
        Self {
            code_markers: CODE_MARKERS.iter().map(|m| (*m).to_string()).collect(),
            venue_markers: VENUE_MARKERS.iter().map(|m| (*m).to_string()).collect(),
        }
    }
}

impl WagerTextParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add deployment-specific markers on top of the built-in ones.
    #[must_use]
    pub fn with_extra_keywords(mut self, venue: &[String], code: &[String]) -> Self {
        let normalize = |k: &String| {
            let k = k.trim().to_lowercase();
            (!k.is_empty()).then_some(k)
        };
        self.venue_markers.extend(venue.iter().filter_map(normalize));
        self.code_markers.extend(code.iter().filter_map(normalize));
        self
    }

    /// Parse a message that may have no text at all.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`] listing every field that could not be
    /// recovered. A missing message is missing all of them.
    pub fn parse_message(&self, text: Option<&str>) -> Result<WagerFields, ParseFailure> {
        match text {
            Some(text) => self.parse(text),
            None => Err(ParseFailure::new(
                vec![
                    WagerField::PlayerName,
                    WagerField::Amount,
                    WagerField::CompetitionCode,
                    WagerField::Venue,
                ],
                "message has no text",
            )),
        }
    }

    /// Parse one wager line.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`] listing every field that could not be
    /// recovered.
    pub fn parse(&self, text: &str) -> Result<WagerFields, ParseFailure> {
        let text = normalize_digits(text);
        let mut missing = Vec::new();
        let mut reason = None;

        let amount = match amount_in(&text) {
            Ok(amount) => Some(amount),
            Err(why) => {
                reason = Some(why);
                missing.push(WagerField::Amount);
                None
            }
        };

        let tokens = tokenize(&text);
        let player = tokens.iter().position(|t| !has_digit(t));
        if player.is_none() {
            missing.push(WagerField::PlayerName);
        }
        let after_player = player.map_or(0, |i| i + 1);

        let mut code = find_strict(&tokens, after_player, &self.code_markers, None);
        let mut venue = find_strict(&tokens, after_player, &self.venue_markers, code);
        if code.is_none() {
            code = find_loose(&tokens, &self.code_markers, venue);
        }
        if venue.is_none() {
            venue = find_loose(&tokens, &self.venue_markers, code);
        }
        if code.is_none() {
            missing.push(WagerField::CompetitionCode);
        }
        if venue.is_none() {
            missing.push(WagerField::Venue);
        }

        match (player, amount, code, venue) {
            (Some(player), Some(amount), Some(code), Some(venue)) => Ok(WagerFields {
                player_name: tokens[player].to_string(),
                amount,
                competition_code: tokens[code].to_string(),
                venue: tokens[venue].to_string(),
            }),
            _ => Err(ParseFailure::new(
                missing,
                reason.unwrap_or("incomplete wager"),
            )),
        }
    }

    /// Recover only the amount, using the same rules as [`Self::parse`].
    ///
    /// This is the step that reads a wager's reconstructed text back.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseFailure`] naming the amount when there is no digit
    /// run, the chosen number is zero, or it does not fit the ledger.
    pub fn parse_amount(&self, text: &str) -> Result<i64, ParseFailure> {
        amount_in(&normalize_digits(text))
            .map_err(|why| ParseFailure::new(vec![WagerField::Amount], why))
    }

    /// Find every `(venue, competition code)` pair in a multi-wager message.
    ///
    /// Scans adjacent whitespace-separated tokens; a pair counts when its
    /// second token holds a `digits-separator-digits` pattern. Anything else
    /// is skipped.
    #[must_use]
    pub fn parse_multiple(&self, text: &str) -> Vec<VenueCode> {
        let text = normalize_digits(text);
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut pairs = Vec::new();
        let mut i = 0;
        while i + 1 < tokens.len() {
            if separated_pair(tokens[i + 1]).is_some() {
                pairs.push(VenueCode {
                    venue: tokens[i].to_string(),
                    competition_code: tokens[i + 1].to_string(),
                });
                i += 2;
            } else {
                i += 1;
            }
        }
        pairs
    }
}

/// Amount in already normalized text, or why there is none.
fn amount_in(text: &str) -> Result<i64, &'static str> {
    let run = separated_pair(text)
        .map(|(_, second)| second)
        .or_else(|| digit_runs(text).first().copied())
        .ok_or("no amount in message")?;
    match run.parse::<i64>() {
        Ok(amount) if amount > MAX_AMOUNT => Err("amount is too large"),
        Ok(amount) if amount > 0 => Ok(amount),
        Ok(_) => Err("amount must be positive"),
        Err(_) => Err("amount is too large"),
    }
}

/// Thai digits become ASCII and thousands separators inside numbers go away.
fn normalize_digits(text: &str) -> String {
    let chars: Vec<char> = text
        .chars()
        .map(|c| match c {
            '๐'..='๙' => char::from_digit(u32::from(c) - u32::from('๐'), 10).unwrap_or(c),
            _ => c,
        })
        .collect();

    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            let between_digits = i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(char::is_ascii_digit);
            !(c == ',' && between_digits)
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Byte spans of every maximal ASCII digit run.
fn digit_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_ascii_digit(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

fn digit_runs(text: &str) -> Vec<&str> {
    digit_spans(text).into_iter().map(|(s, e)| &text[s..e]).collect()
}

/// First `digits-separator-digits` pattern in `text`.
fn separated_pair(text: &str) -> Option<(&str, &str)> {
    digit_spans(text).windows(2).find_map(|w| {
        let (first, second) = (w[0], w[1]);
        let gap = &text[first.1..second.0];
        let is_separator = gap.chars().count() == 1 && gap.starts_with(SEPARATORS);
        is_separator.then(|| (&text[first.0..first.1], &text[second.0..second.1]))
    })
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|t| !t.is_empty())
        .collect()
}

fn has_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
}

fn find_strict(
    tokens: &[&str],
    from: usize,
    markers: &[String],
    taken: Option<usize>,
) -> Option<usize> {
    (from..tokens.len()).find(|&i| {
        Some(i) != taken && {
            let token = tokens[i].to_lowercase();
            markers.iter().any(|m| token.starts_with(m.as_str()))
        }
    })
}

fn find_loose(tokens: &[&str], markers: &[String], taken: Option<usize>) -> Option<usize> {
    (0..tokens.len()).find(|&i| {
        Some(i) != taken && {
            let token = tokens[i].to_lowercase();
            markers.iter().any(|m| token.contains(m.as_str()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::RowPosition;
    use crate::domain::wager::{NewWager, WagerRecord};

    fn parser() -> WagerTextParser {
        WagerTextParser::new()
    }

    #[test]
    fn parses_a_plain_wager_line() {
        let fields = parser().parse("Lek สนามชล แดง 200").unwrap();
        assert_eq!(fields.player_name, "Lek");
        assert_eq!(fields.venue, "สนามชล");
        assert_eq!(fields.competition_code, "แดง");
        assert_eq!(fields.amount, 200);
    }

    #[test]
    fn range_shorthand_takes_the_second_number() {
        let fields = parser().parse("นก 100-300 ห้อง2 ดำ").unwrap();
        assert_eq!(fields.amount, 300);
        assert_eq!(fields.player_name, "นก");
        assert_eq!(fields.venue, "ห้อง2");
        assert_eq!(fields.competition_code, "ดำ");

        let fields = parser().parse("นก ห้อง ดำ 50/120").unwrap();
        assert_eq!(fields.amount, 120);
    }

    #[test]
    fn first_digit_run_is_the_amount_without_a_pair() {
        let fields = parser().parse("Lek 150 ห้อง3 red 20").unwrap();
        assert_eq!(fields.amount, 150);
    }

    #[test]
    fn thai_digits_and_thousands_separators_are_understood() {
        assert_eq!(parser().parse("Lek สนาม แดง ๕๐๐").unwrap().amount, 500);
        assert_eq!(parser().parse("Lek สนาม แดง 1,500").unwrap().amount, 1500);
    }

    #[test]
    fn no_digits_means_amount_is_missing() {
        for text in ["Lek สนามชล แดง", "", "   ", "สนาม ห้อง"] {
            let failure = parser().parse(text).unwrap_err();
            assert!(failure.is_missing(WagerField::Amount), "{text:?}");
        }
    }

    #[test]
    fn zero_amount_is_rejected() {
        let failure = parser().parse("Lek สนาม แดง 0").unwrap_err();
        assert_eq!(failure.missing_fields, vec![WagerField::Amount]);
        assert_eq!(failure.reason, "amount must be positive");
    }

    #[test]
    fn huge_amount_is_rejected_not_panicked_on() {
        let failure = parser()
            .parse("Lek สนาม แดง 99999999999999999999999")
            .unwrap_err();
        assert!(failure.is_missing(WagerField::Amount));
    }

    #[test]
    fn every_missing_field_is_reported() {
        let failure = parser().parse("Lek 200").unwrap_err();
        assert_eq!(
            failure.missing_fields,
            vec![WagerField::CompetitionCode, WagerField::Venue]
        );

        let failure = parser().parse("hello").unwrap_err();
        assert_eq!(
            failure.missing_fields,
            vec![
                WagerField::Amount,
                WagerField::CompetitionCode,
                WagerField::Venue
            ]
        );
    }

    #[test]
    fn loose_scan_finds_markers_before_the_player_token() {
        // The first word is taken as the player; the venue is only found by
        // the loose scan over the whole message.
        let fields = parser().parse("สนามชล แดง 200").unwrap();
        assert_eq!(fields.player_name, "สนามชล");
        assert_eq!(fields.venue, "สนามชล");
        assert_eq!(fields.competition_code, "แดง");

        let fields = parser().parse("Lek ใหญ่สนาม xแดง 80").unwrap();
        assert_eq!(fields.venue, "ใหญ่สนาม");
        assert_eq!(fields.competition_code, "xแดง");
    }

    #[test]
    fn extra_keywords_extend_the_marker_sets() {
        let parser = parser().with_extra_keywords(&["Lumpini".to_string()], &["ลาย".to_string()]);
        let fields = parser.parse("Lek lumpini ลายจุด 40").unwrap();
        assert_eq!(fields.venue, "lumpini");
        assert_eq!(fields.competition_code, "ลายจุด");
    }

    #[test]
    fn missing_message_fails_every_field() {
        let failure = parser().parse_message(None).unwrap_err();
        assert_eq!(failure.missing_fields.len(), 4);
        assert!(parser().parse_message(Some("Lek สนาม แดง 5")).is_ok());
    }

    #[test]
    fn reconstructed_text_parses_back_to_the_same_amount() {
        for (venue, code, amount) in [
            ("ท", "310-35", 100),
            ("สนามชล", "แดง", 200),
            ("ห้องใหญ่", "ดำ", 75),
            ("room", "blue", 1),
            ("ช", "200/20", 9_999),
        ] {
            let entry = NewWager::try_new("p1", venue, code, amount)
                .unwrap()
                .into_entry(chrono::Utc::now());
            let day = "2026-03-02".parse().unwrap();
            let record = WagerRecord::from_entry(RowPosition::new(1), day, entry);
            let text = record.reconstructed_text();
            assert_eq!(parser().parse_amount(&text).unwrap(), amount, "{text}");
        }
    }

    #[test]
    fn parse_amount_names_only_the_amount() {
        let failure = parser().parse_amount("สนามชล").unwrap_err();
        assert_eq!(failure.missing_fields, vec![WagerField::Amount]);
        assert_eq!(parser().parse_amount("นก 100-300").unwrap(), 300);
    }

    #[test]
    fn amounts_beyond_the_ledger_cap_are_rejected() {
        let failure = parser()
            .parse("Lek สนาม แดง 5000000000000000000")
            .unwrap_err();
        assert_eq!(failure.missing_fields, vec![WagerField::Amount]);
        assert_eq!(failure.reason, "amount is too large");
    }

    #[test]
    fn parse_multiple_pairs_venues_with_ranged_codes() {
        let pairs = parser().parse_multiple("ท 310-35 ช 200/20 hello world ก 5-6");
        assert_eq!(
            pairs,
            vec![
                VenueCode {
                    venue: "ท".into(),
                    competition_code: "310-35".into()
                },
                VenueCode {
                    venue: "ช".into(),
                    competition_code: "200/20".into()
                },
                VenueCode {
                    venue: "ก".into(),
                    competition_code: "5-6".into()
                },
            ]
        );
        assert!(parser().parse_multiple("nothing here").is_empty());
        assert!(parser().parse_multiple("").is_empty());
    }
}
