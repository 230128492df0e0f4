//! Date-format compilation and filename date parsing.
//!
//! This module turns a user-supplied date-format string (e.g. `DD-MM-YYYY`,
//! `YYYY/MM/DD`, `DD-MMM-YY`) into a compiled matcher for `.md` filenames and
//! a strict parser that extracts and calendar-validates the encoded date.
//!
//! Format strings are built from a fixed token set:
//!
//! | Token  | Matches                                  | Field |
//! |--------|------------------------------------------|-------|
//! | `DD`   | two digits                               | day   |
//! | `MM`   | two digits                               | month |
//! | `YYYY` | four digits                              | year  |
//! | `YY`   | two digits (century resolved, see below) | year  |
//! | `MMM`  | three-letter English month abbreviation  | month |
//! | `MMMM` | full English month name (4+ letters)     | month |
//!
//! Tokens are joined by `-` or `/` separators. Two-digit years resolve as
//! `value < 50 -> 2000 + value`, otherwise `1900 + value`.

use chrono::NaiveDate;
use regex::Regex;

use crate::output::OutputFormatter;

/// The format used when a configured format string fails validation.
pub const DEFAULT_FORMAT: &str = "DD-MM-YYYY";

/// Errors that can occur during format validation and compilation.
#[derive(Debug, Clone)]
pub enum FormatError {
    /// The format string contains no recognized date tokens.
    NoRecognizedTokens(String),
    /// The assembled matching pattern failed to compile.
    BadPattern {
        /// The format string the pattern was built from.
        format: String,
        /// The reason reported by the regex engine.
        reason: String,
    },
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::NoRecognizedTokens(format) => {
                write!(f, "Date format '{}' contains no recognized tokens", format)
            }
            FormatError::BadPattern { format, reason } => {
                write!(
                    f,
                    "Could not build a matching pattern for date format '{}': {}",
                    format, reason
                )
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// The semantic field a format token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Day,
    Month,
    Year,
}

/// One placeholder in a date-format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatToken {
    /// `DD` - two-digit day of month.
    Day,
    /// `MM` - two-digit month number.
    MonthNumber,
    /// `MMM` - three-letter month abbreviation, case-insensitive.
    MonthAbbrev,
    /// `MMMM` - full month name, case-insensitive.
    MonthName,
    /// `YYYY` - four-digit year.
    YearFull,
    /// `YY` - two-digit year, century resolved at parse time.
    YearShort,
}

impl FormatToken {
    /// The token at the start of `rest`, with its length in bytes. Longer
    /// token names are tried first so `YYYY`/`MMMM` are never split into
    /// `YY`/`MMM` pairs.
    fn leading(rest: &str) -> Option<(Self, usize)> {
        const NAMES: [(&str, FormatToken); 6] = [
            ("YYYY", FormatToken::YearFull),
            ("MMMM", FormatToken::MonthName),
            ("MMM", FormatToken::MonthAbbrev),
            ("DD", FormatToken::Day),
            ("MM", FormatToken::MonthNumber),
            ("YY", FormatToken::YearShort),
        ];
        NAMES
            .iter()
            .find(|(name, _)| rest.starts_with(name))
            .map(|(name, token)| (*token, name.len()))
    }

    /// The regex fragment this token matches in a filename.
    fn match_pattern(self) -> &'static str {
        match self {
            Self::Day | Self::MonthNumber | Self::YearShort => r"\d{2}",
            Self::YearFull => r"\d{4}",
            Self::MonthAbbrev => "[A-Za-z]{3}",
            Self::MonthName => "[A-Za-z]{4,}",
        }
    }

    /// The date field this token populates.
    pub fn field_type(self) -> FieldType {
        match self {
            Self::Day => FieldType::Day,
            Self::MonthNumber | Self::MonthAbbrev | Self::MonthName => FieldType::Month,
            Self::YearFull | Self::YearShort => FieldType::Year,
        }
    }
}

/// English month names and abbreviations, lowercase, mapped to month numbers.
const MONTH_NAMES: [(&str, u32); 24] = [
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Resolves an English month name or abbreviation to its month number.
fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == lower)
        .map(|(_, month)| *month)
}

/// Decomposes one non-separator segment into a token sequence, e.g.
/// `"DDMMMYYYY"` into `[Day, MonthAbbrev, YearFull]`. Returns `None` if any
/// part of the segment is not a token.
fn tokenize_segment(segment: &str) -> Option<Vec<FormatToken>> {
    let mut tokens = Vec::new();
    let mut rest = segment;
    while !rest.is_empty() {
        let (token, len) = FormatToken::leading(rest)?;
        tokens.push(token);
        rest = &rest[len..];
    }
    (!tokens.is_empty()).then_some(tokens)
}

/// Splits a format string on `-` and `/`, keeping the separators as their
/// own segments so tokens and separators alternate in the result.
fn split_retaining_separators(format: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    for ch in format.chars() {
        if ch == '-' || ch == '/' {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            segments.push(ch.to_string());
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Checks that a format string is usable before it is ever compiled.
///
/// A format must contain at least one recognized token; anything else in it
/// degrades gracefully at compile time (unrecognized segments are skipped,
/// separators become literals). Callers that receive an error here should
/// fall back to [`DEFAULT_FORMAT`] rather than attempt compilation.
pub fn validate(format: &str) -> Result<(), FormatError> {
    let has_token = split_retaining_separators(format)
        .iter()
        .any(|segment| tokenize_segment(segment).is_some());
    if has_token {
        Ok(())
    } else {
        Err(FormatError::NoRecognizedTokens(format.to_string()))
    }
}

/// A date format compiled into a filename matcher and field extractor.
///
/// Produced by [`CompiledFormat::compile`]; rebuilt on demand from
/// configuration and never persisted. Each token becomes a capture group in
/// the pattern, so extraction honors per-position separators and the field
/// order always matches the left-to-right token order of the source format.
pub struct CompiledFormat {
    pattern: Regex,
    fields: Vec<FormatToken>,
}

impl CompiledFormat {
    /// Compiles a format string into a matcher anchored to an entire
    /// `.md`-suffixed filename.
    ///
    /// Token segments contribute a capture group each; bare separators become
    /// escaped literals; unrecognized segments are skipped with a logged
    /// warning, not rejected. Run [`validate`] first - a format with zero
    /// tokens still compiles here but can never usefully match a date.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::BadPattern` if the assembled pattern is rejected
    /// by the regex engine.
    pub fn compile(format: &str) -> Result<Self, FormatError> {
        let mut pattern = String::from("^");
        let mut fields = Vec::new();

        for segment in split_retaining_separators(format) {
            if let Some(tokens) = tokenize_segment(&segment) {
                for token in tokens {
                    pattern.push('(');
                    pattern.push_str(token.match_pattern());
                    pattern.push(')');
                    fields.push(token);
                }
            } else if segment == "-" || segment == "/" {
                pattern.push_str(&regex::escape(&segment));
            } else {
                OutputFormatter::warning(&format!(
                    "Ignoring unrecognized segment '{}' in date format '{}'",
                    segment, format
                ));
            }
        }

        pattern.push_str(r"\.md$");

        let pattern = Regex::new(&pattern).map_err(|e| FormatError::BadPattern {
            format: format.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { pattern, fields })
    }

    /// Returns true if `filename` (including its `.md` suffix) has the shape
    /// of this date format.
    pub fn matches(&self, filename: &str) -> bool {
        self.pattern.is_match(filename)
    }

    /// Parses a filename stem (no `.md` suffix) into a calendar date.
    ///
    /// Returns `None` when the stem does not match the pattern, any field is
    /// out of range or names an unknown month, the format omits a required
    /// field, or the combination is not a real calendar date (e.g. day 31 in
    /// April). Never panics; all failure is the `None` result so callers can
    /// skip-and-report instead of aborting a batch.
    pub fn parse_stem(&self, stem: &str) -> Option<NaiveDate> {
        let filename = format!("{stem}.md");
        let captures = self.pattern.captures(&filename)?;

        let mut day = None;
        let mut month = None;
        let mut year = None;

        for (index, token) in self.fields.iter().enumerate() {
            let segment = captures.get(index + 1)?.as_str();
            match token.field_type() {
                FieldType::Day => {
                    let value: u32 = segment.parse().ok()?;
                    if !(1..=31).contains(&value) {
                        return None;
                    }
                    day = Some(value);
                }
                FieldType::Month => {
                    let value = match token {
                        FormatToken::MonthAbbrev | FormatToken::MonthName => {
                            month_from_name(segment)?
                        }
                        _ => segment.parse().ok()?,
                    };
                    if !(1..=12).contains(&value) {
                        return None;
                    }
                    month = Some(value);
                }
                FieldType::Year => {
                    let mut value: i32 = segment.parse().ok()?;
                    if *token == FormatToken::YearShort {
                        value = if value < 50 { 2000 + value } else { 1900 + value };
                    }
                    if !(1000..=9999).contains(&value) {
                        return None;
                    }
                    year = Some(value);
                }
            }
        }

        // from_ymd_opt rejects impossible combinations that the per-field
        // range checks cannot, such as 31-04 or 29-02 in a non-leap year.
        NaiveDate::from_ymd_opt(year?, month?, day?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_compile_default_format() {
        let compiled = CompiledFormat::compile(DEFAULT_FORMAT).unwrap();
        assert!(compiled.matches("15-07-2019.md"));
        assert!(!compiled.matches("15-07-2019.txt"));
        assert!(!compiled.matches("notes.md"));
    }

    #[test]
    fn test_parse_default_format() {
        let compiled = CompiledFormat::compile(DEFAULT_FORMAT).unwrap();
        assert_eq!(compiled.parse_stem("15-07-2019"), Some(date(2019, 7, 15)));
        assert_eq!(compiled.parse_stem("01-01-2020"), Some(date(2020, 1, 1)));
    }

    #[test]
    fn test_parse_iso_order() {
        let compiled = CompiledFormat::compile("YYYY-MM-DD").unwrap();
        assert_eq!(compiled.parse_stem("2019-07-15"), Some(date(2019, 7, 15)));
        // Fields are positional; the day-first stem has 2019 in day position.
        assert_eq!(compiled.parse_stem("15-07-2019"), None);
    }

    #[test]
    fn test_parse_slash_separator() {
        let compiled = CompiledFormat::compile("DD/MM/YYYY").unwrap();
        assert_eq!(compiled.parse_stem("15/07/2019"), Some(date(2019, 7, 15)));
        assert_eq!(compiled.parse_stem("15-07-2019"), None);
    }

    #[test]
    fn test_parse_month_abbreviation() {
        let compiled = CompiledFormat::compile("DD-MMM-YYYY").unwrap();
        assert_eq!(compiled.parse_stem("01-Jan-2021"), Some(date(2021, 1, 1)));
        assert_eq!(compiled.parse_stem("01-SEP-2021"), Some(date(2021, 9, 1)));
        assert_eq!(compiled.parse_stem("01-Foo-2021"), None);
    }

    #[test]
    fn test_parse_full_month_name() {
        let compiled = CompiledFormat::compile("DD-MMMM-YYYY").unwrap();
        assert_eq!(
            compiled.parse_stem("25-December-2021"),
            Some(date(2021, 12, 25))
        );
        assert_eq!(compiled.parse_stem("25-january-2021"), Some(date(2021, 1, 25)));
        assert_eq!(compiled.parse_stem("25-Smarch-2021"), None);
    }

    #[test]
    fn test_parse_without_separators() {
        let compiled = CompiledFormat::compile("DDMMMYYYY").unwrap();
        assert!(compiled.matches("01Jan2021.md"));
        assert_eq!(compiled.parse_stem("01Jan2021"), Some(date(2021, 1, 1)));
    }

    #[test]
    fn test_two_digit_year_resolution() {
        let compiled = CompiledFormat::compile("DD-MM-YY").unwrap();
        assert_eq!(compiled.parse_stem("15-07-20"), Some(date(2020, 7, 15)));
        assert_eq!(compiled.parse_stem("15-07-99"), Some(date(1999, 7, 15)));
        // Century boundary.
        assert_eq!(compiled.parse_stem("15-07-49"), Some(date(2049, 7, 15)));
        assert_eq!(compiled.parse_stem("15-07-50"), Some(date(1950, 7, 15)));
    }

    #[test]
    fn test_parse_rejects_out_of_range_fields() {
        let compiled = CompiledFormat::compile(DEFAULT_FORMAT).unwrap();
        assert_eq!(compiled.parse_stem("32-01-2021"), None);
        assert_eq!(compiled.parse_stem("00-01-2021"), None);
        assert_eq!(compiled.parse_stem("15-13-2021"), None);
        assert_eq!(compiled.parse_stem("15-00-2021"), None);
        assert_eq!(compiled.parse_stem("15-01-0999"), None);
    }

    #[test]
    fn test_parse_rejects_impossible_calendar_dates() {
        let compiled = CompiledFormat::compile(DEFAULT_FORMAT).unwrap();
        // Passes the 1-31 day range check but April has 30 days.
        assert_eq!(compiled.parse_stem("31-04-2021"), None);
        assert_eq!(compiled.parse_stem("29-02-2021"), None);
        // 2020 was a leap year.
        assert_eq!(compiled.parse_stem("29-02-2020"), Some(date(2020, 2, 29)));
    }

    #[test]
    fn test_parse_rejects_non_matching_stems() {
        let compiled = CompiledFormat::compile(DEFAULT_FORMAT).unwrap();
        assert_eq!(compiled.parse_stem("meeting-notes"), None);
        assert_eq!(compiled.parse_stem("15-07-2019-extra"), None);
        assert_eq!(compiled.parse_stem("2019-07-15"), None);
        assert_eq!(compiled.parse_stem(""), None);
    }

    #[test]
    fn test_format_missing_a_field_never_parses() {
        // No day token, so no stem can produce a complete date.
        let compiled = CompiledFormat::compile("MM-YYYY").unwrap();
        assert!(compiled.matches("07-2019.md"));
        assert_eq!(compiled.parse_stem("07-2019"), None);
    }

    #[test]
    fn test_unrecognized_segments_are_skipped() {
        let compiled = CompiledFormat::compile("DD-MM-YYYY-daily").unwrap();
        assert_eq!(compiled.parse_stem("15-07-2019-"), Some(date(2019, 7, 15)));
    }

    #[test]
    fn test_round_trip_across_formats() {
        let cases = [
            ("DD-MM-YYYY", "03-02-2021"),
            ("YYYY/MM/DD", "2021/02/03"),
            ("DD-MMM-YYYY", "03-Feb-2021"),
            ("DD-MMMM-YYYY", "03-February-2021"),
            ("YY-MM-DD", "21-02-03"),
        ];
        for (format, stem) in cases {
            let compiled = CompiledFormat::compile(format).unwrap();
            assert_eq!(
                compiled.parse_stem(stem),
                Some(date(2021, 2, 3)),
                "format {format} stem {stem}"
            );
        }
    }

    #[test]
    fn test_validate_accepts_token_formats() {
        assert!(validate("DD-MM-YYYY").is_ok());
        assert!(validate("YYYY/MM/DD").is_ok());
        assert!(validate("DDMMMYYYY").is_ok());
        assert!(validate("YYYY").is_ok());
    }

    #[test]
    fn test_validate_rejects_tokenless_formats() {
        assert!(matches!(
            validate("daily-note"),
            Err(FormatError::NoRecognizedTokens(_))
        ));
        assert!(validate("").is_err());
        assert!(validate("dd-mm-yyyy").is_err()); // Tokens are case-sensitive.
    }

    #[test]
    fn test_tokenizer_prefers_longer_tokens() {
        assert_eq!(tokenize_segment("YYYY"), Some(vec![FormatToken::YearFull]));
        assert_eq!(tokenize_segment("YY"), Some(vec![FormatToken::YearShort]));
        assert_eq!(tokenize_segment("MMMM"), Some(vec![FormatToken::MonthName]));
        assert_eq!(tokenize_segment("MMM"), Some(vec![FormatToken::MonthAbbrev]));
        assert_eq!(
            tokenize_segment("DDMMMYYYY"),
            Some(vec![
                FormatToken::Day,
                FormatToken::MonthAbbrev,
                FormatToken::YearFull,
            ])
        );
        // YYY is neither YYYY nor a YY with a valid remainder.
        assert_eq!(tokenize_segment("YYY"), None);
        assert_eq!(tokenize_segment("daily"), None);
    }

    #[test]
    fn test_month_name_table_covers_both_forms() {
        assert_eq!(month_from_name("January"), Some(1));
        assert_eq!(month_from_name("jan"), Some(1));
        assert_eq!(month_from_name("DECEMBER"), Some(12));
        assert_eq!(month_from_name("dec"), Some(12));
        assert_eq!(month_from_name("janu"), None);
    }
}
