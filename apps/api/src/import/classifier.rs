//! Line classification for flattened LinkedIn profile text.
//!
//! Every trimmed, non-empty line is tagged with exactly one `LineType`.
//! Predicates are checked in a fixed precedence order and the first match
//! wins, so a line that looks like both a date range and a location is a
//! `Date`.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Page,
    Date,
    Duration,
    Location,
    Header,
    Text,
}

/// A classified source line. `index` is the line's position among the
/// non-empty lines of the input, before page markers are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    pub line_type: LineType,
    pub index: usize,
}

/// Section titles LinkedIn prints in German and English exports.
pub const SECTION_TITLES: &[&str] = &[
    "Kontakt",
    "Top-Kenntnisse",
    "Certifications",
    "Experience",
    "Berufserfahrung",
    "Ausbildung",
    "Education",
    "Zusammenfassung",
    "Summary",
];

const MAX_LOCATION_CHARS: usize = 60;
const MAX_HEADER_SUBSTRING_CHARS: usize = 25;

static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(page|seite) [0-9]+ (of|von|/) [0-9]+").expect("valid page marker regex")
});

static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-zäöü]{2,} [0-9]{4}\s*-\s*(present|heute|angestellt|[a-zäöü]{2,} [0-9]{4})")
        .expect("valid date range regex")
});

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9]+ (jahre?|monate?)").expect("valid duration regex")
});

pub fn is_page_marker(line: &str) -> bool {
    PAGE_MARKER.is_match(line)
}

pub fn is_date_range(line: &str) -> bool {
    DATE_RANGE.is_match(line)
}

pub fn is_duration(line: &str) -> bool {
    DURATION.is_match(line)
}

/// "City, Country" heuristic. Middle dots mark education lines and `www.`
/// marks contact links, both of which may contain commas.
pub fn is_location(line: &str) -> bool {
    line.contains(',')
        && !is_date_range(line)
        && !line.contains('·')
        && !line.contains("www.")
        && line.chars().count() < MAX_LOCATION_CHARS
}

pub fn is_section_header(line: &str) -> bool {
    let short = line.chars().count() < MAX_HEADER_SUBSTRING_CHARS;
    SECTION_TITLES
        .iter()
        .any(|title| line.eq_ignore_ascii_case(title) || (short && line.contains(title)))
}

/// Tags a single trimmed line. Total: anything unrecognized is `Text`.
pub fn classify(line: &str) -> LineType {
    if is_page_marker(line) {
        LineType::Page
    } else if is_date_range(line) {
        LineType::Date
    } else if is_duration(line) {
        LineType::Duration
    } else if is_location(line) {
        LineType::Location
    } else if is_section_header(line) {
        LineType::Header
    } else {
        LineType::Text
    }
}

/// Splits raw extracted text into classified lines, dropping blank lines and
/// page markers. The result is what the entry builder scans.
pub fn classify_lines(raw: &str) -> Vec<RawLine> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, text)| RawLine {
            text: text.to_string(),
            line_type: classify(text),
            index,
        })
        .filter(|line| line.line_type != LineType::Page)
        .collect()
}
