//! Entry builder: one forward pass over classified lines that assembles a
//! `ParsedResume`.
//!
//! Each extraction rule is a free function taking a `Cursor` (the line
//! stream plus a position) and returning what it found together with the
//! position the scan should resume at. The scan loop only threads section
//! state and the current company between rules.
//!
//! The builder is total: a rule whose structural assumption fails leaves the
//! affected field empty instead of failing the whole import.

use std::sync::LazyLock;

use regex::Regex;

use crate::import::classifier::{classify_lines, LineType, RawLine};
use crate::import::dates::{normalize_date, strip_annotation};
use crate::import::sections::Section;
use crate::models::resume::{Certification, Education, Experience, Header, ParsedResume};

/// Lines this close to the top may still belong to the profile header, so a
/// company carried over from earlier lines is not trusted there.
const HEADER_REGION_LINES: usize = 15;
const MAX_SKILL_CHARS: usize = 40;
const MIN_CERT_CHARS: usize = 3;
/// Certification titles shorter than this are assumed to be wrapped.
const SHORT_CERT_CHARS: usize = 15;

/// Trailing words that mark a certification title as wrapped onto the next line.
pub const CONNECTIVES: &[&str] = &["with", "and", "of", "for", "core", "in", "the"];

/// Labels that end the title block under the profile name.
const SUMMARY_LABELS: &[&str] = &["Zusammenfassung", "Summary"];

static DATE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*").expect("valid date separator regex"));

static EDUCATION_DATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((.*?)\s*-\s*(.*?)\)").expect("valid education dates regex")
});

static PHONE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{5,}").expect("valid phone regex"));

/// Per-import knobs.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Exact text of the profile owner's name line. When unset, the first
    /// plain text line before any section header is taken as the name.
    pub owner_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

/// A position in the classified line stream with bounded lookaround.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    lines: &'a [RawLine],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(lines: &'a [RawLine], pos: usize) -> Self {
        Self { lines, pos }
    }

    pub fn current(&self) -> Option<&'a RawLine> {
        self.lines.get(self.pos)
    }

    /// The line `n` positions before the cursor, if any.
    pub fn back(&self, n: usize) -> Option<&'a RawLine> {
        self.pos.checked_sub(n).and_then(|i| self.lines.get(i))
    }

    /// The line `n` positions after the cursor, if any.
    pub fn ahead(&self, n: usize) -> Option<&'a RawLine> {
        self.lines.get(self.pos + n)
    }

    fn type_back(&self, n: usize) -> Option<LineType> {
        self.back(n).map(|l| l.line_type)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction rules
// ────────────────────────────────────────────────────────────────────────────

/// Title and location found under the profile name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderBlock {
    pub title: String,
    pub location: Option<String>,
}

/// Absorbs the lines after the name anchor. Stops at a header or summary
/// label, or at a location line which is captured. Resumes at the boundary.
pub fn extract_header_block(at: Cursor<'_>) -> (HeaderBlock, usize) {
    let mut title_parts = Vec::new();
    let mut location = None;
    let mut next = at.pos + 1;

    while let Some(line) = at.lines.get(next) {
        if line.line_type == LineType::Header || SUMMARY_LABELS.contains(&line.text.as_str()) {
            break;
        }
        if line.line_type == LineType::Location {
            location = Some(line.text.clone());
            break;
        }
        if line.line_type == LineType::Text {
            title_parts.push(line.text.as_str());
        }
        next += 1;
    }

    let block = HeaderBlock {
        title: title_parts.join(" ").trim().to_string(),
        location,
    };
    (block, next)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContactField {
    Email(String),
    Link(String),
    Phone(String),
}

pub fn extract_contact(text: &str) -> Option<ContactField> {
    if text.contains('@') {
        Some(ContactField::Email(text.to_string()))
    } else if text.contains("linkedin.com") {
        let url = text.replacen("(LinkedIn)", "", 1);
        Some(ContactField::Link(format!("https://{}", url.trim())))
    } else if PHONE_DIGITS.is_match(text) {
        Some(ContactField::Phone(strip_annotation(text).to_string()))
    } else {
        None
    }
}

fn apply_contact(header: &mut Header, field: ContactField) {
    match field {
        ContactField::Email(email) => header.email = email,
        ContactField::Link(link) => header.link = link,
        ContactField::Phone(phone) => header.phone = phone,
    }
}

pub fn extract_skill(line: &RawLine) -> Option<String> {
    (line.line_type == LineType::Text && line.text.chars().count() < MAX_SKILL_CHARS)
        .then(|| line.text.clone())
}

/// True when `title` looks cut off and the next line continues it.
pub fn continues_certification(title: &str) -> bool {
    let last_word = title.split(' ').last().unwrap_or_default();
    CONNECTIVES.iter().any(|c| last_word.eq_ignore_ascii_case(c))
        || title.chars().count() < SHORT_CERT_CHARS
}

/// Appends a certification line, merging it into the previous title when
/// that title was wrapped.
pub fn push_certification(certs: &mut Vec<Certification>, text: &str, id: String) {
    if let Some(last) = certs.last_mut() {
        if continues_certification(&last.title) {
            last.title.push(' ');
            last.title.push_str(text);
            return;
        }
    }
    certs.push(Certification {
        id,
        title: text.to_string(),
        issuer: String::new(),
    });
}

/// One experience entry plus the company that stays current afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceMatch {
    pub entry: Experience,
    pub company: String,
}

fn split_date_range(text: &str) -> (String, String) {
    let mut ends = DATE_SEPARATOR
        .split(text)
        .map(|part| strip_annotation(part.trim()));
    let start = ends.next().map(normalize_date).unwrap_or_default();
    let end = ends.next().map(normalize_date).unwrap_or_default();
    (start, end)
}

/// Builds an experience entry around the date-range line under the cursor.
///
/// Layouts handled:
/// - `Company / Duration / Position / Date` (several roles at one company)
/// - `Company / Position / Date` (single role)
/// - `Position / Company / Duration / Date`
///
/// An optional location line follows the date; everything after it up to the
/// next date, duration or header is the description.
pub fn extract_experience(at: Cursor<'_>, current_company: &str) -> (ExperienceMatch, usize) {
    let line = match at.current() {
        Some(line) => line,
        None => {
            let empty = ExperienceMatch {
                entry: Experience::default(),
                company: current_company.to_string(),
            };
            return (empty, at.pos + 1);
        }
    };

    let (start_date, end_date) = split_date_range(&line.text);

    // A duration annotation is never a position: step over it and the
    // company line in front of it.
    let position = if at.type_back(1) == Some(LineType::Duration) {
        at.back(3)
            .filter(|l| l.line_type == LineType::Text)
            .map(|l| l.text.clone())
            .unwrap_or_default()
    } else {
        at.back(1).map(|l| l.text.clone()).unwrap_or_default()
    };

    let mut company = current_company.to_string();
    if company.is_empty() || at.pos < HEADER_REGION_LINES {
        if let Some(candidate) = at.back(2) {
            if candidate.line_type == LineType::Text && candidate.text != position {
                company = candidate.text.clone();
            }
        }
    }

    let location = at
        .ahead(1)
        .filter(|l| l.line_type == LineType::Location)
        .map(|l| l.text.clone());

    let mut next = at.pos + if location.is_some() { 2 } else { 1 };
    let mut description: Vec<&str> = Vec::new();
    while let Some(l) = at.lines.get(next) {
        if matches!(
            l.line_type,
            LineType::Date | LineType::Header | LineType::Duration
        ) {
            break;
        }
        description.push(l.text.as_str());
        next += 1;
    }

    let entry = Experience {
        id: format!("exp-{}", line.index),
        position,
        workplace: company.clone(),
        location: location.unwrap_or_default(),
        start_date,
        end_date,
        description: description.join(" ").trim().to_string(),
        bullets: Vec::new(),
    };
    (ExperienceMatch { entry, company }, next)
}

/// A combined "Degree · (start - end)" line.
pub fn is_education_line(text: &str) -> bool {
    text.contains('·') && text.contains('(')
}

/// Builds an education entry from the combined degree line under the
/// cursor, looking back for the institution and a wrapped degree prefix.
pub fn extract_education(at: Cursor<'_>) -> Option<Education> {
    let line = at.current()?;
    if !is_education_line(&line.text) {
        return None;
    }

    let degree = line.text.split('·').next().unwrap_or_default().trim();
    let (start_date, end_date) = EDUCATION_DATES
        .captures(&line.text)
        .map(|caps| (normalize_date(&caps[1]), normalize_date(&caps[2])))
        .unwrap_or_default();

    let (institution, prefix) = match (at.back(2), at.back(1)) {
        (_, Some(prev)) if prev.line_type != LineType::Text => (String::new(), None),
        (Some(two), Some(prev))
            if two.line_type == LineType::Text && !is_education_line(&two.text) =>
        {
            (two.text.clone(), Some(prev.text.as_str()))
        }
        (_, Some(prev)) => (prev.text.clone(), None),
        (_, None) => (String::new(), None),
    };

    let degree = match prefix {
        Some(prefix) => format!("{prefix} {degree}"),
        None => degree.to_string(),
    };

    Some(Education {
        id: format!("edu-{}", line.index),
        institution,
        degree,
        start_date,
        end_date,
        location: String::new(),
        bullets: Vec::new(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Scan
// ────────────────────────────────────────────────────────────────────────────

struct Scan<'o> {
    resume: ParsedResume,
    section: Section,
    seen_header: bool,
    company: String,
    owner_name: Option<&'o str>,
}

impl<'o> Scan<'o> {
    fn new(options: &'o ImportOptions) -> Self {
        Self {
            resume: ParsedResume::default(),
            section: Section::None,
            seen_header: false,
            company: String::new(),
            owner_name: options.owner_name.as_deref().filter(|n| !n.trim().is_empty()),
        }
    }

    fn is_anchor(&self, line: &RawLine) -> bool {
        match self.owner_name {
            Some(name) => line.text == name,
            None => {
                !self.seen_header
                    && line.line_type == LineType::Text
                    && self.resume.header.name.is_empty()
            }
        }
    }

    fn known_name(&self) -> Option<&str> {
        self.owner_name.or_else(|| {
            let name = self.resume.header.name.as_str();
            (!name.is_empty()).then_some(name)
        })
    }

    /// Handles the line under the cursor and returns where to continue.
    fn step(&mut self, at: Cursor<'_>) -> usize {
        let next = at.pos + 1;
        let Some(line) = at.current() else {
            return next;
        };

        if line.line_type == LineType::Header {
            self.section = Section::from_header(&line.text);
            self.seen_header = true;
            return next;
        }

        if self.is_anchor(line) {
            self.resume.header.name = line.text.clone();
            let (block, resume_at) = extract_header_block(at);
            self.resume.header.title = block.title;
            if let Some(location) = block.location {
                self.resume.header.location = location;
            }
            return resume_at;
        }

        match self.section {
            Section::Contact => {
                if let Some(field) = extract_contact(&line.text) {
                    apply_contact(&mut self.resume.header, field);
                }
            }
            Section::Skills => {
                if let Some(skill) = extract_skill(line) {
                    self.resume.skills.push(skill);
                }
            }
            Section::Certs => {
                let is_owner = self
                    .known_name()
                    .is_some_and(|name| line.text.contains(name));
                if line.line_type == LineType::Text
                    && line.text.chars().count() >= MIN_CERT_CHARS
                    && !is_owner
                {
                    push_certification(
                        &mut self.resume.certifications,
                        &line.text,
                        format!("cert-{}", line.index),
                    );
                }
            }
            Section::Experience => match line.line_type {
                LineType::Duration => {
                    if let Some(prev) = at.back(1) {
                        self.company = prev.text.clone();
                    }
                }
                LineType::Date => {
                    let (found, resume_at) = extract_experience(at, &self.company);
                    self.company = found.company;
                    self.resume.experience.push(found.entry);
                    return resume_at;
                }
                _ => {}
            },
            Section::Education => {
                if let Some(entry) = extract_education(at) {
                    self.resume.education.push(entry);
                }
            }
            Section::None => {}
        }

        next
    }
}

/// Parses the flattened text of a LinkedIn profile PDF into a resume.
///
/// Never fails: unrecognized layouts yield an empty skeleton that the caller
/// is expected to put in front of a human for review.
pub fn parse_linkedin_text(raw: &str, options: &ImportOptions) -> ParsedResume {
    let lines = classify_lines(raw);
    let mut scan = Scan::new(options);
    let mut pos = 0;
    while pos < lines.len() {
        // Every rule resumes strictly after the cursor.
        pos = scan.step(Cursor::new(&lines, pos)).max(pos + 1);
    }
    scan.resume
}

/// `parse_linkedin_text` with default options.
pub fn parse(raw: &str) -> ParsedResume {
    parse_linkedin_text(raw, &ImportOptions::default())
}
