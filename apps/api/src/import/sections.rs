/// The document region whose extraction rules currently apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    None,
    Contact,
    Skills,
    Certs,
    Experience,
    Education,
}

/// Lowercase keyword fragments per section, checked in order.
pub const SECTION_KEYWORDS: &[(&[&str], Section)] = &[
    (&["kontakt"], Section::Contact),
    (&["kenntnisse"], Section::Skills),
    (&["certif"], Section::Certs),
    (&["berufs", "experience"], Section::Experience),
    (&["ausbild", "education"], Section::Education),
];

impl Section {
    /// Transition taken on a header line. Headers with no known keyword
    /// (e.g. "Zusammenfassung") leave every section.
    pub fn from_header(text: &str) -> Section {
        let lower = text.to_lowercase();
        SECTION_KEYWORDS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(*k)))
            .map(|(_, section)| *section)
            .unwrap_or(Section::None)
    }
}
