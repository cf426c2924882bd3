use serde::{Deserialize, Serialize};

/// Contact block at the top of a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub link: String,
    /// Never populated by the importer; kept so the editor schema round-trips.
    pub photo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub position: String,
    pub workplace: String,
    pub location: String,
    /// `MM/YYYY`, `Present`, or the raw token when it could not be normalized.
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    /// Always empty on import: description text is not split into bullets.
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: String,
    pub title: String,
    pub issuer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LanguageLevel {
    Native,
    Advanced,
    Intermediate,
    Basic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub level: LanguageLevel,
}

/// A resume document as produced by an import. Every list keeps document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub header: Header,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub achievements: Vec<Achievement>,
    pub certifications: Vec<Certification>,
    pub skills: Vec<String>,
    pub languages: Vec<Language>,
}
