use serde::Serialize;

use crate::import::dates::is_normalized;
use crate::models::resume::ParsedResume;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// The field is almost certainly wrong or missing.
    Warning,
    /// Worth a glance, often fine.
    Advisory,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewIssue {
    pub field: String,
    pub severity: IssueSeverity,
    pub message: String,
}

/// Import quality summary returned next to the parsed resume so the editor
/// can ask the user to check specific fields.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReview {
    /// No warning-level issues.
    pub complete: bool,
    /// Weighted share of checks passed, 0.0 – 1.0.
    pub score: f64,
    pub issues: Vec<ReviewIssue>,
}

const CHECK_WEIGHTS: &[(&str, f64)] = &[
    ("header.name", 0.20),
    ("header.title", 0.05),
    ("header.email", 0.10),
    ("experience", 0.35),
    ("education", 0.15),
    ("skills", 0.10),
    ("certifications", 0.05),
];

/// English sidebar labels the parser does not treat as section headers. A
/// name equal to one of these means the header anchor landed on the sidebar.
const SIDEBAR_LABELS: &[&str] = &[
    "Contact",
    "Top Skills",
    "Languages",
    "Honors-Awards",
    "Publications",
];

fn weight_of(field: &str) -> f64 {
    CHECK_WEIGHTS
        .iter()
        .find(|(key, _)| *key == field)
        .map(|(_, w)| *w)
        .unwrap_or(0.0)
}

fn issue(field: impl Into<String>, severity: IssueSeverity, message: impl Into<String>) -> ReviewIssue {
    ReviewIssue {
        field: field.into(),
        severity,
        message: message.into(),
    }
}

fn check_date(issues: &mut Vec<ReviewIssue>, field: String, value: &str) {
    if !value.is_empty() && !is_normalized(value) {
        issues.push(issue(
            field,
            IssueSeverity::Advisory,
            format!("Date '{value}' could not be read; expected MM/YYYY or Present"),
        ));
    }
}

pub fn review_import(resume: &ParsedResume) -> ImportReview {
    let mut issues = Vec::new();
    let mut failed_weight = 0.0;

    let mut require = |present: bool, field: &str, severity: IssueSeverity, message: &str| {
        if !present {
            failed_weight += weight_of(field);
            issues.push(issue(field, severity, message));
        }
    };

    let header = &resume.header;
    require(
        !header.name.is_empty(),
        "header.name",
        IssueSeverity::Warning,
        "No name found; enter it manually or pass the profile owner's name",
    );
    require(
        !header.title.is_empty(),
        "header.title",
        IssueSeverity::Advisory,
        "No headline found under the name",
    );
    require(
        !header.email.is_empty(),
        "header.email",
        IssueSeverity::Advisory,
        "No email address found in the contact section",
    );
    require(
        !resume.experience.is_empty(),
        "experience",
        IssueSeverity::Warning,
        "No experience entries found",
    );
    require(
        !resume.education.is_empty(),
        "education",
        IssueSeverity::Advisory,
        "No education entries found",
    );
    require(
        !resume.skills.is_empty(),
        "skills",
        IssueSeverity::Advisory,
        "No skills found",
    );
    require(
        !resume.certifications.is_empty(),
        "certifications",
        IssueSeverity::Advisory,
        "No certifications found",
    );

    if SIDEBAR_LABELS
        .iter()
        .any(|label| header.name.eq_ignore_ascii_case(label))
    {
        issues.push(issue(
            "header.name",
            IssueSeverity::Advisory,
            format!(
                "Name '{}' looks like a sidebar label; pass the profile owner's name",
                header.name
            ),
        ));
    }

    for (i, exp) in resume.experience.iter().enumerate() {
        if exp.position.is_empty() {
            issues.push(issue(
                format!("experience[{i}].position"),
                IssueSeverity::Warning,
                "Position is empty",
            ));
        }
        if exp.workplace.is_empty() {
            issues.push(issue(
                format!("experience[{i}].workplace"),
                IssueSeverity::Warning,
                "Company is empty",
            ));
        }
        check_date(&mut issues, format!("experience[{i}].startDate"), &exp.start_date);
        check_date(&mut issues, format!("experience[{i}].endDate"), &exp.end_date);
    }

    for (i, edu) in resume.education.iter().enumerate() {
        if edu.institution.is_empty() {
            issues.push(issue(
                format!("education[{i}].institution"),
                IssueSeverity::Advisory,
                "Institution is empty",
            ));
        }
        check_date(&mut issues, format!("education[{i}].startDate"), &edu.start_date);
        check_date(&mut issues, format!("education[{i}].endDate"), &edu.end_date);
    }

    let total_weight: f64 = CHECK_WEIGHTS.iter().map(|(_, w)| w).sum();
    let score = if total_weight > 0.0 {
        ((total_weight - failed_weight) / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    ImportReview {
        complete: !issues.iter().any(|i| i.severity == IssueSeverity::Warning),
        score,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Experience, Header};

    fn full_resume() -> ParsedResume {
        ParsedResume {
            header: Header {
                name: "Jane Doe".to_string(),
                title: "Engineer".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
            experience: vec![Experience {
                id: "exp-1".to_string(),
                position: "Engineer".to_string(),
                workplace: "Acme".to_string(),
                start_date: "01/2020".to_string(),
                end_date: "Present".to_string(),
                ..Default::default()
            }],
            education: vec![Education {
                id: "edu-1".to_string(),
                institution: "TU Berlin".to_string(),
                degree: "MSc".to_string(),
                start_date: "10/2015".to_string(),
                end_date: "09/2018".to_string(),
                ..Default::default()
            }],
            skills: vec!["Rust".to_string()],
            certifications: vec![crate::models::resume::Certification {
                id: "cert-1".to_string(),
                title: "CKA".to_string(),
                issuer: String::new(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_full_resume_is_complete() {
        let review = review_import(&full_resume());
        assert!(review.complete);
        assert!(review.issues.is_empty());
        assert!((review.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_resume_is_incomplete_with_zero_score() {
        let review = review_import(&ParsedResume::default());
        assert!(!review.complete);
        assert!(review.score.abs() < 1e-9);
        assert!(review.issues.iter().any(|i| i.field == "header.name"));
        assert!(review.issues.iter().any(|i| i.field == "experience"));
    }

    #[test]
    fn test_missing_workplace_is_a_warning() {
        let mut resume = full_resume();
        resume.experience[0].workplace.clear();
        let review = review_import(&resume);
        assert!(!review.complete);
        let found = review
            .issues
            .iter()
            .find(|i| i.field == "experience[0].workplace")
            .unwrap();
        assert_eq!(found.severity, IssueSeverity::Warning);
    }

    #[test]
    fn test_unparsed_dates_are_advisory() {
        let mut resume = full_resume();
        resume.education[0].start_date = "2011".to_string();
        let review = review_import(&resume);
        assert!(review.complete);
        assert_eq!(review.issues.len(), 1);
        assert_eq!(review.issues[0].field, "education[0].startDate");
        assert_eq!(review.issues[0].severity, IssueSeverity::Advisory);
    }

    #[test]
    fn test_sidebar_label_as_name_is_flagged() {
        let resume =
            crate::import::builder::parse("Contact\njane@x.com\nTop Skills\nRust\n");
        assert_eq!(resume.header.name, "Contact");
        let review = review_import(&resume);
        let found = review
            .issues
            .iter()
            .find(|i| i.field == "header.name")
            .unwrap();
        assert_eq!(found.severity, IssueSeverity::Advisory);
        assert!(found.message.contains("sidebar label"));
    }

    #[test]
    fn test_real_name_is_not_flagged_as_sidebar_label() {
        let review = review_import(&full_resume());
        assert!(review.issues.iter().all(|i| i.field != "header.name"));
    }

    #[test]
    fn test_missing_skills_lowers_score_only() {
        let mut resume = full_resume();
        resume.skills.clear();
        let review = review_import(&resume);
        assert!(review.complete);
        assert!((review.score - 0.9).abs() < 1e-9);
    }
}
