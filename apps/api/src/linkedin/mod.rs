//! Public LinkedIn profile lookup.
//!
//! Only the header card of a public profile page is read (name, headline,
//! location). LinkedIn frequently blocks anonymous requests, so callers treat
//! any failure here as a soft failure.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::resume::{Header, ParsedResume};

pub mod handlers;

const PROFILE_URL_PREFIX: &str = "https://www.linkedin.com/in/";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const NAME_SELECTOR: &str = "h1.text-heading-xlarge";
const TITLE_SELECTOR: &str = "div.text-body-medium";
const LOCATION_SELECTOR: &str = "span.text-body-small";

static PROFILE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"linkedin\.com/in/([^/?]+)").expect("valid profile path regex")
});

/// The username segment of a `linkedin.com/in/<user>` URL.
pub fn extract_username(url: &str) -> Option<String> {
    PROFILE_PATH
        .captures(url)
        .map(|caps| caps[1].to_string())
        .filter(|user| !user.is_empty())
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let text = element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

/// Reads the header card out of a profile page. Missing elements leave the
/// field empty; the name falls back to the username.
pub fn read_profile(html: &str, username: &str, link: &str) -> ParsedResume {
    let document = Html::parse_document(html);
    ParsedResume {
        header: Header {
            name: first_text(&document, NAME_SELECTOR).unwrap_or_else(|| username.to_string()),
            title: first_text(&document, TITLE_SELECTOR).unwrap_or_default(),
            location: first_text(&document, LOCATION_SELECTOR).unwrap_or_default(),
            link: link.to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[derive(Clone)]
pub struct ProfileClient {
    client: Client,
}

impl ProfileClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build profile HTTP client")?;
        Ok(Self { client })
    }

    /// Fetches a public profile page and reads its header card.
    pub async fn fetch_profile(&self, linkedin_url: &str) -> Result<ParsedResume, AppError> {
        let username = extract_username(linkedin_url)
            .ok_or_else(|| AppError::Validation("Invalid LinkedIn URL format".to_string()))?;
        let profile_url = format!("{PROFILE_URL_PREFIX}{username}/");
        info!("Fetching LinkedIn profile: {profile_url}");

        let response = self
            .client
            .get(&profile_url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("LinkedIn request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!("LinkedIn returned {status}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read LinkedIn response: {e}")))?;
        debug!("Fetched {} bytes of profile HTML", html.len());

        Ok(read_profile(&html, &username, linkedin_url))
    }
}
