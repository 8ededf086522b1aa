//! Wikiquote wikitext client and quote extraction.

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::{SourceError, SourceResult};
use crate::traits::knowledge::QuoteSource;

const DEFAULT_BASE_URL_TEMPLATE: &str = "https://{locale}.wikiquote.org/w/api.php";
const USER_AGENT: &str = "factcheck/0.1 (contact: info@factcheck.app)";

/// Default cap on quotes returned per subject.
pub const DEFAULT_MAX_QUOTES: usize = 5;

static TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]*\}\}").expect("valid regex"));
static PIPED_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[[^\[\]|]*\|([^\[\]]*)\]\]").expect("valid regex"));
static PLAIN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]]*)\]\]").expect("valid regex"));
static BULLET_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*•\-]+\s*").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Metadata labels that start non-quote bullet lines, in the working
/// languages of the supported editions.
const METADATA_LABELS: &[&str] = &[
    "opis:",
    "źródło:",
    "zrodlo:",
    "zobacz też:",
    "zobacz tez:",
    "description:",
    "source:",
    "see also:",
];

/// Client for the Wikiquote `action=parse` wikitext endpoint.
pub struct WikiquoteClient {
    client: reqwest::Client,
    base_url_template: String,
    max_quotes: usize,
}

impl Default for WikiquoteClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WikiquoteClient {
    /// Create a client with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(15))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url_template: DEFAULT_BASE_URL_TEMPLATE.to_string(),
            max_quotes: DEFAULT_MAX_QUOTES,
        }
    }

    /// Override the base URL template (`{locale}` substituted).
    pub fn with_base_url_template(mut self, template: impl Into<String>) -> Self {
        self.base_url_template = template.into();
        self
    }

    /// Change the per-subject quote cap.
    pub fn with_max_quotes(mut self, max_quotes: usize) -> Self {
        self.max_quotes = max_quotes;
        self
    }

    fn endpoint(&self, locale: &str) -> String {
        self.base_url_template.replace("{locale}", locale)
    }

    async fn page_wikitext(&self, locale: &str, title: &str) -> SourceResult<Option<String>> {
        let url = self.endpoint(locale);
        debug!(url = %url, title = %title, "Fetching Wikiquote wikitext");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "parse"),
                ("prop", "wikitext"),
                ("format", "json"),
                ("formatversion", "2"),
                ("redirects", "1"),
                ("page", &title.replace(' ', "_")),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(title = %title, error = %e, "Wikiquote request failed");
                SourceError::Transport(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(title = %title, status = %status, "Wikiquote API error");
            return Err(SourceError::Transport(Box::new(std::io::Error::other(
                format!("HTTP {}", status),
            ))));
        }

        let root: Value = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        // A missing page answers with an error object, not a parse node.
        let wikitext = root
            .pointer("/parse/wikitext")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(String::from);

        Ok(wikitext)
    }
}

#[async_trait]
impl QuoteSource for WikiquoteClient {
    async fn quotes(&self, locale: &str, title: &str) -> SourceResult<Vec<String>> {
        match self.page_wikitext(locale, title).await? {
            Some(wikitext) => {
                let quotes = extract_quotes(&wikitext, self.max_quotes);
                if quotes.is_empty() {
                    debug!(title = %title, locale = %locale, "No quotes extracted");
                }
                Ok(quotes)
            }
            None => {
                debug!(title = %title, locale = %locale, "Wikiquote page missing");
                Ok(Vec::new())
            }
        }
    }
}

/// Extract candidate quotes from wikitext.
///
/// Bullet-prefixed lines become quotes after markup stripping; lines that
/// begin with a known metadata label are excluded. Capped at `max` quotes.
pub(crate) fn extract_quotes(wikitext: &str, max: usize) -> Vec<String> {
    let mut quotes = Vec::new();

    for line in wikitext.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('*') || trimmed.starts_with('•') || trimmed.starts_with('-') {
            let cleaned = clean_bullet(trimmed);
            if !cleaned.is_empty() && !is_metadata_line(&cleaned) {
                quotes.push(cleaned);
            }
        }
        if quotes.len() >= max {
            break;
        }
    }

    quotes
}

/// Strip wiki markup from a bullet line: bullet prefix, templates, links,
/// bold/italic quote runs, then collapse whitespace.
fn clean_bullet(line: &str) -> String {
    let cleaned = BULLET_PREFIX_RE.replace(line, "");
    let cleaned = TEMPLATE_RE.replace_all(&cleaned, "");
    let cleaned = PIPED_LINK_RE.replace_all(&cleaned, "$1");
    let cleaned = PLAIN_LINK_RE.replace_all(&cleaned, "$1");
    let cleaned = cleaned.replace("'''", "").replace("''", "");
    WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string()
}

fn is_metadata_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    METADATA_LABELS.iter().any(|label| lower.starts_with(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bullet_quotes() {
        let wikitext = "Intro paragraph.\n* First quote.\n• Second quote.\n- Third quote.\n";
        let quotes = extract_quotes(wikitext, 5);
        assert_eq!(quotes, vec!["First quote.", "Second quote.", "Third quote."]);
    }

    #[test]
    fn strips_wiki_markup() {
        let wikitext = "* ''Wiedza'' to [[potęga|siła]] — {{przypis}} mówił [[Bacon]].\n";
        let quotes = extract_quotes(wikitext, 5);
        assert_eq!(quotes, vec!["Wiedza to siła — mówił Bacon."]);
    }

    #[test]
    fn skips_metadata_lines() {
        let wikitext = "* Prawdziwy cytat.\n** Opis: skąd pochodzi\n** Źródło: jakaś książka\n* See also: other page\n";
        let quotes = extract_quotes(wikitext, 5);
        assert_eq!(quotes, vec!["Prawdziwy cytat."]);
    }

    #[test]
    fn caps_quote_count() {
        let wikitext = "* one\n* two\n* three\n* four\n* five\n* six\n* seven\n";
        assert_eq!(extract_quotes(wikitext, 5).len(), 5);
    }

    #[test]
    fn collapses_whitespace() {
        let quotes = extract_quotes("*   spaced    out   quote  \n", 5);
        assert_eq!(quotes, vec!["spaced out quote"]);
    }
}
