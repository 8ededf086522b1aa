//! Reference context - structured background about a subject, as returned
//! by the encyclopedia summary endpoint.

use serde::{Deserialize, Serialize};

/// Structured summary of a subject retrieved from a knowledge source.
///
/// Field names follow the Wikipedia REST `/page/summary` payload; unknown
/// fields are ignored on deserialization. Lifetime is one verification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceContext {
    /// Article title.
    pub title: String,

    /// Brief one-line description.
    #[serde(default)]
    pub description: Option<String>,

    /// Longer article extract used as prompt material.
    #[serde(default)]
    pub extract: Option<String>,

    /// External identity key (Wikidata item, e.g. "Q619"). May be absent,
    /// in which case identity validation fails.
    #[serde(default, rename = "wikibase_item")]
    pub entity_id: Option<String>,

    /// Thumbnail image reference.
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,

    /// Canonical article URLs.
    #[serde(default, rename = "content_urls")]
    pub content_urls: Option<ContentUrls>,
}

impl ReferenceContext {
    /// Create a minimal context with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            extract: None,
            entity_id: None,
            thumbnail: None,
            content_urls: None,
        }
    }

    /// Set the extract.
    pub fn with_extract(mut self, extract: impl Into<String>) -> Self {
        self.extract = Some(extract.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the entity id.
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Canonical desktop URL of the article, if known.
    pub fn page_url(&self) -> Option<&str> {
        self.content_urls
            .as_ref()
            .and_then(|urls| urls.desktop.as_ref())
            .map(|info| info.page.as_str())
    }
}

/// Thumbnail image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// Canonical URLs for an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentUrls {
    #[serde(default)]
    pub desktop: Option<UrlInfo>,
    #[serde(default)]
    pub mobile: Option<UrlInfo>,
}

/// URL information for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlInfo {
    pub page: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_summary_payload() {
        let json = r#"{
            "title": "Nicolaus Copernicus",
            "description": "Polish astronomer",
            "extract": "Renaissance mathematician and astronomer.",
            "wikibase_item": "Q619",
            "thumbnail": {"source": "https://img.example/c.jpg", "width": 240, "height": 320},
            "content_urls": {"desktop": {"page": "https://en.wikipedia.org/wiki/Nicolaus_Copernicus"}},
            "pageid": 21488
        }"#;

        let ctx: ReferenceContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.title, "Nicolaus Copernicus");
        assert_eq!(ctx.entity_id.as_deref(), Some("Q619"));
        assert_eq!(
            ctx.page_url(),
            Some("https://en.wikipedia.org/wiki/Nicolaus_Copernicus")
        );
        assert_eq!(ctx.thumbnail.unwrap().width, 240);
    }

    #[test]
    fn tolerates_sparse_payload() {
        let ctx: ReferenceContext = serde_json::from_str(r#"{"title": "Something"}"#).unwrap();
        assert!(ctx.entity_id.is_none());
        assert!(ctx.page_url().is_none());
    }
}
