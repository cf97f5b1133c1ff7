use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize};

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One displayable news record.
///
/// Older payloads call the body `description` and the date `timestamp`; both
/// spellings deserialize into the same fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default, alias = "description", deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, rename = "date", alias = "timestamp", skip_serializing_if = "Option::is_none")]
    pub published: Option<Published>,
}

impl Article {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            summary: summary.into(),
            source: None,
            url: None,
            image: None,
            published: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_published(mut self, published: Published) -> Self {
        self.published = Some(published);
        self
    }
}

/// Ordered collection of articles, always replaced wholesale.
pub type ArticleList = Vec<Article>;

/// Publication time: a real instant (RFC 3339 or epoch milliseconds) or text
/// the server already formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Published {
    Instant(DateTime<Utc>),
    Millis(i64),
    Text(String),
}

impl Published {
    /// Instants use the Swedish locale layout (`2025-08-06 14:03:00`) in local time.
    pub fn display(&self) -> String {
        match self {
            Published::Instant(at) => local_format(at),
            Published::Millis(ms) => DateTime::from_timestamp_millis(*ms)
                .map(|at| local_format(&at))
                .unwrap_or_else(|| ms.to_string()),
            Published::Text(text) => text.clone(),
        }
    }
}

fn local_format(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Class set on the page body; light mode carries none.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_description_alias() {
        let article: Article = serde_json::from_str(
            r#"{"title": "Väder", "description": "Regn i Göteborg", "url": "https://example.se/a", "image": "a.jpg"}"#,
        )
        .unwrap();
        assert_eq!(article.summary, "Regn i Göteborg");
        assert_eq!(article.url.as_deref(), Some("https://example.se/a"));
        assert_eq!(article.image.as_deref(), Some("a.jpg"));
        assert!(article.source.is_none());
    }

    #[test]
    fn test_date_shapes() {
        let text: Article =
            serde_json::from_str(r#"{"id": 1, "title": "A", "summary": "B", "date": "2025-08-06"}"#).unwrap();
        assert_eq!(text.published, Some(Published::Text("2025-08-06".to_string())));
        assert_eq!(text.id, Some(1));

        let instant: Article =
            serde_json::from_str(r#"{"title": "A", "summary": "B", "timestamp": "2025-06-15T12:00:00Z"}"#).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(instant.published, Some(Published::Instant(expected)));
    }

    #[test]
    fn test_epoch_millis_timestamp() {
        let article: Article =
            serde_json::from_str(r#"{"title": "A", "summary": "B", "timestamp": 1722950000000}"#).unwrap();
        assert_eq!(article.published, Some(Published::Millis(1722950000000)));

        let shown = article.published.as_ref().unwrap().display();
        assert!(shown.starts_with("2024-08-0"));
        assert_eq!(shown.len(), "2024-08-06 13:13:20".len());

        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains(r#""date":1722950000000"#));
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);

        // Out of range for chrono: shown as the raw number.
        assert_eq!(Published::Millis(i64::MAX).display(), i64::MAX.to_string());
    }

    #[test]
    fn test_null_fields_are_absent() {
        let article: Article = serde_json::from_str(
            r#"{"title": "A", "summary": null, "source": null, "url": null, "image": null, "date": null}"#,
        )
        .unwrap();
        assert_eq!(article, Article::new("A", ""));

        let old: Article = serde_json::from_str(r#"{"title": "A", "description": null}"#).unwrap();
        assert_eq!(old.summary, "");
    }

    #[test]
    fn test_published_display() {
        assert_eq!(Published::Text("igår".to_string()).display(), "igår");
        let at = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let shown = Published::Instant(at).display();
        assert!(shown.starts_with("2025-06-1"));
        assert_eq!(shown.len(), "2025-06-15 12:00:00".len());
    }

    #[test]
    fn test_theme() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.css_class(), Some("dark"));
        assert_eq!(Theme::Light.css_class(), None);
    }
}
