use std::path::Path;

use async_trait::async_trait;
use nb_core::{Article, ArticleFeed, ArticleList, Result};

use crate::http::parse_news_payload;

/// Articles known before the board starts, e.g. rendered into the page by the server.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedFeed {
    articles: ArticleList,
}

impl EmbeddedFeed {
    pub fn new(articles: ArticleList) -> Self {
        Self { articles }
    }

    /// Accepts the same shapes as the news API: a bare array or `{"news": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(parse_news_payload(json.as_bytes())?))
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(parse_news_payload(&bytes)?))
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }
}

#[async_trait]
impl ArticleFeed for EmbeddedFeed {
    fn name(&self) -> &str {
        "embedded"
    }

    async fn load(&self) -> Result<ArticleList> {
        Ok(self.articles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_feed() {
        let feed = EmbeddedFeed::from_json(
            r#"[{"title": "Sweden News", "description": "Sol i Stockholm", "url": "https://example.se", "image": "sol.jpg"}]"#,
        )
        .unwrap();
        let articles = feed.load().await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].summary, "Sol i Stockholm");

        // Loading twice yields the same list.
        assert_eq!(feed.load().await.unwrap(), articles);
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.json");
        std::fs::write(&path, r#"{"news": [{"title": "A", "summary": "B"}]}"#).unwrap();

        let feed = EmbeddedFeed::from_path(&path).await.unwrap();
        assert_eq!(feed.articles().len(), 1);
    }
}
