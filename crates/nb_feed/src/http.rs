use std::time::Duration;

use async_trait::async_trait;
use nb_core::{ArticleFeed, ArticleList, Error, GenerationClient, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

const NEWS_PATH: &str = "api/news";
const GENERATE_PATH: &str = "api/generate-news";

/// `/api/news` has served both a bare array and `{ "news": [...] }`.
/// The shape is picked from the first token so decode errors name the
/// offending field instead of a generic untagged mismatch.
#[derive(Debug, Deserialize)]
struct Wrapped {
    news: ArticleList,
}

pub fn parse_news_payload(bytes: &[u8]) -> Result<ArticleList> {
    let unexpected = |e: serde_json::Error| Error::Load(format!("unexpected news payload: {}", e));
    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') => serde_json::from_slice::<ArticleList>(bytes).map_err(unexpected),
        Some(b'{') => Ok(serde_json::from_slice::<Wrapped>(bytes).map_err(unexpected)?.news),
        _ => Err(Error::Load(
            "unexpected news payload: expected an array or an object with `news`".to_string(),
        )),
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    topic: &'a str,
}

/// HTTP client for the news server: loads articles and triggers generation.
#[derive(Debug, Clone)]
pub struct NewsApi {
    client: reqwest::Client,
    base: Url,
}

impl NewsApi {
    pub fn new(base: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self { client: builder.build()?, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }
}

#[async_trait]
impl ArticleFeed for NewsApi {
    fn name(&self) -> &str {
        "news api"
    }

    async fn load(&self) -> Result<ArticleList> {
        let url = self.endpoint(NEWS_PATH)?;
        debug!("Fetching articles from {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        let articles = parse_news_payload(&body)?;
        info!("📰 Loaded {} articles", articles.len());
        Ok(articles)
    }
}

#[async_trait]
impl GenerationClient for NewsApi {
    async fn request_generation(&self, topic: &str) -> Result<()> {
        let url = self.endpoint(GENERATE_PATH)?;
        info!("🤖 Requesting articles about '{}'", topic);
        let response = self
            .client
            .post(url)
            .json(&GenerateRequest { topic })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Generation(format!("server answered {}", status)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_payload_shapes() {
        let bare = parse_news_payload(br#"[{"title": "A", "summary": "a"}, {"title": "B", "summary": "b"}]"#).unwrap();
        let wrapped = parse_news_payload(br#"{"news": [{"title": "A", "summary": "a"}, {"title": "B", "summary": "b"}]}"#).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare[1].title, "B");
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(parse_news_payload(b"<html>"), Err(Error::Load(_))));
        assert!(matches!(parse_news_payload(br#"{"articles": []}"#), Err(Error::Load(_))));
        assert!(matches!(parse_news_payload(b""), Err(Error::Load(_))));
    }

    #[test]
    fn test_payload_errors_name_the_problem() {
        let message = |bytes: &[u8]| match parse_news_payload(bytes) {
            Err(Error::Load(message)) => message,
            other => panic!("expected a load error, got {:?}", other),
        };

        let wrong_title = message(br#"{"news": [{"title": 7, "summary": "B"}]}"#);
        assert!(wrong_title.contains("invalid type"), "{}", wrong_title);
        assert!(wrong_title.contains("line 1"), "{}", wrong_title);

        let bare = message(br#"[{"summary": "B"}]"#);
        assert!(bare.contains("missing field `title`"), "{}", bare);

        let no_news = message(br#"{"articles": []}"#);
        assert!(no_news.contains("missing field `news`"), "{}", no_news);

        let html = message(b"<html>");
        assert!(html.contains("array or an object"), "{}", html);
    }

    #[test]
    fn test_endpoints_keep_base_path() {
        let api = NewsApi::new("http://localhost:8000/board", None).unwrap();
        assert_eq!(api.endpoint(NEWS_PATH).unwrap().as_str(), "http://localhost:8000/board/api/news");

        let api = NewsApi::new("http://localhost:8000", None).unwrap();
        assert_eq!(
            api.endpoint(GENERATE_PATH).unwrap().as_str(),
            "http://localhost:8000/api/generate-news"
        );

        assert!(NewsApi::new("not a url", None).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = NewsApi::new(&format!("http://{}", addr), Some(Duration::from_secs(5))).unwrap();
        assert!(api.load().await.is_err());
        assert!(api.request_generation("väder").await.is_err());
    }
}
