use async_trait::async_trait;
use chrono::Local;
use nb_core::{Article, ArticleList, Published, Result};

pub const GENERATED_SOURCE: &str = "AI Nyhetsredaktion";

/// Server-side producer of fresh articles for a topic.
#[async_trait]
pub trait NewsGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, topic: &str) -> Result<ArticleList>;
}

/// Stand-in generator: fixed headlines built around the topic.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateGenerator;

#[async_trait]
impl NewsGenerator for TemplateGenerator {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(&self, topic: &str) -> Result<ArticleList> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Ok(Vec::new());
        }
        let today = Published::Text(Local::now().format("%Y-%m-%d").to_string());
        let headlines = [
            (format!("Senaste nytt om {}", topic), format!("En sammanfattning av dagens utveckling inom {}.", topic)),
            (format!("Experter kommenterar {}", topic), format!("Flera bedömare ser nya trender inom {}.", topic)),
            (format!("{} i fokus", capitalize(topic)), format!("Frågan om {} diskuteras över hela landet.", topic)),
        ];
        Ok(headlines
            .into_iter()
            .enumerate()
            .map(|(i, (title, summary))| {
                Article::new(title, summary)
                    .with_id(i as u64 + 1)
                    .with_source(GENERATED_SOURCE)
                    .with_published(today.clone())
            })
            .collect())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
