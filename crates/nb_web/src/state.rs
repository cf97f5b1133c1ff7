use std::sync::Arc;

use nb_core::{Article, ArticleList, CardLayout};
use tokio::sync::RwLock;

use crate::generator::{NewsGenerator, TemplateGenerator};

pub struct AppState {
    pub news: RwLock<ArticleList>,
    pub generator: Arc<dyn NewsGenerator>,
    pub layout: CardLayout,
    pub title: String,
}

impl AppState {
    pub fn new(generator: Arc<dyn NewsGenerator>) -> Self {
        Self {
            news: RwLock::new(seed_news()),
            generator,
            layout: CardLayout::Compact,
            title: "AI Nyheter".to_string(),
        }
    }

    pub fn with_news(self, news: ArticleList) -> Self {
        Self { news: RwLock::new(news), ..self }
    }

    pub fn with_layout(self, layout: CardLayout) -> Self {
        Self { layout, ..self }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(TemplateGenerator))
    }
}

/// What the server shows before anything has been generated.
pub fn seed_news() -> ArticleList {
    use nb_core::Published::Text;
    vec![
        Article::new(
            "AI revolutionerar svenska arbetsplatser",
            "Ny studie visar omfattande AI-adoption inom svensk industri",
        )
        .with_id(1)
        .with_source("TechNews")
        .with_published(Text("2025-08-06".to_string())),
        Article::new("Klimatförändringar påverkar Sverige", "Rekordtemperaturer uppmätta i norra Sverige")
            .with_id(2)
            .with_source("Klimatnyheterna")
            .with_published(Text("2025-08-06".to_string())),
        Article::new("Svensk startup får rekordinvestering", "AI-företag samlar in 100 miljoner kronor")
            .with_id(3)
            .with_source("Startup Sweden")
            .with_published(Text("2025-08-06".to_string())),
    ]
}
