use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use nb_core::messages::{GENERATING_LABEL, GENERATION_FAILED, GENERATION_SUCCEEDED, LOAD_FAILED};
use nb_core::{
    Article, ArticleFeed, ArticleList, Control, DisplaySurface, GenerationClient, Notice,
    PreferenceStore, Result, Theme,
};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::config::BoardConfig;
use crate::filter::filter_articles;
use crate::generation::{resolve_topic, BusyControl, GenerationOutcome, InFlight};
use crate::render::render_into;
use crate::theme::{read_theme, write_theme};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(usize),
    /// The error notice is on screen; the message is for logs and callers.
    Failed(String),
}

struct Generation {
    client: Arc<dyn GenerationClient>,
    control: Arc<dyn Control>,
}

/// The news board: holds the current articles, draws them, filters them,
/// and owns the theme switch and the generate button.
///
/// Everything it touches is handed in at construction.
pub struct ArticleBoard {
    surface: Arc<dyn DisplaySurface>,
    feed: Arc<dyn ArticleFeed>,
    store: Arc<dyn PreferenceStore>,
    generation: Option<Generation>,
    config: BoardConfig,
    articles: RwLock<ArticleList>,
    theme: Mutex<Theme>,
    generating: AtomicBool,
}

impl ArticleBoard {
    pub fn new(
        surface: Arc<dyn DisplaySurface>,
        feed: Arc<dyn ArticleFeed>,
        store: Arc<dyn PreferenceStore>,
        config: BoardConfig,
    ) -> Self {
        Self {
            surface,
            feed,
            store,
            generation: None,
            config,
            articles: RwLock::new(Vec::new()),
            theme: Mutex::new(Theme::Light),
            generating: AtomicBool::new(false),
        }
    }

    /// Wire up the generate button and the client it drives.
    pub fn with_generation(mut self, client: Arc<dyn GenerationClient>, control: Arc<dyn Control>) -> Self {
        self.generation = Some(Generation { client, control });
        self
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Page start: restore the theme, then load and draw the articles.
    pub async fn start(&self) -> LoadOutcome {
        self.restore_theme().await;
        self.load_articles().await
    }

    pub async fn load_articles(&self) -> LoadOutcome {
        debug!("Loading articles from {}", self.feed.name());
        match self.feed.load().await {
            Ok(articles) => {
                let count = articles.len();
                self.render(&articles);
                *self.articles.write().await = articles;
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                error!("❌ Error loading news: {}", e);
                self.articles.write().await.clear();
                self.surface.clear();
                self.surface.show_notice(&Notice::error(LOAD_FAILED));
                LoadOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn render(&self, articles: &[Article]) {
        render_into(self.surface.as_ref(), articles, self.config.layout);
    }

    pub fn filter(&self, articles: &[Article], term: &str) -> ArticleList {
        filter_articles(articles, term)
    }

    /// Filter the held articles by `term` and draw the result. Returns how
    /// many cards are shown.
    pub async fn search(&self, term: &str) -> usize {
        let view = filter_articles(&self.articles.read().await, term);
        debug!("Search '{}' matched {} articles", term, view.len());
        self.render(&view);
        view.len()
    }

    pub async fn articles(&self) -> ArticleList {
        self.articles.read().await.clone()
    }

    pub async fn theme(&self) -> Theme {
        *self.theme.lock().await
    }

    pub async fn restore_theme(&self) -> Theme {
        let theme = read_theme(self.store.as_ref(), &self.config).await;
        *self.theme.lock().await = theme;
        self.surface.set_theme(theme);
        debug!("Restored {} theme", theme);
        theme
    }

    /// Flip the theme, persist it, and apply it. Nothing changes on screen
    /// unless the write succeeded. The lock is held across the write so
    /// concurrent toggles cannot interleave.
    pub async fn toggle_theme(&self) -> Result<Theme> {
        let mut current = self.theme.lock().await;
        let next = current.toggled();
        write_theme(self.store.as_ref(), &self.config, next).await?;
        *current = next;
        self.surface.set_theme(next);
        info!("🌓 Switched to {} theme", next);
        Ok(next)
    }

    pub async fn trigger_generation(&self, topic: Option<&str>) -> GenerationOutcome {
        let Some(generation) = &self.generation else {
            warn!("⚠️ Generation requested but no generation client is configured");
            return GenerationOutcome::Unavailable;
        };
        let Some(_in_flight) = InFlight::acquire(&self.generating) else {
            warn!("⚠️ Generation already in progress, ignoring request");
            return GenerationOutcome::Busy;
        };
        let _busy = BusyControl::engage(generation.control.as_ref(), GENERATING_LABEL);

        let topic = resolve_topic(topic, &self.config.default_topic);
        match generation.client.request_generation(&topic).await {
            Ok(()) => {
                info!("✨ Generated new articles about '{}'", topic);
                self.surface.alert(GENERATION_SUCCEEDED);
                GenerationOutcome::Generated(self.load_articles().await)
            }
            Err(e) => {
                error!("❌ Error generating news: {}", e);
                self.surface.alert(GENERATION_FAILED);
                GenerationOutcome::Failed(e.to_string())
            }
        }
    }
}
