use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use nb_board::surfaces::HtmlSurface;
use nb_board::{ArticleBoard, BoardConfig};
use nb_core::ArticleList;
use nb_feed::EmbeddedFeed;
use nb_storage::MemoryStore;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::AppState;

/// Topic used when the request body leaves it out.
pub const FALLBACK_TOPIC: &str = "allmänna nyheter";

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsResponse {
    pub news: ArticleList,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default = "fallback_topic")]
    pub topic: String,
}

fn fallback_topic() -> String {
    FALLBACK_TOPIC.to_string()
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenerateStatus {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub status: GenerateStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles: Option<ArticleList>,
}

/// The board page with the current news embedded, rendered on the server.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let news = state.news.read().await.clone();
    let surface = Arc::new(HtmlSurface::new());
    let board = ArticleBoard::new(
        surface.clone(),
        Arc::new(EmbeddedFeed::new(news)),
        Arc::new(MemoryStore::new()),
        BoardConfig::default().with_layout(state.layout),
    );
    board.start().await;
    Html(surface.page(&state.title))
}

pub async fn list_news(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(NewsResponse { news: state.news.read().await.clone() })
}

pub async fn generate_news(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    info!("🤖 Generating news about '{}' with {}", request.topic, state.generator.name());
    match state.generator.generate(&request.topic).await {
        Ok(articles) if !articles.is_empty() => {
            let message = format!("Genererade {} nya artiklar!", articles.len());
            *state.news.write().await = articles.clone();
            info!("✨ {}", message);
            (
                StatusCode::OK,
                Json(GenerateResponse { status: GenerateStatus::Success, message, articles: Some(articles) }),
            )
        }
        Ok(_) => {
            warn!("⚠️ Generator returned no usable articles for '{}'", request.topic);
            (
                StatusCode::OK,
                Json(GenerateResponse {
                    status: GenerateStatus::Warning,
                    message: "Kunde inte generera användbara artiklar".to_string(),
                    articles: None,
                }),
            )
        }
        Err(e) => {
            error!("❌ News generation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerateResponse {
                    status: GenerateStatus::Error,
                    message: format!("Fel vid nyhetsgenereringen: {}", e),
                    articles: None,
                }),
            )
        }
    }
}
