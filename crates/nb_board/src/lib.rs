//! The news board component and the surfaces it can draw on.

pub mod board;
pub mod config;
pub mod events;
pub mod filter;
pub mod generation;
pub mod render;
pub mod surfaces;
pub mod theme;

pub use board::{ArticleBoard, LoadOutcome};
pub use config::{BoardConfig, LEGACY_DARK_MODE_KEY, THEME_KEY};
pub use events::{Dispatch, EventKind, EventLoop, UiEvent};
pub use filter::filter_articles;
pub use generation::GenerationOutcome;

pub mod prelude {
    pub use super::surfaces::*;
    pub use super::{ArticleBoard, BoardConfig, EventLoop, GenerationOutcome, LoadOutcome, UiEvent};
    pub use nb_core::{Article, ArticleList, Result, Error, Theme};
}
