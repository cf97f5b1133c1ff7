//! Article sources for the board: data embedded up front, or the news API.

pub mod embedded;
pub mod http;

pub use embedded::EmbeddedFeed;
pub use http::{parse_news_payload, NewsApi};

pub mod prelude {
    pub use super::{EmbeddedFeed, NewsApi};
    pub use nb_core::{ArticleFeed, GenerationClient};
}
