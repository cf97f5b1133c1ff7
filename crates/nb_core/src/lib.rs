pub mod error;
pub mod feed;
pub mod messages;
pub mod storage;
pub mod surface;
pub mod types;

pub use error::{Error, Result};
pub use feed::{ArticleFeed, GenerationClient};
pub use storage::PreferenceStore;
pub use surface::{Card, CardLayout, Control, DisplaySurface, Notice, NoticeKind};
pub use types::{Article, ArticleList, Published, Theme};

pub mod prelude {
    pub use crate::{Article, ArticleList, Error, Result, Theme};
    pub use crate::{ArticleFeed, DisplaySurface, GenerationClient, PreferenceStore};
}
