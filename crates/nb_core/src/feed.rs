use async_trait::async_trait;
use crate::types::ArticleList;
use crate::Result;

/// Where the board gets its articles from.
#[async_trait]
pub trait ArticleFeed: Send + Sync {
    fn name(&self) -> &str;

    async fn load(&self) -> Result<ArticleList>;
}

/// Client side of the external generation action.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Ask for fresh articles about `topic`. Any error is a generation failure.
    async fn request_generation(&self, topic: &str) -> Result<()>;
}
