use nb_core::{Article, ArticleList};

/// Case-insensitive substring search over title and summary.
///
/// An empty term keeps everything. The input is never modified; the result
/// is a fresh list in the original order.
pub fn filter_articles(articles: &[Article], term: &str) -> ArticleList {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return articles.to_vec();
    }
    articles
        .iter()
        .filter(|article| {
            article.title.to_lowercase().contains(&needle)
                || article.summary.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
