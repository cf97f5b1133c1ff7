use nb_core::messages::NO_ARTICLES;
use nb_core::{Article, Card, CardLayout, DisplaySurface, Notice};

fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

pub fn card_for(article: &Article, layout: CardLayout) -> Card {
    Card {
        layout,
        title: article.title.clone(),
        summary: Some(article.summary.clone()).filter(|s| !s.trim().is_empty()),
        source: present(&article.source),
        published: article.published.as_ref().map(|p| p.display()),
        link: present(&article.url),
        image: present(&article.image),
    }
}

/// Replace whatever the surface shows with one card per article, or the
/// empty notice when there are none.
pub fn render_into(surface: &dyn DisplaySurface, articles: &[Article], layout: CardLayout) {
    surface.clear();
    if articles.is_empty() {
        surface.show_notice(&Notice::empty(NO_ARTICLES));
        return;
    }
    for article in articles {
        surface.append_card(&card_for(article, layout));
    }
}
