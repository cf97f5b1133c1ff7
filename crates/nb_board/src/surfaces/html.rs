use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};

use nb_core::messages::{GENERATE_LABEL, PUBLISHED_PREFIX, READ_MORE, SEARCH_PLACEHOLDER};
use nb_core::{Card, CardLayout, DisplaySurface, Notice, NoticeKind, Theme};
use tracing::info;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn card_markup(card: &Card) -> String {
    let mut out = String::new();
    let title = html_escape(&card.title);
    match card.layout {
        CardLayout::Classic => {
            out.push_str("<div class=\"news-article\">");
            if let Some(image) = &card.image {
                let _ = write!(out, "<img src=\"{}\" alt=\"{}\">", html_escape(image), title);
            }
            let _ = write!(out, "<h2>{}</h2>", title);
            if let Some(summary) = &card.summary {
                let _ = write!(out, "<p>{}</p>", html_escape(summary));
            }
            if let Some(source) = &card.source {
                let _ = write!(out, "<span class=\"source\">{}</span>", html_escape(source));
            }
            if let Some(published) = &card.published {
                let _ = write!(out, "<small>{} {}</small>", PUBLISHED_PREFIX, html_escape(published));
            }
        }
        CardLayout::Compact => {
            out.push_str("<div class=\"news-card\">");
            if let Some(image) = &card.image {
                let _ = write!(out, "<img src=\"{}\" alt=\"{}\">", html_escape(image), title);
            }
            let _ = write!(out, "<h3>{}</h3>", title);
            if let Some(summary) = &card.summary {
                let _ = write!(out, "<p class=\"summary\">{}</p>", html_escape(summary));
            }
            if card.source.is_some() || card.published.is_some() {
                out.push_str("<div class=\"meta\">");
                if let Some(source) = &card.source {
                    let _ = write!(out, "<span class=\"source\">{}</span>", html_escape(source));
                }
                if let Some(published) = &card.published {
                    let _ = write!(out, "<span class=\"date\">{}</span>", html_escape(published));
                }
                out.push_str("</div>");
            }
        }
    }
    if let Some(link) = &card.link {
        let _ = write!(out, "<a href=\"{}\" target=\"_blank\">{}</a>", html_escape(link), READ_MORE);
    }
    out.push_str("</div>");
    out
}

const PAGE_STYLE: &str = "body{font-family:sans-serif;margin:0 auto;max-width:48rem;padding:1rem;background:#fff;color:#222}\
body.dark{background:#181a1b;color:#e8e6e3}\
.news-card,.news-article{border-bottom:1px solid #8884;padding:.75rem 0}\
.meta{font-size:.85em;opacity:.7;display:flex;gap:1rem}\
.error{color:#c0392b}";

#[derive(Debug, Default)]
struct HtmlState {
    container: Vec<String>,
    theme: Theme,
    alert: Option<String>,
}

/// Renders the board as HTML markup.
#[derive(Debug, Default)]
pub struct HtmlSurface {
    state: Mutex<HtmlState>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, HtmlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inner markup of the news container.
    pub fn container_html(&self) -> String {
        self.state().container.concat()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.state().alert.clone()
    }

    /// A complete document: controls, container, and the body class for the theme.
    pub fn page(&self, title: &str) -> String {
        let state = self.state();
        let title = html_escape(title);
        let body_class = state
            .theme
            .css_class()
            .map(|class| format!(" class=\"{}\"", class))
            .unwrap_or_default();
        let checked = if state.theme.is_dark() { " checked" } else { "" };

        format!(
            "<!DOCTYPE html>\n<html lang=\"sv\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{style}</style>\n</head>\n\
             <body{body_class}>\n<header>\n<h1>{title}</h1>\n\
             <input type=\"search\" id=\"search\" placeholder=\"{placeholder}\">\n\
             <label class=\"switch\"><input type=\"checkbox\" id=\"theme-switch\" class=\"theme-toggle\"{checked}></label>\n\
             <button id=\"generate-news\">{generate}</button>\n</header>\n\
             <main class=\"news-container\" id=\"news-articles\">{container}</main>\n</body>\n</html>\n",
            title = title,
            style = PAGE_STYLE,
            body_class = body_class,
            placeholder = SEARCH_PLACEHOLDER,
            checked = checked,
            generate = GENERATE_LABEL,
            container = state.container.concat(),
        )
    }
}

impl DisplaySurface for HtmlSurface {
    fn clear(&self) {
        self.state().container.clear();
    }

    fn show_notice(&self, notice: &Notice) {
        let class = match notice.kind {
            NoticeKind::Empty => "empty",
            NoticeKind::Error => "error",
        };
        self.state()
            .container
            .push(format!("<p class=\"{}\">{}</p>", class, html_escape(&notice.message)));
    }

    fn append_card(&self, card: &Card) {
        self.state().container.push(card_markup(card));
    }

    fn set_theme(&self, theme: Theme) {
        self.state().theme = theme;
    }

    fn alert(&self, message: &str) {
        info!("🔔 {}", message);
        self.state().alert = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(layout: CardLayout) -> Card {
        Card {
            layout,
            title: "AI & <jobb>".to_string(),
            summary: Some("Ny studie".to_string()),
            source: Some("TechNews".to_string()),
            published: Some("2025-08-06".to_string()),
            link: None,
            image: None,
        }
    }

    #[test]
    fn test_compact_card() {
        let html = card_markup(&card(CardLayout::Compact));
        assert!(html.starts_with("<div class=\"news-card\"><h3>AI &amp; &lt;jobb&gt;</h3>"));
        assert!(html.contains("<p class=\"summary\">Ny studie</p>"));
        assert!(html.contains("<span class=\"source\">TechNews</span><span class=\"date\">2025-08-06</span>"));
        assert!(!html.contains("<a "));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_classic_card() {
        let mut classic = card(CardLayout::Classic);
        classic.link = Some("https://example.se/?a=1&b=2".to_string());
        classic.image = Some("bild.jpg".to_string());
        let html = card_markup(&classic);
        assert!(html.starts_with("<div class=\"news-article\"><img src=\"bild.jpg\""));
        assert!(html.contains("<h2>AI &amp; &lt;jobb&gt;</h2>"));
        assert!(html.contains("<small>Publicerad: 2025-08-06</small>"));
        assert!(html.contains("href=\"https://example.se/?a=1&amp;b=2\" target=\"_blank\">Läs mer</a>"));
    }

    #[test]
    fn test_page_reflects_theme() {
        let surface = HtmlSurface::new();
        surface.show_notice(&Notice::empty("Inga nyheter tillgängliga"));
        let light = surface.page("Nyheter");
        assert!(light.contains("<body>"));
        assert!(light.contains("<p class=\"empty\">Inga nyheter tillgängliga</p>"));

        surface.set_theme(Theme::Dark);
        let dark = surface.page("Nyheter");
        assert!(dark.contains("<body class=\"dark\">"));
        assert!(dark.contains("id=\"theme-switch\" class=\"theme-toggle\" checked"));
    }

    #[test]
    fn test_clear_empties_container() {
        let surface = HtmlSurface::new();
        surface.append_card(&card(CardLayout::Compact));
        surface.clear();
        assert!(surface.container_html().is_empty());
    }
}
