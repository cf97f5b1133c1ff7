use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use nb_core::messages::{PUBLISHED_PREFIX, READ_MORE};
use nb_core::{Card, Control, DisplaySurface, Notice, NoticeKind, Theme};
use tracing::warn;

#[derive(Debug, Clone, Copy)]
struct Palette {
    title: Color,
    text: Color,
    meta: Color,
    error: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                title: Color::DarkBlue,
                text: Color::Black,
                meta: Color::DarkGrey,
                error: Color::DarkRed,
            },
            Theme::Dark => Self {
                title: Color::Cyan,
                text: Color::White,
                meta: Color::Grey,
                error: Color::Red,
            },
        }
    }
}

struct TerminalState {
    out: Box<dyn Write + Send>,
    palette: Palette,
}

/// Prints cards to a terminal with crossterm colors picked by the theme.
pub struct TerminalSurface {
    state: Mutex<TerminalState>,
}

impl TerminalSurface {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                out,
                palette: Palette::for_theme(Theme::Light),
            }),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    fn state(&self) -> MutexGuard<'_, TerminalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_with(&self, draw: impl FnOnce(&mut dyn Write, Palette) -> io::Result<()>) {
        let mut state = self.state();
        let palette = state.palette;
        let result = draw(state.out.as_mut(), palette).and_then(|_| state.out.flush());
        if let Err(e) = result {
            warn!("⚠️ Failed to write to terminal: {}", e);
        }
    }
}

fn line(out: &mut dyn Write, color: Color, text: &str) -> io::Result<()> {
    out.queue(SetForegroundColor(color))?
        .queue(Print(text))?
        .queue(ResetColor)?
        .queue(Print("\n"))?;
    Ok(())
}

impl DisplaySurface for TerminalSurface {
    fn clear(&self) {
        self.write_with(|out, _| {
            out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
            Ok(())
        });
    }

    fn show_notice(&self, notice: &Notice) {
        self.write_with(|out, palette| {
            let color = match notice.kind {
                NoticeKind::Empty => palette.meta,
                NoticeKind::Error => palette.error,
            };
            line(out, color, &notice.message)
        });
    }

    fn append_card(&self, card: &Card) {
        self.write_with(|out, palette| {
            out.queue(SetAttribute(Attribute::Bold))?;
            line(out, palette.title, &card.title)?;
            out.queue(SetAttribute(Attribute::Reset))?;
            if let Some(summary) = &card.summary {
                line(out, palette.text, summary)?;
            }
            let meta: Vec<String> = [
                card.source.clone(),
                card.published.as_ref().map(|p| format!("{} {}", PUBLISHED_PREFIX, p)),
            ]
            .into_iter()
            .flatten()
            .collect();
            if !meta.is_empty() {
                line(out, palette.meta, &meta.join(" · "))?;
            }
            if let Some(image) = &card.image {
                line(out, palette.meta, &format!("[bild] {}", image))?;
            }
            if let Some(link) = &card.link {
                line(out, palette.meta, &format!("{}: {}", READ_MORE, link))?;
            }
            out.queue(Print("\n"))?;
            Ok(())
        });
    }

    fn set_theme(&self, theme: Theme) {
        self.state().palette = Palette::for_theme(theme);
    }

    fn alert(&self, message: &str) {
        self.write_with(|out, palette| {
            out.queue(SetAttribute(Attribute::Reverse))?;
            line(out, palette.title, &format!(" {} ", message))?;
            out.queue(SetAttribute(Attribute::Reset))?;
            Ok(())
        });
    }
}

/// The `:generate` command as a control. The prompt reads its state.
#[derive(Debug)]
pub struct TerminalControl {
    enabled: AtomicBool,
    loading: AtomicBool,
    label: Mutex<String>,
}

impl TerminalControl {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            enabled: AtomicBool::new(true),
            loading: AtomicBool::new(false),
            label: Mutex::new(label.into()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}

impl Control for TerminalControl {
    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    fn label(&self) -> String {
        self.label.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.lock().unwrap_or_else(PoisonError::into_inner) = label.to_string();
    }

    fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::CardLayout;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    #[test]
    fn test_card_output() {
        let buffer = SharedBuffer::default();
        let surface = TerminalSurface::new(Box::new(buffer.clone()));
        surface.append_card(&Card {
            layout: CardLayout::Compact,
            title: "Svensk startup får rekordinvestering".to_string(),
            summary: Some("AI-företag samlar in 100 miljoner kronor".to_string()),
            source: Some("Startup Sweden".to_string()),
            published: Some("2025-08-06".to_string()),
            link: None,
            image: None,
        });

        let text = buffer.text();
        assert!(text.contains("Svensk startup får rekordinvestering"));
        assert!(text.contains("AI-företag samlar in 100 miljoner kronor"));
        assert!(text.contains("Startup Sweden · Publicerad: 2025-08-06"));
        assert!(!text.contains("Läs mer"));
    }

    #[test]
    fn test_clear_wipes_screen_before_redraw() {
        let buffer = SharedBuffer::default();
        let surface = TerminalSurface::new(Box::new(buffer.clone()));
        surface.show_notice(&Notice::empty("Inga nyheter tillgängliga"));
        surface.clear();
        surface.show_notice(&Notice::empty("Inga nyheter hittades"));

        let text = buffer.text();
        let cleared = text.find("\x1b[2J").expect("clear sequence");
        assert!(text[cleared..].starts_with("\x1b[2J\x1b[1;1H"));
        assert!(text.find("Inga nyheter tillgängliga").unwrap() < cleared);
        assert!(text.find("Inga nyheter hittades").unwrap() > cleared);
    }

    #[test]
    fn test_notice_and_alert() {
        let buffer = SharedBuffer::default();
        let surface = TerminalSurface::new(Box::new(buffer.clone()));
        surface.set_theme(Theme::Dark);
        surface.show_notice(&Notice::error("Kunde inte ladda nyheter"));
        surface.alert("Nya nyheter genererade! Laddar om...");

        let text = buffer.text();
        assert!(text.contains("Kunde inte ladda nyheter"));
        assert!(text.contains(" Nya nyheter genererade! Laddar om... "));
    }

    #[test]
    fn test_terminal_control() {
        let control = TerminalControl::new("Generera nyheter");
        control.set_enabled(false);
        control.set_label("Genererar nyheter...");
        assert!(!control.is_enabled());
        assert_eq!(control.label(), "Genererar nyheter...");
    }
}
