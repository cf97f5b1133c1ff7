use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::Theme;

/// Card shape. `Classic` is image, heading, description and a "read more"
/// link; `Compact` is heading, summary and a source/date meta line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardLayout {
    Classic,
    #[default]
    Compact,
}

impl FromStr for CardLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(CardLayout::Classic),
            "compact" => Ok(CardLayout::Compact),
            other => Err(format!("Unknown card layout: {}", other)),
        }
    }
}

/// Display-ready projection of one article. Absent fields stay `None` and
/// are left out by every surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub layout: CardLayout,
    pub title: String,
    pub summary: Option<String>,
    pub source: Option<String>,
    pub published: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Empty,
    Error,
}

/// Message shown in place of the card list.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn empty(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Empty, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// The container the board draws into.
///
/// Methods take `&self`; implementations own their interior mutability so a
/// surface can be shared between the board and whoever presents it.
pub trait DisplaySurface: Send + Sync {
    /// Remove every card and notice.
    fn clear(&self);

    fn show_notice(&self, notice: &Notice);

    fn append_card(&self, card: &Card);

    /// Apply the visual class for `theme` to the page.
    fn set_theme(&self, theme: Theme);

    /// Blocking, alert-style message outside the container.
    fn alert(&self, message: &str);
}

/// A button-like control that can be disabled while its action runs.
pub trait Control: Send + Sync {
    fn is_enabled(&self) -> bool;

    fn set_enabled(&self, enabled: bool);

    fn label(&self) -> String;

    fn set_label(&self, label: &str);

    fn set_loading(&self, loading: bool);
}
