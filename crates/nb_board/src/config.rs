use nb_core::messages::DEFAULT_TOPIC;
use nb_core::CardLayout;

/// Canonical preference key for the theme (`"dark"` / `"light"`).
pub const THEME_KEY: &str = "theme";
/// Boolean key written by older pages; read as a fallback only.
pub const LEGACY_DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub layout: CardLayout,
    pub default_topic: String,
    pub theme_key: String,
    pub legacy_theme_key: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            layout: CardLayout::default(),
            default_topic: DEFAULT_TOPIC.to_string(),
            theme_key: THEME_KEY.to_string(),
            legacy_theme_key: Some(LEGACY_DARK_MODE_KEY.to_string()),
        }
    }
}

impl BoardConfig {
    pub fn with_layout(mut self, layout: CardLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_default_topic(mut self, topic: impl Into<String>) -> Self {
        self.default_topic = topic.into();
        self
    }
}
