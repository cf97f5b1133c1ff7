use nb_core::{PreferenceStore, Result, Theme};
use tracing::{debug, warn};

use crate::config::BoardConfig;

/// Read the stored theme. The canonical key wins; the legacy boolean key is
/// consulted only when the canonical one is absent. Nothing stored, or a
/// store that cannot be read, means light.
pub async fn read_theme(store: &dyn PreferenceStore, config: &BoardConfig) -> Theme {
    match store.get(&config.theme_key).await {
        Ok(Some(value)) => match value.parse() {
            Ok(theme) => return theme,
            Err(e) => warn!("⚠️ {}, falling back to light", e),
        },
        Ok(None) => {}
        Err(e) => {
            warn!("⚠️ Could not read theme preference: {}", e);
            return Theme::Light;
        }
    }

    if let Some(legacy) = &config.legacy_theme_key {
        if let Ok(Some(value)) = store.get(legacy).await {
            debug!("Using legacy '{}' preference", legacy);
            return if value == "true" { Theme::Dark } else { Theme::Light };
        }
    }

    Theme::Light
}

pub async fn write_theme(store: &dyn PreferenceStore, config: &BoardConfig, theme: Theme) -> Result<()> {
    store.set(&config.theme_key, theme.as_str()).await
}
