use std::sync::{Mutex, MutexGuard, PoisonError};

use nb_core::{Card, Control, DisplaySurface, Notice, Theme};

#[derive(Debug, Default, Clone)]
pub struct SurfaceSnapshot {
    pub cards: Vec<Card>,
    pub notice: Option<Notice>,
    pub theme: Theme,
    pub alerts: Vec<String>,
    pub clears: usize,
}

/// Surface that records what it was told to show.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<SurfaceSnapshot>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SurfaceSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.state().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.state().cards.iter().map(|c| c.title.clone()).collect()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.state().notice.clone()
    }

    pub fn theme(&self) -> Theme {
        self.state().theme
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state().alerts.clone()
    }
}

impl DisplaySurface for MemorySurface {
    fn clear(&self) {
        let mut state = self.state();
        state.cards.clear();
        state.notice = None;
        state.clears += 1;
    }

    fn show_notice(&self, notice: &Notice) {
        self.state().notice = Some(notice.clone());
    }

    fn append_card(&self, card: &Card) {
        self.state().cards.push(card.clone());
    }

    fn set_theme(&self, theme: Theme) {
        self.state().theme = theme;
    }

    fn alert(&self, message: &str) {
        self.state().alerts.push(message.to_string());
    }
}

#[derive(Debug)]
struct ControlState {
    enabled: bool,
    loading: bool,
    label: String,
    enabled_history: Vec<bool>,
}

/// Button that records its enabled/disabled transitions.
#[derive(Debug)]
pub struct MemoryControl {
    state: Mutex<ControlState>,
}

impl MemoryControl {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(ControlState {
                enabled: true,
                loading: false,
                label: label.into(),
                enabled_history: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ControlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// Every value passed to `set_enabled`, in order.
    pub fn enabled_history(&self) -> Vec<bool> {
        self.state().enabled_history.clone()
    }
}

impl Control for MemoryControl {
    fn is_enabled(&self) -> bool {
        self.state().enabled
    }

    fn set_enabled(&self, enabled: bool) {
        let mut state = self.state();
        state.enabled = enabled;
        state.enabled_history.push(enabled);
    }

    fn label(&self) -> String {
        self.state().label.clone()
    }

    fn set_label(&self, label: &str) {
        self.state().label = label.to_string();
    }

    fn set_loading(&self, loading: bool) {
        self.state().loading = loading;
    }
}
