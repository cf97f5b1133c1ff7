use std::sync::atomic::{AtomicBool, Ordering};

use nb_core::Control;

use crate::board::LoadOutcome;

/// Result of one press of the generate button.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The server accepted the request and the list was reloaded.
    Generated(LoadOutcome),
    Failed(String),
    /// Another request was still in flight; nothing was sent.
    Busy,
    /// The board was built without a generation client.
    Unavailable,
}

/// Re-entrancy lock for generation requests. Released on drop.
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Keeps a control disabled and relabelled while alive, then puts back the
/// label it found. Runs on every exit path, unwinding included.
pub(crate) struct BusyControl<'a> {
    control: &'a dyn Control,
    original_label: String,
}

impl<'a> BusyControl<'a> {
    pub(crate) fn engage(control: &'a dyn Control, busy_label: &str) -> Self {
        let original_label = control.label();
        control.set_loading(true);
        control.set_label(busy_label);
        control.set_enabled(false);
        Self { control, original_label }
    }
}

impl Drop for BusyControl<'_> {
    fn drop(&mut self) {
        self.control.set_loading(false);
        self.control.set_label(&self.original_label);
        self.control.set_enabled(true);
    }
}

/// Blank or missing topics fall back to `default_topic`.
pub(crate) fn resolve_topic(topic: Option<&str>, default_topic: &str) -> String {
    topic
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(default_topic)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surfaces::MemoryControl;

    #[test]
    fn test_in_flight_is_exclusive() {
        let flag = AtomicBool::new(false);
        let first = InFlight::acquire(&flag);
        assert!(first.is_some());
        assert!(InFlight::acquire(&flag).is_none());
        drop(first);
        assert!(InFlight::acquire(&flag).is_some());
    }

    #[test]
    fn test_busy_control_restores_on_drop() {
        let control = MemoryControl::new("Generera nyheter");
        {
            let _busy = BusyControl::engage(&control, "Genererar nyheter...");
            assert!(!control.is_enabled());
            assert!(control.is_loading());
            assert_eq!(control.label(), "Genererar nyheter...");
        }
        assert!(control.is_enabled());
        assert!(!control.is_loading());
        assert_eq!(control.label(), "Generera nyheter");
    }

    #[test]
    fn test_busy_control_restores_on_panic() {
        let control = MemoryControl::new("Generera nyheter");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _busy = BusyControl::engage(&control, "Genererar nyheter...");
            panic!("request blew up");
        }));
        assert!(result.is_err());
        assert!(control.is_enabled());
    }

    #[test]
    fn test_resolve_topic() {
        assert_eq!(resolve_topic(Some("  ekonomi "), "standard"), "ekonomi");
        assert_eq!(resolve_topic(Some("   "), "standard"), "standard");
        assert_eq!(resolve_topic(None, "standard"), "standard");
    }
}
