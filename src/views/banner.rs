//! Dismissible error banner.

/// An error message shown above a view until the user dismisses it.
///
/// Dismissal is local to the banner: it never clears the store's `error`, which
/// persists until the next refresh replaces or clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    message: String,
    dismissed: bool,
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            dismissed: false,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !self.dismissed
    }
}

/// Tracks the banner for a store-level error across snapshots.
///
/// A new message produces a fresh, visible banner; the same message keeps its
/// dismissal state; no message removes the banner.
#[derive(Debug, Clone, Default)]
pub struct BannerSlot {
    banner: Option<ErrorBanner>,
}

impl BannerSlot {
    pub fn sync(&mut self, message: Option<&str>) {
        let unchanged = matches!(
            (message, &self.banner),
            (Some(message), Some(current)) if current.message() == message
        );
        if !unchanged {
            self.banner = message.map(ErrorBanner::new);
        }
    }

    pub fn set(&mut self, message: impl Into<String>) {
        self.banner = Some(ErrorBanner::new(message));
    }

    pub fn clear(&mut self) {
        self.banner = None;
    }

    pub fn dismiss(&mut self) {
        if let Some(banner) = &mut self.banner {
            banner.dismiss();
        }
    }

    /// The banner if it exists and has not been dismissed.
    #[must_use]
    pub fn visible(&self) -> Option<&ErrorBanner> {
        self.banner.as_ref().filter(|banner| banner.is_visible())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_hides_banner() {
        let mut banner = ErrorBanner::new("500 Internal Server Error");
        assert!(banner.is_visible());

        banner.dismiss();

        assert!(!banner.is_visible());
        assert_eq!(banner.message(), "500 Internal Server Error");
    }

    #[test]
    fn slot_keeps_dismissal_for_same_message() {
        let mut slot = BannerSlot::default();
        slot.sync(Some("boom"));
        slot.dismiss();

        slot.sync(Some("boom"));

        assert!(slot.visible().is_none());
    }

    #[test]
    fn slot_shows_new_message_after_dismissal() {
        let mut slot = BannerSlot::default();
        slot.sync(Some("boom"));
        slot.dismiss();

        slot.sync(Some("bang"));

        assert_eq!(slot.visible().map(ErrorBanner::message), Some("bang"));
    }

    #[test]
    fn slot_clears_when_error_goes_away() {
        let mut slot = BannerSlot::default();
        slot.set("boom");

        slot.sync(None);

        assert!(slot.visible().is_none());
    }
}
