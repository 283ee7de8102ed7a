//! The transient "copied" notice.

use std::time::Duration;

/// Default time the notice stays up after a copy.
pub const COPIED_NOTICE_DELAY: Duration = Duration::from_millis(1200);

/// Tracks whether the "copied" notice is showing.
///
/// Every [`CopyNotice::show`] hands out a fresh token; only a hide carrying
/// the latest token takes effect. A copy made while the notice is still up
/// therefore restarts the countdown instead of being cut short by the earlier
/// copy's timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyNotice {
    delay: Duration,
    generation: u64,
    visible: bool,
}

impl Default for CopyNotice {
    fn default() -> Self {
        Self::new(COPIED_NOTICE_DELAY)
    }
}

impl CopyNotice {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            visible: false,
        }
    }

    /// How long to wait before calling [`CopyNotice::hide`].
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.visible = true;
        self.generation
    }

    /// Hides the notice if `token` came from the most recent `show`.
    pub fn hide(&mut self, token: u64) -> bool {
        if !self.visible || token != self.generation {
            return false;
        }
        self.visible = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delay_is_1200ms() {
        assert_eq!(CopyNotice::default().delay(), Duration::from_millis(1200));
    }

    #[test]
    fn show_then_hide() {
        let mut notice = CopyNotice::default();
        assert!(!notice.is_visible());
        let token = notice.show();
        assert!(notice.is_visible());
        assert!(notice.hide(token));
        assert!(!notice.is_visible());
    }

    #[test]
    fn second_copy_resets_instead_of_stacking() {
        let mut notice = CopyNotice::default();
        let first = notice.show();
        let second = notice.show();
        // the first copy's timer fires and must not hide the second notice
        assert!(!notice.hide(first));
        assert!(notice.is_visible());
        assert!(notice.hide(second));
        assert!(!notice.is_visible());
    }

    #[test]
    fn hide_twice_is_a_no_op() {
        let mut notice = CopyNotice::default();
        let token = notice.show();
        assert!(notice.hide(token));
        assert!(!notice.hide(token));
    }
}
