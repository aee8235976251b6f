use crate::feedback::Ticket;

/// The "loaded from a shared link" banner: shown once, hidden by dismissal
/// or by its own timeout, whichever comes first.
#[derive(Debug, Default)]
pub struct BannerSession {
    visible: bool,
    pending: Option<Ticket>,
    issued: u64,
}

impl BannerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the banner; any earlier pending auto-hide is cancelled.
    pub fn open(&mut self) -> Ticket {
        let ticket = Ticket::next(&mut self.issued);
        self.visible = true;
        self.pending = Some(ticket);
        ticket
    }

    /// Returns whether the banner was visible.
    pub fn dismiss(&mut self) -> bool {
        self.pending = None;
        std::mem::replace(&mut self.visible, false)
    }

    /// Auto-hide for `ticket`; true only for the live session.
    pub fn expire(&mut self, ticket: Ticket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.visible = false;
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_hides() {
        let mut banner = BannerSession::new();
        let ticket = banner.open();
        assert!(banner.is_visible());
        assert!(banner.expire(ticket));
        assert!(!banner.is_visible());
        assert!(!banner.expire(ticket));
    }

    #[test]
    fn dismiss_cancels_timeout() {
        let mut banner = BannerSession::new();
        let ticket = banner.open();
        assert!(banner.dismiss());
        assert!(!banner.is_pending());
        assert!(!banner.expire(ticket));
        assert!(!banner.dismiss());
    }

    #[test]
    fn reopening_cancels_first_timer() {
        let mut banner = BannerSession::new();
        let first = banner.open();
        let second = banner.open();
        assert!(!banner.expire(first));
        assert!(banner.is_visible());
        assert!(banner.expire(second));
    }
}
