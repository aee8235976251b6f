//! Temporary feedback on a control with guaranteed restoration.
//!
//! Each `begin` hands out a [`Ticket`]. Only the holder of the newest ticket
//! for a control can restore it, so a timer from a superseded session that
//! fires late is a no-op.

use std::collections::HashMap;
use std::hash::Hash;

use crate::ports::Control;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub(crate) fn next(issued: &mut u64) -> Self {
        *issued += 1;
        Ticket(*issued)
    }
}

#[derive(Debug)]
struct Session {
    original: String,
    ticket: Ticket,
}

#[derive(Debug)]
pub struct FeedbackPresenter<K> {
    sessions: HashMap<K, Session>,
    issued: u64,
}

impl<K> Default for FeedbackPresenter<K> {
    fn default() -> Self {
        Self {
            sessions: HashMap::new(),
            issued: 0,
        }
    }
}

impl<K: Copy + Eq + Hash> FeedbackPresenter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables `control` and shows `feedback` on it. A session already
    /// running on the same control is superseded but its captured original
    /// is kept, so the control never "restores" to a feedback label.
    pub fn begin(&mut self, key: K, control: &mut dyn Control, feedback: &str) -> Ticket {
        let ticket = Ticket::next(&mut self.issued);
        let original = match self.sessions.remove(&key) {
            Some(previous) => previous.original,
            None => control.content(),
        };

        control.set_disabled(true);
        control.set_content(feedback.to_string());
        self.sessions.insert(key, Session { original, ticket });
        ticket
    }

    /// Restores the control if `ticket` is the live one. Returns whether a
    /// restoration happened.
    pub fn finish(&mut self, key: K, ticket: Ticket, control: &mut dyn Control) -> bool {
        match self.sessions.get(&key) {
            Some(session) if session.ticket == ticket => {}
            _ => return false,
        }
        let Some(session) = self.sessions.remove(&key) else {
            return false;
        };

        control.set_content(session.original);
        control.set_disabled(false);
        true
    }

    pub fn is_active(&self, key: K) -> bool {
        self.sessions.contains_key(&key)
    }
}
