//! Cancellable debounce over a non-cancellable timer primitive.
//!
//! Zellij's `set_timeout` cannot be cancelled and its `Timer` event does not say
//! which timeout fired. Every debounce timer uses the same window, so expirations
//! arrive in the order they were scheduled. Each `arm` issues a ticket; only the
//! most recent ticket per key is live, and a firing timer consumes the oldest
//! outstanding ticket. Superseded or cancelled tickets fire into nothing.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::Duration;

/// Debounce window used when none is configured.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

/// Per-key debounce handles sharing one timer queue.
#[derive(Debug, Clone)]
pub struct Debouncer<K> {
    window: Duration,
    next_ticket: u64,
    outstanding: VecDeque<(K, u64)>,
    live: HashMap<K, u64>,
}

impl<K: Copy + Eq + Hash> Debouncer<K> {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            next_ticket: 0,
            outstanding: VecDeque::new(),
            live: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Starts or restarts the window for `key`.
    ///
    /// Returns the timeout the caller must schedule. Any earlier pending ticket for
    /// the same key is superseded.
    pub fn arm(&mut self, key: K) -> Duration {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.outstanding.push_back((key, ticket));
        self.live.insert(key, ticket);
        tracing::trace!(ticket, outstanding = self.outstanding.len(), "debounce armed");
        self.window
    }

    /// Cancels the pending window for `key`. Returns whether one was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        self.live.remove(&key).is_some()
    }

    #[must_use]
    pub fn is_pending(&self, key: K) -> bool {
        self.live.contains_key(&key)
    }

    /// Consumes one timer expiration.
    ///
    /// Returns the key whose window elapsed, or `None` if the expiring ticket was
    /// superseded, cancelled, or unknown.
    pub fn on_timer(&mut self) -> Option<K> {
        let (key, ticket) = self.outstanding.pop_front()?;
        if self.live.get(&key) == Some(&ticket) {
            self.live.remove(&key);
            Some(key)
        } else {
            None
        }
    }
}

impl<K: Copy + Eq + Hash> Default for Debouncer<K> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_last_arm_in_a_burst_fires() {
        let mut debouncer = Debouncer::default();
        for _ in 0..5 {
            assert_eq!(debouncer.arm('u'), DEFAULT_WINDOW);
        }
        let fired: Vec<_> = (0..5).filter_map(|_| debouncer.on_timer()).collect();
        assert_eq!(fired, vec!['u']);
        assert!(!debouncer.is_pending('u'));
    }

    #[test]
    fn cancelled_window_never_fires() {
        let mut debouncer = Debouncer::default();
        debouncer.arm(1);
        assert!(debouncer.cancel(1));
        assert_eq!(debouncer.on_timer(), None);
        assert!(!debouncer.cancel(1));
    }

    #[test]
    fn keys_are_independent() {
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.arm("users");
        debouncer.arm("accounts");
        assert_eq!(debouncer.on_timer(), Some("users"));
        assert_eq!(debouncer.on_timer(), Some("accounts"));
    }

    #[test]
    fn rearm_after_fire_starts_fresh_window() {
        let mut debouncer = Debouncer::default();
        debouncer.arm(0);
        assert_eq!(debouncer.on_timer(), Some(0));
        debouncer.arm(0);
        assert_eq!(debouncer.on_timer(), Some(0));
    }

    #[test]
    fn stray_timer_is_ignored() {
        let mut debouncer: Debouncer<u8> = Debouncer::default();
        assert_eq!(debouncer.on_timer(), None);
    }
}
