//! Scroll-reset detection and recovery.
//!
//! Host embeddings (notebook shells re-attaching iframe tabs) can zero the
//! scroll offset without firing any visibility, load, or focus event, so
//! recovery polls on a fixed interval instead of waiting for a signal that
//! never arrives. Scroll memory lives only in process memory: position is
//! protected against in-session resets, never restored across a fresh
//! navigation.

use heapless::{String, Vec};
use log::debug;

use crate::{
    host::ScrollPort,
    route::{ROUTE_KEY_BYTES, bounded_key},
};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Routes remembered at once; the oldest entry is recycled when full.
pub const SCROLL_MEMORY_ROUTES: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WatchdogConfig {
    pub poll_interval_ms: u64,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Outcome of one poll tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WatchdogPoll {
    /// Nothing to do this tick.
    Idle,
    /// Offset forced back and confirmed by read-back.
    Restored { offset: u32 },
    /// Offset forced but the read-back was still zero; retried next tick.
    Unconfirmed,
}

struct MemoryEntry {
    key: String<ROUTE_KEY_BYTES>,
    offset: u32,
}

/// Polling monitor for anomalous scroll resets.
///
/// One instance serves the whole session and is re-keyed per route; entries
/// for departed routes stay in memory and are simply never read again.
pub struct ScrollWatchdog {
    config: WatchdogConfig,
    memory: Vec<MemoryEntry, SCROLL_MEMORY_ROUTES>,
    key: String<ROUTE_KEY_BYTES>,
    needs_restore: bool,
    content_ready: bool,
    next_poll_ms: u64,
}

impl ScrollWatchdog {
    pub fn new(config: WatchdogConfig) -> Self {
        Self {
            config,
            memory: Vec::new(),
            key: String::new(),
            needs_restore: false,
            content_ready: false,
            next_poll_ms: 0,
        }
    }

    /// Point the watchdog at a new route. Prior memory stays; a pending
    /// restore for the old route is abandoned.
    pub fn rekey(&mut self, scroll_key: &str) {
        self.key = bounded_key(scroll_key);
        self.needs_restore = false;
    }

    /// Gate restores until the first content render has completed. Stays set
    /// for the rest of the session once flipped.
    pub fn mark_content_ready(&mut self) {
        self.content_ready = true;
    }

    /// Feed one raw scroll reading. A positive offset is remembered for the
    /// current route; a zero offset after first render is suspect and arms a
    /// restore.
    pub fn observe_scroll(&mut self, offset: u32) {
        if offset > 0 {
            self.remember(offset);
            self.needs_restore = false;
        } else {
            self.needs_restore = true;
        }
    }

    /// Run one poll tick against the host's scroll port. Self-gates on the
    /// configured interval, so callers may tick as often as they like.
    pub fn poll<S: ScrollPort>(&mut self, now_ms: u64, port: &mut S) -> WatchdogPoll {
        if now_ms < self.next_poll_ms {
            return WatchdogPoll::Idle;
        }
        self.next_poll_ms = now_ms.saturating_add(self.config.poll_interval_ms);

        if !self.content_ready || !self.needs_restore {
            return WatchdogPoll::Idle;
        }
        let Some(offset) = self.remembered() else {
            return WatchdogPoll::Idle;
        };

        port.scroll_to(offset);
        let confirmed = port.scroll_offset();
        if confirmed == 0 {
            // No cap: the poll retries every tick until the offset sticks or
            // the user scrolls manually.
            return WatchdogPoll::Unconfirmed;
        }

        self.needs_restore = false;
        self.remember(confirmed);
        debug!(
            "watchdog: restored offset={} route={}",
            confirmed,
            self.key.as_str()
        );
        WatchdogPoll::Restored { offset: confirmed }
    }

    fn remembered(&self) -> Option<u32> {
        self.memory
            .iter()
            .find(|entry| entry.key == self.key)
            .map(|entry| entry.offset)
    }

    fn remember(&mut self, offset: u32) {
        if let Some(entry) = self.memory.iter_mut().find(|entry| entry.key == self.key) {
            entry.offset = offset;
            return;
        }
        let entry = MemoryEntry {
            key: self.key.clone(),
            offset,
        };
        if let Err(entry) = self.memory.push(entry) {
            self.memory.remove(0);
            let _ = self.memory.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePort {
        offset: u32,
        /// When set, forced scrolls do not stick (the host zeroes them back).
        frozen_at_zero: bool,
        scroll_calls: std::vec::Vec<u32>,
    }

    impl FakePort {
        fn new() -> Self {
            Self {
                offset: 0,
                frozen_at_zero: false,
                scroll_calls: std::vec::Vec::new(),
            }
        }
    }

    impl ScrollPort for FakePort {
        fn scroll_offset(&mut self) -> u32 {
            self.offset
        }

        fn scroll_to(&mut self, offset: u32) {
            self.scroll_calls.push(offset);
            if !self.frozen_at_zero {
                self.offset = offset;
            }
        }
    }

    fn ready_watchdog() -> ScrollWatchdog {
        let mut dog = ScrollWatchdog::new(WatchdogConfig::default());
        dog.rekey("/guide#top");
        dog.mark_content_ready();
        dog
    }

    #[test]
    fn reset_after_scroll_is_restored_and_confirmed() {
        let mut dog = ready_watchdog();
        let mut port = FakePort::new();

        dog.observe_scroll(120);
        dog.observe_scroll(0);
        dog.observe_scroll(0);

        assert_eq!(dog.poll(0, &mut port), WatchdogPoll::Restored { offset: 120 });
        assert_eq!(port.offset, 120);
        // Confirmed restore disarms the flag; the next poll is quiet.
        assert_eq!(dog.poll(100, &mut port), WatchdogPoll::Idle);
    }

    #[test]
    fn restore_waits_for_first_content_render() {
        let mut dog = ScrollWatchdog::new(WatchdogConfig::default());
        dog.rekey("/guide");
        let mut port = FakePort::new();

        dog.observe_scroll(300);
        dog.observe_scroll(0);
        assert_eq!(dog.poll(0, &mut port), WatchdogPoll::Idle);

        dog.mark_content_ready();
        assert_eq!(
            dog.poll(DEFAULT_POLL_INTERVAL_MS, &mut port),
            WatchdogPoll::Restored { offset: 300 }
        );
    }

    #[test]
    fn poll_is_gated_by_the_configured_interval() {
        let mut dog = ready_watchdog();
        let mut port = FakePort::new();
        port.frozen_at_zero = true;

        dog.observe_scroll(80);
        dog.observe_scroll(0);

        assert_eq!(dog.poll(0, &mut port), WatchdogPoll::Unconfirmed);
        assert_eq!(dog.poll(10, &mut port), WatchdogPoll::Idle);
        assert_eq!(dog.poll(DEFAULT_POLL_INTERVAL_MS, &mut port), WatchdogPoll::Unconfirmed);
        assert_eq!(port.scroll_calls, [80, 80]);
    }

    #[test]
    fn unconfirmed_restore_retries_until_it_sticks() {
        let mut dog = ready_watchdog();
        let mut port = FakePort::new();
        port.frozen_at_zero = true;

        dog.observe_scroll(64);
        dog.observe_scroll(0);
        assert_eq!(dog.poll(0, &mut port), WatchdogPoll::Unconfirmed);
        assert_eq!(dog.poll(50, &mut port), WatchdogPoll::Unconfirmed);

        port.frozen_at_zero = false;
        assert_eq!(dog.poll(100, &mut port), WatchdogPoll::Restored { offset: 64 });
    }

    #[test]
    fn manual_scroll_disarms_a_pending_restore() {
        let mut dog = ready_watchdog();
        let mut port = FakePort::new();

        dog.observe_scroll(200);
        dog.observe_scroll(0);
        dog.observe_scroll(45);
        port.offset = 45;

        assert_eq!(dog.poll(0, &mut port), WatchdogPoll::Idle);
    }

    #[test]
    fn nothing_remembered_means_nothing_to_restore() {
        let mut dog = ready_watchdog();
        let mut port = FakePort::new();

        dog.observe_scroll(0);
        assert_eq!(dog.poll(0, &mut port), WatchdogPoll::Idle);
        assert!(port.scroll_calls.is_empty());
    }

    #[test]
    fn rekey_isolates_memory_per_route() {
        let mut dog = ready_watchdog();
        let mut port = FakePort::new();

        dog.observe_scroll(500);
        dog.rekey("/other");
        dog.observe_scroll(0);

        // The new route has no remembered offset yet.
        assert_eq!(dog.poll(0, &mut port), WatchdogPoll::Idle);

        dog.rekey("/guide#top");
        dog.observe_scroll(0);
        assert_eq!(dog.poll(50, &mut port), WatchdogPoll::Restored { offset: 500 });
    }

    #[test]
    fn rekey_abandons_a_pending_restore() {
        let mut dog = ready_watchdog();
        let mut port = FakePort::new();

        dog.observe_scroll(500);
        dog.observe_scroll(0);
        dog.rekey("/other");

        assert_eq!(dog.poll(0, &mut port), WatchdogPoll::Idle);
    }

    #[test]
    fn memory_recycles_oldest_route_when_full() {
        let mut dog = ready_watchdog();
        for index in 0..SCROLL_MEMORY_ROUTES {
            dog.rekey(&std::format!("/route-{index}"));
            dog.observe_scroll(10 + index as u32);
        }
        dog.rekey("/one-more");
        dog.observe_scroll(999);

        dog.rekey("/route-0");
        assert_eq!(dog.remembered(), None);
        dog.rekey("/one-more");
        assert_eq!(dog.remembered(), Some(999));
    }
}
