//! Press-order tracking.
//!
//! A small append-only record of which keys went down since the last layer
//! change, with the tick they went down at.  It answers one question: was a
//! given key the first one pressed in the current sequence.

use arrayvec::ArrayVec;

/// Maximum number of keys tracked.
const MAX_TRACKED: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct QueuedPress {
    pub code: u8,
    pub time: u16,
}

#[derive(Debug, Default)]
pub(crate) struct PressQueue {
    entries: ArrayVec<QueuedPress, MAX_TRACKED>,
}

impl PressQueue {
    /// Record a press.  Presses past capacity are dropped until the next
    /// clear.
    pub fn push(&mut self, code: u8, time: u16) {
        let _ = self.entries.try_push(QueuedPress { code, time });
    }

    pub fn first(&self) -> Option<QueuedPress> {
        self.entries.first().copied()
    }

    pub fn was_first(&self, code: u8) -> bool {
        self.first().map(|press| press.code == code).unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_press_order() {
        let mut queue = PressQueue::default();
        queue.push(7, 100);
        queue.push(3, 105);
        assert_eq!(queue.entries.len(), 2);
        assert_eq!(queue.first(), Some(QueuedPress { code: 7, time: 100 }));
        assert!(queue.was_first(7));
        assert!(!queue.was_first(3));
    }

    #[test]
    fn empty_queue_has_no_first() {
        let queue = PressQueue::default();
        assert_eq!(queue.first(), None);
        assert!(!queue.was_first(0));
    }

    #[test]
    fn overflow_is_dropped_silently() {
        let mut queue = PressQueue::default();
        for code in 0..20 {
            queue.push(code, code as u16);
        }
        assert_eq!(queue.entries.len(), MAX_TRACKED);
        assert!(queue.was_first(0));
    }

    #[test]
    fn clear_resets_the_sequence() {
        let mut queue = PressQueue::default();
        queue.push(1, 0);
        queue.push(2, 1);
        queue.clear();
        assert_eq!(queue.entries.len(), 0);
        queue.push(2, 2);
        assert!(queue.was_first(2));
    }
}
