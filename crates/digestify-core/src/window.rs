//! Bounded lookback over the tail of a stream
//!
//! Verification cannot know where the trailer starts until the stream ends.
//! The window keeps the most recent blocks out of the digest and hands back
//! the oldest one whenever its capacity is exceeded. With full blocks larger
//! than the trailer, the trailer always sits inside the newest two blocks, so
//! an evicted block never contains trailer bytes.

use std::collections::VecDeque;

/// Ring buffer of the most recently read blocks
#[derive(Debug)]
pub struct LookbackWindow {
    blocks: VecDeque<Vec<u8>>,
    capacity: usize,
    retained: usize,
}

impl LookbackWindow {
    /// Create a window holding at most `capacity` blocks (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            blocks: VecDeque::with_capacity(capacity + 1),
            capacity,
            retained: 0,
        }
    }

    /// Add the newest block, returning the oldest one if it no longer fits
    pub fn push(&mut self, block: Vec<u8>) -> Option<Vec<u8>> {
        self.retained += block.len();
        self.blocks.push_back(block);

        if self.blocks.len() > self.capacity {
            let evicted = self.blocks.pop_front()?;
            self.retained -= evicted.len();
            Some(evicted)
        } else {
            None
        }
    }

    /// Number of blocks currently held
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total bytes currently held
    pub fn retained_len(&self) -> usize {
        self.retained
    }

    /// Join the retained blocks and split off the final `tail_len` bytes.
    ///
    /// Returns `(head, tail)`, or `None` when fewer than `tail_len` bytes are
    /// held.
    pub fn split_tail(self, tail_len: usize) -> Option<(Vec<u8>, Vec<u8>)> {
        if self.retained < tail_len {
            return None;
        }

        let mut head = Vec::with_capacity(self.retained);
        for block in self.blocks {
            head.extend_from_slice(&block);
        }
        let tail = head.split_off(self.retained - tail_len);
        Some((head, tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_oldest_past_capacity() {
        let mut window = LookbackWindow::new(3);
        assert_eq!(window.push(b"aaaa".to_vec()), None);
        assert_eq!(window.push(b"bbbb".to_vec()), None);
        assert_eq!(window.push(b"cccc".to_vec()), None);
        assert_eq!(window.len(), 3);

        assert_eq!(window.push(b"dd".to_vec()), Some(b"aaaa".to_vec()));
        assert_eq!(window.len(), 3);
        assert_eq!(window.retained_len(), 10);
    }

    #[test]
    fn test_split_tail_across_blocks() {
        let mut window = LookbackWindow::new(3);
        window.push(b"hello ".to_vec());
        window.push(b"wor".to_vec());
        window.push(b"ld".to_vec());

        let (head, tail) = window.split_tail(4).unwrap();
        assert_eq!(head, b"hello w");
        assert_eq!(tail, b"orld");
    }

    #[test]
    fn test_split_tail_exact() {
        let mut window = LookbackWindow::new(3);
        window.push(b"abc".to_vec());
        let (head, tail) = window.split_tail(3).unwrap();
        assert!(head.is_empty());
        assert_eq!(tail, b"abc");
    }

    #[test]
    fn test_split_tail_too_short() {
        let mut window = LookbackWindow::new(3);
        window.push(b"ab".to_vec());
        assert!(window.split_tail(3).is_none());

        assert!(LookbackWindow::new(3).split_tail(1).is_none());
        assert_eq!(
            LookbackWindow::new(3).split_tail(0),
            Some((Vec::new(), Vec::new()))
        );
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut window = LookbackWindow::new(0);
        assert_eq!(window.push(b"a".to_vec()), None);
        assert_eq!(window.push(b"b".to_vec()), Some(b"a".to_vec()));
        assert!(!window.is_empty());
    }
}
