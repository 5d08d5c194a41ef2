//! Linear probe sequence shared by insert, lookup and remove.

use core::iter::FusedIterator;

/// Yields exactly `capacity` slot indices, starting at `start` and stepping
/// by one with wrap-around.
#[derive(Clone, Debug)]
pub(crate) struct ProbeSeq {
    pos: usize,
    remaining: usize,
    capacity: usize,
}

impl ProbeSeq {
    pub(crate) fn new(start: usize, capacity: usize) -> Self {
        debug_assert!(capacity >= 1);
        debug_assert!(start < capacity);
        Self {
            pos: start,
            remaining: capacity,
            capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.pos;
        self.remaining -= 1;
        self.pos += 1;
        if self.pos == self.capacity {
            self.pos = 0;
        }
        Some(idx)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
impl FusedIterator for ProbeSeq {}
