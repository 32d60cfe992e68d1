//! PrimalityWindow — окно флагов «ещё простое» только для нечётных значений.
//!
//! Slot `i` models the value `start + 2*i`; `start` must be odd. The buffer is
//! owned and dropped with the window, nothing is cached between calls.
//! 2 is never represented: callers special-case it.

use crate::metrics;

#[derive(Debug)]
pub struct PrimalityWindow {
    start: u64,
    slots: Vec<bool>,
}

impl PrimalityWindow {
    /// Window over the odd values of `[start, end)`, all initially marked prime.
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start % 2 == 1, "window start must be odd, got {start}");
        let len = if start < end {
            // ceil((end - start) / 2) without overflowing at u64::MAX
            ((end - start) / 2 + (end - start) % 2) as usize
        } else {
            0
        };
        metrics::record_window(len);
        Self {
            start,
            slots: vec![true; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[inline]
    pub fn value_at(&self, slot: usize) -> u64 {
        self.start + 2 * slot as u64
    }

    #[inline]
    pub fn is_marked_prime(&self, slot: usize) -> bool {
        self.slots[slot]
    }

    /// Mark `first, first + 2*step, first + 4*step, ...` composite up to the window end.
    ///
    /// `first` must be odd and `>= start`; stepping by `step` slots is stepping
    /// by `2*step` in value, so only odd multiples are touched.
    /// Returns the number of slots visited.
    pub fn cross_off(&mut self, first: u64, step: u64) -> u64 {
        debug_assert!(first >= self.start && (first - self.start) % 2 == 0);
        let from = (first - self.start) / 2;
        if from >= self.slots.len() as u64 {
            return 0;
        }
        let mut marks = 0u64;
        for slot in (from as usize..self.slots.len()).step_by(step as usize) {
            self.slots[slot] = false;
            marks += 1;
        }
        marks
    }

    /// Values still marked prime, ascending.
    pub fn survivors(&self) -> impl Iterator<Item = u64> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(slot, _)| self.value_at(slot))
    }
}
