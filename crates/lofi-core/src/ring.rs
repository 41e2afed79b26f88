//! Fixed four-slot history of converted samples.
//!
//! [`HistoryRing`] backs the four-point reconstruction kernel. It is a
//! stack-allocated circular buffer whose write cursor always points at the
//! slot that will be overwritten next, which is also the oldest retained
//! sample once four writes have happened.
//!
//! ```text
//! writes: a b c d e
//!
//!  slot:  [ e | b | c | d ]
//!               ^ cursor (oldest)
//!
//! read(0) = b, read(1) = c, read(2) = d, read(3) = e
//! ```

/// Number of slots in the history ring.
pub const HISTORY_LEN: usize = 4;

const HISTORY_MASK: usize = HISTORY_LEN - 1;

/// Circular buffer holding the four most recent converted samples.
///
/// All slots start at zero, so reads before the fourth write see silence.
///
/// # Example
///
/// ```rust
/// use lofi_core::HistoryRing;
///
/// let mut ring = HistoryRing::new();
/// for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
///     ring.write(v);
/// }
/// assert_eq!(ring.chronological(), [2.0, 3.0, 4.0, 5.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRing {
    slots: [f32; HISTORY_LEN],
    cursor: usize,
}

impl HistoryRing {
    /// Create a zero-filled ring with the cursor at slot 0.
    pub const fn new() -> Self {
        Self {
            slots: [0.0; HISTORY_LEN],
            cursor: 0,
        }
    }

    /// Store `value` at the cursor and advance the cursor by one slot.
    ///
    /// Once the ring is full this discards the oldest sample.
    #[inline]
    pub fn write(&mut self, value: f32) {
        self.slots[self.cursor] = value;
        self.cursor = (self.cursor + 1) & HISTORY_MASK;
    }

    /// Read the slot at `cursor + offset`, taken modulo 4 for any sign.
    ///
    /// Offset 0 is the oldest retained sample, offset 3 the newest.
    #[inline]
    pub fn read(&self, offset: isize) -> f32 {
        // Two's complement keeps negative offsets correct under the mask.
        self.slots[self.cursor.wrapping_add(offset as usize) & HISTORY_MASK]
    }

    /// The four retained samples ordered oldest to newest.
    #[inline]
    pub fn chronological(&self) -> [f32; HISTORY_LEN] {
        [self.read(0), self.read(1), self.read(2), self.read(3)]
    }

    /// Index of the next slot to be overwritten.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Zero every slot and rewind the cursor.
    pub fn clear(&mut self) {
        self.slots = [0.0; HISTORY_LEN];
        self.cursor = 0;
    }
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_silent() {
        let ring = HistoryRing::new();
        assert_eq!(ring.chronological(), [0.0; 4]);
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn test_partial_fill_keeps_zeros_oldest() {
        let mut ring = HistoryRing::new();
        ring.write(1.0);
        ring.write(2.0);
        assert_eq!(ring.chronological(), [0.0, 0.0, 1.0, 2.0]);
        assert_eq!(ring.read(-1), 2.0);
    }

    #[test]
    fn test_fifth_write_discards_oldest() {
        let mut ring = HistoryRing::new();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            ring.write(v);
        }
        assert_eq!(ring.chronological(), [2.0, 3.0, 4.0, 5.0]);
        assert!(!ring.chronological().contains(&1.0));
    }

    #[test]
    fn test_cursor_wraps() {
        let mut ring = HistoryRing::new();
        for i in 0..9 {
            assert_eq!(ring.cursor(), i % HISTORY_LEN);
            ring.write(i as f32);
        }
    }

    #[test]
    fn test_offsets_are_modular() {
        let mut ring = HistoryRing::new();
        for v in [10.0, 20.0, 30.0, 40.0] {
            ring.write(v);
        }
        assert_eq!(ring.read(0), 10.0);
        assert_eq!(ring.read(4), 10.0);
        assert_eq!(ring.read(-4), 10.0);
        assert_eq!(ring.read(-1), 40.0);
        assert_eq!(ring.read(7), 40.0);
        assert_eq!(ring.read(-6), 30.0);
    }

    #[test]
    fn test_clear() {
        let mut ring = HistoryRing::new();
        ring.write(1.0);
        ring.write(2.0);
        ring.write(3.0);
        ring.clear();
        assert_eq!(ring.chronological(), [0.0; 4]);
        assert_eq!(ring.cursor(), 0);
    }
}
