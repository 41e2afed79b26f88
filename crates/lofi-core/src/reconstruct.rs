//! Read stage: phase-driven Hermite reconstruction from the history ring.

use crate::interpolate::hermite_window;
use crate::ring::HistoryRing;

/// Produces one interpolated sample per call from a [`HistoryRing`].
///
/// The four ring slots, oldest to newest, are the kernel taps
/// `s(-1), s(0), s(1), s(2)`; the output is the Hermite segment between
/// `s(0)` and `s(1)` evaluated at the current phase. After each read the
/// phase advances by the increment and wraps back into `(0, 1]`, exactly as
/// if 1.0 were subtracted until it no longer exceeded 1.0.
///
/// The phase starts at 0.0, so the first read evaluates at `s(0)`.
///
/// # Example
///
/// ```rust
/// use lofi_core::{HistoryRing, Reconstructor};
///
/// let mut ring = HistoryRing::new();
/// for v in [0.0, 1.0, 2.0, 3.0] {
///     ring.write(v);
/// }
/// let mut rec = Reconstructor::new(0.25);
/// assert_eq!(rec.reconstruct(&ring), 1.0);
/// assert_eq!(rec.reconstruct(&ring), 1.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstructor {
    phase: f64,
    increment: f64,
}

impl Reconstructor {
    /// Create a reconstructor with phase 0 and the given per-read increment.
    pub fn new(increment: f64) -> Self {
        let mut rec = Self {
            phase: 0.0,
            increment: 0.0,
        };
        rec.set_increment(increment);
        rec
    }

    /// Interpolate at the current phase, then advance the phase.
    #[inline]
    pub fn reconstruct(&mut self, history: &HistoryRing) -> f32 {
        let y = hermite_window(self.phase as f32, history.chronological());
        self.advance();
        y
    }

    #[inline]
    fn advance(&mut self) {
        self.phase += self.increment;
        if self.phase > 1.0 {
            // Same result as repeated `-= 1.0`, in constant time.
            self.phase -= libm::ceil(self.phase) - 1.0;
        }
    }

    /// Set the per-read phase increment.
    ///
    /// Negative values are treated as zero; non-finite values are ignored.
    pub fn set_increment(&mut self, increment: f64) {
        if increment.is_finite() {
            self.increment = increment.max(0.0);
        }
    }

    /// Current per-read phase increment.
    #[inline]
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Rewind the phase to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

impl Default for Reconstructor {
    fn default() -> Self {
        Self::new(0.0)
    }
}
