//! Four-point Hermite interpolation.
//!
//! # Theory
//!
//! Given four equally spaced samples `y0, y1, y2, y3`, the cubic Hermite
//! (Catmull-Rom) segment between `y1` and `y2` uses the central differences
//! `(y2 - y0) / 2` and `(y3 - y1) / 2` as the endpoint tangents:
//!
//! ```text
//! c0 = y1
//! c1 = (y2 - y0) / 2
//! c2 = y0 - 5/2·y1 + 2·y2 - 1/2·y3
//! c3 = (y3 - y0) / 2 + 3/2·(y1 - y2)
//!
//! y(t) = ((c3·t + c2)·t + c1)·t + c0,   t ∈ [0, 1]
//! ```
//!
//! The curve passes through `y1` at `t = 0` and `y2` at `t = 1`, reproduces
//! straight lines exactly, and is C1-continuous between adjacent segments.
//!
//! Reference: Zolzer, "DAFX: Digital Audio Effects" 2nd ed., Chapter 7
//! (interpolation for fractional delay and sample rate conversion).

/// Evaluate the four-point Hermite segment between `y1` and `y2` at `t`.
///
/// `y0` is the sample before `y1`; `y3` is the sample after `y2`.
///
/// # Example
///
/// ```rust
/// use lofi_core::hermite;
///
/// assert_eq!(hermite(0.0, 0.0, 1.0, 2.0, 3.0), 1.0);
/// assert_eq!(hermite(0.5, 0.0, 1.0, 2.0, 3.0), 1.5);
/// ```
#[inline]
pub fn hermite(t: f32, y0: f32, y1: f32, y2: f32, y3: f32) -> f32 {
    let c0 = y1;
    let c1 = 0.5 * (y2 - y0);
    let c2 = y0 - 2.5 * y1 + 2.0 * y2 - 0.5 * y3;
    let c3 = 0.5 * (y3 - y0) + 1.5 * (y1 - y2);
    ((c3 * t + c2) * t + c1) * t + c0
}

/// [`hermite`] over a chronologically ordered window `[y0, y1, y2, y3]`.
#[inline]
pub fn hermite_window(t: f32, window: [f32; 4]) -> f32 {
    hermite(t, window[0], window[1], window[2], window[3])
}
