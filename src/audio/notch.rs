//! Narrow notch suppression in the frequency domain.
//!
//! Zeroing a handful of bins is a brick-wall filter: it removes a stationary
//! tone cleanly but leaves ringing around anything that is not bin-aligned.
//! That ripple is expected and left in the output.

use std::ops::Range;

use rustfft::num_complex::Complex;
use tracing::{debug, warn};

use super::Spectrum;
use crate::params::NotchWindow;

/// Notch center index, `round(f / (fs/2) * (N/2 + 1))`
///
/// Stays within one bin of the exact nearest bin for any `f` up to Nyquist.
pub fn notch_center_bin(center_hz: f64, sample_rate_hz: u32, signal_len: usize) -> usize {
    let nyquist_hz = sample_rate_hz as f64 / 2.0;
    let bins = (signal_len / 2 + 1) as f64;
    (center_hz / nyquist_hz * bins).round().max(0.0) as usize
}

/// Bins a window covers in `spectrum`, clipped to the spectrum bounds
///
/// The range is stretched to include the exact nearest bin when the center
/// formula lands beside it, so even a zero half-width removes the target.
pub fn notch_bins(spectrum: &Spectrum, window: &NotchWindow) -> Range<usize> {
    let center = notch_center_bin(
        window.center_hz,
        spectrum.sample_rate_hz(),
        spectrum.signal_len(),
    );
    let start = center.saturating_sub(window.half_width_bins).min(spectrum.len());
    let end = center
        .saturating_add(window.half_width_bins)
        .saturating_add(1)
        .min(spectrum.len());
    let range = start..end.max(start);

    match spectrum.nearest_bin(window.center_hz) {
        Some(k) if range.is_empty() => k..k + 1,
        Some(k) => range.start.min(k)..range.end.max(k + 1),
        None => range,
    }
}

/// Zero every bin in the window and return the zeroed range
pub fn suppress(spectrum: &mut Spectrum, window: &NotchWindow) -> Range<usize> {
    let range = notch_bins(spectrum, window);

    if range.is_empty() {
        warn!(
            center_hz = window.center_hz,
            bins = spectrum.len(),
            "notch lies outside the spectrum, nothing suppressed"
        );
        return range;
    }

    for bin in &mut spectrum.bins_mut()[range.clone()] {
        *bin = Complex::new(0.0, 0.0);
    }

    debug!(
        center_hz = window.center_hz,
        first = range.start,
        last = range.end - 1,
        "notch applied"
    );
    range
}
