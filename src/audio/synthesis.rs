//! Sinusoidal waveform generation.

use std::f64::consts::PI;

use super::SampleSequence;
use crate::error::Result;
use crate::params::{sample_count, validate_timing, ToneSpec};

/// Sample `sin(2π f t)` at `t = i / sample_rate` for `duration_s` seconds
pub fn generate_sine_wave(
    frequency_hz: f64,
    sample_rate_hz: u32,
    duration_s: f64,
) -> Result<SampleSequence> {
    validate_timing(sample_rate_hz, duration_s)?;

    let n = sample_count(sample_rate_hz, duration_s);
    let step = 2.0 * PI * frequency_hz / sample_rate_hz as f64;
    let samples = (0..n).map(|i| (step * i as f64).sin()).collect();

    Ok(SampleSequence::new(samples, sample_rate_hz))
}

/// Generate a tone with its amplitude scale applied
pub fn generate_tone(
    tone: &ToneSpec,
    sample_rate_hz: u32,
    duration_s: f64,
) -> Result<SampleSequence> {
    let unit = generate_sine_wave(tone.frequency_hz, sample_rate_hz, duration_s)?;
    let samples = unit
        .into_samples()
        .into_iter()
        .map(|s| s * tone.amplitude_scale)
        .collect();

    Ok(SampleSequence::new(samples, sample_rate_hz))
}
