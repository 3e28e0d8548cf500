//! Signal and filter configuration.

use crate::error::{PipelineError, Result};

/// Reference signal constants (400 Hz tone corrupted by a 4 kHz whine)
pub mod reference {
    /// Wanted tone (Hz)
    pub const SIGNAL_FREQ_HZ: f64 = 400.0;

    /// Interference tone (Hz)
    pub const NOISE_FREQ_HZ: f64 = 4000.0;

    /// Interference amplitude relative to the wanted tone
    pub const NOISE_SCALE: f64 = 0.3;

    /// CD-quality sample rate (Hz)
    pub const SAMPLE_RATE_HZ: u32 = 44100;

    /// Signal length (seconds)
    pub const DURATION_S: f64 = 5.0;

    /// Bins zeroed on each side of the interference bin
    pub const NOTCH_HALF_WIDTH_BINS: usize = 1;
}

/// A pure sinusoid with zero phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Tone frequency (Hz), negative values invert the phase
    pub frequency_hz: f64,

    /// Linear gain applied to the unit sinusoid
    pub amplitude_scale: f64,
}

impl ToneSpec {
    pub fn new(frequency_hz: f64, amplitude_scale: f64) -> Self {
        Self {
            frequency_hz,
            amplitude_scale,
        }
    }
}

/// Contiguous run of spectrum bins to zero around a center frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotchWindow {
    /// Frequency to suppress (Hz)
    pub center_hz: f64,

    /// Bins zeroed on each side of the center bin
    /// 1 = three bins total
    pub half_width_bins: usize,
}

impl NotchWindow {
    pub fn new(center_hz: f64, half_width_bins: usize) -> Self {
        Self {
            center_hz,
            half_width_bins,
        }
    }

    /// Three-bin notch around `center_hz`
    pub fn narrow(center_hz: f64) -> Self {
        Self::new(center_hz, reference::NOTCH_HALF_WIDTH_BINS)
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Sample rate (Hz)
    pub sample_rate_hz: u32,

    /// Signal length (seconds)
    pub duration_s: f64,

    /// Tones summed into the composite signal
    pub tones: Vec<ToneSpec>,

    /// Interference band to suppress, `None` passes the spectrum through
    pub notch: Option<NotchWindow>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::reference(
            reference::SIGNAL_FREQ_HZ,
            reference::NOISE_FREQ_HZ,
            reference::NOISE_SCALE,
            reference::SAMPLE_RATE_HZ,
            reference::DURATION_S,
        )
    }
}

impl PipelineConfig {
    /// Unit-gain signal tone plus a scaled noise tone, notched at the noise frequency
    pub fn reference(
        signal_freq_hz: f64,
        noise_freq_hz: f64,
        noise_scale: f64,
        sample_rate_hz: u32,
        duration_s: f64,
    ) -> Self {
        Self {
            sample_rate_hz,
            duration_s,
            tones: vec![
                ToneSpec::new(signal_freq_hz, 1.0),
                ToneSpec::new(noise_freq_hz, noise_scale),
            ],
            notch: Some(NotchWindow::narrow(noise_freq_hz)),
        }
    }

    /// Number of samples per sequence
    pub fn sample_count(&self) -> usize {
        sample_count(self.sample_rate_hz, self.duration_s)
    }

    /// Validate configuration (positive rate and duration, at least one finite tone)
    pub fn validate(&self) -> Result<()> {
        validate_timing(self.sample_rate_hz, self.duration_s)?;
        if self.tones.is_empty() {
            return Err(PipelineError::InvalidParameter(
                "at least one tone is required".to_string(),
            ));
        }
        for tone in &self.tones {
            if !tone.frequency_hz.is_finite() || !tone.amplitude_scale.is_finite() {
                return Err(PipelineError::InvalidParameter(format!(
                    "tone must be finite, got {} Hz x {}",
                    tone.frequency_hz, tone.amplitude_scale
                )));
            }
        }
        if let Some(notch) = &self.notch {
            if !notch.center_hz.is_finite() || notch.center_hz < 0.0 {
                return Err(PipelineError::InvalidParameter(format!(
                    "notch center must be a non-negative frequency, got {}",
                    notch.center_hz
                )));
            }
        }
        Ok(())
    }
}

/// Samples covering `duration_s` at `sample_rate_hz`, rounded to the nearest whole sample
pub fn sample_count(sample_rate_hz: u32, duration_s: f64) -> usize {
    (sample_rate_hz as f64 * duration_s).round() as usize
}

/// Reject non-positive sample rates and durations
pub fn validate_timing(sample_rate_hz: u32, duration_s: f64) -> Result<()> {
    if sample_rate_hz == 0 {
        return Err(PipelineError::InvalidParameter(
            "sample rate must be > 0".to_string(),
        ));
    }
    if !duration_s.is_finite() || duration_s <= 0.0 {
        return Err(PipelineError::InvalidParameter(format!(
            "duration must be > 0 seconds, got {}",
            duration_s
        )));
    }
    if sample_count(sample_rate_hz, duration_s) == 0 {
        return Err(PipelineError::InvalidParameter(format!(
            "{} s at {} Hz is shorter than one sample",
            duration_s, sample_rate_hz
        )));
    }
    Ok(())
}
