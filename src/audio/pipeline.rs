//! Batch pipeline: synthesize, quantize, notch in the frequency domain, rebuild.

use std::fmt;
use std::ops::Range;

use tracing::info;

use super::fft::{SpectralAnalyzer, SpectralSynthesizer, Spectrum};
use super::mix::{compose, peak_amplitude, quantize};
use super::notch::suppress;
use super::synthesis::generate_tone;
use super::{QuantizedSignal, SampleSequence};
use crate::error::Result;
use crate::params::PipelineConfig;

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Generated,
    Composited,
    Quantized,
    Transformed,
    Filtered,
    Reconstructed,
    Requantized,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Generated => "generated",
            PipelineStage::Composited => "composited",
            PipelineStage::Quantized => "quantized",
            PipelineStage::Transformed => "transformed",
            PipelineStage::Filtered => "filtered",
            PipelineStage::Reconstructed => "reconstructed",
            PipelineStage::Requantized => "requantized",
        };
        f.write_str(name)
    }
}

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Quantized tone mix fed to the forward transform
    pub mixed: QuantizedSignal,

    /// Spectrum of `mixed`
    pub spectrum: Spectrum,

    /// Spectrum after notch suppression
    pub filtered_spectrum: Spectrum,

    /// Bins zeroed by the notch (empty when no notch is configured)
    pub suppressed_bins: Range<usize>,

    /// Inverse transform of `filtered_spectrum`, same scale as `mixed`
    pub reconstructed: SampleSequence,

    /// `reconstructed` re-normalized to 16 bits for export
    pub filtered: QuantizedSignal,
}

/// Single-use batch pipeline owning its own FFT plans
pub struct FilterPipeline {
    config: PipelineConfig,
    analyzer: SpectralAnalyzer,
    synthesizer: SpectralSynthesizer,
}

impl FilterPipeline {
    /// Create pipeline after validating configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            analyzer: SpectralAnalyzer::new(),
            synthesizer: SpectralSynthesizer::new(),
        })
    }

    /// Run every stage; the first error aborts the run
    pub fn run(&mut self) -> Result<PipelineOutput> {
        let rate = self.config.sample_rate_hz;
        let duration = self.config.duration_s;

        let tones = self
            .config
            .tones
            .iter()
            .map(|tone| generate_tone(tone, rate, duration))
            .collect::<Result<Vec<_>>>()?;
        info!(
            stage = %PipelineStage::Generated,
            tones = tones.len(),
            samples = self.config.sample_count(),
            "tones generated"
        );

        // Amplitude scales are already applied per tone
        let parts: Vec<(&SampleSequence, f64)> = tones.iter().map(|seq| (seq, 1.0)).collect();
        let composite = compose(&parts)?;
        info!(
            stage = %PipelineStage::Composited,
            peak = peak_amplitude(&composite),
            "tones mixed"
        );

        let mixed = quantize(&composite);
        info!(stage = %PipelineStage::Quantized, silent = mixed.is_silent(), "mix quantized");

        let spectrum = self.analyzer.analyze(&mixed.to_sequence())?;
        info!(
            stage = %PipelineStage::Transformed,
            bins = spectrum.len(),
            bin_width_hz = spectrum.bin_width_hz(),
            "spectrum computed"
        );

        let mut filtered_spectrum = spectrum.clone();
        let suppressed_bins = match &self.config.notch {
            Some(window) => suppress(&mut filtered_spectrum, window),
            None => 0..0,
        };
        info!(
            stage = %PipelineStage::Filtered,
            first = suppressed_bins.start,
            count = suppressed_bins.len(),
            "interference suppressed"
        );

        let reconstructed = self.synthesizer.synthesize(&filtered_spectrum)?;
        info!(
            stage = %PipelineStage::Reconstructed,
            peak = peak_amplitude(&reconstructed),
            "signal rebuilt"
        );

        let filtered = quantize(&reconstructed);
        info!(stage = %PipelineStage::Requantized, samples = filtered.len(), "done");

        Ok(PipelineOutput {
            mixed,
            spectrum,
            filtered_spectrum,
            suppressed_bins,
            reconstructed,
            filtered,
        })
    }
}
