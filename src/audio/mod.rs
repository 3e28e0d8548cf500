//! Tone synthesis and FFT notch filtering.
//!
//! Generates sinusoids, mixes and quantizes them, then removes an
//! interference tone by zeroing its bins in the real-FFT spectrum.

mod fft;
mod mix;
mod notch;
mod pipeline;
mod sequence;
mod synthesis;

// Re-export public types
pub use fft::{Peak, SpectralAnalyzer, SpectralSynthesizer, Spectrum};
pub use mix::{compose, peak_amplitude, quantize, FULL_SCALE};
pub use notch::{notch_bins, notch_center_bin, suppress};
pub use pipeline::{FilterPipeline, PipelineOutput, PipelineStage};
pub use sequence::{QuantizedSignal, SampleSequence};
pub use synthesis::{generate_sine_wave, generate_tone};
