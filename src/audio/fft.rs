//! Real-input FFT analysis and inverse synthesis.

use std::sync::Arc;

use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::num_complex::Complex;
use tracing::debug;

use super::SampleSequence;
use crate::error::{PipelineError, Result};

/// One-sided spectrum of a real signal (`N/2 + 1` bins, DC first)
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    bins: Vec<Complex<f64>>,
    sample_rate_hz: u32,
    signal_len: usize,
}

/// Local maximum in an amplitude spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub bin: usize,
    pub frequency_hz: f64,
    pub amplitude: f64,
}

impl Spectrum {
    /// Wrap raw coefficients for a signal of `signal_len` samples
    pub fn from_bins(bins: Vec<Complex<f64>>, sample_rate_hz: u32, signal_len: usize) -> Self {
        Self {
            bins,
            sample_rate_hz,
            signal_len,
        }
    }

    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    pub fn bins_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Length of the time-domain signal this spectrum was taken from
    pub fn signal_len(&self) -> usize {
        self.signal_len
    }

    /// Frequency resolution (Hz per bin)
    pub fn bin_width_hz(&self) -> f64 {
        self.sample_rate_hz as f64 / self.signal_len as f64
    }

    /// Center frequency of bin `k` (Hz)
    pub fn frequency(&self, k: usize) -> f64 {
        k as f64 * self.bin_width_hz()
    }

    /// Frequency axis, one entry per bin
    pub fn frequencies(&self) -> Vec<f64> {
        (0..self.bins.len()).map(|k| self.frequency(k)).collect()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    /// Bin whose center is closest to `hz`, if inside the spectrum
    pub fn nearest_bin(&self, hz: f64) -> Option<usize> {
        if !hz.is_finite() || hz < 0.0 {
            return None;
        }
        let k = (hz / self.bin_width_hz()).round() as usize;
        (k < self.bins.len()).then_some(k)
    }

    pub fn magnitude_at(&self, hz: f64) -> Option<f64> {
        self.nearest_bin(hz).map(|k| self.bins[k].norm())
    }

    /// Single-sided amplitudes: a tone of amplitude `a` reads as `a` at its bin
    pub fn amplitude_spectrum(&self) -> Vec<f64> {
        let n = self.signal_len as f64;
        let last = self.bins.len().saturating_sub(1);
        let has_nyquist = self.signal_len % 2 == 0;

        self.bins
            .iter()
            .enumerate()
            .map(|(k, c)| {
                if k == 0 || (has_nyquist && k == last) {
                    c.norm() / n
                } else {
                    2.0 * c.norm() / n
                }
            })
            .collect()
    }

    /// Strongest `count` local maxima, loudest first
    pub fn dominant_frequencies(&self, count: usize) -> Vec<Peak> {
        let amps = self.amplitude_spectrum();

        let mut peaks: Vec<Peak> = (0..amps.len())
            .filter(|&k| {
                let left = if k == 0 { 0.0 } else { amps[k - 1] };
                let right = amps.get(k + 1).copied().unwrap_or(0.0);
                amps[k] > 0.0 && amps[k] >= left && amps[k] > right
            })
            .map(|k| Peak {
                bin: k,
                frequency_hz: self.frequency(k),
                amplitude: amps[k],
            })
            .collect();

        peaks.sort_by(|a, b| b.amplitude.total_cmp(&a.amplitude));
        peaks.truncate(count);
        peaks
    }
}

/// Forward real FFT with cached plans
pub struct SpectralAnalyzer {
    planner: RealFftPlanner<f64>,
}

impl Default for SpectralAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralAnalyzer {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
        }
    }

    /// Transform a whole signal into its `N/2 + 1` bin spectrum
    pub fn analyze(&mut self, signal: &SampleSequence) -> Result<Spectrum> {
        if signal.is_empty() {
            return Err(PipelineError::InvalidParameter(
                "cannot analyze an empty signal".to_string(),
            ));
        }

        let n = signal.len();
        let r2c: Arc<dyn RealToComplex<f64>> = self.planner.plan_fft_forward(n);

        // realfft uses the input as scratch
        let mut input = signal.samples().to_vec();
        let mut output = r2c.make_output_vec();
        r2c.process(&mut input, &mut output)?;

        debug!(samples = n, bins = output.len(), "forward fft");
        Ok(Spectrum::from_bins(output, signal.sample_rate_hz(), n))
    }
}

/// Inverse real FFT with cached plans
pub struct SpectralSynthesizer {
    planner: RealFftPlanner<f64>,
}

impl Default for SpectralSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralSynthesizer {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
        }
    }

    /// Rebuild the `signal_len` samples a spectrum describes, scaled by `1/N`
    pub fn synthesize(&mut self, spectrum: &Spectrum) -> Result<SampleSequence> {
        let n = spectrum.signal_len();
        if n == 0 {
            return Err(PipelineError::InvalidParameter(
                "cannot synthesize a zero-length signal".to_string(),
            ));
        }

        let expected = n / 2 + 1;
        if spectrum.len() != expected {
            return Err(PipelineError::TransformLengthMismatch {
                expected,
                actual: spectrum.len(),
            });
        }

        let c2r: Arc<dyn ComplexToReal<f64>> = self.planner.plan_fft_inverse(n);
        let mut input = spectrum.bins().to_vec();

        // A real signal has no imaginary DC or Nyquist component
        input[0].im = 0.0;
        if n % 2 == 0 {
            input[expected - 1].im = 0.0;
        }

        let mut output = c2r.make_output_vec();
        c2r.process(&mut input, &mut output)?;

        let scale = 1.0 / n as f64;
        for sample in output.iter_mut() {
            *sample *= scale;
        }

        debug!(bins = expected, samples = n, "inverse fft");
        Ok(SampleSequence::new(output, spectrum.sample_rate_hz()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{compose, generate_sine_wave};

    fn max_relative_error(a: &SampleSequence, b: &SampleSequence) -> f64 {
        let peak = a
            .samples()
            .iter()
            .fold(0.0_f64, |m, &s| m.max(s.abs()))
            .max(f64::MIN_POSITIVE);
        a.samples()
            .iter()
            .zip(b.samples())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
            / peak
    }

    #[test]
    fn test_spectrum_length_and_axis() {
        let wave = generate_sine_wave(1000.0, 8000, 0.5).unwrap();
        let spectrum = SpectralAnalyzer::new().analyze(&wave).unwrap();

        // 4000 samples -> 2001 bins, 2 Hz per bin, Nyquist last
        assert_eq!(spectrum.len(), 2001);
        assert_eq!(spectrum.bin_width_hz(), 2.0);
        assert_eq!(spectrum.frequency(0), 0.0);
        assert_eq!(*spectrum.frequencies().last().unwrap(), 4000.0);
    }

    #[test]
    fn test_tone_lands_in_its_bin() {
        let wave = generate_sine_wave(1000.0, 8000, 0.5).unwrap();
        let spectrum = SpectralAnalyzer::new().analyze(&wave).unwrap();

        let k = spectrum.nearest_bin(1000.0).unwrap();
        assert_eq!(k, 500);

        // Unnormalized forward transform: N/2 at the tone bin
        assert!((spectrum.magnitudes()[k] - 2000.0).abs() < 1e-6);

        let amps = spectrum.amplitude_spectrum();
        assert!((amps[k] - 1.0).abs() < 1e-9);
        assert!(amps[k + 5] < 1e-9);
    }

    #[test]
    fn test_round_trip_even_length() {
        let a = generate_sine_wave(440.0, 8000, 0.5).unwrap();
        let b = generate_sine_wave(1234.5, 8000, 0.5).unwrap();
        let x = compose(&[(&a, 1.0), (&b, 0.7)]).unwrap();

        let spectrum = SpectralAnalyzer::new().analyze(&x).unwrap();
        let y = SpectralSynthesizer::new().synthesize(&spectrum).unwrap();

        assert_eq!(y.len(), x.len());
        assert!(max_relative_error(&x, &y) < 1e-9);
    }

    #[test]
    fn test_round_trip_odd_length() {
        let x = generate_sine_wave(300.0, 1001, 1.0).unwrap();
        assert_eq!(x.len() % 2, 1);

        let spectrum = SpectralAnalyzer::new().analyze(&x).unwrap();
        assert_eq!(spectrum.len(), 501);

        let y = SpectralSynthesizer::new().synthesize(&spectrum).unwrap();
        assert_eq!(y.len(), 1001);
        assert!(max_relative_error(&x, &y) < 1e-9);
    }

    #[test]
    fn test_synthesize_rejects_wrong_bin_count() {
        let spectrum = Spectrum::from_bins(vec![Complex::new(0.0, 0.0); 10], 8000, 100);
        let err = SpectralSynthesizer::new().synthesize(&spectrum).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::TransformLengthMismatch {
                expected: 51,
                actual: 10
            }
        ));
    }

    #[test]
    fn test_analyze_rejects_empty() {
        let empty = SampleSequence::new(Vec::new(), 8000);
        assert!(SpectralAnalyzer::new().analyze(&empty).is_err());
    }

    #[test]
    fn test_dominant_frequencies() {
        let a = generate_sine_wave(400.0, 8000, 1.0).unwrap();
        let b = generate_sine_wave(2000.0, 8000, 1.0).unwrap();
        let x = compose(&[(&a, 1.0), (&b, 0.3)]).unwrap();
        let spectrum = SpectralAnalyzer::new().analyze(&x).unwrap();

        let peaks = spectrum.dominant_frequencies(2);
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].frequency_hz, 400.0);
        assert_eq!(peaks[1].frequency_hz, 2000.0);
        assert!((peaks[1].amplitude - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_bin_out_of_range() {
        let wave = generate_sine_wave(100.0, 8000, 0.5).unwrap();
        let spectrum = SpectralAnalyzer::new().analyze(&wave).unwrap();

        assert_eq!(spectrum.nearest_bin(-1.0), None);
        assert_eq!(spectrum.nearest_bin(9000.0), None);
        assert_eq!(spectrum.magnitude_at(9000.0), None);
    }
}
