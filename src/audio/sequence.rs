//! Sampled signal containers.

/// Uniformly sampled real-valued signal
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSequence {
    samples: Vec<f64>,
    sample_rate_hz: u32,
}

impl SampleSequence {
    pub fn new(samples: Vec<f64>, sample_rate_hz: u32) -> Self {
        Self {
            samples,
            sample_rate_hz,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Signal length (seconds)
    pub fn duration_s(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz as f64
    }

    /// Sample instants `i / sample_rate` (end point excluded)
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        let rate = self.sample_rate_hz as f64;
        (0..self.samples.len()).map(move |i| i as f64 / rate)
    }
}

/// Peak-normalized 16-bit signal ready for PCM export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedSignal {
    samples: Vec<i16>,
    sample_rate_hz: u32,
}

impl QuantizedSignal {
    pub fn new(samples: Vec<i16>, sample_rate_hz: u32) -> Self {
        Self {
            samples,
            sample_rate_hz,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True when every sample is zero
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }

    /// Widen back to floating point for spectral analysis
    pub fn to_sequence(&self) -> SampleSequence {
        SampleSequence::new(
            self.samples.iter().map(|&s| s as f64).collect(),
            self.sample_rate_hz,
        )
    }
}
