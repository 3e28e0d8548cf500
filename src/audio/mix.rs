//! Signal composition and 16-bit quantization.

use tracing::warn;

use super::{QuantizedSignal, SampleSequence};
use crate::error::{PipelineError, Result};

/// Full-scale value for symmetric 16-bit quantization
pub const FULL_SCALE: f64 = i16::MAX as f64;

/// Weighted sum of equal-length sequences sharing a sample rate
///
/// Non-finite scales, or a sum that overflows, are rejected.
pub fn compose(parts: &[(&SampleSequence, f64)]) -> Result<SampleSequence> {
    let Some(((first, _), rest)) = parts.split_first() else {
        return Err(PipelineError::InvalidParameter(
            "composition needs at least one sequence".to_string(),
        ));
    };

    for (_, scale) in parts {
        if !scale.is_finite() {
            return Err(PipelineError::InvalidParameter(format!(
                "scale factor must be finite, got {}",
                scale
            )));
        }
    }

    for (seq, _) in rest {
        if seq.len() != first.len() {
            return Err(PipelineError::InvalidParameter(format!(
                "sequence length mismatch: {} vs {}",
                first.len(),
                seq.len()
            )));
        }
        if seq.sample_rate_hz() != first.sample_rate_hz() {
            return Err(PipelineError::InvalidParameter(format!(
                "sample rate mismatch: {} Hz vs {} Hz",
                first.sample_rate_hz(),
                seq.sample_rate_hz()
            )));
        }
    }

    let mut mixed = vec![0.0; first.len()];
    for (seq, scale) in parts {
        for (out, &sample) in mixed.iter_mut().zip(seq.samples()) {
            *out += scale * sample;
        }
    }

    if let Some(i) = mixed.iter().position(|s| !s.is_finite()) {
        return Err(PipelineError::InvalidParameter(format!(
            "composite overflowed at sample {}: {}",
            i, mixed[i]
        )));
    }

    Ok(SampleSequence::new(mixed, first.sample_rate_hz()))
}

/// Largest absolute sample value (0 for an empty sequence)
pub fn peak_amplitude(signal: &SampleSequence) -> f64 {
    signal
        .samples()
        .iter()
        .fold(0.0_f64, |peak, &s| peak.max(s.abs()))
}

/// Normalize by the peak and scale into `[-32767, 32767]`
///
/// Silent input (zero peak) yields an all-zero signal instead of dividing by zero.
/// Input is expected to be finite, as produced by [`compose`].
pub fn quantize(signal: &SampleSequence) -> QuantizedSignal {
    let peak = peak_amplitude(signal);

    if peak == 0.0 {
        warn!(peak, samples = signal.len(), "silent signal, emitting zeros");
        return QuantizedSignal::new(vec![0; signal.len()], signal.sample_rate_hz());
    }

    let gain = FULL_SCALE / peak;
    let samples = signal
        .samples()
        .iter()
        .map(|&s| (s * gain).round().clamp(-FULL_SCALE, FULL_SCALE) as i16)
        .collect();

    QuantizedSignal::new(samples, signal.sample_rate_hz())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::generate_sine_wave;

    #[test]
    fn test_compose_is_linear() {
        let a = generate_sine_wave(400.0, 8000, 0.25).unwrap();
        let b = generate_sine_wave(1300.0, 8000, 0.25).unwrap();

        let both = compose(&[(&a, 1.0), (&b, 1.0)]).unwrap();
        let only_a = compose(&[(&a, 1.0)]).unwrap();
        let only_b = compose(&[(&b, 1.0)]).unwrap();

        for i in 0..both.len() {
            let sum = only_a.samples()[i] + only_b.samples()[i];
            assert!((both.samples()[i] - sum).abs() < 1e-12);
        }
    }

    #[test]
    fn test_compose_applies_scale() {
        let a = SampleSequence::new(vec![1.0, -2.0], 10);
        let b = SampleSequence::new(vec![10.0, 10.0], 10);

        let mixed = compose(&[(&a, 2.0), (&b, 0.5)]).unwrap();
        assert_eq!(mixed.samples(), &[7.0, 1.0]);
    }

    #[test]
    fn test_compose_rejects_mismatch() {
        let a = SampleSequence::new(vec![0.0; 4], 10);
        let short = SampleSequence::new(vec![0.0; 3], 10);
        let other_rate = SampleSequence::new(vec![0.0; 4], 20);

        assert!(matches!(
            compose(&[(&a, 1.0), (&short, 1.0)]),
            Err(PipelineError::InvalidParameter(_))
        ));
        assert!(compose(&[(&a, 1.0), (&other_rate, 1.0)]).is_err());
        assert!(compose(&[]).is_err());
    }

    #[test]
    fn test_compose_rejects_non_finite_scale() {
        let a = SampleSequence::new(vec![1.0, 0.5], 10);

        for scale in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                compose(&[(&a, scale)]),
                Err(PipelineError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_compose_rejects_overflow() {
        let a = SampleSequence::new(vec![1.0, 0.5], 10);

        // Each scaled part is finite; their sum is not
        assert!(matches!(
            compose(&[(&a, f64::MAX), (&a, f64::MAX)]),
            Err(PipelineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_quantize_bounds_and_peak() {
        let a = generate_sine_wave(400.0, 44100, 0.5).unwrap();
        let b = generate_sine_wave(4000.0, 44100, 0.5).unwrap();
        let mixed = compose(&[(&a, 1.0), (&b, 0.3)]).unwrap();

        let q = quantize(&mixed);
        let max = q.samples().iter().map(|&s| (s as i32).abs()).max().unwrap();

        assert_eq!(q.len(), mixed.len());
        assert!(q.samples().iter().all(|&s| (-32767..=32767).contains(&s)));
        assert_eq!(max, 32767);
    }

    #[test]
    fn test_quantize_negative_peak() {
        let seq = SampleSequence::new(vec![0.25, -0.5, 0.0], 3);
        let q = quantize(&seq);

        assert_eq!(q.samples(), &[16384, -32767, 0]);
    }

    #[test]
    fn test_cancelling_tones_are_silent() {
        let a = generate_sine_wave(440.0, 8000, 0.5).unwrap();
        let b = generate_sine_wave(-440.0, 8000, 0.5).unwrap();

        let mixed = compose(&[(&a, 1.0), (&b, 1.0)]).unwrap();
        assert!(mixed.samples().iter().all(|&s| s == 0.0));
        assert_eq!(peak_amplitude(&mixed), 0.0);

        let q = quantize(&mixed);
        assert_eq!(q.len(), mixed.len());
        assert!(q.is_silent());
    }
}
