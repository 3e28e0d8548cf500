//! Mono 16-bit PCM WAV output.

use std::path::Path;

use tracing::info;

use crate::audio::QuantizedSignal;
use crate::error::Result;

/// WAV header for a single-channel 16-bit integer stream
pub fn wav_spec(sample_rate_hz: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate: sample_rate_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Write `signal` to `path`, replacing any existing file
pub fn write_wav(path: impl AsRef<Path>, signal: &QuantizedSignal) -> Result<()> {
    let path = path.as_ref();
    let mut writer = hound::WavWriter::create(path, wav_spec(signal.sample_rate_hz()))?;

    for &sample in signal.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    info!(
        path = %path.display(),
        samples = signal.len(),
        sample_rate_hz = signal.sample_rate_hz(),
        "wav written"
    );
    Ok(())
}
