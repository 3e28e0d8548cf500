//! Error types for the filtering pipeline.

use thiserror::Error;

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Bad sample rate, duration, tone list or mismatched sequences
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Inverse transform input does not match the forward length
    #[error("transform length mismatch: expected {expected} bins, got {actual}")]
    TransformLengthMismatch { expected: usize, actual: usize },

    /// FFT planning or processing failure
    #[error("fft failed: {0}")]
    Fft(String),

    /// WAV writer failure
    #[error("export failed: {0}")]
    Export(#[from] hound::Error),
}

impl From<realfft::FftError> for PipelineError {
    fn from(err: realfft::FftError) -> Self {
        PipelineError::Fft(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
