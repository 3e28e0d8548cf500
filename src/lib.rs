//! fourier-notch library - tone synthesis and FFT interference removal

pub mod audio;
pub mod cli;
pub mod error;
pub mod export;
pub mod params;

pub use error::{PipelineError, Result};
