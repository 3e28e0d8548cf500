//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{reference, ExportConfig, NotchWindow, PipelineConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "fourier-notch")]
#[command(about = "Remove an interference tone from a synthesized signal with an FFT notch", long_about = None)]
pub struct Args {
    /// Wanted tone frequency
    #[arg(long, value_name = "HZ", default_value_t = reference::SIGNAL_FREQ_HZ)]
    pub signal_freq: f64,

    /// Interference tone frequency (also the notch center)
    #[arg(long, value_name = "HZ", default_value_t = reference::NOISE_FREQ_HZ)]
    pub noise_freq: f64,

    /// Interference amplitude relative to the wanted tone
    #[arg(long, value_name = "GAIN", default_value_t = reference::NOISE_SCALE)]
    pub noise_scale: f64,

    /// Sample rate
    #[arg(long, value_name = "HZ", default_value_t = reference::SAMPLE_RATE_HZ)]
    pub sample_rate: u32,

    /// Signal length
    #[arg(long, value_name = "SECONDS", default_value_t = reference::DURATION_S)]
    pub duration: f64,

    /// Bins zeroed on each side of the interference bin
    #[arg(long, value_name = "BINS", default_value_t = reference::NOTCH_HALF_WIDTH_BINS)]
    pub notch_width: usize,

    /// Skip suppression and pass the spectrum through unchanged
    #[arg(long)]
    pub no_notch: bool,

    /// Filtered WAV output path
    #[arg(long, value_name = "PATH", default_value = "output/filtered.wav")]
    pub output: PathBuf,

    /// Also write the unfiltered mix to this path
    #[arg(long, value_name = "PATH")]
    pub mix_output: Option<PathBuf>,

    /// Number of dominant frequencies to report
    #[arg(long, value_name = "COUNT", default_value_t = 3)]
    pub peaks: usize,
}

impl Args {
    /// Build the pipeline configuration from the tone and notch flags
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::reference(
            self.signal_freq,
            self.noise_freq,
            self.noise_scale,
            self.sample_rate,
            self.duration,
        );
        config.notch = (!self.no_notch).then(|| NotchWindow::new(self.noise_freq, self.notch_width));
        config
    }

    /// Output paths for the WAV files
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            output_path: self.output.clone(),
            mix_path: self.mix_output.clone(),
        }
    }
}
