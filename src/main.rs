//! fourier-notch - synthesize a tone, corrupt it with a second tone, and
//! recover the original with a forward/inverse FFT notch filter.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fourier_notch::audio::{FilterPipeline, Spectrum};
use fourier_notch::cli::Args;
use fourier_notch::export::write_wav;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fourier_notch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = args.to_pipeline_config();
    let export = args.export_config();

    info!(
        sample_rate_hz = config.sample_rate_hz,
        duration_s = config.duration_s,
        tones = config.tones.len(),
        "starting pipeline"
    );

    let mut pipeline = FilterPipeline::new(config).context("invalid configuration")?;
    let output = pipeline.run().context("pipeline failed")?;

    report("Before", &output.spectrum, args.peaks);
    report("After", &output.filtered_spectrum, args.peaks);

    for dir in export.output_dirs() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    if let Some(mix_path) = &export.mix_path {
        write_wav(mix_path, &output.mixed)
            .with_context(|| format!("failed to write {}", mix_path.display()))?;
    }
    write_wav(&export.output_path, &output.filtered)
        .with_context(|| format!("failed to write {}", export.output_path.display()))?;

    println!("Filtered signal: {}", export.output_path.display());
    Ok(())
}

/// Print the strongest spectral peaks
fn report(label: &str, spectrum: &Spectrum, count: usize) {
    println!("{} filtering:", label);
    for peak in spectrum.dominant_frequencies(count) {
        println!("  {:>10.2} Hz  amplitude {:.1}", peak.frequency_hz, peak.amplitude);
    }
}
