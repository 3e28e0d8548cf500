//! WAV export configuration.

use std::path::PathBuf;

/// Where the pipeline writes its PCM output
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Filtered (re-quantized) signal path
    pub output_path: PathBuf,

    /// Optional path for the unfiltered quantized mix
    pub mix_path: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("output/filtered.wav"),
            mix_path: None,
        }
    }
}

impl ExportConfig {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            mix_path: None,
        }
    }

    /// Directories that must exist before writing
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        std::iter::once(&self.output_path)
            .chain(self.mix_path.as_ref())
            .filter_map(|path| path.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(PathBuf::from)
            .collect()
    }
}
