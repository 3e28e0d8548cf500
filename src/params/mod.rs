//! Parameter definitions with physical units and documented semantics.
//!
//! All reference constants are extracted here with:
//! - Physical units (Hz, seconds, bins)
//! - Documented defaults
//! - Validation before any transform runs

mod export;
mod signal;

// Re-export all types
pub use export::ExportConfig;
pub use signal::{
    reference, sample_count, validate_timing, NotchWindow, PipelineConfig, ToneSpec,
};
