//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod features;
mod hash;
mod ignore_patterns;
mod output_style;

pub use features::PipelineFeatures;
pub use hash::ContentHash;
pub use ignore_patterns::{IgnoreError, IgnorePatterns, IGNORE_FILE_NAME};
pub use output_style::{OutputStyle, StyleOptions};
