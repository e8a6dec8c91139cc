//! Domain Entities
//!
//! Records that flow through one processing pass.
//! - `FileRecord` - A source file and its processing state
//! - `OutputDescriptor` - One artifact a file produces
//! - `IncludeMatch` / `ResolvedInclude` - Include statements and their targets

mod file_record;
mod include;
mod output_descriptor;

pub use file_record::{FileRecord, ProcessingState};
pub use include::{IncludeMatch, ResolvedInclude};
pub use output_descriptor::OutputDescriptor;
