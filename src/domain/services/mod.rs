//! Domain Services
//!
//! Stateless building blocks of include discovery:
//! - `path_resolver` - lexical path resolution against a base directory
//! - `include_extractor` - finds import statements and their quoted paths
//! - `partial_override` - prefers `_name` siblings over `name`

pub mod include_extractor;
pub mod partial_override;
pub mod path_resolver;

pub use include_extractor::{with_extension, IncludeExtractor};
pub use partial_override::{apply_partial_override, is_partial, shadowed_sibling, PARTIAL_PREFIX};
pub use path_resolver::{resolve, PathError, ResolvedPath};
