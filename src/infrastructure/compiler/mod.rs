//! Style compiler implementations

mod sassc;

pub use sassc::{SasscCompiler, DEFAULT_PROGRAM};
