//! Watch Use Case
//!
//! Continuous rebuilding of a build root. It orchestrates:
//! - File system monitoring (via `notify` crate)
//! - Debouncing (100ms default)
//! - Content hash filtering (editor saves without changes are ignored)
//! - Incremental rebuilds through the dependency graph
//!
//! ## Usage
//!
//! ```ignore
//! let use_case = WatchUseCase::new(pipeline);
//! use_case.start(running, |event| println!("{}", event.to_json()))?;
//! ```

mod cache;
mod event;
mod use_case;


pub use cache::{ContentChange, ContentTracker};
pub use event::{WatchEvent, WatcherState, DEBOUNCE_MS};
pub use use_case::{WatchUseCase, WatchedFile};
