//! Common test utilities for Kiln integration tests.
//!
//! This module provides:
//! - `TestSite`: Isolated site directory with helpers to run the kiln binary
//! - `FakeCompiler`: In-process `StyleCompiler` double
//! - Fixtures: Reusable Sass sources

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
