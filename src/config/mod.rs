//! Configuration module for Kiln
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KILN_*)
//! 3. Nested `kiln.toml` files, `[sass]` table only, nearest wins
//! 4. Root config (`<root>/kiln.toml`)
//! 5. User config (`~/.config/kiln/config.toml`)
//! 6. Built-in defaults (lowest priority)
//!
//! Environment overrides apply to the root config, so a nested `kiln.toml`
//! still wins over them for its subtree.

mod loader;
mod resolver;
mod types;

pub use loader::{apply_overrides, user_config_path, ConfigWarning};
pub use resolver::ConfigResolver;
pub use types::{BuildConfig, CompilerConfig, Config, SassConfig, CONFIG_FILE_NAME};
