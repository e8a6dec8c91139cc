//! Output style value objects
//!
//! `OutputStyle` is the formatting mode handed to the style compiler;
//! `StyleOptions` is the per-file resolved configuration an engine reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CSS formatting mode requested from the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// One rule per line
    #[default]
    Compact,
    /// One declaration per line
    Expanded,
    /// Whitespace stripped
    Minified,
    /// Indentation mirrors the source nesting
    Nested,
}

impl OutputStyle {
    /// Style name as understood by `sassc --style`
    pub fn compiler_name(self) -> &'static str {
        match self {
            OutputStyle::Compact => "compact",
            OutputStyle::Expanded => "expanded",
            OutputStyle::Minified => "compressed",
            OutputStyle::Nested => "nested",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputStyle::Compact => "compact",
            OutputStyle::Expanded => "expanded",
            OutputStyle::Minified => "minified",
            OutputStyle::Nested => "nested",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(OutputStyle::Compact),
            "expanded" => Ok(OutputStyle::Expanded),
            "minified" | "compressed" => Ok(OutputStyle::Minified),
            "nested" => Ok(OutputStyle::Nested),
            other => Err(format!("unknown output style '{}'", other)),
        }
    }
}

/// Locally resolved style configuration for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleOptions {
    pub output_style: OutputStyle,
    pub generate_source_maps: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_compact_without_maps() {
        let options = StyleOptions::default();
        assert_eq!(options.output_style, OutputStyle::Compact);
        assert!(!options.generate_source_maps);
    }

    #[test]
    fn minified_maps_to_compressed() {
        assert_eq!(OutputStyle::Minified.compiler_name(), "compressed");
        assert_eq!(OutputStyle::Nested.compiler_name(), "nested");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Expanded".parse::<OutputStyle>(), Ok(OutputStyle::Expanded));
        assert_eq!(" compressed ".parse::<OutputStyle>(), Ok(OutputStyle::Minified));
        assert!("pretty".parse::<OutputStyle>().is_err());
    }

    #[test]
    fn deserializes_from_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            style: OutputStyle,
        }
        let w: Wrapper = toml::from_str("style = \"nested\"").unwrap();
        assert_eq!(w.style, OutputStyle::Nested);
    }
}
