//! Configuration loading and environment overrides

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{KilnError, KilnResult};

use super::types::{Config, CONFIG_FILE_NAME};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown key
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line, if the key could be located
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> KilnResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse configuration text; `path` is only used for messages
pub fn parse_with_warnings(content: &str, path: &Path) -> KilnResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| KilnError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from `<root>/kiln.toml`, the user config, or defaults
///
/// A broken root config is an error; a broken user config is only logged.
pub fn load_for_root(root: &Path) -> KilnResult<(Config, Vec<ConfigWarning>)> {
    let project_config = root.join(CONFIG_FILE_NAME);
    if project_config.is_file() {
        let (config, warnings) = load_with_warnings(&project_config)?;
        return Ok((with_env_overrides(config), warnings));
    }

    if let Some(user_config) = user_config_path() {
        if user_config.is_file() {
            match load_with_warnings(&user_config) {
                Ok((config, warnings)) => return Ok((with_env_overrides(config), warnings)),
                Err(e) => debug!(path = %user_config.display(), error = %e, "ignoring user config"),
            }
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// `~/.config/kiln/config.toml` (platform equivalent)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kiln").join("config.toml"))
}

/// Apply environment variable overrides (KILN_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from any key lookup
pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    // KILN_OUTPUT_STYLE
    if let Some(style) = lookup("KILN_OUTPUT_STYLE") {
        match style.parse() {
            Ok(style) => config.sass.output_style = Some(style),
            Err(e) => debug!(error = %e, "ignoring KILN_OUTPUT_STYLE"),
        }
    }

    // KILN_SOURCE_MAPS
    if let Some(val) = lookup("KILN_SOURCE_MAPS") {
        let val = val.trim().to_lowercase();
        config.sass.generate_source_maps = Some(val != "false" && val != "0" && !val.is_empty());
    }

    // KILN_COMPILER
    if let Some(program) = lookup("KILN_COMPILER") {
        if !program.trim().is_empty() {
            config.compiler.program = PathBuf::from(program.trim());
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "sass",
        "output_style",
        "generate_source_maps",
        "compiler",
        "program",
        "include_paths",
        "build",
        "ignore",
        "jobs",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
