use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kiln - incremental content build engine
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output as JSON (NDJSON for watch)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every source file under the root
    Build {
        /// Build root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Build, then rebuild continuously as files change
    Watch {
        /// Build root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Print the resolved includes of one file
    Deps {
        /// Source file to inspect
        file: PathBuf,

        /// Build root directory (for configuration)
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_build_with_default_root() {
        let cli = Cli::try_parse_from(["kiln", "build"]).unwrap();
        assert!(!cli.json);
        assert!(matches!(cli.command, Commands::Build { ref root } if root == &PathBuf::from(".")));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["kiln", "watch", "--root", "site", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Watch { ref root } if root == &PathBuf::from("site")));
    }

    #[test]
    fn deps_requires_a_file() {
        assert!(Cli::try_parse_from(["kiln", "deps"]).is_err());
        let cli = Cli::try_parse_from(["kiln", "deps", "css/main.scss"]).unwrap();
        assert!(matches!(cli.command, Commands::Deps { ref file, .. } if file == &PathBuf::from("css/main.scss")));
    }
}
