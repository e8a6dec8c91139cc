use std::path::Path;

use anyhow::{Context, Result};

use kiln::domain::ports::IncludeDiscovery;

use super::{canonical_root, display_relative, open_pipeline};

pub fn cmd_deps(file: &Path, root: &Path, json: bool) -> Result<()> {
    let root = canonical_root(root)?;
    let file = file
        .canonicalize()
        .with_context(|| format!("file not found: {}", file.display()))?;
    let pipeline = open_pipeline(&root, json)?;

    let discovery = pipeline.discover_includes(&file)?;

    if json {
        let value = match &discovery {
            IncludeDiscovery::Supported(includes) => serde_json::json!({
                "file": file.display().to_string(),
                "supported": true,
                "includes": includes
                    .iter()
                    .map(|i| serde_json::json!({
                        "token": i.token,
                        "path": i.path.display().to_string(),
                        "overridden": i.overridden,
                    }))
                    .collect::<Vec<_>>(),
            }),
            IncludeDiscovery::Unsupported => serde_json::json!({
                "file": file.display().to_string(),
                "supported": false,
            }),
        };
        println!("{}", serde_json::to_string(&value)?);
        return Ok(());
    }

    match discovery {
        IncludeDiscovery::Supported(includes) => {
            for include in includes {
                println!("{}", display_relative(&include.path, &root));
            }
        }
        IncludeDiscovery::Unsupported => println!("not supported"),
    }
    Ok(())
}
