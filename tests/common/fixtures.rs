//! Shared fixtures and test doubles.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kiln::domain::ports::{CompileError, CompileRequest, CompiledStyle, StyleCompiler};
use kiln::domain::value_objects::OutputStyle;

/// Entry stylesheet importing two partials, one through the override rule
pub const MAIN_SCSS: &str = "@import \"_vars\";\n@import 'mixins.scss';\n\nbody { color: $brand; }\n";

pub const VARS_SCSS: &str = "$brand: #c0ffee;\n";

pub const MIXINS_SCSS: &str = "@mixin center { margin: 0 auto; }\n";

/// Marker that makes [`FakeCompiler`] and the fake sassc script fail
pub const FAIL_MARKER: &str = "!fail";

/// One call seen by [`FakeCompiler`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub style: OutputStyle,
    pub source_map: bool,
}

/// Deterministic compiler double
///
/// Emits `/* <style> */` followed by the source, and a tiny source map when
/// asked. Sources containing [`FAIL_MARKER`] fail with a sassc-like message.
#[derive(Debug, Default)]
pub struct FakeCompiler {
    seen: Mutex<Vec<SeenRequest>>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl StyleCompiler for FakeCompiler {
    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompiledStyle, CompileError> {
        self.seen.lock().unwrap().push(SeenRequest {
            source_path: request.source_path.to_path_buf(),
            output_path: request.output_path.to_path_buf(),
            style: request.style,
            source_map: request.source_map,
        });

        if request.source.contains(FAIL_MARKER) {
            return Err(CompileError::new(format!(
                "Error: Invalid CSS after \"{}\"\n        on line 1 of {}",
                FAIL_MARKER,
                request.source_path.display()
            )));
        }

        let source_map = request.source_map.then(|| {
            format!(
                "{{\"version\":3,\"file\":\"{}\"}}",
                file_name(request.output_path)
            )
        });
        Ok(CompiledStyle {
            css: format!("/* {} */\n{}", request.style, request.source),
            source_map,
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Shell script standing in for `sassc`: copies input to output, fails on
/// [`FAIL_MARKER`], writes `<output>.map` for `--sourcemap`
#[cfg(unix)]
pub fn write_fake_sassc(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "fake-sassc 0.0.0"; exit 0; fi
map=0
style=""
input=""
output=""
while [ $# -gt 0 ]; do
  case "$1" in
    --load-path) shift ;;
    --style) shift; style="$1" ;;
    --sourcemap) map=1 ;;
    *) if [ -z "$input" ]; then input="$1"; else output="$1"; fi ;;
  esac
  shift
done
if grep -q '!fail' "$input"; then
  echo "Error: Invalid CSS after \"!fail\"" >&2
  echo "        on line 1 of $input" >&2
  exit 1
fi
{ echo "/* $style */"; cat "$input"; } > "$output"
if [ "$map" = "1" ]; then echo '{"version":3}' > "$output.map"; fi
"#;

    let path = dir.join("fake-sassc");
    std::fs::write(&path, script).expect("write fake sassc");
    let mut perms = std::fs::metadata(&path).expect("stat fake sassc").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod fake sassc");
    path
}
