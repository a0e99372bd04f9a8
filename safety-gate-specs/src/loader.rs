//! Fixture file loading.

use std::fs;
use std::path::Path;

use crate::{GateFixture, SpecError, SpecResult};

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> SpecResult<GateFixture> {
    let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    GateFixture::parse(&content).map_err(|e| match e {
        SpecError::Parse { line, message } => SpecError::Parse {
            line,
            message: format!("{}: {message}", path.display()),
        },
        other => other,
    })
}

/// Load all fixtures under `dir` (glob: **/*.toml), sorted by relative path.
///
/// `expected-failures.toml` is the failure ledger, not a fixture, and is
/// skipped.
pub fn load_all_fixtures(dir: &Path) -> SpecResult<Vec<(String, GateFixture)>> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, GateFixture)>,
) -> SpecResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    let load_error = |e: std::io::Error| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    };
    for entry in fs::read_dir(dir).map_err(load_error)? {
        let path = entry.map_err(load_error)?.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if path.extension().map_or(false, |e| e == "toml")
            && path.file_name().map_or(true, |name| name != crate::failures::LEDGER_FILE)
        {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let fixture = load_fixture(&path)?;
            fixtures.push((relative.display().to_string(), fixture));
        }
    }

    Ok(())
}
