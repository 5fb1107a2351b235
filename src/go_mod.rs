//! Go import paths derived from the module declared in `go.mod`.

use crate::GenerationError;
use std::path::{Component, Path};

const GO_MOD: &str = "go.mod";

/// The module path declared by a `go.mod` file's `module` directive.
pub fn module_name(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let name = rest.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// Import path of `dir`: the module of the nearest `go.mod` at or above it,
/// joined with the directories in between.
///
/// `dir` need not exist yet. It should be absolute; a relative path cannot be
/// searched above its first component.
pub fn import_path(dir: &Path) -> Result<String, GenerationError> {
    let mut suffix: Vec<String> = Vec::new();

    for ancestor in dir.ancestors() {
        let go_mod = ancestor.join(GO_MOD);
        if go_mod.is_file() {
            let module = std::fs::read_to_string(&go_mod)
                .ok()
                .and_then(|content| module_name(&content))
                .ok_or_else(|| GenerationError::GoModNotFound(dir.to_path_buf()))?;

            let mut path = module;
            for part in suffix.iter().rev() {
                path.push('/');
                path.push_str(part);
            }
            return Ok(path);
        }

        match ancestor.components().next_back() {
            Some(Component::Normal(name)) => suffix.push(name.to_string_lossy().into_owned()),
            Some(Component::CurDir) | None => {}
            Some(_) => break,
        }
    }

    Err(GenerationError::GoModNotFound(dir.to_path_buf()))
}

/// Import path of `<root>/<target>` given `prefix`, the import path of
/// `<root>/<dir>`. `None` when `dir` is not relative or `prefix` does not end
/// with it.
pub fn sibling_import(prefix: &str, dir: &Path, target: &[&str]) -> Option<String> {
    let mut root = prefix.trim_end_matches('/');

    for component in dir.components().rev() {
        let part = match component {
            Component::Normal(part) => part.to_str()?,
            Component::CurDir => continue,
            _ => return None,
        };
        let rest = root.strip_suffix(part)?;
        root = match rest.strip_suffix('/') {
            Some(rest) => rest,
            None if rest.is_empty() => rest,
            None => return None,
        };
    }

    let mut path = root.to_string();
    for part in target {
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(part);
    }
    Some(path)
}
