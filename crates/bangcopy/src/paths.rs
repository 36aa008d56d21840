//! Path resolution shared by the source resolver and the config layer

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the home directory.
///
/// Paths that do not start with `~` are returned unchanged, as is `~` itself
/// when no home directory can be determined.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Expand `~`, make the path absolute, and canonicalize it when it exists.
///
/// Non-existent paths are still made absolute so error messages name the
/// location that was actually checked.
#[must_use]
pub fn resolve(path: &Path) -> PathBuf {
    let expanded = expand_home(path);
    let absolute = std::path::absolute(&expanded).unwrap_or(expanded);
    dunce::canonicalize(&absolute).unwrap_or(absolute)
}
