use std::path::{Component, Path, PathBuf};

/// Directory key used for the project root itself in per-directory statistics.
pub const ROOT_DIR_KEY: &str = "root";

/// Resolve `path` against `root` and normalize it lexically.
///
/// `.` components are dropped and `..` pops the previous component. Symlinks are
/// never followed, so a link keeps its own path.
#[must_use]
pub fn absolutize(root: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            _ => normalized.push(component),
        }
    }
    normalized
}

/// Render `path` relative to `root` with `/` separators.
///
/// Paths outside `root` are rendered in full.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    join_components(relative)
}

/// Directory of `path` relative to `root`, or [`ROOT_DIR_KEY`] for files directly in it.
#[must_use]
pub fn relative_dir(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let dir = relative.parent().map(join_components).unwrap_or_default();
    if dir.is_empty() {
        ROOT_DIR_KEY.to_string()
    } else {
        dir
    }
}

fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::RootDir => Some(String::new()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
