use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use path_absolutize::Absolutize;

/// Default extensions considered during directory expansion.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];

/// Make `path` absolute against `cwd` without touching the file system, so
/// that paths which do not exist (yet) can still be compared and relativized.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    match path.absolutize_from(cwd) {
        Ok(path) => path.into_owned(),
        Err(_) => cwd.join(path),
    }
}

/// Path of `path` relative to `root`, or `None` if `path` is outside `root`.
pub fn relative_to(path: &Path, root: &Path) -> Option<PathBuf> {
    path.strip_prefix(root).ok().map(Path::to_path_buf)
}

/// Render a relative path with forward slashes, whatever the host uses.
///
/// Every pattern is matched against this form so that fixtures behave the
/// same on every platform.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => {
                if !out.is_empty() {
                    out.push('/');
                }
                out.push_str(&part.to_string_lossy());
            }
            Component::ParentDir => {
                if !out.is_empty() {
                    out.push('/');
                }
                out.push_str("..");
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}

/// Render a relative path with the host separator, the form used in messages
/// shown to the user.
pub fn to_host(path: &Path) -> String {
    to_slash(path).replace('/', &MAIN_SEPARATOR.to_string())
}

/// Path relative to `cwd` for display, falling back to the full path when it
/// is not below `cwd`.
pub fn display_relative(path: &Path, cwd: &Path) -> String {
    match relative_to(path, cwd) {
        Some(rel) => to_host(&rel),
        None => path.display().to_string(),
    }
}

pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}
