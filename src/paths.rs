// src/paths.rs

//! Path normalization for watch patterns and configured directory roles.
//!
//! All glob patterns and watch-event paths in this crate are compared as
//! plain, root-relative strings with forward slashes and no leading `./`,
//! regardless of how the path was written or which host separator is in use.
//! [`PathResolver`] produces that canonical form.

use std::path::{Component, Path, PathBuf};

/// Resolves path fragments into canonical, project-root-relative strings.
///
/// Resolution follows standard `resolve` semantics: fragments are joined left
/// to right, and an absolute fragment overrides everything accumulated before
/// it. The result is purely lexical; no filesystem access happens here.
///
/// Normalization is idempotent: feeding an already-normalized path back in
/// returns it unchanged.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: lexical_normalize(&root.into()),
        }
    }

    /// Resolve fragments into one normalized, root-relative string.
    ///
    /// Backslashes are accepted as separators and converted. Paths that end
    /// up outside the root are returned normalized but absolute.
    pub fn resolve<S: AsRef<str>>(&self, fragments: &[S]) -> String {
        let mut acc = self.root.clone();

        for fragment in fragments {
            let fragment = fragment.as_ref().replace('\\', "/");
            let p = PathBuf::from(fragment);
            if p.is_absolute() {
                acc = p;
            } else {
                acc.push(p);
            }
        }

        let normalized = lexical_normalize(&acc);

        match normalized.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Ok(rel) => to_slash(rel),
            Err(_) => to_slash(&normalized),
        }
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Pop a normal component if there is one; otherwise keep the
                // `..` so relative paths above the root stay representable.
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                );
                if popped {
                    out.pop();
                } else if !matches!(
                    out.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                ) {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}

/// Render a path with forward slashes.
fn to_slash(path: &Path) -> String {
    let mut s = String::new();

    for component in path.components() {
        match component {
            Component::RootDir => s.push('/'),
            Component::Prefix(p) => s.push_str(&p.as_os_str().to_string_lossy()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !s.is_empty() && !s.ends_with('/') {
                    s.push('/');
                }
                s.push_str("..");
            }
            Component::Normal(part) => {
                if !s.is_empty() && !s.ends_with('/') {
                    s.push('/');
                }
                s.push_str(&part.to_string_lossy());
            }
        }
    }

    s
}

/// Convert a watched path into a root-relative forward-slash string.
///
/// Returns `None` if the path is not under `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}
