use std::path::{Component, Path, PathBuf};

use cytrus_schema::ContentHash;

/// Manifest URL: `{base}/{game}/releases/{release}/{platform}/{version}.manifest`
pub fn manifest_url(base: &str, game: &str, release: &str, platform: &str, version: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/{game}/releases/{release}/{platform}/{version}.manifest")
}

/// Content-addressed bundle URL: `{base}/{game}/bundles/{hash[0:2]}/{hash}`
pub fn bundle_url(base: &str, game: &str, bundle: &ContentHash) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/{game}/bundles/{}/{bundle}", bundle.shard())
}

/// Platform output directory: `{root}/{version}/{platform}`
pub fn platform_dir(root: &Path, version: &str, platform: &str) -> PathBuf {
    root.join(version).join(platform)
}

/// Resolve a manifest file name under `dir`.
///
/// Names come from the network, so they must stay inside `dir`: empty names,
/// absolute paths and `..` components are rejected.
///
/// # Errors
///
/// Returns a description of the problem if `name` is not a safe relative path.
pub fn destination(dir: &Path, name: &str) -> Result<PathBuf, String> {
    let rel = Path::new(name);
    if name.is_empty() {
        return Err("empty file name".to_string());
    }
    if rel.is_absolute() || name.starts_with('/') || name.starts_with('\\') {
        return Err(format!("absolute paths are not allowed: {name:?}"));
    }
    for comp in rel.components() {
        match comp {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(format!("parent traversal not allowed: {name:?}"));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(format!("absolute paths are not allowed: {name:?}"));
            }
        }
    }
    Ok(dir.join(rel))
}
