use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

pub mod local;

#[async_trait]
pub trait ContentReader: Send + Sync {
    async fn read_to_string(&self, path: &Path) -> Result<String>;
    async fn exists(&self, path: &Path) -> bool;
    /// Files under `root` with the given extension, sorted by path.
    async fn list_files(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>>;
}

/// Resolves `link`, relative to the content file `file` (itself relative to `root`), without
/// climbing above `root`. Returns the resolved path relative to `root`.
pub fn verify_relative_path(root: &Path, file: &Path, link: &Path) -> Result<PathBuf> {
    let mut resolved: Vec<Component> = file
        .parent()
        .map(|p| p.components().collect())
        .unwrap_or_default();

    for component in link.components() {
        match component {
            Component::ParentDir => {
                if resolved.pop().is_none() {
                    return Err(anyhow!(
                        "link {} from {} escapes {}",
                        link.display(),
                        file.display(),
                        root.display()
                    ));
                }
            }
            Component::CurDir => {}
            Component::Normal(_) => resolved.push(component),
            Component::RootDir | Component::Prefix(_) => {
                return Err(anyhow!("link {} is not relative", link.display()));
            }
        }
    }

    Ok(resolved.iter().collect())
}
