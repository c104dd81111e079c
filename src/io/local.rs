use crate::io::ContentReader;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Reads seed content from disk, refusing anything outside `root_path`.
pub struct LocalContentReader {
    pub root_path: PathBuf,
}

impl LocalContentReader {
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    fn verify_within_root(&self, path: &Path) -> Result<PathBuf> {
        let root = std::fs::canonicalize(&self.root_path)
            .with_context(|| format!("content root {} is missing", self.root_path.display()))?;
        let candidate = std::fs::canonicalize(path)
            .with_context(|| format!("unable to resolve {}", path.display()))?;

        if !candidate.starts_with(&root) {
            return Err(anyhow!(
                "{} is outside of content root {}",
                path.display(),
                root.display()
            ));
        }
        Ok(candidate)
    }
}

#[async_trait]
impl ContentReader for LocalContentReader {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        let verified = self.verify_within_root(path)?;
        tokio::fs::read_to_string(&verified)
            .await
            .with_context(|| format!("unable to read {}", verified.display()))
    }

    async fn exists(&self, path: &Path) -> bool {
        self.verify_within_root(path).is_ok()
    }

    async fn list_files(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file()
                && entry.path().extension().and_then(|s| s.to_str()) == Some(extension)
            {
                entries.push(entry.into_path());
            }
        }
        Ok(entries)
    }
}
