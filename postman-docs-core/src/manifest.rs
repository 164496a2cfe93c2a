//! Slug manifest: the newline-delimited list of pages created by the previous sync run.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use crate::error::ManifestError;

/// Ordered list of page slugs, parents before children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugManifest {
    slugs: Vec<String>,
}

impl SlugManifest {
    pub fn new(slugs: Vec<String>) -> Self {
        Self { slugs }
    }

    /// Loads a manifest file. A missing file is a first run and yields an empty manifest.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(manifest = %path.display(), "No manifest found, treating as first run");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ManifestError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let manifest = Self::parse(&text);
        info!(manifest = %path.display(), slugs = manifest.len(), "Loaded slug manifest");
        Ok(manifest)
    }

    /// One slug per line; surrounding whitespace and blank lines are ignored.
    pub fn parse(text: &str) -> Self {
        let slugs = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Self { slugs }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ManifestError> {
        let path = path.as_ref();
        fs::write(path, self.to_text()).map_err(|source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(manifest = %path.display(), slugs = self.len(), "Saved slug manifest");
        Ok(())
    }

    pub fn to_text(&self) -> String {
        self.slugs.iter().map(|slug| format!("{slug}\n")).collect()
    }

    pub fn push(&mut self, slug: impl Into<String>) {
        self.slugs.push(slug.into());
    }

    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| s == slug)
    }

    /// Slugs present in `self` but absent from `current`, children first.
    ///
    /// Manifests are recorded parents before children, so walking `self` backwards
    /// yields every child ahead of its parent.
    pub fn stale_since(&self, current: &SlugManifest) -> Vec<String> {
        let keep: HashSet<&str> = current.slugs.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();
        self.slugs
            .iter()
            .rev()
            .filter(|slug| !keep.contains(slug.as_str()))
            .filter(|slug| seen.insert(slug.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(slugs: &[&str]) -> SlugManifest {
        SlugManifest::new(slugs.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn stale_is_previous_minus_current() {
        let previous = manifest(&["a", "a-b", "c"]);
        let current = manifest(&["a", "a-b"]);
        assert_eq!(previous.stale_since(&current), vec!["c".to_string()]);
    }

    #[test]
    fn stale_deletes_children_before_parents() {
        let previous = manifest(&["api-z", "api-a", "api-z-child", "api-a-child"]);
        let current = manifest(&["api-a"]);
        assert_eq!(
            previous.stale_since(&current),
            vec!["api-a-child", "api-z-child", "api-z"]
        );
    }

    #[test]
    fn unchanged_manifest_has_nothing_stale() {
        let previous = manifest(&["a", "a-b"]);
        assert!(previous.stale_since(&previous.clone()).is_empty());
    }

    #[test]
    fn parse_skips_blank_lines_and_trims() {
        let parsed = SlugManifest::parse("api-a\n\n  api-a-b \r\n\t\n");
        assert_eq!(parsed, manifest(&["api-a", "api-a-b"]));
        assert_eq!(parsed.to_text(), "api-a\napi-a-b\n");
    }

    #[test]
    fn missing_file_is_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SlugManifest::load(dir.path().join("absent.txt")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.txt");
        let original = manifest(&["api-a", "api-a-b"]);
        original.save(&path).unwrap();
        assert_eq!(SlugManifest::load(&path).unwrap(), original);
    }
}
