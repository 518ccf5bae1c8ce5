//! Artifact storage layout.
//!
//! All fitted artifacts live flat in one directory: `<model_name>.bin` per
//! model plus `preprocessor.bin`. The store only computes paths and lists
//! files; reading and decoding artifacts is the registry's job.

use std::io;
use std::path::{Path, PathBuf};

/// File stem of the fitted preprocessor artifact.
pub const PREPROCESSOR_ARTIFACT: &str = "preprocessor";

const ARTIFACT_EXT: &str = "bin";

/// Handle to the directory holding trained artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a model artifact, fitted or not.
    pub fn model_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, ARTIFACT_EXT))
    }

    /// Path of the fitted preprocessor artifact.
    pub fn preprocessor_path(&self) -> PathBuf {
        self.model_path(PREPROCESSOR_ARTIFACT)
    }

    /// Ensure the artifact directory exists.
    pub fn ensure_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Sorted stems of the model artifacts present on disk, with the
    /// preprocessor filtered out. A missing artifact directory lists as
    /// empty, the same as a directory with no artifacts yet.
    pub fn list_models(&self) -> io::Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ARTIFACT_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if stem != PREPROCESSOR_ARTIFACT {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path_layout() {
        let store = ArtifactStore::new("/tmp/artifacts");
        assert_eq!(
            store.model_path("gradient_boosting"),
            PathBuf::from("/tmp/artifacts/gradient_boosting.bin")
        );
        assert_eq!(
            store.preprocessor_path(),
            PathBuf::from("/tmp/artifacts/preprocessor.bin")
        );
    }

    #[test]
    fn test_list_models_filters_preprocessor_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        for name in ["random_forest", "linear_regression", PREPROCESSOR_ARTIFACT] {
            std::fs::write(store.model_path(name), b"x").unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let models = store.list_models().unwrap();
        assert_eq!(models, vec!["linear_regression", "random_forest"]);
    }

    #[test]
    fn test_list_models_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("never_trained"));
        assert_eq!(store.list_models().unwrap(), Vec::<String>::new());
    }
}
