//! File-based storage implementation for native platforms.

use super::{BoxFuture, Storage, StorageError, StorageResult, sanitize_owner};
use crate::project::Project;
use std::fs;
use std::path::PathBuf;

/// File-based storage for native platforms.
///
/// Stores each owner's projects as one JSON array in a specified directory.
pub struct FileStorage {
    /// Base directory for project storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/pagecraft/projects/`
    /// On Windows: `%LOCALAPPDATA%\pagecraft\projects\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("pagecraft").join("projects"))
    }

    /// Get the file path for an owner's project list.
    fn owner_path(&self, owner: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", sanitize_owner(owner)))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn load_projects(&self, owner: &str) -> BoxFuture<'_, StorageResult<Vec<Project>>> {
        let path = self.owner_path(owner);

        Box::pin(async move {
            if !path.exists() {
                return Ok(Vec::new());
            }

            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;

            let mut projects: Vec<Project> = serde_json::from_str(&json).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            projects.iter_mut().for_each(Project::normalize);
            log::debug!("Loaded {} projects from {}", projects.len(), path.display());
            Ok(projects)
        })
    }

    fn save_projects(&self, owner: &str, projects: &[Project]) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.owner_path(owner);
        let json = match serde_json::to_string(projects) {
            Ok(j) => j,
            Err(e) => {
                return Box::pin(async move { Err(StorageError::Serialization(e.to_string())) });
            }
        };

        Box::pin(async move {
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementKind};
    use crate::storage::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let mut project = Project::new("Test Page");
        project
            .structure
            .elements
            .push(Element::new("c1", ElementKind::Text, 640.0));

        block_on(storage.save_project("alice", &project)).unwrap();
        let loaded = block_on(storage.load_project("alice", &project.id)).unwrap();

        assert_eq!(loaded.title, "Test Page");
        assert_eq!(loaded.structure.elements, project.structure.elements);
    }

    #[test]
    fn test_file_storage_missing_owner() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert!(block_on(storage.load_projects("nobody")).unwrap().is_empty());
        let result = block_on(storage.load_project("nobody", "p_1"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert!(nested.exists());
        assert_eq!(storage.base_path(), &nested);
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let keep = Project::new("Keep");
        let gone = Project::new("Gone");
        block_on(storage.save_project("alice", &keep)).unwrap();
        block_on(storage.save_project("alice", &gone)).unwrap();
        block_on(storage.delete_project("alice", &gone.id)).unwrap();

        let list = block_on(storage.load_projects("alice")).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, keep.id);
    }

    #[test]
    fn test_file_storage_sanitizes_owner() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let project = Project::new("Odd owner");
        // Owner with special characters should be sanitized
        block_on(storage.save_project("a/b:c*d", &project)).unwrap();
        assert!(dir.path().join("a_b_c_d.json").exists());

        let loaded = block_on(storage.load_project("a/b:c*d", &project.id)).unwrap();
        assert_eq!(loaded.id, project.id);
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("alice.json"), "{ not json").unwrap();

        let result = block_on(storage.load_projects("alice"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_storage_normalizes_on_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(
            dir.path().join("alice.json"),
            r#"[{"id":"p_1","title":"Old","structure":{"elements":[{"id":"c1","type":"div"}]}}]"#,
        )
        .unwrap();

        let loaded = block_on(storage.load_project("alice", "p_1")).unwrap();
        assert_eq!(loaded.structure.page_height, 640.0);
        assert_eq!(loaded.structure.elements[0].kind, ElementKind::Container);
    }
}
