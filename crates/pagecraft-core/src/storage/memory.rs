//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::project::Project;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    projects: RwLock<HashMap<String, Vec<Project>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load_projects(&self, owner: &str) -> BoxFuture<'_, StorageResult<Vec<Project>>> {
        let owner = owner.to_string();
        Box::pin(async move {
            let projects = self
                .projects
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(projects.get(&owner).cloned().unwrap_or_default())
        })
    }

    fn save_projects(&self, owner: &str, projects: &[Project]) -> BoxFuture<'_, StorageResult<()>> {
        let owner = owner.to_string();
        let list = projects.to_vec();
        Box::pin(async move {
            let mut projects = self
                .projects
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            projects.insert(owner, list);
            Ok(())
        })
    }
}
