//! Storage abstraction for project persistence.
//!
//! Projects are grouped by owner. Every backend stores an owner's projects
//! as one ordered list, most recently saved first.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::project::Project;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Project not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Thread-safety bound for backends: `Send + Sync` on native, nothing on
/// WASM where everything is single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSync: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync + ?Sized> MaybeSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSync {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> MaybeSync for T {}

/// Trait for project storage backends.
///
/// Backends implement the two list operations; single-project operations
/// are provided on top of them. Saves are last-writer-wins.
pub trait Storage: MaybeSync {
    /// All projects of `owner`, most recent first. Unknown owners have none.
    fn load_projects(&self, owner: &str) -> BoxFuture<'_, StorageResult<Vec<Project>>>;

    /// Replace the whole project list of `owner`.
    fn save_projects(&self, owner: &str, projects: &[Project]) -> BoxFuture<'_, StorageResult<()>>;

    /// Load one project by id.
    fn load_project(&self, owner: &str, id: &str) -> BoxFuture<'_, StorageResult<Project>> {
        let owner = owner.to_string();
        let id = id.to_string();
        Box::pin(async move {
            self.load_projects(&owner)
                .await?
                .into_iter()
                .find(|p| p.id == id)
                .ok_or(StorageError::NotFound(id))
        })
    }

    /// Insert or replace a project, moving it to the front of the list.
    fn save_project(&self, owner: &str, project: &Project) -> BoxFuture<'_, StorageResult<()>> {
        let owner = owner.to_string();
        let project = project.clone();
        Box::pin(async move {
            let mut projects = self.load_projects(&owner).await?;
            upsert(&mut projects, project);
            self.save_projects(&owner, &projects).await
        })
    }

    /// Remove a project. Removing a missing id is not an error.
    fn delete_project(&self, owner: &str, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let owner = owner.to_string();
        let id = id.to_string();
        Box::pin(async move {
            let mut projects = self.load_projects(&owner).await?;
            let before = projects.len();
            projects.retain(|p| p.id != id);
            if projects.len() == before {
                return Ok(());
            }
            self.save_projects(&owner, &projects).await
        })
    }
}

/// Put `project` at the front of `projects`, dropping any older copy.
pub fn upsert(projects: &mut Vec<Project>, project: Project) {
    projects.retain(|p| p.id != project.id);
    projects.insert(0, project);
}

/// Make an owner id safe to use in file names and storage keys.
pub(crate) fn sanitize_owner(owner: &str) -> String {
    owner
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Simple blocking executor for tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, Waker};

    let mut cx = Context::from_waker(Waker::noop());
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
