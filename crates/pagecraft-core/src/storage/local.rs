//! Browser `localStorage` implementation for WebAssembly.

use super::{BoxFuture, Storage, StorageError, StorageResult, sanitize_owner};
use crate::project::Project;
use wasm_bindgen::JsValue;

const KEY_PREFIX: &str = "pagecraft:projects:";

/// `localStorage`-backed storage for WebAssembly.
///
/// Each owner's projects live under one key as a JSON array.
#[derive(Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn key(owner: &str) -> String {
        format!("{}{}", KEY_PREFIX, sanitize_owner(owner))
    }

    fn backend() -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))
    }
}

fn js_error(e: JsValue) -> StorageError {
    StorageError::Io(format!("localStorage error: {:?}", e))
}

impl Storage for LocalStorage {
    fn load_projects(&self, owner: &str) -> BoxFuture<'_, StorageResult<Vec<Project>>> {
        let key = Self::key(owner);
        Box::pin(async move {
            let Some(json) = Self::backend()?.get_item(&key).map_err(js_error)? else {
                return Ok(Vec::new());
            };
            let mut projects: Vec<Project> = serde_json::from_str(&json).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", key, e))
            })?;
            projects.iter_mut().for_each(Project::normalize);
            Ok(projects)
        })
    }

    fn save_projects(&self, owner: &str, projects: &[Project]) -> BoxFuture<'_, StorageResult<()>> {
        let key = Self::key(owner);
        let json = serde_json::to_string(projects);
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            Self::backend()?.set_item(&key, &json).map_err(js_error)
        })
    }
}
