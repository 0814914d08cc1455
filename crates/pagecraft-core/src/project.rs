//! Saved project records.

use crate::config::DEFAULT_PAGE_HEIGHT;
use crate::element::Element;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Page content of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStructure {
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub page_height: f64,
}

impl Default for ProjectStructure {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            page_height: DEFAULT_PAGE_HEIGHT,
        }
    }
}

/// A saved page.
///
/// Projects are replaced whole on every save; there is no merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Last save time in Unix milliseconds.
    #[serde(default)]
    pub updated_at: u64,
    /// Preview image as a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub structure: ProjectStructure,
}

impl Project {
    /// Create a project with a fresh `p_<uuid>` id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_project_id(),
            title: title.into(),
            updated_at: now_millis(),
            thumbnail: None,
            structure: ProjectStructure::default(),
        }
    }

    /// Repair fields that older or partial records may lack.
    ///
    /// A missing or non-positive page height becomes the default. Elements
    /// already carry concrete `styles`, `meta` and `responsive` records
    /// through their serde defaults; a missing type loads as a container
    /// and a missing id stays empty so the element cannot be dragged.
    pub fn normalize(&mut self) {
        let height = self.structure.page_height;
        if !height.is_finite() || height <= 0.0 {
            self.structure.page_height = DEFAULT_PAGE_HEIGHT;
        }
        let anonymous = self.structure.elements.iter().filter(|el| el.id.is_empty()).count();
        if anonymous > 0 {
            log::warn!("Project {} has {} elements without an id", self.id, anonymous);
        }
    }

    /// Stamp the current time.
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut project: Project = serde_json::from_str(json)?;
        project.normalize();
        Ok(project)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Generate a client-side project id.
pub fn new_project_id() -> String {
    format!("p_{}", Uuid::new_v4())
}

/// Wall-clock time in Unix milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Wall-clock time in Unix milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::style::StyleProperty;

    #[test]
    fn test_new_project_id() {
        let project = Project::new("Landing");
        assert!(project.id.starts_with("p_"));
        assert_eq!(project.id.len(), 2 + 36);
        assert_ne!(project.id, Project::new("Landing").id);
        assert!(project.updated_at > 0);
    }

    #[test]
    fn test_normalize_page_height() {
        let json = r#"{"id":"p_1","title":"Old","structure":{"elements":[]}}"#;
        let project = Project::from_json(json).unwrap();
        assert_eq!(project.structure.page_height, 640.0);

        let json = r#"{"id":"p_1","structure":{"elements":[],"pageHeight":0}}"#;
        assert_eq!(Project::from_json(json).unwrap().structure.page_height, 640.0);

        let json = r#"{"id":"p_1","structure":{"pageHeight":1200}}"#;
        assert_eq!(Project::from_json(json).unwrap().structure.page_height, 1200.0);
    }

    #[test]
    fn test_elements_missing_id_or_type_load() {
        let json = r#"{"id":"p_1","structure":{"elements":[
            {"id":"c1","type":"text"},
            {"id":"c2"},
            {"type":"button","content":"Go"}
        ]}}"#;
        let project = Project::from_json(json).unwrap();
        let elements = &project.structure.elements;
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].kind, ElementKind::Text);
        assert_eq!(elements[1].kind, ElementKind::Container);
        assert!(elements[1].is_interactive());
        assert_eq!(elements[2].kind, ElementKind::Button);
        assert_eq!(elements[2].id, "");
        assert!(!elements[2].is_interactive());
    }

    #[test]
    fn test_stored_format() {
        let json = r#"{
            "id": "p_abc",
            "title": "Shop",
            "updatedAt": 1700000000000,
            "thumbnail": "data:image/png;base64,AAAA",
            "structure": {
                "pageHeight": 900,
                "elements": [
                    {"id": "c1", "type": "div", "position": {"x": 100, "y": 50},
                     "styles": {"width": "200px"}}
                ]
            }
        }"#;
        let project = Project::from_json(json).unwrap();
        assert_eq!(project.updated_at, 1_700_000_000_000);
        let el = &project.structure.elements[0];
        assert_eq!(el.kind, ElementKind::Container);
        assert_eq!(el.styles.get(StyleProperty::Width), Some("200px"));
        assert!(el.meta.parent_id.is_none());

        let value: serde_json::Value = serde_json::from_str(&project.to_json().unwrap()).unwrap();
        assert_eq!(value["updatedAt"], 1_700_000_000_000u64);
        assert_eq!(value["structure"]["pageHeight"], 900.0);
        assert_eq!(value["structure"]["elements"][0]["position"]["x"], 100.0);
    }
}
