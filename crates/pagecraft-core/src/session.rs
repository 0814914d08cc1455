//! Editor session: the single owner of a page being edited.

use crate::breakpoint::Breakpoint;
use crate::config::EditorConfig;
use crate::element::{Element, ElementId, ElementKind, ElementMeta, IdCounter, Override};
use crate::layout::{self, EffectiveLayout};
use crate::project::{Project, ProjectStructure, new_project_id, now_millis};
use crate::storage::{Storage, StorageResult};
use crate::style::Styles;
use thiserror::Error;

/// Title used when a page has none.
pub const UNTITLED: &str = "Página sem título";

/// Errors from explicit session edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),
    #[error("Element is not a header or footer: {0}")]
    NotABar(String),
    #[error("Headers and footers cannot be nested: {0}")]
    BarCannotNest(String),
}

/// Result type for session edits.
pub type SessionResult<T> = Result<T, SessionError>;

/// A page open in the editor.
///
/// Owns the element list, the id counter and the active breakpoint. The
/// interaction engine and the exporter read from it; every mutation goes
/// through `&mut self`.
#[derive(Debug, Clone)]
pub struct EditorSession {
    project_id: Option<String>,
    title: String,
    thumbnail: Option<String>,
    elements: Vec<Element>,
    ids: IdCounter,
    page_height: f64,
    breakpoint: Breakpoint,
    selected: Option<ElementId>,
    config: EditorConfig,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    /// Start an empty, unsaved page.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            project_id: None,
            title: UNTITLED.to_string(),
            thumbnail: None,
            elements: Vec::new(),
            ids: IdCounter::default(),
            page_height: config.clamp_page_height(config.default_page_height),
            breakpoint: Breakpoint::Desktop,
            selected: None,
            config,
        }
    }

    /// Open a loaded project.
    ///
    /// The id counter is seeded past every numeric id in the project so new
    /// elements never reuse one.
    pub fn from_project(mut project: Project, config: EditorConfig) -> Self {
        project.normalize();
        let ids = IdCounter::seeded_from(&project.structure.elements);
        let title = if project.title.is_empty() {
            UNTITLED.to_string()
        } else {
            project.title
        };
        Self {
            project_id: Some(project.id),
            title,
            thumbnail: project.thumbnail,
            elements: project.structure.elements,
            ids,
            page_height: project.structure.page_height,
            breakpoint: Breakpoint::Desktop,
            selected: None,
            config,
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn set_thumbnail(&mut self, thumbnail: Option<String>) {
        self.thumbnail = thumbnail;
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Set the page height, clamped into the configured bounds.
    pub fn set_page_height(&mut self, height: f64) {
        self.page_height = self.config.clamp_page_height(height);
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.breakpoint = breakpoint;
    }

    /// Width of the canvas at the active breakpoint.
    pub fn canvas_width(&self) -> f64 {
        self.breakpoint.preview_width()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select an element, or clear the selection with `None`.
    ///
    /// Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.filter(|id| self.element(id).is_some()).map(str::to_string);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    fn require_mut(&mut self, id: &str) -> SessionResult<&mut Element> {
        self.elements
            .iter_mut()
            .find(|el| el.id == id)
            .ok_or_else(|| SessionError::ElementNotFound(id.to_string()))
    }

    /// Replace the whole element list, reseeding ids past the new ones.
    pub fn replace_elements(&mut self, elements: Vec<Element>) {
        let seeded = IdCounter::seeded_from(&elements);
        if self.ids.is_behind(&seeded) {
            self.ids = seeded;
        }
        self.elements = elements;
        if let Some(id) = self.selected.take() {
            self.select(Some(id.as_str()));
        }
    }

    /// Add a new element with the defaults for `kind` and select it.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        let id = self.ids.next_id();
        self.elements.push(Element::new(id.clone(), kind, self.page_height));
        self.selected = Some(id.clone());
        log::debug!("Added {} element {}", kind.name(), id);
        id
    }

    /// Remove an element.
    ///
    /// Children of a removed bar keep their `parentId` and are treated as
    /// top-level from then on.
    pub fn remove_element(&mut self, id: &str) -> Option<Element> {
        let index = self.elements.iter().position(|el| el.id == id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(self.elements.remove(index))
    }

    pub fn update_content(&mut self, id: &str, content: impl Into<String>) -> SessionResult<()> {
        self.require_mut(id)?.content = content.into();
        Ok(())
    }

    /// Replace an element's link and display metadata.
    ///
    /// The parent link is kept; change it with [`EditorSession::set_parent`].
    pub fn update_meta(&mut self, id: &str, meta: ElementMeta) -> SessionResult<()> {
        let el = self.require_mut(id)?;
        let parent_id = el.meta.parent_id.take();
        el.meta = ElementMeta { parent_id, ..meta };
        Ok(())
    }

    /// Write styles at the active breakpoint.
    ///
    /// Desktop edits the base styles; other breakpoints edit (and create if
    /// needed) the override, property by property.
    pub fn update_styles(&mut self, id: &str, styles: &Styles) -> SessionResult<()> {
        let breakpoint = self.breakpoint;
        self.require_mut(id)?.write_styles(breakpoint, styles);
        Ok(())
    }

    /// Drop the override at `breakpoint` so the element scales from desktop again.
    pub fn clear_override(
        &mut self,
        id: &str,
        breakpoint: Breakpoint,
    ) -> SessionResult<Option<Override>> {
        Ok(self.require_mut(id)?.responsive.clear(breakpoint))
    }

    /// Nest `child` inside a header or footer, or un-nest it with `None`.
    pub fn set_parent(&mut self, child: &str, parent: Option<&str>) -> SessionResult<()> {
        let child_el = self
            .element(child)
            .ok_or_else(|| SessionError::ElementNotFound(child.to_string()))?;
        if child_el.is_bar() {
            return Err(SessionError::BarCannotNest(child.to_string()));
        }

        if let Some(parent) = parent {
            let parent_el = self
                .element(parent)
                .ok_or_else(|| SessionError::ElementNotFound(parent.to_string()))?;
            if !parent_el.is_bar() {
                return Err(SessionError::NotABar(parent.to_string()));
            }
        }

        self.require_mut(child)?.meta.parent_id = parent.map(str::to_string);
        Ok(())
    }

    /// Layout of an element at the active breakpoint.
    pub fn effective_layout(&self, id: &str) -> Option<EffectiveLayout> {
        self.element(id)
            .map(|el| layout::resolve(el, self.breakpoint))
    }

    /// Snapshot the page as a project record.
    ///
    /// Unsaved pages get a fresh id on every call; the session only adopts
    /// it once a save succeeds.
    pub fn to_project(&self) -> Project {
        Project {
            id: self.project_id.clone().unwrap_or_else(new_project_id),
            title: self.title.clone(),
            updated_at: now_millis(),
            thumbnail: self.thumbnail.clone(),
            structure: ProjectStructure {
                elements: self.elements.clone(),
                page_height: self.page_height,
            },
        }
    }

    /// Save to `storage` under `owner`, returning the project id.
    ///
    /// A failed save leaves the session untouched.
    pub async fn save<S: Storage + ?Sized>(
        &mut self,
        storage: &S,
        owner: &str,
    ) -> StorageResult<String> {
        let project = self.to_project();
        storage.save_project(owner, &project).await?;
        log::info!(
            "Saved project {} ({} elements) for {}",
            project.id,
            project.structure.elements.len(),
            owner
        );
        self.project_id = Some(project.id.clone());
        Ok(project.id)
    }

    /// Load a project from `storage` and open it.
    pub async fn load<S: Storage + ?Sized>(
        storage: &S,
        owner: &str,
        id: &str,
        config: EditorConfig,
    ) -> StorageResult<Self> {
        let project = storage.load_project(owner, id).await?;
        log::info!(
            "Loaded project {} ({} elements) for {}",
            project.id,
            project.structure.elements.len(),
            owner
        );
        Ok(Self::from_project(project, config))
    }
}
