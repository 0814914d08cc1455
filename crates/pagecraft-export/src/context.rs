//! Export inputs.

use pagecraft_core::config::DEFAULT_PAGE_HEIGHT;
use pagecraft_core::session::UNTITLED;
use pagecraft_core::{EditorSession, Element};

/// Everything the compiler needs to export a page.
#[derive(Debug, Clone)]
pub struct ExportContext<'a> {
    /// Elements in stacking (array) order.
    pub elements: &'a [Element],
    /// Document title.
    pub title: String,
    /// Minimum canvas height in pixels.
    pub page_height: f64,
}

impl<'a> ExportContext<'a> {
    /// Create an export context with the default title and page height.
    pub fn new(elements: &'a [Element]) -> Self {
        Self {
            elements,
            title: UNTITLED.to_string(),
            page_height: DEFAULT_PAGE_HEIGHT,
        }
    }

    /// Export the page open in `session`.
    pub fn from_session(session: &'a EditorSession) -> Self {
        Self::new(session.elements())
            .with_title(session.title())
            .with_page_height(session.page_height())
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the page height.
    pub fn with_page_height(mut self, page_height: f64) -> Self {
        self.page_height = page_height;
        self
    }
}
