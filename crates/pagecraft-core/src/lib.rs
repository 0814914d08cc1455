//! PageCraft Core Library
//!
//! Platform-agnostic layout model, responsive resolver, drag/resize engine
//! and project persistence for the PageCraft page builder.

pub mod breakpoint;
pub mod config;
pub mod element;
pub mod gesture;
pub mod layout;
pub mod project;
pub mod session;
pub mod snap;
pub mod storage;
pub mod style;
pub mod units;

pub use breakpoint::Breakpoint;
pub use config::{ConfigError, EditorConfig};
pub use element::{Element, ElementId, ElementKind, ElementMeta, IdCounter, Override, Responsive};
pub use gesture::{Corner, Edge, GestureController, GestureKind, GestureState, ResizeHandle};
pub use layout::{EffectiveLayout, resolve};
pub use project::{Project, ProjectStructure};
pub use session::{EditorSession, SessionError};
pub use snap::{GRID_SIZE, Guides, SNAP_THRESHOLD, SnapMode, SnapResult, snap_point, snap_to_grid};
pub use storage::{Storage, StorageError, StorageResult};
pub use style::{StyleProperty, Styles};
pub use units::{SizeValue, Unit, px, px_value};
