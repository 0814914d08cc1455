//! PageCraft Export Library
//!
//! Compiles a PageCraft page into a standalone HTML document with
//! percentage-based horizontal layout and per-breakpoint media queries.

mod compiler;
mod context;
pub mod css;
pub mod html;

pub use compiler::{ExportBundle, compile, compile_with};
pub use context::ExportContext;
