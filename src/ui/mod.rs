//! Terminal UI rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Rendering entry point
//! - [`components`]: Per-section renderers
//! - [`helpers`]: Cursor, width and highlight utilities
//! - [`theme`]: Color palettes and ANSI sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Theme, ThemeColors};
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, NotificationInfo, OverlayInfo, SearchBarInfo,
    StatusTone, UIViewModel,
};
