//! Virtualized, selectable grid browser for canvas node editors
//!
//! One generic widget covers three browser variants: tabular rows with
//! column headers, files with square thumbnail cells, and flat tags. The
//! host node framework owns the draw surface and input fields and forwards
//! events to [`widget::BrowserWidget`]; item listings and thumbnails come
//! from a backend service over blocking HTTP on worker threads.
//!
//! Layout, scrolling, hit-testing and rendering are pure functions of
//! widget state, so everything is testable against a recording canvas
//! without a host or a backend.

pub mod canvas;
pub mod catalog;
pub mod client;
pub mod config;
pub mod diag;
pub mod hit;
pub mod layout;
pub mod refresh;
pub mod render;
pub mod scroll;
pub mod selection;
pub mod theme;
pub mod thumbs;
pub mod widget;

pub use canvas::{Canvas, FontSlot, Rect};
pub use catalog::{CatalogSnapshot, Item, ItemCatalog};
pub use client::{BackendClient, ClientError, ListingResponse};
pub use config::{BrowserConfig, BrowserKind};
pub use selection::{SelectionMode, SelectionModel};
pub use theme::Theme;
pub use widget::{BrowserWidget, Host};
