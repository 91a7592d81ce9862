use std::path::PathBuf;

pub mod exporter;
pub mod geometry;
pub mod paginator;
pub mod rasterizer;
pub mod session;

pub use geometry::{Geometry, Mode};

/// An image picked from the imported folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    pub locator: PathBuf,
    pub display_name: String,
}
