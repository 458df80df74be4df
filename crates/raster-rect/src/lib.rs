//! Umbrella crate for the `raster-rect` workspace.
//!
//! Re-exports the raster primitives, boundary tracing, and rectangle
//! partitioning crates behind a single dependency.

pub use rr_contour::*;
pub use rr_core::*;
pub use rr_rectify::*;
