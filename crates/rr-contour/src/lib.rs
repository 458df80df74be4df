//! Axis-aligned boundary extraction from binary rasters.
//!
//! Scans a raster's pixel walls into directed horizontal and vertical
//! boundary segments, then stitches them into doubly-linked closed loops:
//! - Outer boundaries wind clockwise in raster coordinates (y downward),
//!   holes counter-clockwise, so the filled side always lies to a
//!   segment's right.
//! - Every grid corner of the polygon carries one outgoing and one
//!   incoming vertex record; stitching pairs them and classifies each
//!   corner convex (90 degrees) or concave (270 degrees).
//!
//! The resulting [`BoundaryGraph`] is either consumed as-is via
//! [`BoundaryGraph::contours`] or handed to the rectangle partitioner,
//! which splits loops along chords by rewiring the same arenas.

mod error;
mod graph;
mod scan;
mod stitch;

pub use error::TraceError;
pub use graph::{BoundaryGraph, Contour, End, SegId, Segment, VertId, Vertex};
pub use stitch::trace_boundaries;
