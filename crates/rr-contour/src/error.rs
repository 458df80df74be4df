use core::fmt;

use rr_core::Point2i;

/// Failures while gluing scanned segments into closed loops. These
/// indicate a raster the tracer does not support or a scanning defect;
/// no partial graph is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    RasterTooLarge { width: usize, height: usize },
    UnbalancedVertices { horizontal: usize, vertical: usize },
    DisjointCorner { h: Point2i, v: Point2i },
    MismatchedOrientation { at: Point2i },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RasterTooLarge { width, height } => {
                write!(f, "raster {width}x{height} exceeds coordinate range")
            }
            Self::UnbalancedVertices {
                horizontal,
                vertical,
            } => write!(
                f,
                "vertex lists out of balance: {horizontal} horizontal vs {vertical} vertical"
            ),
            Self::DisjointCorner { h, v } => write!(
                f,
                "paired vertices do not coincide: ({}, {}) vs ({}, {})",
                h.x, h.y, v.x, v.y
            ),
            Self::MismatchedOrientation { at } => write!(
                f,
                "paired vertices at ({}, {}) share an orientation",
                at.x, at.y
            ),
        }
    }
}

impl std::error::Error for TraceError {}
