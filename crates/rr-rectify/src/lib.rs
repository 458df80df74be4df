//! Minimal rectangle partitioning of binary rasters.
//!
//! [`decompose`] runs the full pipeline over a raster view:
//! 1. Trace boundary loops and classify corners (`rr-contour`).
//! 2. Find chord candidates between collinear concave corners.
//! 3. Select a maximum non-crossing chord set via bipartite matching.
//! 4. Split the polygon along every selected chord.
//! 5. Resolve leftover concave corners with steiner chords to the
//!    nearest opposing boundary.
//! 6. Walk the final loops; each is a rectangle.
//!
//! The selected chord set is a maximum independent set of the crossing
//! graph, which makes the partition minimal. Rasterizing the result back
//! onto an equal-shaped grid reproduces the input exactly.

mod chord;
mod error;
mod matching;
mod split;

pub use chord::{Chord, find_chords, find_crossings};
pub use error::DecomposeError;
pub use matching::select_independent;

use rr_contour::{BoundaryGraph, trace_boundaries};
use rr_core::{GridView, Rect};

use crate::split::{resolve_concave, split_chord};

/// Partitions the foreground of a binary raster into axis-aligned
/// rectangles with pairwise disjoint interiors.
pub fn decompose(grid: &GridView<'_>) -> Result<Vec<Rect>, DecomposeError> {
    let mut graph = trace_boundaries(grid)?;
    partition(&mut graph)?;
    emit_rects(&mut graph)
}

fn partition(graph: &mut BoundaryGraph) -> Result<(), DecomposeError> {
    let (hchords, vchords) = find_chords(graph);
    let crossings = find_crossings(&hchords, &vchords);
    let (hsel, vsel) = select_independent(hchords.len(), vchords.len(), &crossings);

    for i in hsel {
        split_chord(graph, &hchords[i]);
    }
    for j in vsel {
        split_chord(graph, &vchords[j]);
    }

    resolve_concave(graph)
}

fn emit_rects(graph: &mut BoundaryGraph) -> Result<Vec<Rect>, DecomposeError> {
    graph.clear_visited();
    let mut rects = Vec::new();

    for start in 0..graph.segs.len() {
        if graph.segs[start].visited {
            continue;
        }
        let Some(corners) = graph.loop_corners(start) else {
            return Err(DecomposeError::LoopBroken);
        };
        if corners.len() != 4 {
            return Err(DecomposeError::NonRectangularLoop {
                corners: corners.len(),
            });
        }

        let xs = corners.iter().map(|p| p.x);
        let ys = corners.iter().map(|p| p.y);
        let (x0, x1) = (xs.clone().min().unwrap_or(0), xs.max().unwrap_or(0));
        let (y0, y1) = (ys.clone().min().unwrap_or(0), ys.max().unwrap_or(0));
        rects.push(Rect::new(x0, y0, x1, y1));
    }

    Ok(rects)
}
