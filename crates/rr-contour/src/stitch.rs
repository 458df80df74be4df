//! Gluing scanned segments into doubly-linked loops.
//!
//! Every segment contributes an outgoing vertex at its start and an
//! incoming vertex at its end. Horizontal and vertical vertex lists are
//! sorted with deliberately different tie-breaks and paired index-wise;
//! after the two sorts, the i-th entries of both lists occupy the same
//! grid corner with complementary orientations. The tie-break asymmetry
//! (the third key is flipped on incoming vertical vertices) is what keeps
//! the two coincident corner pairs of a checkerboard point on their own
//! loops; it is a correctness requirement, not a convention.

use rr_core::{Axis, Dir, GridView};

use crate::error::TraceError;
use crate::graph::{BoundaryGraph, End, UNLINKED, Vertex, VertId};
use crate::scan::scan_segments;

/// Extracts the boundary loops of a binary raster.
///
/// Returns the stitched segment/vertex graph with every loop closed and
/// every corner classified convex or concave.
pub fn trace_boundaries(grid: &GridView<'_>) -> Result<BoundaryGraph, TraceError> {
    if grid.width() > i32::MAX as usize || grid.height() > i32::MAX as usize {
        return Err(TraceError::RasterTooLarge {
            width: grid.width(),
            height: grid.height(),
        });
    }

    let mut graph = BoundaryGraph::default();
    scan_segments(grid, &mut graph);
    stitch(&mut graph)?;
    Ok(graph)
}

fn dir_rank(dir: Dir) -> u8 {
    match dir {
        Dir::Negative => 0,
        Dir::Positive => 1,
    }
}

fn stitch(graph: &mut BoundaryGraph) -> Result<(), TraceError> {
    let mut hverts: Vec<VertId> = Vec::with_capacity(graph.hsegs.len() * 2);
    let mut vverts: Vec<VertId> = Vec::with_capacity(graph.vsegs.len() * 2);

    for id in 0..graph.segs.len() {
        let (axis, a, b, dir) = {
            let seg = &graph.segs[id];
            (seg.axis, seg.a, seg.b, seg.dir)
        };

        let out = graph.push_vert(Vertex {
            pos: a,
            seg: id,
            end: End::Outgoing,
            dir,
            concave: false,
            mate: UNLINKED,
        });
        let inc = graph.push_vert(Vertex {
            pos: b,
            seg: id,
            end: End::Incoming,
            dir,
            concave: false,
            mate: UNLINKED,
        });

        match axis {
            Axis::Horizontal => hverts.extend([out, inc]),
            Axis::Vertical => vverts.extend([out, inc]),
        }
    }

    if hverts.len() != vverts.len() {
        return Err(TraceError::UnbalancedVertices {
            horizontal: hverts.len(),
            vertical: vverts.len(),
        });
    }

    hverts.sort_by_key(|&id| {
        let v = &graph.verts[id];
        (v.pos.x, v.pos.y, dir_rank(v.dir))
    });
    vverts.sort_by_key(|&id| {
        let v = &graph.verts[id];
        let third = match v.end {
            End::Outgoing => dir_rank(v.dir),
            End::Incoming => dir_rank(v.dir.flip()),
        };
        (v.pos.x, v.pos.y, third)
    });

    for (&hid, &vid) in hverts.iter().zip(&vverts) {
        let h = graph.verts[hid];
        let v = graph.verts[vid];
        if h.pos != v.pos {
            return Err(TraceError::DisjointCorner { h: h.pos, v: v.pos });
        }

        let concave = match (h.end, v.end) {
            (End::Outgoing, End::Incoming) => {
                graph.segs[h.seg].prev = v.seg;
                graph.segs[v.seg].next = h.seg;
                h.dir == v.dir
            }
            (End::Incoming, End::Outgoing) => {
                graph.segs[h.seg].next = v.seg;
                graph.segs[v.seg].prev = h.seg;
                h.dir != v.dir
            }
            _ => return Err(TraceError::MismatchedOrientation { at: h.pos }),
        };

        graph.verts[hid].mate = vid;
        graph.verts[vid].mate = hid;
        if concave {
            graph.verts[hid].concave = true;
            graph.verts[vid].concave = true;
            graph.concave.push(hid);
        }
    }

    Ok(())
}
