//! Loop surgery: splitting along chords and resolving leftover concave
//! corners.
//!
//! Both operations only push new arena entries and rewire links; nothing
//! is removed. Corner adjacency is always recomputed from the live links,
//! so chords sharing an endpoint split correctly in any order.

use core::ops::ControlFlow;

use rr_contour::{BoundaryGraph, End, SegId, Segment, VertId, Vertex};
use rr_core::{Axis, Point2i};

use crate::chord::{Chord, segment_tree};
use crate::error::DecomposeError;

/// Splits the polygon along a selected chord, detaching one sub-loop.
pub(crate) fn split_chord(graph: &mut BoundaryGraph, chord: &Chord) {
    let (in_a, out_a) = graph.corner_segs(chord.a);
    let (in_b, out_b) = graph.corner_segs(chord.b);
    insert_chord_pair(
        graph, chord.axis, chord.a_pos, chord.b_pos, in_a, out_a, in_b, out_b,
    );
    clear_concave(graph, chord.a);
    clear_concave(graph, chord.b);
}

/// Extends a chord from every corner still concave to the nearest
/// opposing boundary and splits there. Each resolution removes one
/// concave corner and introduces none, so a single pass suffices.
pub(crate) fn resolve_concave(graph: &mut BoundaryGraph) -> Result<(), DecomposeError> {
    let order = graph.concave.clone();
    for vert in order {
        if graph.verts[vert].concave {
            resolve_one(graph, vert)?;
        }
    }
    Ok(())
}

fn resolve_one(graph: &mut BoundaryGraph, vert: VertId) -> Result<(), DecomposeError> {
    let pos = graph.verts[vert].pos;
    let ray = graph.verts[vert].dir;

    // Earlier resolutions shorten struck segments, so the tree cannot be
    // kept across iterations; it is rebuilt per query.
    //
    // Only segments whose interior side faces the corner qualify: with
    // filled area on every segment's right, that is the opposing
    // direction. Split chords exist as two coincident opposite copies and
    // this picks the copy on the corner's own loop. The ray meets such a
    // segment strictly inside its span.
    let tree = segment_tree(graph, Axis::Horizontal);
    let mut best: Option<(i32, SegId)> = None;
    tree.stab::<()>(pos.x, &mut |iv| {
        let seg = &graph.segs[iv.id];
        let d = (seg.across() - pos.y) * ray.sign();
        let facing = seg.dir != ray && iv.lo < pos.x && pos.x < iv.hi;
        if d > 0 && facing && best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, iv.id));
        }
        ControlFlow::Continue(())
    });

    let Some((_, struck)) = best else {
        return Err(DecomposeError::NoOpposingSegment { x: pos.x, y: pos.y });
    };

    let hit = Point2i::new(pos.x, graph.segs[struck].across());
    let (head, tail) = split_struck(graph, struck, hit);
    let (in_a, out_a) = graph.corner_segs(vert);
    insert_chord_pair(graph, Axis::Vertical, pos, hit, in_a, out_a, head, tail);
    clear_concave(graph, vert);
    Ok(())
}

/// Splits a horizontal segment at an interior point into two collinear
/// pieces and records the new corner. Returns the piece ending at the hit
/// and the piece starting there.
fn split_struck(graph: &mut BoundaryGraph, struck: SegId, hit: Point2i) -> (SegId, SegId) {
    let old = graph.segs[struck].clone();
    debug_assert!(
        old.lo() < hit.x && hit.x < old.hi(),
        "strike on a segment endpoint"
    );

    let tail = graph.push_seg(Segment::new(old.axis, hit, old.b));
    graph.segs[struck].b = hit;
    graph.segs[tail].next = old.next;
    graph.segs[old.next].prev = tail;
    graph.segs[struck].next = tail;
    graph.segs[tail].prev = struck;

    let v_in = graph.push_vert(Vertex {
        pos: hit,
        seg: struck,
        end: End::Incoming,
        dir: old.dir,
        concave: false,
        mate: 0,
    });
    let v_out = graph.push_vert(Vertex {
        pos: hit,
        seg: tail,
        end: End::Outgoing,
        dir: old.dir,
        concave: false,
        mate: v_in,
    });
    graph.verts[v_in].mate = v_out;

    (struck, tail)
}

/// Inserts the two oppositely-directed copies of a chord between corner
/// `a` (between `in_a` and `out_a`) and corner `b`, splitting the loop in
/// two.
fn insert_chord_pair(
    graph: &mut BoundaryGraph,
    axis: Axis,
    a_pos: Point2i,
    b_pos: Point2i,
    in_a: SegId,
    out_a: SegId,
    in_b: SegId,
    out_b: SegId,
) {
    let sab = graph.push_seg(Segment::new(axis, a_pos, b_pos));
    let sba = graph.push_seg(Segment::new(axis, b_pos, a_pos));

    graph.segs[in_a].next = sab;
    graph.segs[sab].prev = in_a;
    graph.segs[sab].next = out_b;
    graph.segs[out_b].prev = sab;

    graph.segs[in_b].next = sba;
    graph.segs[sba].prev = in_b;
    graph.segs[sba].next = out_a;
    graph.segs[out_a].prev = sba;

    // Four fresh corner records, all convex.
    let sab_dir = graph.segs[sab].dir;
    let sba_dir = graph.segs[sba].dir;
    let a_out = graph.push_vert(Vertex {
        pos: a_pos,
        seg: sab,
        end: End::Outgoing,
        dir: sab_dir,
        concave: false,
        mate: 0,
    });
    let b_in = graph.push_vert(Vertex {
        pos: b_pos,
        seg: sab,
        end: End::Incoming,
        dir: sab_dir,
        concave: false,
        mate: 0,
    });
    let b_out = graph.push_vert(Vertex {
        pos: b_pos,
        seg: sba,
        end: End::Outgoing,
        dir: sba_dir,
        concave: false,
        mate: b_in,
    });
    let a_in = graph.push_vert(Vertex {
        pos: a_pos,
        seg: sba,
        end: End::Incoming,
        dir: sba_dir,
        concave: false,
        mate: a_out,
    });
    graph.verts[a_out].mate = a_in;
    graph.verts[b_in].mate = b_out;
}

/// A valid chord eliminates the concavity at both of a corner's records.
fn clear_concave(graph: &mut BoundaryGraph, vert: VertId) {
    graph.verts[vert].concave = false;
    let mate = graph.verts[vert].mate;
    graph.verts[mate].concave = false;
}

#[cfg(test)]
mod tests {
    use rr_contour::trace_boundaries;
    use rr_core::Grid;

    use super::{resolve_concave, split_chord};
    use crate::chord::find_chords;

    fn graph_of(cells: &[&[u8]]) -> rr_contour::BoundaryGraph {
        let height = cells.len();
        let width = cells.first().map_or(0, |row| row.len());
        let data: Vec<u8> = cells.iter().flat_map(|row| row.iter().copied()).collect();
        let grid = Grid::from_vec(width, height, data).expect("rectangular test raster");
        trace_boundaries(&grid.as_view()).expect("stitching succeeds")
    }

    fn assert_links_closed(graph: &rr_contour::BoundaryGraph) {
        for id in 0..graph.segs.len() {
            assert_eq!(graph.segs[graph.segs[id].next].prev, id);
            assert_eq!(graph.segs[graph.segs[id].prev].next, id);
        }
    }

    #[test]
    fn chord_split_detaches_a_loop() {
        // Plus shape: four arm-base chords, splittable in any order even
        // though they share endpoints pairwise.
        let mut graph = graph_of(&[
            &[0, 1, 0],
            &[1, 1, 1],
            &[0, 1, 0],
        ]);
        let loops_before = graph.num_loops();
        let (hchords, vchords) = find_chords(&graph);

        for chord in hchords.iter().chain(&vchords) {
            split_chord(&mut graph, chord);
        }

        assert_links_closed(&graph);
        assert_eq!(graph.num_loops(), loops_before + 4);
        assert_eq!(graph.num_concave(), 0);
    }

    #[test]
    fn resolver_clears_every_concave_corner() {
        // U shape: both reflex corners fall to downward steiner chords.
        let mut graph = graph_of(&[
            &[1, 0, 1],
            &[1, 0, 1],
            &[1, 1, 1],
        ]);
        assert_eq!(graph.num_concave(), 2);

        resolve_concave(&mut graph).expect("resolvable");

        assert_links_closed(&graph);
        assert_eq!(graph.num_concave(), 0);
        assert_eq!(graph.num_loops(), 3);
    }

    #[test]
    fn steiner_split_keeps_struck_geometry() {
        let mut graph = graph_of(&[
            &[1, 0, 1],
            &[1, 0, 1],
            &[1, 1, 1],
        ]);
        let before: i64 = graph
            .hsegs
            .iter()
            .map(|&id| (graph.segs[id].hi() - graph.segs[id].lo()) as i64)
            .sum();

        resolve_concave(&mut graph).expect("resolvable");

        // Splitting pieces preserves total horizontal boundary length.
        let after: i64 = graph
            .hsegs
            .iter()
            .map(|&id| (graph.segs[id].hi() - graph.segs[id].lo()) as i64)
            .sum();
        assert_eq!(before, after);
    }
}
