//! Chord candidates between concave corners.
//!
//! A chord joins two concave corners that share a coordinate and whose
//! open connecting interval crosses no boundary segment. Candidates are
//! found per axis by walking consecutive collinear corners in sorted
//! order; crossings between the two candidate families are enumerated for
//! the selector.

use core::ops::ControlFlow;

use rr_contour::{BoundaryGraph, VertId};
use rr_core::{Axis, Interval, IntervalTree, Point2i};

/// An interior axis-parallel diagonal between two concave corners,
/// ordered so `a` carries the smaller coordinate along the chord axis.
#[derive(Debug, Clone, Copy)]
pub struct Chord {
    pub axis: Axis,
    pub a: VertId,
    pub b: VertId,
    pub a_pos: Point2i,
    pub b_pos: Point2i,
}

impl Chord {
    pub fn lo(&self) -> i32 {
        self.a_pos.along(self.axis).min(self.b_pos.along(self.axis))
    }

    pub fn hi(&self) -> i32 {
        self.a_pos.along(self.axis).max(self.b_pos.along(self.axis))
    }

    /// The shared coordinate on the other axis.
    pub fn across(&self) -> i32 {
        self.a_pos.across(self.axis)
    }
}

/// Interval tree over one axis's boundary segments, keyed by segment id.
pub(crate) fn segment_tree(graph: &BoundaryGraph, axis: Axis) -> IntervalTree {
    let ids = match axis {
        Axis::Horizontal => &graph.hsegs,
        Axis::Vertical => &graph.vsegs,
    };
    IntervalTree::build(
        ids.iter()
            .map(|&id| {
                let seg = &graph.segs[id];
                Interval::new(seg.lo(), seg.hi(), id)
            })
            .collect(),
    )
}

/// All valid chord candidates of a stitched graph, horizontal then
/// vertical.
pub fn find_chords(graph: &BoundaryGraph) -> (Vec<Chord>, Vec<Chord>) {
    let htree = segment_tree(graph, Axis::Horizontal);
    let vtree = segment_tree(graph, Axis::Vertical);
    let h = axis_chords(graph, Axis::Horizontal, &vtree);
    let v = axis_chords(graph, Axis::Vertical, &htree);
    (h, v)
}

fn axis_chords(graph: &BoundaryGraph, axis: Axis, blockers: &IntervalTree) -> Vec<Chord> {
    let mut corners: Vec<VertId> = graph.concave.clone();
    corners.sort_by_key(|&id| {
        let p = graph.verts[id].pos;
        (p.across(axis), p.along(axis))
    });

    let mut chords = Vec::new();
    for pair in corners.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let a_pos = graph.verts[a].pos;
        let b_pos = graph.verts[b].pos;
        if a_pos.across(axis) != b_pos.across(axis) {
            continue;
        }

        // Corners already joined by a boundary edge, in either loop
        // direction, would make a zero-width face.
        let (in_a, out_a) = graph.corner_segs(a);
        if graph.segs[out_a].b == b_pos || graph.segs[in_a].a == b_pos {
            continue;
        }

        let shared = a_pos.across(axis);
        let lo = a_pos.along(axis);
        let hi = b_pos.along(axis);
        let blocked = blockers.stab(shared, &mut |iv| {
            let fixed = graph.segs[iv.id].across();
            if lo < fixed && fixed < hi {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        if blocked.is_some() {
            continue;
        }

        chords.push(Chord {
            axis,
            a,
            b,
            a_pos,
            b_pos,
        });
    }
    chords
}

/// Pairs of chords whose open interiors intersect: stab an interval tree
/// over the horizontal chords' x-ranges at each vertical chord's x and
/// keep hits whose y lies strictly inside the vertical chord's span.
pub fn find_crossings(hchords: &[Chord], vchords: &[Chord]) -> Vec<(usize, usize)> {
    let tree = IntervalTree::build(
        hchords
            .iter()
            .enumerate()
            .map(|(i, c)| Interval::new(c.lo(), c.hi(), i))
            .collect(),
    );

    let mut crossings = Vec::new();
    for (j, vc) in vchords.iter().enumerate() {
        let (ylo, yhi) = (vc.lo(), vc.hi());
        tree.stab::<()>(vc.across(), &mut |iv| {
            let hy = hchords[iv.id].across();
            if ylo < hy && hy < yhi {
                crossings.push((iv.id, j));
            }
            ControlFlow::Continue(())
        });
    }
    crossings
}

#[cfg(test)]
mod tests {
    use rr_contour::trace_boundaries;
    use rr_core::{Axis, Grid, Point2i};

    use super::{Chord, find_chords, find_crossings};

    fn chord(axis: Axis, ax: i32, ay: i32, bx: i32, by: i32) -> Chord {
        Chord {
            axis,
            a: 0,
            b: 0,
            a_pos: Point2i::new(ax, ay),
            b_pos: Point2i::new(bx, by),
        }
    }

    fn chords_of(cells: &[&[u8]]) -> (Vec<Chord>, Vec<Chord>) {
        let height = cells.len();
        let width = cells.first().map_or(0, |row| row.len());
        let data: Vec<u8> = cells.iter().flat_map(|row| row.iter().copied()).collect();
        let grid = Grid::from_vec(width, height, data).expect("rectangular test raster");
        let graph = trace_boundaries(&grid.as_view()).expect("stitching succeeds");
        find_chords(&graph)
    }

    #[test]
    fn crossings_require_strict_interior_overlap() {
        let hchords = vec![
            chord(Axis::Horizontal, 1, 1, 3, 1),
            chord(Axis::Horizontal, 1, 2, 6, 2),
            chord(Axis::Horizontal, 1, 4, 4, 4),
            chord(Axis::Horizontal, 1, 5, 6, 5),
        ];
        let vchords = vec![
            chord(Axis::Vertical, 2, 1, 2, 3),
            chord(Axis::Vertical, 5, 3, 5, 6),
        ];

        let mut crossings = find_crossings(&hchords, &vchords);
        crossings.sort_unstable();
        assert_eq!(crossings, vec![(1, 0), (3, 1)]);
    }

    #[test]
    fn donut_chords_are_all_degenerate() {
        // Every collinear concave pair of the hole is joined by one of its
        // own walls, so both guards fire and nothing is emitted.
        let (h, v) = chords_of(&[&[1, 1, 1], &[1, 0, 1], &[1, 1, 1]]);
        assert!(h.is_empty());
        assert!(v.is_empty());
    }

    #[test]
    fn plus_shape_has_a_chord_per_arm_base() {
        let (h, v) = chords_of(&[
            &[0, 1, 0],
            &[1, 1, 1],
            &[0, 1, 0],
        ]);

        assert_eq!(h.len(), 2);
        assert_eq!(v.len(), 2);
        assert_eq!(h[0].a_pos, Point2i::new(1, 1));
        assert_eq!(h[0].b_pos, Point2i::new(2, 1));
        assert!(find_crossings(&h, &v).is_empty());
    }

    #[test]
    fn comb_teeth_chords_skip_gap_spans() {
        // Teeth at columns 1, 3, 5 on a bar: each tooth base is a chord,
        // each gap span is the bar's own top wall.
        let (h, v) = chords_of(&[
            &[0, 1, 0, 1, 0, 1, 0],
            &[1, 1, 1, 1, 1, 1, 1],
        ]);

        assert_eq!(v.len(), 0);
        let spans: Vec<(i32, i32)> = h.iter().map(|c| (c.lo(), c.hi())).collect();
        assert_eq!(spans, vec![(1, 2), (3, 4), (5, 6)]);
        assert!(h.iter().all(|c| c.across() == 1));
    }

    #[test]
    fn boundary_between_components_blocks_chord() {
        // Two staircase components with collinear concave corners; the
        // first component's right wall lies strictly between them.
        let (h, v) = chords_of(&[
            &[1, 0, 0, 0, 1],
            &[1, 1, 0, 1, 1],
        ]);

        assert!(h.is_empty());
        assert!(v.is_empty());
    }
}
