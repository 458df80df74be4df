use rr_core::{Axis, Dir, Point2i};

pub type SegId = usize;
pub type VertId = usize;

pub(crate) const UNLINKED: usize = usize::MAX;

/// Which endpoint of its segment a vertex record occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Outgoing,
    Incoming,
}

/// A directed axis-aligned boundary edge. Segments form doubly-linked
/// closed loops: following `next` from any segment returns to it, and
/// `segs[s.next].prev == s` throughout the pipeline.
#[derive(Debug, Clone)]
pub struct Segment {
    pub axis: Axis,
    pub a: Point2i,
    pub b: Point2i,
    pub dir: Dir,
    pub prev: SegId,
    pub next: SegId,
    pub visited: bool,
}

impl Segment {
    pub fn new(axis: Axis, a: Point2i, b: Point2i) -> Self {
        debug_assert_eq!(a.across(axis), b.across(axis), "segment not axis-aligned");
        debug_assert_ne!(a.along(axis), b.along(axis), "zero-length segment");
        Self {
            axis,
            a,
            b,
            dir: Dir::of(b.along(axis) - a.along(axis)),
            prev: UNLINKED,
            next: UNLINKED,
            visited: false,
        }
    }

    /// Smaller endpoint coordinate along the segment's axis.
    pub fn lo(&self) -> i32 {
        self.a.along(self.axis).min(self.b.along(self.axis))
    }

    /// Larger endpoint coordinate along the segment's axis.
    pub fn hi(&self) -> i32 {
        self.a.along(self.axis).max(self.b.along(self.axis))
    }

    /// The constant coordinate on the other axis.
    pub fn across(&self) -> i32 {
        self.a.across(self.axis)
    }
}

/// One oriented endpoint of a segment. Every polygon corner carries two
/// coincident records, one on its horizontal segment and one on its
/// vertical segment; `mate` links them.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub pos: Point2i,
    pub seg: SegId,
    pub end: End,
    pub dir: Dir,
    pub concave: bool,
    pub mate: VertId,
}

/// A closed boundary loop as an ordered corner list. `hole` is derived
/// from the winding: outer loops run clockwise in raster coordinates
/// (y downward), holes counter-clockwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point2i>,
    pub hole: bool,
}

/// Arena of segments and vertices for one raster's boundaries. All ids
/// index into the owning vectors; splitting pushes new entries and
/// rewires links without ever removing.
#[derive(Debug, Clone, Default)]
pub struct BoundaryGraph {
    pub segs: Vec<Segment>,
    pub verts: Vec<Vertex>,
    pub hsegs: Vec<SegId>,
    pub vsegs: Vec<SegId>,
    pub concave: Vec<VertId>,
}

impl BoundaryGraph {
    pub fn push_seg(&mut self, seg: Segment) -> SegId {
        let id = self.segs.len();
        match seg.axis {
            Axis::Horizontal => self.hsegs.push(id),
            Axis::Vertical => self.vsegs.push(id),
        }
        self.segs.push(seg);
        id
    }

    pub fn push_vert(&mut self, vert: Vertex) -> VertId {
        let id = self.verts.len();
        self.verts.push(vert);
        id
    }

    /// The segments meeting at a vertex's corner: the one ending there and
    /// the one starting there. Always current, even after splits, because
    /// links are rewired in place while endpoints never move.
    pub fn corner_segs(&self, vert: VertId) -> (SegId, SegId) {
        let v = self.verts[vert];
        match v.end {
            End::Outgoing => (self.segs[v.seg].prev, v.seg),
            End::Incoming => (v.seg, self.segs[v.seg].next),
        }
    }

    /// Number of corners still marked concave.
    pub fn num_concave(&self) -> usize {
        self.concave
            .iter()
            .filter(|&&v| self.verts[v].concave)
            .count()
    }

    /// Number of closed loops. Read-only; requires a stitched graph.
    pub fn num_loops(&self) -> usize {
        let mut seen = vec![false; self.segs.len()];
        let mut loops = 0;
        for start in 0..self.segs.len() {
            if seen[start] {
                continue;
            }
            loops += 1;
            let mut cur = start;
            while !seen[cur] {
                seen[cur] = true;
                cur = self.segs[cur].next;
            }
        }
        loops
    }

    pub fn clear_visited(&mut self) {
        for seg in &mut self.segs {
            seg.visited = false;
        }
    }

    /// Walks the loop containing `start`, marking segments visited and
    /// collecting corners. Joints between collinear segments are merged,
    /// so only true direction changes are reported. Returns `None` when
    /// the walk fails to close within the segment count.
    pub fn loop_corners(&mut self, start: SegId) -> Option<Vec<Point2i>> {
        let mut points = Vec::new();
        let mut cur = start;
        for _ in 0..self.segs.len() {
            self.segs[cur].visited = true;
            let prev = self.segs[cur].prev;
            if self.segs[prev].axis != self.segs[cur].axis {
                points.push(self.segs[cur].a);
            }

            cur = self.segs[cur].next;
            if cur == start {
                return Some(points);
            }
        }
        None
    }

    /// All closed boundary loops with their winding classification.
    pub fn contours(&mut self) -> Vec<Contour> {
        self.clear_visited();
        let mut out = Vec::new();
        for start in 0..self.segs.len() {
            if self.segs[start].visited {
                continue;
            }
            // A stitched graph links segments into a permutation, so the
            // walk always closes.
            let Some(points) = self.loop_corners(start) else {
                continue;
            };
            let hole = signed_area2(&points) < 0;
            out.push(Contour { points, hole });
        }
        out
    }
}

fn signed_area2(points: &[Point2i]) -> i64 {
    let mut sum = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        sum += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    sum
}

#[cfg(test)]
mod tests {
    use rr_core::{Axis, Dir, Point2i};

    use super::{BoundaryGraph, Segment, signed_area2};

    #[test]
    fn segment_canonical_interval() {
        let s = Segment::new(Axis::Vertical, Point2i::new(2, 5), Point2i::new(2, 1));
        assert_eq!(s.dir, Dir::Negative);
        assert_eq!(s.lo(), 1);
        assert_eq!(s.hi(), 5);
        assert_eq!(s.across(), 2);
    }

    #[test]
    fn push_seg_registers_per_axis() {
        let mut graph = BoundaryGraph::default();
        let h = graph.push_seg(Segment::new(
            Axis::Horizontal,
            Point2i::new(0, 0),
            Point2i::new(3, 0),
        ));
        let v = graph.push_seg(Segment::new(
            Axis::Vertical,
            Point2i::new(3, 0),
            Point2i::new(3, 2),
        ));

        assert_eq!(graph.hsegs, vec![h]);
        assert_eq!(graph.vsegs, vec![v]);
    }

    #[test]
    fn area_sign_tracks_winding() {
        let clockwise = [
            Point2i::new(0, 0),
            Point2i::new(2, 0),
            Point2i::new(2, 2),
            Point2i::new(0, 2),
        ];
        let counter: Vec<_> = clockwise.iter().rev().copied().collect();

        assert!(signed_area2(&clockwise) > 0);
        assert!(signed_area2(&counter) < 0);
    }
}
