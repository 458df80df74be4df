//! Boundary segment extraction.
//!
//! The raster is scanned once per axis along the "walls" between adjacent
//! rows or columns, including the synthetic all-background walls outside
//! the raster. A wall run opens where the two wall sides start to differ
//! and closes whenever their difference pattern changes; each closed run
//! becomes one directed segment with the filled side on its right, so
//! outer loops wind clockwise in raster coordinates and holes
//! counter-clockwise.

use rr_core::{Axis, GridView, Point2i};

use crate::graph::{BoundaryGraph, Segment};

pub(crate) fn scan_segments(grid: &GridView<'_>, graph: &mut BoundaryGraph) {
    scan_horizontal(grid, graph);
    scan_vertical(grid, graph);
}

fn filled(grid: &GridView<'_>, x: i32, y: i32) -> bool {
    if x < 0 || y < 0 {
        return false;
    }
    grid.filled(x as usize, y as usize)
}

/// Horizontal segments: walls between row `y - 1` (side `a`) and row `y`
/// (side `b`), scanned left to right. A run with the `b` side filled
/// closes rightward, otherwise leftward.
fn scan_horizontal(grid: &GridView<'_>, graph: &mut BoundaryGraph) {
    let cols = grid.width() as i32;
    let rows = grid.height() as i32;

    for y in 0..=rows {
        let mut last_a = false;
        let mut last_b = false;
        let mut start = 0i32;

        for x in 0..=cols {
            let a = filled(grid, x, y - 1);
            let b = filled(grid, x, y);
            if a == last_a && b == last_b {
                continue;
            }

            if last_a != last_b {
                let seg = if last_b {
                    Segment::new(Axis::Horizontal, Point2i::new(start, y), Point2i::new(x, y))
                } else {
                    Segment::new(Axis::Horizontal, Point2i::new(x, y), Point2i::new(start, y))
                };
                graph.push_seg(seg);
            }
            if a != b {
                start = x;
            }

            last_a = a;
            last_b = b;
        }
    }
}

/// Vertical segments: walls between column `x - 1` (side `a`) and column
/// `x` (side `b`), scanned top to bottom. The closing rule mirrors the
/// horizontal one: a filled `b` side closes upward.
fn scan_vertical(grid: &GridView<'_>, graph: &mut BoundaryGraph) {
    let cols = grid.width() as i32;
    let rows = grid.height() as i32;

    for x in 0..=cols {
        let mut last_a = false;
        let mut last_b = false;
        let mut start = 0i32;

        for y in 0..=rows {
            let a = filled(grid, x - 1, y);
            let b = filled(grid, x, y);
            if a == last_a && b == last_b {
                continue;
            }

            if last_a != last_b {
                let seg = if last_b {
                    Segment::new(Axis::Vertical, Point2i::new(x, y), Point2i::new(x, start))
                } else {
                    Segment::new(Axis::Vertical, Point2i::new(x, start), Point2i::new(x, y))
                };
                graph.push_seg(seg);
            }
            if a != b {
                start = y;
            }

            last_a = a;
            last_b = b;
        }
    }
}

#[cfg(test)]
mod tests {
    use rr_core::{Axis, Dir, Grid, Point2i};

    use super::scan_segments;
    use crate::graph::BoundaryGraph;

    fn scan(cells: &[&[u8]]) -> BoundaryGraph {
        let height = cells.len();
        let width = cells.first().map_or(0, |row| row.len());
        let data: Vec<u8> = cells.iter().flat_map(|row| row.iter().copied()).collect();
        let grid = Grid::from_vec(width, height, data).expect("rectangular test raster");

        let mut graph = BoundaryGraph::default();
        scan_segments(&grid.as_view(), &mut graph);
        graph
    }

    fn endpoints(graph: &BoundaryGraph, axis: Axis) -> Vec<(Point2i, Point2i)> {
        let ids = match axis {
            Axis::Horizontal => &graph.hsegs,
            Axis::Vertical => &graph.vsegs,
        };
        let mut out: Vec<_> = ids.iter().map(|&i| (graph.segs[i].a, graph.segs[i].b)).collect();
        out.sort();
        out
    }

    #[test]
    fn empty_raster_has_no_segments() {
        let graph = scan(&[&[0, 0], &[0, 0]]);
        assert!(graph.segs.is_empty());
    }

    #[test]
    fn unit_square_orientation() {
        let graph = scan(&[&[1]]);

        assert_eq!(
            endpoints(&graph, Axis::Horizontal),
            vec![
                (Point2i::new(0, 0), Point2i::new(1, 0)),
                (Point2i::new(1, 1), Point2i::new(0, 1)),
            ]
        );
        assert_eq!(
            endpoints(&graph, Axis::Vertical),
            vec![
                (Point2i::new(0, 1), Point2i::new(0, 0)),
                (Point2i::new(1, 0), Point2i::new(1, 1)),
            ]
        );
    }

    #[test]
    fn full_raster_single_outline() {
        let graph = scan(&[&[1, 1, 1], &[1, 1, 1]]);

        // Interior walls never change pattern, so only the outline emits.
        assert_eq!(graph.segs.len(), 4);
        assert_eq!(
            endpoints(&graph, Axis::Horizontal),
            vec![
                (Point2i::new(0, 0), Point2i::new(3, 0)),
                (Point2i::new(3, 2), Point2i::new(0, 2)),
            ]
        );
        assert_eq!(
            endpoints(&graph, Axis::Vertical),
            vec![
                (Point2i::new(0, 2), Point2i::new(0, 0)),
                (Point2i::new(3, 0), Point2i::new(3, 2)),
            ]
        );
    }

    #[test]
    fn hole_walls_wind_counter_clockwise() {
        let graph = scan(&[&[1, 1, 1], &[1, 0, 1], &[1, 1, 1]]);

        assert_eq!(graph.segs.len(), 8);
        let hole_top = graph
            .segs
            .iter()
            .find(|s| s.axis == Axis::Horizontal && s.across() == 1)
            .expect("hole top wall");
        assert_eq!(hole_top.a, Point2i::new(2, 1));
        assert_eq!(hole_top.b, Point2i::new(1, 1));
        assert_eq!(hole_top.dir, Dir::Negative);

        let hole_left = graph
            .segs
            .iter()
            .find(|s| s.axis == Axis::Vertical && s.across() == 1 && s.lo() == 1)
            .expect("hole left wall");
        assert_eq!(hole_left.a, Point2i::new(1, 1));
        assert_eq!(hole_left.b, Point2i::new(1, 2));
    }

    #[test]
    fn segment_counts_even_per_axis() {
        let graph = scan(&[
            &[1, 0, 1, 1],
            &[1, 1, 0, 1],
            &[0, 1, 1, 1],
        ]);

        assert_eq!(graph.hsegs.len() % 2, 0);
        assert_eq!(graph.vsegs.len() % 2, 0);
        assert_eq!(graph.hsegs.len() + graph.vsegs.len(), graph.segs.len());
    }
}
