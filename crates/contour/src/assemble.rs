//! Per-cell marching over one level.

use std::ops::Range;

use crate::cell::{classify, ActiveEdges, CellCase, Corner, Corners, Edge};
use crate::embedding::Embedding;
use crate::field::ScalarFieldView;
use crate::interpolate::interpolate_edge;
use crate::saddle::{center_value, resolve_saddle};
use crate::segment::{CellContour, Segment};

/// Counters collected while marching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ExtractionStats {
    /// (cell, level) pairs visited.
    pub cells_visited: usize,
    pub segments: usize,
    /// (cell, level) pairs that were saddles.
    pub saddle_cells: usize,
    /// (cell, level) pairs skipped for a non-finite corner.
    pub skipped_cells: usize,
}

impl ExtractionStats {
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.cells_visited += other.cells_visited;
        self.segments += other.segments;
        self.saddle_cells += other.saddle_cells;
        self.skipped_cells += other.skipped_cells;
    }
}

/// Read the four corners of cell `(i, j)`.
#[inline]
pub fn cell_corners<V: ScalarFieldView + ?Sized>(field: &V, i: usize, j: usize) -> Corners {
    Corners::new(
        field.sample(i, j),
        field.sample(i + 1, j),
        field.sample(i + 1, j + 1),
        field.sample(i, j + 1),
    )
}

/// Everything needed to emit segments for one cell at one level.
struct CellContext<'a, E> {
    embedding: &'a E,
    i: usize,
    j: usize,
    corners: Corners,
    level: f32,
    level_index: usize,
}

impl<E: Embedding> CellContext<'_, E> {
    fn corner_position(&self, corner: Corner) -> E::Point {
        let (di, dj) = corner.offset();
        self.embedding
            .position(self.i + di, self.j + dj, self.corners.get(corner))
    }

    fn crossing(&self, edge: Edge) -> E::Point {
        let (a, b) = edge.corners();
        interpolate_edge(
            self.corner_position(a),
            self.corners.get(a),
            self.corner_position(b),
            self.corners.get(b),
            self.level,
        )
    }

    fn segment(&self, e0: Edge, e1: Edge) -> Segment<E::Point> {
        Segment {
            level_index: self.level_index,
            level: self.level,
            cell: (self.i, self.j),
            edges: (e0, e1),
            p0: self.crossing(e0),
            p1: self.crossing(e1),
        }
    }

    /// Segments for an already classified cell.
    fn contour(&self, case: CellCase, field_center: Option<f32>) -> CellContour<E::Point> {
        match case.active_edges() {
            ActiveEdges::None => CellContour::Empty,
            ActiveEdges::Pair(e0, e1) => CellContour::One(self.segment(e0, e1)),
            ActiveEdges::Saddle => {
                let center = center_value(&self.corners, field_center);
                let [(a0, a1), (b0, b1)] = resolve_saddle(case, center, self.level).edge_pairs();
                CellContour::Two(self.segment(a0, a1), self.segment(b0, b1))
            }
        }
    }
}

/// Segments for one cell given its corner samples.
///
/// `field_center` is the field's own centre sample, if it has one; saddle
/// cells fall back to the corner average otherwise.
pub fn march_corners<E: Embedding>(
    embedding: &E,
    i: usize,
    j: usize,
    corners: Corners,
    field_center: Option<f32>,
    level: f32,
    level_index: usize,
) -> CellContour<E::Point> {
    let ctx = CellContext {
        embedding,
        i,
        j,
        corners,
        level,
        level_index,
    };
    ctx.contour(classify(&corners, level), field_center)
}

/// Classify and march cell `(i, j)` of `field`. `None` for a cell with a
/// non-finite corner.
fn march_field_cell<V, E>(
    field: &V,
    embedding: &E,
    i: usize,
    j: usize,
    level: f32,
    level_index: usize,
) -> Option<(CellCase, CellContour<E::Point>)>
where
    V: ScalarFieldView + ?Sized,
    E: Embedding,
{
    let corners = cell_corners(field, i, j);
    if !corners.all_finite() {
        return None;
    }

    let case = classify(&corners, level);
    // Only saddles need the centre; skip the extra sample otherwise.
    let field_center = if case.is_saddle() {
        field.center_sample(i, j)
    } else {
        None
    };

    let ctx = CellContext {
        embedding,
        i,
        j,
        corners,
        level,
        level_index,
    };
    Some((case, ctx.contour(case, field_center)))
}

/// Segments for cell `(i, j)` of `field`.
///
/// Panics if the cell lies outside the grid. A cell with a non-finite corner
/// has no defined side of any level and yields [`CellContour::Empty`].
pub fn march_cell<V, E>(
    field: &V,
    embedding: &E,
    i: usize,
    j: usize,
    level: f32,
    level_index: usize,
) -> CellContour<E::Point>
where
    V: ScalarFieldView + ?Sized,
    E: Embedding,
{
    march_field_cell(field, embedding, i, j, level, level_index)
        .map(|(_, contour)| contour)
        .unwrap_or(CellContour::Empty)
}

/// March cell rows `rows` at one level, appending to `out` in row-major order.
pub(crate) fn march_rows<V, E>(
    field: &V,
    embedding: &E,
    level: f32,
    level_index: usize,
    rows: Range<usize>,
    out: &mut Vec<Segment<E::Point>>,
    stats: &mut ExtractionStats,
) where
    V: ScalarFieldView + ?Sized,
    E: Embedding,
{
    let cell_cols = field.cols().saturating_sub(1);

    for j in rows {
        for i in 0..cell_cols {
            stats.cells_visited += 1;

            let Some((case, contour)) = march_field_cell(field, embedding, i, j, level, level_index)
            else {
                stats.skipped_cells += 1;
                continue;
            };

            if case.is_saddle() {
                stats.saddle_cells += 1;
            }
            stats.segments += contour.len();
            contour.push_into(out);
        }
    }
}

/// All segments of `field` at a single level, in row-major cell order.
///
/// Grids with fewer than two columns or rows have no cells and produce an
/// empty list.
pub fn march_level<V, E>(
    field: &V,
    embedding: &E,
    level: f32,
    level_index: usize,
) -> Vec<Segment<E::Point>>
where
    V: ScalarFieldView + ?Sized,
    E: Embedding,
{
    let mut out = Vec::new();
    let mut stats = ExtractionStats::default();
    march_rows(
        field,
        embedding,
        level,
        level_index,
        0..field.rows().saturating_sub(1),
        &mut out,
        &mut stats,
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{Planar, Point2};
    use crate::field::Grid;

    fn single_cell(tl: f32, tr: f32, br: f32, bl: f32) -> Grid {
        Grid::new(2, 2, vec![tl, tr, bl, br]).unwrap()
    }

    #[test]
    fn test_uniform_cell_is_empty() {
        let grid = single_cell(10.0, 10.0, 10.0, 10.0);
        let out = march_cell(&grid, &Planar::default(), 0, 0, 5.0, 0);
        assert_eq!(out, CellContour::Empty);
    }

    #[test]
    fn test_bottom_half_emits_right_left_segment() {
        let grid = single_cell(0.0, 0.0, 10.0, 10.0);
        match march_cell(&grid, &Planar::default(), 0, 0, 5.0, 0) {
            CellContour::One(seg) => {
                assert_eq!(seg.edges, (Edge::Left, Edge::Right));
                assert_eq!(seg.p0, Point2::new(0.0, 0.5));
                assert_eq!(seg.p1, Point2::new(1.0, 0.5));
            }
            other => panic!("expected one segment, got {:?}", other),
        }
    }

    #[test]
    fn test_saddle_emits_two_segments() {
        let grid = single_cell(10.0, 0.0, 10.0, 0.0);
        let out = march_cell(&grid, &Planar::default(), 0, 0, 5.0, 3);
        match out {
            CellContour::Two(a, b) => {
                assert_eq!(a.level_index, 3);
                assert_eq!(b.cell, (0, 0));
                let edges = [a.edges.0, a.edges.1, b.edges.0, b.edges.1];
                for edge in Edge::ALL {
                    assert!(edges.contains(&edge), "edge {} unused", edge);
                }
            }
            other => panic!("expected two segments, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_corner_skips_cell() {
        let grid = single_cell(f32::NAN, 0.0, 10.0, 10.0);
        let out = march_cell(&grid, &Planar::default(), 0, 0, 5.0, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_march_cell_agrees_with_march_corners() {
        let grid = Grid::new(3, 3, vec![10.0, 0.0, 10.0, 0.0, 10.0, 0.0, 10.0, 0.0, 4.0]).unwrap();
        for j in 0..2 {
            for i in 0..2 {
                let corners = cell_corners(&grid, i, j);
                assert_eq!(
                    march_cell(&grid, &Planar::default(), i, j, 5.0, 1),
                    march_corners(&Planar::default(), i, j, corners, None, 5.0, 1)
                );
            }
        }
    }

    #[test]
    fn test_march_rows_counts() {
        let grid = Grid::new(3, 2, vec![10.0, 0.0, f32::NAN, 0.0, 10.0, 0.0]).unwrap();
        let mut out = Vec::new();
        let mut stats = ExtractionStats::default();
        march_rows(&grid, &Planar::default(), 5.0, 0, 0..1, &mut out, &mut stats);
        assert_eq!(stats.cells_visited, 2);
        assert_eq!(stats.skipped_cells, 1);
        assert_eq!(stats.saddle_cells, 1);
        assert_eq!(stats.segments, 2);
        assert_eq!(out.len(), 2);
    }
}
