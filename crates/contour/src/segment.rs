//! Output types of an extraction pass.

use serde::Serialize;

use crate::cell::Edge;

/// One straight piece of a contour, confined to a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment<P> {
    /// Position of the level in the caller's level list.
    pub level_index: usize,
    /// The level value itself.
    pub level: f32,
    /// `(i, j)` of the cell's top-left sample.
    pub cell: (usize, usize),
    /// Edges carrying `p0` and `p1`.
    pub edges: (Edge, Edge),
    pub p0: P,
    pub p1: P,
}

impl<P> Segment<P> {
    /// Column of the originating cell.
    pub fn col(&self) -> usize {
        self.cell.0
    }

    /// Row of the originating cell.
    pub fn row(&self) -> usize {
        self.cell.1
    }
}

/// Contribution of one cell at one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellContour<P> {
    /// No crossings (cases 0 and 15, or a cell with a non-finite corner).
    Empty,
    /// One segment between two crossed edges.
    One(Segment<P>),
    /// A saddle cell: two segments over four distinct edges.
    Two(Segment<P>, Segment<P>),
}

impl<P> CellContour<P> {
    pub fn len(&self) -> usize {
        match self {
            CellContour::Empty => 0,
            CellContour::One(_) => 1,
            CellContour::Two(_, _) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContour::Empty)
    }

    /// Append the segments to `out` in emission order.
    pub fn push_into(self, out: &mut Vec<Segment<P>>) {
        match self {
            CellContour::Empty => {}
            CellContour::One(seg) => out.push(seg),
            CellContour::Two(a, b) => {
                out.push(a);
                out.push(b);
            }
        }
    }
}
