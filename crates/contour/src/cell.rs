//! Marching squares cell classification.
//!
//! Each corner of a cell is tested against the level (`sample >= level` sets
//! its bit) and the resulting 4-bit case selects which cell edges the contour
//! crosses. Bit order is TL=1, TR=2, BR=4, BL=8.

use std::fmt;

use serde::Serialize;

/// A corner of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Grid offset of this corner relative to the cell's top-left sample.
    pub fn offset(self) -> (usize, usize) {
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (1, 0),
            Corner::BottomRight => (1, 1),
            Corner::BottomLeft => (0, 1),
        }
    }

    /// Bit this corner contributes to the case index.
    pub fn bit(self) -> u8 {
        match self {
            Corner::TopLeft => 1,
            Corner::TopRight => 2,
            Corner::BottomRight => 4,
            Corner::BottomLeft => 8,
        }
    }
}

/// A side of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Endpoints of this edge. Interpolation runs from the first corner to
    /// the second: left to right for horizontal edges, top to bottom for
    /// vertical ones.
    pub fn corners(self) -> (Corner, Corner) {
        match self {
            Edge::Top => (Corner::TopLeft, Corner::TopRight),
            Edge::Right => (Corner::TopRight, Corner::BottomRight),
            Edge::Bottom => (Corner::BottomLeft, Corner::BottomRight),
            Edge::Left => (Corner::TopLeft, Corner::BottomLeft),
        }
    }

    /// Whether two edges meet at a corner.
    pub fn is_adjacent(self, other: Edge) -> bool {
        let (a0, a1) = self.corners();
        let (b0, b1) = other.corners();
        self != other && (a0 == b0 || a0 == b1 || a1 == b0 || a1 == b1)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
        };
        f.write_str(name)
    }
}

/// The four corner samples of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub tl: f32,
    pub tr: f32,
    pub br: f32,
    pub bl: f32,
}

impl Corners {
    pub fn new(tl: f32, tr: f32, br: f32, bl: f32) -> Self {
        Self { tl, tr, br, bl }
    }

    pub fn get(&self, corner: Corner) -> f32 {
        match corner {
            Corner::TopLeft => self.tl,
            Corner::TopRight => self.tr,
            Corner::BottomRight => self.br,
            Corner::BottomLeft => self.bl,
        }
    }

    /// Mean of the four corners, used as the centre value when the field
    /// cannot sample between grid points.
    pub fn average(&self) -> f32 {
        (self.tl + self.tr + self.br + self.bl) * 0.25
    }

    pub fn all_finite(&self) -> bool {
        self.tl.is_finite() && self.tr.is_finite() && self.br.is_finite() && self.bl.is_finite()
    }
}

/// Edges crossed by the contour for one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveEdges {
    /// All corners on the same side.
    None,
    /// One crossing pair.
    Pair(Edge, Edge),
    /// All four edges crossed; the pairing depends on the cell centre.
    Saddle,
}

/// One of the sixteen marching squares configurations.
///
/// Variants are named after the corners at or above the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellCase {
    Empty,
    TopLeft,
    TopRight,
    TopHalf,
    BottomRight,
    /// TL and BR above, TR and BL below.
    SaddleMain,
    RightHalf,
    AllButBottomLeft,
    BottomLeft,
    LeftHalf,
    /// TR and BL above, TL and BR below.
    SaddleAnti,
    AllButBottomRight,
    BottomHalf,
    AllButTopRight,
    AllButTopLeft,
    Full,
}

impl CellCase {
    /// Case for a 4-bit index. Bits above the low four are ignored.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x0f {
            0 => CellCase::Empty,
            1 => CellCase::TopLeft,
            2 => CellCase::TopRight,
            3 => CellCase::TopHalf,
            4 => CellCase::BottomRight,
            5 => CellCase::SaddleMain,
            6 => CellCase::RightHalf,
            7 => CellCase::AllButBottomLeft,
            8 => CellCase::BottomLeft,
            9 => CellCase::LeftHalf,
            10 => CellCase::SaddleAnti,
            11 => CellCase::AllButBottomRight,
            12 => CellCase::BottomHalf,
            13 => CellCase::AllButTopRight,
            14 => CellCase::AllButTopLeft,
            _ => CellCase::Full,
        }
    }

    /// The 4-bit index (0-15).
    pub fn bits(self) -> u8 {
        match self {
            CellCase::Empty => 0,
            CellCase::TopLeft => 1,
            CellCase::TopRight => 2,
            CellCase::TopHalf => 3,
            CellCase::BottomRight => 4,
            CellCase::SaddleMain => 5,
            CellCase::RightHalf => 6,
            CellCase::AllButBottomLeft => 7,
            CellCase::BottomLeft => 8,
            CellCase::LeftHalf => 9,
            CellCase::SaddleAnti => 10,
            CellCase::AllButBottomRight => 11,
            CellCase::BottomHalf => 12,
            CellCase::AllButTopRight => 13,
            CellCase::AllButTopLeft => 14,
            CellCase::Full => 15,
        }
    }

    /// Standard marching squares edge table. Complementary cases share the
    /// same crossings.
    pub fn active_edges(self) -> ActiveEdges {
        use ActiveEdges::{None as NoEdges, Pair, Saddle};

        match self {
            CellCase::Empty | CellCase::Full => NoEdges,
            CellCase::TopLeft | CellCase::AllButTopLeft => Pair(Edge::Left, Edge::Top),
            CellCase::TopRight | CellCase::AllButTopRight => Pair(Edge::Top, Edge::Right),
            CellCase::TopHalf | CellCase::BottomHalf => Pair(Edge::Left, Edge::Right),
            CellCase::BottomRight | CellCase::AllButBottomRight => Pair(Edge::Right, Edge::Bottom),
            CellCase::SaddleMain | CellCase::SaddleAnti => Saddle,
            CellCase::RightHalf | CellCase::LeftHalf => Pair(Edge::Top, Edge::Bottom),
            CellCase::AllButBottomLeft | CellCase::BottomLeft => Pair(Edge::Left, Edge::Bottom),
        }
    }

    pub fn is_saddle(self) -> bool {
        matches!(self, CellCase::SaddleMain | CellCase::SaddleAnti)
    }

    /// Whether `corner` is at or above the level in this case.
    pub fn is_above(self, corner: Corner) -> bool {
        self.bits() & corner.bit() != 0
    }
}

/// Classify a cell against `level`.
pub fn classify(corners: &Corners, level: f32) -> CellCase {
    let mut bits = 0u8;
    if corners.tl >= level {
        bits |= Corner::TopLeft.bit();
    }
    if corners.tr >= level {
        bits |= Corner::TopRight.bit();
    }
    if corners.br >= level {
        bits |= Corner::BottomRight.bit();
    }
    if corners.bl >= level {
        bits |= Corner::BottomLeft.bit();
    }
    CellCase::from_bits(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_round_trip_all_cases() {
        for bits in 0..16u8 {
            assert_eq!(CellCase::from_bits(bits).bits(), bits);
        }
    }

    #[test]
    fn test_every_case_has_edges_defined() {
        for bits in 0..16u8 {
            let case = CellCase::from_bits(bits);
            match case.active_edges() {
                ActiveEdges::None => assert!(bits == 0 || bits == 15),
                ActiveEdges::Saddle => assert!(bits == 5 || bits == 10),
                ActiveEdges::Pair(a, b) => assert_ne!(a, b),
            }
        }
    }

    #[test]
    fn test_pair_edges_separate_the_two_sides() {
        // A crossed edge has one corner above and one below.
        for bits in 0..16u8 {
            let case = CellCase::from_bits(bits);
            if let ActiveEdges::Pair(a, b) = case.active_edges() {
                for edge in Edge::ALL {
                    let (c0, c1) = edge.corners();
                    let crossed = case.is_above(c0) != case.is_above(c1);
                    assert_eq!(crossed, edge == a || edge == b, "case {} edge {}", bits, edge);
                }
            }
        }
    }

    #[test]
    fn test_classify_uses_greater_or_equal() {
        let corners = Corners::new(5.0, 4.999, 5.0, 6.0);
        let case = classify(&corners, 5.0);
        assert_eq!(case.bits(), 1 | 4 | 8);
    }

    #[test]
    fn test_classify_saddles() {
        assert_eq!(classify(&Corners::new(10.0, 0.0, 10.0, 0.0), 5.0), CellCase::SaddleMain);
        assert_eq!(classify(&Corners::new(0.0, 10.0, 0.0, 10.0), 5.0), CellCase::SaddleAnti);
    }

    #[test]
    fn test_nan_corner_classifies_below() {
        let case = classify(&Corners::new(f32::NAN, 10.0, 10.0, 10.0), 5.0);
        assert_eq!(case, CellCase::AllButTopLeft);
    }

    #[test]
    fn test_edge_adjacency() {
        assert!(Edge::Top.is_adjacent(Edge::Left));
        assert!(Edge::Top.is_adjacent(Edge::Right));
        assert!(!Edge::Top.is_adjacent(Edge::Bottom));
        assert!(!Edge::Left.is_adjacent(Edge::Right));
        assert!(!Edge::Top.is_adjacent(Edge::Top));
    }
}
