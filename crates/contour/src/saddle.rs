//! Pairing of crossings in saddle cells (cases 5 and 10).
//!
//! A saddle cell has all four edges crossed and two pairings are possible.
//! The value at the cell centre decides: when it agrees with TL (and so BR)
//! the crossings are paired `left-top` and `right-bottom`, otherwise
//! `top-right` and `left-bottom`. With the corner-average centre this
//! reproduces the classic fixed table, case 5 as `left-top` + `right-bottom`
//! and case 10 as `top-right` + `left-bottom`.

use crate::cell::{CellCase, Corner, Corners, Edge};

/// How the four crossings of a saddle cell are joined into two segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaddlePairing {
    /// Segments `left-top` and `right-bottom`, one across each end of the
    /// main diagonal.
    IsolateMainDiagonal,
    /// Segments `top-right` and `left-bottom`, one across each end of the
    /// anti-diagonal.
    IsolateAntiDiagonal,
}

impl SaddlePairing {
    /// The two edge pairs, each becoming one segment.
    pub fn edge_pairs(self) -> [(Edge, Edge); 2] {
        match self {
            SaddlePairing::IsolateMainDiagonal => {
                [(Edge::Left, Edge::Top), (Edge::Right, Edge::Bottom)]
            }
            SaddlePairing::IsolateAntiDiagonal => {
                [(Edge::Top, Edge::Right), (Edge::Left, Edge::Bottom)]
            }
        }
    }
}

/// Choose the pairing for a saddle `case` given the value at the cell centre.
///
/// The centre is classified with the same `>=` rule as the corners. When it
/// falls on the same side as TL (and therefore BR) the main-diagonal pairing
/// is used, otherwise the anti-diagonal one.
pub fn resolve_saddle(case: CellCase, center: f32, level: f32) -> SaddlePairing {
    debug_assert!(case.is_saddle(), "resolve_saddle called for case {}", case.bits());

    let center_above = center >= level;
    if center_above == case.is_above(Corner::TopLeft) {
        SaddlePairing::IsolateMainDiagonal
    } else {
        SaddlePairing::IsolateAntiDiagonal
    }
}

/// Centre value used for resolution: the field's own sample when it has one,
/// otherwise the corner average.
#[inline]
pub fn center_value(corners: &Corners, field_center: Option<f32>) -> f32 {
    field_center.unwrap_or_else(|| corners.average())
}
