//! Single-cell fixtures for the marching squares cases.
//!
//! Corners are listed clockwise from the top-left: `[tl, tr, br, bl]`. Use
//! [`cell_grid`] to lay them out as a row-major 2x2 grid.

/// Level used by every fixture in this module.
pub const LEVEL: f32 = 5.0;

/// All corners above the level (case 15).
pub const ALL_ABOVE: [f32; 4] = [10.0, 10.0, 10.0, 10.0];

/// All corners below the level (case 0).
pub const ALL_BELOW: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Bottom row above, top row below (case 12).
pub const BOTTOM_HALF: [f32; 4] = [0.0, 0.0, 10.0, 10.0];

/// TL and BR above (case 5).
pub const SADDLE_MAIN: [f32; 4] = [10.0, 0.0, 10.0, 0.0];

/// TR and BL above (case 10).
pub const SADDLE_ANTI: [f32; 4] = [0.0, 10.0, 0.0, 10.0];

/// Corners for case `bits`: a corner whose bit is set gets `10`, others `0`.
///
/// Bit order is TL=1, TR=2, BR=4, BL=8.
pub fn corners_for_case(bits: u8) -> [f32; 4] {
    let pick = |bit: u8| if bits & bit != 0 { 10.0 } else { 0.0 };
    [pick(1), pick(2), pick(4), pick(8)]
}

/// Row-major 2x2 grid for clockwise corners `[tl, tr, br, bl]`.
pub fn cell_grid(corners: [f32; 4]) -> Vec<f32> {
    let [tl, tr, br, bl] = corners;
    vec![tl, tr, bl, br]
}
