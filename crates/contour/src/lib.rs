//! Iso-contour extraction over 2D scalar grids.
//!
//! Implements marching squares over any [`ScalarFieldView`]:
//! - Cell classification against a level (`sample >= level` is "above")
//! - Linear edge interpolation with a flat-edge midpoint fallback
//! - Explicit saddle resolution from the cell centre value
//! - Multi-level passes, sequential or on the rayon pool
//! - Planar and elevation-embedded output coordinates
//!
//! Segment chaining and smoothing are provided for renderers that want
//! polylines; the extraction pass itself only emits per-cell segments.

pub mod assemble;
pub mod cell;
pub mod config;
pub mod embedding;
pub mod error;
pub mod field;
pub mod interpolate;
pub mod levels;
pub mod polyline;
pub mod saddle;
pub mod segment;

pub use assemble::{march_cell, march_corners, march_level, ExtractionStats};
pub use cell::{classify, ActiveEdges, CellCase, Corner, Corners, Edge};
pub use config::{ContourConfig, ContourOutput, Polylines, Segments};
pub use embedding::{Elevation, Embedding, EmbeddingKind, Planar, Point2, Point3, Position, Spacing};
pub use error::{ContourError, ContourResult};
pub use field::{field_range, FnField, Grid, GridRef, ScalarFieldView};
pub use interpolate::{crossing_fraction, interpolate_edge};
pub use levels::{
    checked_contour_levels, count_contour_levels, extract, extract_par, extract_par_with_stats,
    extract_with_stats, generate_contour_levels, levels_for_field, sort_segments,
    MAX_GENERATED_LEVELS,
};
pub use polyline::{connect_segments, smooth_polyline, Polyline};
pub use saddle::{resolve_saddle, SaddlePairing};
pub use segment::{CellContour, Segment};
