//! Extraction configuration and the embedding-dispatching entry point.

use serde::{Deserialize, Serialize};

use crate::assemble::ExtractionStats;
use crate::embedding::{Elevation, EmbeddingKind, Planar, Point2, Point3, Spacing};
use crate::error::{ContourError, ContourResult};
use crate::field::{field_range, ScalarFieldView};
use crate::levels::{checked_contour_levels, extract_par_with_stats, extract_with_stats};
use crate::polyline::{connect_segments, smooth_polyline, Polyline, DEFAULT_TOLERANCE};
use crate::segment::Segment;

/// Configuration for one extraction pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourConfig {
    /// Explicit levels, in output order.
    #[serde(default)]
    pub levels: Vec<f32>,
    /// Spacing for automatic levels, used when `levels` is empty.
    #[serde(default)]
    pub interval: Option<f32>,
    #[serde(default)]
    pub spacing: Spacing,
    #[serde(default)]
    pub embedding: EmbeddingKind,
    /// Split work across the rayon pool.
    #[serde(default)]
    pub parallel: bool,
    /// Chaikin passes applied by [`ContourOutput::polylines`].
    #[serde(default)]
    pub smoothing_passes: u32,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            levels: vec![],
            interval: None,
            spacing: Spacing::default(),
            embedding: EmbeddingKind::Planar,
            parallel: false,
            smoothing_passes: 0,
        }
    }
}

impl ContourConfig {
    pub fn with_levels(levels: Vec<f32>) -> Self {
        Self {
            levels,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ContourResult<()> {
        self.spacing.validate()?;
        if let Some(interval) = self.interval {
            if interval <= 0.0 || !interval.is_finite() {
                return Err(ContourError::InvalidInterval(interval));
            }
        }
        Ok(())
    }

    /// Explicit levels if any, else levels generated from `interval` over
    /// `range`. Empty when neither applies; an error when the interval is
    /// too fine for the range.
    pub fn resolve_levels(&self, range: Option<(f32, f32)>) -> ContourResult<Vec<f32>> {
        if !self.levels.is_empty() {
            return Ok(self.levels.clone());
        }
        match (self.interval, range) {
            (Some(interval), Some((lo, hi))) => checked_contour_levels(lo, hi, interval),
            _ => Ok(vec![]),
        }
    }

    /// Validate, resolve levels against `field`, and run the pass with the
    /// configured embedding.
    pub fn run<V>(&self, field: &V) -> ContourResult<ContourOutput>
    where
        V: ScalarFieldView + Sync + ?Sized,
    {
        self.validate()?;

        let range = if self.levels.is_empty() {
            field_range(field)
        } else {
            None
        };
        let levels = self.resolve_levels(range)?;

        let output = match self.embedding {
            EmbeddingKind::Planar => {
                let embedding = Planar::new(self.spacing);
                let (segments, stats) = if self.parallel {
                    extract_par_with_stats(field, &embedding, &levels)
                } else {
                    extract_with_stats(field, &embedding, &levels)
                };
                ContourOutput {
                    levels,
                    stats,
                    smoothing_passes: self.smoothing_passes,
                    segments: Segments::Planar(segments),
                }
            }
            EmbeddingKind::Elevation => {
                let embedding = Elevation::new(self.spacing);
                let (segments, stats) = if self.parallel {
                    extract_par_with_stats(field, &embedding, &levels)
                } else {
                    extract_with_stats(field, &embedding, &levels)
                };
                ContourOutput {
                    levels,
                    stats,
                    smoothing_passes: self.smoothing_passes,
                    segments: Segments::Elevation(segments),
                }
            }
        };

        Ok(output)
    }
}

/// Segments in whichever coordinate space the pass used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Segments {
    Planar(Vec<Segment<Point2>>),
    Elevation(Vec<Segment<Point3>>),
}

impl Segments {
    pub fn len(&self) -> usize {
        match self {
            Segments::Planar(s) => s.len(),
            Segments::Elevation(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Polylines in whichever coordinate space the pass used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Polylines {
    Planar(Vec<Polyline<Point2>>),
    Elevation(Vec<Polyline<Point3>>),
}

/// Result of [`ContourConfig::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourOutput {
    /// Levels actually used, indexed by each segment's `level_index`.
    pub levels: Vec<f32>,
    pub stats: ExtractionStats,
    #[serde(skip)]
    pub smoothing_passes: u32,
    pub segments: Segments,
}

impl ContourOutput {
    /// Chain the segments and apply the configured smoothing.
    pub fn polylines(&self) -> Polylines {
        let passes = self.smoothing_passes;
        match &self.segments {
            Segments::Planar(segments) => Polylines::Planar(
                connect_segments(segments, DEFAULT_TOLERANCE)
                    .iter()
                    .map(|p| smooth_polyline(p, passes))
                    .collect(),
            ),
            Segments::Elevation(segments) => Polylines::Elevation(
                connect_segments(segments, DEFAULT_TOLERANCE)
                    .iter()
                    .map(|p| smooth_polyline(p, passes))
                    .collect(),
            ),
        }
    }
}
