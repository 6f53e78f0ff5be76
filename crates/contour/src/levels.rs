//! Running the assembler over a list of levels.
//!
//! Output is grouped by level in the caller's order, then by cell in
//! row-major order. Levels are independent, so the parallel runner splits
//! work by level and by row and still returns exactly the sequential order.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::assemble::{march_rows, ExtractionStats};
use crate::embedding::Embedding;
use crate::error::{ContourError, ContourResult};
use crate::field::{field_range, ScalarFieldView};
use crate::segment::Segment;

/// Upper bound on automatically generated levels.
pub const MAX_GENERATED_LEVELS: usize = 10_000;

/// Indices of the first and last multiple of `interval` in the range, or
/// `None` when there are none.
fn level_span(min_value: f32, max_value: f32, interval: f32) -> Option<(f64, f64)> {
    if interval <= 0.0 || !interval.is_finite() || !(max_value >= min_value) {
        return None;
    }
    let first = (min_value as f64 / interval as f64).ceil();
    let last = (max_value as f64 / interval as f64).floor();
    if !first.is_finite() || !last.is_finite() || last < first {
        return None;
    }
    Some((first, last))
}

/// Number of levels [`generate_contour_levels`] would produce, without
/// allocating them. Saturates at `u64::MAX`.
pub fn count_contour_levels(min_value: f32, max_value: f32, interval: f32) -> u64 {
    level_span(min_value, max_value, interval)
        .map(|(first, last)| (last - first + 1.0) as u64)
        .unwrap_or(0)
}

/// Every multiple of `interval` in `[min_value, max_value]`.
///
/// Returns an empty list for a non-positive interval, an inverted range, or
/// a span that would need more than [`MAX_GENERATED_LEVELS`] levels. Use
/// [`checked_contour_levels`] to tell the last case apart.
pub fn generate_contour_levels(min_value: f32, max_value: f32, interval: f32) -> Vec<f32> {
    checked_contour_levels(min_value, max_value, interval).unwrap_or_default()
}

/// [`generate_contour_levels`] that reports an oversized span as an error.
pub fn checked_contour_levels(
    min_value: f32,
    max_value: f32,
    interval: f32,
) -> ContourResult<Vec<f32>> {
    let Some((first, last)) = level_span(min_value, max_value, interval) else {
        return Ok(vec![]);
    };

    let count = (last - first + 1.0) as u64;
    if count > MAX_GENERATED_LEVELS as u64 {
        return Err(ContourError::TooManyLevels {
            count,
            max: MAX_GENERATED_LEVELS,
        });
    }

    // Multiply rather than accumulate so long ranges don't drift.
    let interval = interval as f64;
    Ok((0..count)
        .map(|k| ((first + k as f64) * interval) as f32)
        .collect())
}

/// Levels spaced by `interval` over the finite range of `field`.
pub fn levels_for_field<V: ScalarFieldView + ?Sized>(
    field: &V,
    interval: f32,
) -> ContourResult<Vec<f32>> {
    if interval <= 0.0 || !interval.is_finite() {
        return Err(ContourError::InvalidInterval(interval));
    }
    match field_range(field) {
        Some((lo, hi)) => checked_contour_levels(lo, hi, interval),
        None => Ok(vec![]),
    }
}

/// Segments for every level, tagged with the level's index.
pub fn extract<V, E>(field: &V, embedding: &E, levels: &[f32]) -> Vec<Segment<E::Point>>
where
    V: ScalarFieldView + ?Sized,
    E: Embedding,
{
    extract_with_stats(field, embedding, levels).0
}

/// [`extract`] plus pass counters.
pub fn extract_with_stats<V, E>(
    field: &V,
    embedding: &E,
    levels: &[f32],
) -> (Vec<Segment<E::Point>>, ExtractionStats)
where
    V: ScalarFieldView + ?Sized,
    E: Embedding,
{
    debug!(
        cols = field.cols(),
        rows = field.rows(),
        num_levels = levels.len(),
        first_level = levels.first().copied().unwrap_or(0.0),
        last_level = levels.last().copied().unwrap_or(0.0),
        "extract input"
    );

    let mut segments = Vec::new();
    let mut stats = ExtractionStats::default();
    let cell_rows = field.rows().saturating_sub(1);

    for (level_index, &level) in levels.iter().enumerate() {
        let before = segments.len();
        march_rows(
            field,
            embedding,
            level,
            level_index,
            0..cell_rows,
            &mut segments,
            &mut stats,
        );
        trace!(level_index, level, segments = segments.len() - before, "level done");
    }

    debug!(
        segments = stats.segments,
        saddle_cells = stats.saddle_cells,
        skipped_cells = stats.skipped_cells,
        "extract output"
    );

    (segments, stats)
}

/// Parallel [`extract`]. Produces the same list in the same order.
pub fn extract_par<V, E>(field: &V, embedding: &E, levels: &[f32]) -> Vec<Segment<E::Point>>
where
    V: ScalarFieldView + Sync + ?Sized,
    E: Embedding,
{
    extract_par_with_stats(field, embedding, levels).0
}

/// Parallel [`extract_with_stats`].
pub fn extract_par_with_stats<V, E>(
    field: &V,
    embedding: &E,
    levels: &[f32],
) -> (Vec<Segment<E::Point>>, ExtractionStats)
where
    V: ScalarFieldView + Sync + ?Sized,
    E: Embedding,
{
    let cell_rows = field.rows().saturating_sub(1);

    debug!(
        cols = field.cols(),
        rows = field.rows(),
        num_levels = levels.len(),
        threads = rayon::current_num_threads(),
        "extract_par input"
    );

    // Indexed collects keep (level, row) order.
    let chunks: Vec<Vec<(Vec<Segment<E::Point>>, ExtractionStats)>> = levels
        .par_iter()
        .enumerate()
        .map(|(level_index, &level)| {
            (0..cell_rows)
                .into_par_iter()
                .map(|j| {
                    let mut out = Vec::new();
                    let mut stats = ExtractionStats::default();
                    march_rows(field, embedding, level, level_index, j..j + 1, &mut out, &mut stats);
                    (out, stats)
                })
                .collect()
        })
        .collect();

    let mut segments = Vec::new();
    let mut stats = ExtractionStats::default();
    for (row_segments, row_stats) in chunks.into_iter().flatten() {
        segments.extend(row_segments);
        stats.merge(&row_stats);
    }

    debug!(
        segments = stats.segments,
        saddle_cells = stats.saddle_cells,
        skipped_cells = stats.skipped_cells,
        "extract_par output"
    );

    (segments, stats)
}

/// Restore (level, row, column) order on a list merged from independent
/// partial passes. Stable, so the two segments of a saddle keep their order.
pub fn sort_segments<P>(segments: &mut [Segment<P>]) {
    segments.sort_by_key(|s| (s.level_index, s.row(), s.col()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::Planar;
    use crate::field::Grid;

    #[test]
    fn test_generate_contour_levels() {
        let levels = generate_contour_levels(0.0, 20.0, 5.0);
        assert_eq!(levels, vec![0.0, 5.0, 10.0, 15.0, 20.0]);

        let levels = generate_contour_levels(2.0, 18.0, 5.0);
        assert_eq!(levels, vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_generate_contour_levels_invalid() {
        assert!(generate_contour_levels(0.0, 10.0, 0.0).is_empty());
        assert!(generate_contour_levels(10.0, 0.0, 1.0).is_empty());
        assert!(generate_contour_levels(0.0, 10.0, f32::NAN).is_empty());
    }

    #[test]
    fn test_level_count_is_capped() {
        assert!(count_contour_levels(0.0, 100.0, 1e-9) > 10_000_000_000);
        assert_eq!(count_contour_levels(0.0, 20.0, 5.0), 5);
        assert_eq!(count_contour_levels(0.0, 10.0, -1.0), 0);
        assert!(generate_contour_levels(0.0, 100.0, 1e-9).is_empty());
        assert!(matches!(
            checked_contour_levels(0.0, 100.0, 1e-9),
            Err(ContourError::TooManyLevels { max: MAX_GENERATED_LEVELS, .. })
        ));
        assert!(matches!(
            checked_contour_levels(-3e38, 3e38, 1e-30),
            Err(ContourError::TooManyLevels { .. })
        ));

        let levels = checked_contour_levels(0.0, 9_999.0, 1.0).unwrap();
        assert_eq!(levels.len(), MAX_GENERATED_LEVELS);
        assert_eq!(levels.last(), Some(&9_999.0));
    }

    #[test]
    fn test_far_from_zero_range() {
        assert_eq!(generate_contour_levels(1e12, 1e12, 1.0), vec![1e12]);
    }

    #[test]
    fn test_levels_for_field() {
        let grid = Grid::new(2, 2, vec![1.0, 4.0, 9.0, f32::NAN]).unwrap();
        assert_eq!(levels_for_field(&grid, 3.0).unwrap(), vec![3.0, 6.0, 9.0]);
        assert!(levels_for_field(&grid, -1.0).is_err());
        assert!(matches!(
            levels_for_field(&grid, 1e-6),
            Err(ContourError::TooManyLevels { .. })
        ));
    }

    #[test]
    fn test_segments_grouped_by_level() {
        let grid = Grid::from_fn(4, 4, |i, _| i as f32);
        let segments = extract(&grid, &Planar::default(), &[2.5, 0.5]);
        let indices: Vec<usize> = segments.iter().map(|s| s.level_index).collect();
        assert_eq!(indices, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(segments[0].cell, (2, 0));
        assert_eq!(segments[3].cell, (0, 0));
    }

    #[test]
    fn test_sort_segments_restores_order() {
        let grid = Grid::from_fn(5, 5, |i, j| (i * j) as f32);
        let expected = extract(&grid, &Planar::default(), &[2.0, 5.0]);
        let mut shuffled = expected.clone();
        shuffled.reverse();
        sort_segments(&mut shuffled);
        let key = |s: &Segment<_>| (s.level_index, s.cell);
        assert_eq!(
            shuffled.iter().map(key).collect::<Vec<_>>(),
            expected.iter().map(key).collect::<Vec<_>>()
        );
    }
}
