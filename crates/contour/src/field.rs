//! Read-only access to a rectangular grid of scalar samples.
//!
//! The extraction pass never cares where samples come from. Image
//! brightness, a noise height map and a hand-written fixture all reach the
//! engine through [`ScalarFieldView`].

use serde::{Deserialize, Serialize};

use crate::error::{ContourError, ContourResult};

/// A `cols x rows` grid of scalar samples indexed by `(i, j)`.
///
/// `i` runs along columns (x) and `j` along rows (y). Implementations must
/// panic on out-of-range access instead of clamping: a clamped read at the
/// border would silently bend contour geometry.
pub trait ScalarFieldView {
    /// Number of samples along x.
    fn cols(&self) -> usize;

    /// Number of samples along y.
    fn rows(&self) -> usize;

    /// Sample at `(i, j)`. Panics when `i >= cols` or `j >= rows`.
    fn sample(&self, i: usize, j: usize) -> f32;

    /// Value at the centre of cell `(i, j)` if the field can produce one
    /// directly. `None` lets callers fall back to the corner average.
    fn center_sample(&self, _i: usize, _j: usize) -> Option<f32> {
        None
    }

    /// Number of cells (`(cols-1) x (rows-1)`), zero for degenerate grids.
    fn cell_count(&self) -> usize {
        self.cols().saturating_sub(1) * self.rows().saturating_sub(1)
    }
}

impl<T: ScalarFieldView + ?Sized> ScalarFieldView for &T {
    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn sample(&self, i: usize, j: usize) -> f32 {
        (**self).sample(i, j)
    }

    fn center_sample(&self, i: usize, j: usize) -> Option<f32> {
        (**self).center_sample(i, j)
    }
}

#[inline]
fn check_bounds(i: usize, j: usize, cols: usize, rows: usize) {
    assert!(
        i < cols && j < rows,
        "sample ({}, {}) out of range for {}x{} grid",
        i,
        j,
        cols,
        rows
    );
}

/// Check that `actual` samples fill a `cols x rows` grid.
fn check_len(cols: usize, rows: usize, actual: usize) -> ContourResult<()> {
    let expected = cols
        .checked_mul(rows)
        .ok_or(ContourError::GridTooLarge { cols, rows })?;
    if actual != expected {
        return Err(ContourError::DimensionMismatch {
            cols,
            rows,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Owned row-major grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    cols: usize,
    rows: usize,
    values: Vec<f32>,
}

/// On-disk JSON shape of a grid, validated into a [`Grid`] on load.
#[derive(Debug, Deserialize)]
struct GridFile {
    cols: usize,
    rows: usize,
    values: Vec<f32>,
}

impl Grid {
    /// Create a grid from row-major samples.
    pub fn new(cols: usize, rows: usize, values: Vec<f32>) -> ContourResult<Self> {
        check_len(cols, rows, values.len())?;
        Ok(Self { cols, rows, values })
    }

    /// Build a grid by evaluating `f(i, j)` at every sample.
    pub fn from_fn(cols: usize, rows: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut values = Vec::with_capacity(cols * rows);
        for j in 0..rows {
            for i in 0..cols {
                values.push(f(i, j));
            }
        }
        Self { cols, rows, values }
    }

    /// Parse a whitespace or comma separated grid, one row per line.
    ///
    /// Blank lines and anything after `#` are ignored. Every row must have
    /// the same number of samples as the first one.
    pub fn parse_text(text: &str) -> ContourResult<Self> {
        let mut values = Vec::new();
        let mut cols = 0;
        let mut rows = 0;

        for (line_idx, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default();
            let mut found = 0;
            for token in line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
            {
                let value: f32 = token.parse().map_err(|_| ContourError::InvalidSample {
                    line: line_idx + 1,
                    token: token.to_string(),
                })?;
                values.push(value);
                found += 1;
            }

            if found == 0 {
                continue;
            }
            if rows == 0 {
                cols = found;
            } else if found != cols {
                return Err(ContourError::RaggedRow {
                    line: line_idx + 1,
                    expected: cols,
                    found,
                });
            }
            rows += 1;
        }

        Self::new(cols, rows, values)
    }

    /// Parse a `{ "cols", "rows", "values" }` JSON document.
    pub fn from_json(json: &str) -> ContourResult<Self> {
        let file: GridFile = serde_json::from_str(json)?;
        Self::new(file.cols, file.rows, file.values)
    }

    /// Row-major samples.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Borrow this grid as a [`GridRef`].
    pub fn as_view(&self) -> GridRef<'_> {
        GridRef {
            cols: self.cols,
            rows: self.rows,
            values: &self.values,
        }
    }
}

impl ScalarFieldView for Grid {
    fn cols(&self) -> usize {
        self.cols
    }

    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn sample(&self, i: usize, j: usize) -> f32 {
        check_bounds(i, j, self.cols, self.rows);
        self.values[j * self.cols + i]
    }
}

/// Borrowed row-major grid, e.g. over a frame buffer refreshed every tick.
#[derive(Debug, Clone, Copy)]
pub struct GridRef<'a> {
    cols: usize,
    rows: usize,
    values: &'a [f32],
}

impl<'a> GridRef<'a> {
    pub fn new(cols: usize, rows: usize, values: &'a [f32]) -> ContourResult<Self> {
        check_len(cols, rows, values.len())?;
        Ok(Self { cols, rows, values })
    }
}

impl ScalarFieldView for GridRef<'_> {
    fn cols(&self) -> usize {
        self.cols
    }

    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn sample(&self, i: usize, j: usize) -> f32 {
        check_bounds(i, j, self.cols, self.rows);
        self.values[j * self.cols + i]
    }
}

/// A field evaluated on demand from a function of continuous grid
/// coordinates, such as a noise generator.
///
/// Because the function can be evaluated between grid points, saddle cells
/// are resolved with a true sample at the cell centre.
pub struct FnField<F> {
    cols: usize,
    rows: usize,
    f: F,
}

impl<F> FnField<F>
where
    F: Fn(f32, f32) -> f32,
{
    pub fn new(cols: usize, rows: usize, f: F) -> Self {
        Self { cols, rows, f }
    }
}

impl<F> ScalarFieldView for FnField<F>
where
    F: Fn(f32, f32) -> f32,
{
    fn cols(&self) -> usize {
        self.cols
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn sample(&self, i: usize, j: usize) -> f32 {
        check_bounds(i, j, self.cols, self.rows);
        (self.f)(i as f32, j as f32)
    }

    fn center_sample(&self, i: usize, j: usize) -> Option<f32> {
        check_bounds(i + 1, j + 1, self.cols, self.rows);
        Some((self.f)(i as f32 + 0.5, j as f32 + 0.5))
    }
}

/// Finite minimum and maximum of a field, or `None` if it has no finite
/// samples.
pub fn field_range<V: ScalarFieldView + ?Sized>(view: &V) -> Option<(f32, f32)> {
    let mut range: Option<(f32, f32)> = None;
    for j in 0..view.rows() {
        for i in 0..view.cols() {
            let v = view.sample(i, j);
            if !v.is_finite() {
                continue;
            }
            range = Some(match range {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
    }
    range
}
