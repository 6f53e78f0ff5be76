//! Synthetic scalar fields for contour tests and benchmarks.
//!
//! Every generator returns a row-major `Vec<f32>` of `width * height`
//! samples, where sample `(col, row)` lives at `row * width + col`.

/// Linear ramp from 0 at the left column to `max` at the right column.
///
/// Every level strictly inside `(0, max)` produces one vertical contour.
pub fn create_linear_gradient_grid(width: usize, height: usize, max: f32) -> Vec<f32> {
    let span = width.saturating_sub(1).max(1) as f32;
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            data.push(col as f32 / span * max);
        }
    }
    data
}

/// Cone peaking at `peak` in the grid centre and falling off linearly with
/// distance. Levels between the rim and the peak form closed rings.
pub fn create_peak_grid(width: usize, height: usize, peak: f32) -> Vec<f32> {
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);

    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f32 - cx;
            let dy = row as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            data.push(peak * (1.0 - dist / max_dist));
        }
    }
    data
}

/// Checkerboard of `high` and `low` samples: every cell is a saddle for any
/// level in `(low, high]`.
pub fn create_checkerboard_grid(width: usize, height: usize, low: f32, high: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(if (col + row) % 2 == 0 { high } else { low });
        }
    }
    data
}

/// Overlapping sine waves, similar to an animated wave mesh frame.
pub fn create_wave_grid(width: usize, height: usize, phase: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let fx = col as f32 / width.max(1) as f32;
            let fy = row as f32 / height.max(1) as f32;

            let v1 = (fx * std::f32::consts::PI * 4.0 + phase).sin() * 20.0;
            let v2 = (fy * std::f32::consts::PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * std::f32::consts::PI * 2.0 - phase).sin() * 10.0;

            data.push(50.0 + v1 + v2 + v3);
        }
    }
    data
}

/// Deterministic pseudo-random field in `[0, 100)`.
pub fn create_hash_noise_grid(width: usize, height: usize, seed: u32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            data.push((hash % 10_000) as f32 / 100.0);
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Creates a grid with NaN values at specified positions.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `nan_positions` - List of (col, row) positions that should be NaN
///
/// # Returns
///
/// A `Vec<f32>` with NaN at specified positions, zeros elsewhere.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f32> {
    let mut data = vec![0.0f32; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f32::NAN;
        }
    }
    data
}

/// Render a row-major grid in the whitespace text format, one row per line.
pub fn grid_to_text(width: usize, data: &[f32]) -> String {
    data.chunks(width.max(1))
        .map(|row| {
            row.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
