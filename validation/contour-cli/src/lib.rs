//! Verification harness around the contour engine: load a grid, run a job,
//! and render the result as text or JSON.

pub mod config;

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use contour::{
    classify, levels_for_field, ActiveEdges, Corners, Grid, Polyline, Polylines, Position,
    ScalarFieldView, Segment, Segments,
};
use tracing::info;

pub use config::{GridFormat, JobConfig, OutputFormat, Overrides};

/// Read a grid file.
pub fn load_grid(path: &Path, format: GridFormat) -> anyhow::Result<Grid> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read grid file {}", path.display()))?;
    let grid = match format {
        GridFormat::Text => Grid::parse_text(&content),
        GridFormat::Json => Grid::from_json(&content),
    }
    .with_context(|| format!("failed to parse grid file {}", path.display()))?;
    Ok(grid)
}

/// Run a job end to end and return the rendered output.
pub fn run_job(job: &JobConfig) -> anyhow::Result<String> {
    job.validate()?;

    let grid = load_grid(&job.grid, job.grid_format())?;
    info!(
        grid = %job.grid.display(),
        cols = grid.cols(),
        rows = grid.rows(),
        embedding = ?job.contour.embedding,
        "Loaded grid"
    );

    let output = job.contour.run(&grid)?;
    info!(
        levels = output.levels.len(),
        segments = output.stats.segments,
        saddle_cells = output.stats.saddle_cells,
        skipped_cells = output.stats.skipped_cells,
        "Extraction complete"
    );

    let rendered = match job.output {
        OutputFormat::Text => format_segments(&output.segments),
        OutputFormat::Json => serde_json::to_string_pretty(&output)?,
        OutputFormat::Polylines => format_polylines(&output.polylines()),
    };
    Ok(rendered)
}

/// Levels spaced by `interval` over a grid's finite range, one per line.
pub fn run_levels(path: &Path, format: GridFormat, interval: f32) -> anyhow::Result<String> {
    let grid = load_grid(path, format)?;
    let levels = levels_for_field(&grid, interval)?;
    Ok(levels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Case number and crossed edges for a single cell.
pub fn describe_case(corners: [f32; 4], level: f32) -> String {
    let [tl, tr, br, bl] = corners;
    let case = classify(&Corners::new(tl, tr, br, bl), level);
    let edges = match case.active_edges() {
        ActiveEdges::None => "none".to_string(),
        ActiveEdges::Pair(a, b) => format!("{}+{}", a, b),
        ActiveEdges::Saddle => "all (saddle)".to_string(),
    };
    format!("case {}: {}", case.bits(), edges)
}

fn push_coords<P: Position>(line: &mut String, point: &P) {
    for c in point.coords() {
        let _ = write!(line, " {}", c);
    }
}

fn segment_line<P: Position>(segment: &Segment<P>) -> String {
    let mut line = segment.level_index.to_string();
    push_coords(&mut line, &segment.p0);
    push_coords(&mut line, &segment.p1);
    line
}

fn polyline_line<P: Position>(polyline: &Polyline<P>) -> String {
    let mut line = format!(
        "{} {}",
        polyline.level_index,
        if polyline.closed { "closed" } else { "open" }
    );
    for p in &polyline.points {
        push_coords(&mut line, p);
    }
    line
}

/// One line per segment: `level_index x0 y0 [z0] x1 y1 [z1]`.
pub fn format_segments(segments: &Segments) -> String {
    let lines: Vec<String> = match segments {
        Segments::Planar(s) => s.iter().map(segment_line).collect(),
        Segments::Elevation(s) => s.iter().map(segment_line).collect(),
    };
    lines.join("\n")
}

/// One line per polyline: `level_index open|closed x y [z] ...`.
pub fn format_polylines(polylines: &Polylines) -> String {
    let lines: Vec<String> = match polylines {
        Polylines::Planar(p) => p.iter().map(polyline_line).collect(),
        Polylines::Elevation(p) => p.iter().map(polyline_line).collect(),
    };
    lines.join("\n")
}
