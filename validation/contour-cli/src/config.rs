//! Job configuration loading and management.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use contour::{ContourConfig, EmbeddingKind, Spacing};
use serde::{Deserialize, Serialize};

/// One extraction job, loaded from YAML or assembled from flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Path to the grid file.
    pub grid: PathBuf,
    /// Grid file format; inferred from the extension when absent.
    #[serde(default)]
    pub format: Option<GridFormat>,
    #[serde(flatten)]
    pub contour: ContourConfig,
    #[serde(default)]
    pub output: OutputFormat,
}

/// Grid file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GridFormat {
    /// One row per line, whitespace or comma separated.
    Text,
    /// `{ "cols", "rows", "values" }`.
    Json,
}

impl GridFormat {
    /// `.json` files are JSON, everything else is text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => GridFormat::Json,
            _ => GridFormat::Text,
        }
    }
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `level_index x0 y0 [z0] x1 y1 [z1]`, one segment per line.
    #[default]
    Text,
    /// Levels, stats and segments as one JSON document.
    Json,
    /// Chained polylines, one per line.
    Polylines,
}

/// Command-line values that override a job file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub grid: Option<PathBuf>,
    pub format: Option<GridFormat>,
    pub levels: Option<Vec<f32>>,
    pub interval: Option<f32>,
    pub embedding: Option<EmbeddingKind>,
    pub spacing_x: Option<f32>,
    pub spacing_y: Option<f32>,
    pub parallel: bool,
    pub smoothing_passes: Option<u32>,
    pub output: Option<OutputFormat>,
}

impl JobConfig {
    /// A job over `grid` with default settings.
    pub fn for_grid(grid: impl Into<PathBuf>) -> Self {
        Self {
            grid: grid.into(),
            format: None,
            contour: ContourConfig::default(),
            output: OutputFormat::default(),
        }
    }

    /// Load a job from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: JobConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Build a job from flags alone, or from a job file with flags applied
    /// on top.
    pub fn resolve(job_file: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Self> {
        let mut config = match (job_file, &overrides.grid) {
            (Some(path), _) => Self::from_file(path)?,
            (None, Some(grid)) => Self::for_grid(grid.clone()),
            (None, None) => anyhow::bail!("either --job or --grid must be given"),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(grid) = &overrides.grid {
            self.grid = grid.clone();
        }
        if overrides.format.is_some() {
            self.format = overrides.format;
        }
        if let Some(levels) = &overrides.levels {
            self.contour.levels = levels.clone();
        }
        if overrides.interval.is_some() {
            self.contour.interval = overrides.interval;
        }
        if let Some(embedding) = overrides.embedding {
            self.contour.embedding = embedding;
        }
        if let Some(x) = overrides.spacing_x {
            self.contour.spacing.x = x;
        }
        if let Some(y) = overrides.spacing_y {
            self.contour.spacing.y = y;
        }
        if overrides.parallel {
            self.contour.parallel = true;
        }
        if let Some(passes) = overrides.smoothing_passes {
            self.contour.smoothing_passes = passes;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.contour.levels.is_empty() && self.contour.interval.is_none() {
            anyhow::bail!("no levels: give explicit levels or an interval");
        }
        if self.contour.levels.iter().any(|l| !l.is_finite()) {
            anyhow::bail!("levels must be finite");
        }
        self.contour.validate()?;
        Ok(())
    }

    pub fn grid_format(&self) -> GridFormat {
        self.format.unwrap_or_else(|| GridFormat::from_path(&self.grid))
    }

    pub fn spacing(&self) -> Spacing {
        self.contour.spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_job() {
        let yaml = r#"
grid: terrain.json
levels: [10.0, 20.0]
embedding: elevation
spacing: { x: 5.0, y: 5.0 }
output: polylines
"#;
        let job: JobConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(job.grid_format(), GridFormat::Json);
        assert_eq!(job.contour.levels, vec![10.0, 20.0]);
        assert_eq!(job.contour.embedding, EmbeddingKind::Elevation);
        assert_eq!(job.spacing(), Spacing::uniform(5.0));
        assert_eq!(job.output, OutputFormat::Polylines);
        assert!(job.validate().is_ok());
    }

    #[test]
    fn test_overrides_win() {
        let mut job = JobConfig::for_grid("a.txt");
        job.apply(&Overrides {
            levels: Some(vec![1.0]),
            spacing_y: Some(2.0),
            parallel: true,
            output: Some(OutputFormat::Json),
            ..Overrides::default()
        });
        assert_eq!(job.contour.levels, vec![1.0]);
        assert_eq!(job.spacing(), Spacing::new(1.0, 2.0));
        assert!(job.contour.parallel);
        assert_eq!(job.output, OutputFormat::Json);
        assert_eq!(job.grid_format(), GridFormat::Text);
    }

    #[test]
    fn test_validate_requires_levels() {
        let job = JobConfig::for_grid("a.txt");
        assert!(job.validate().is_err());
    }

    #[test]
    fn test_resolve_without_grid_fails() {
        assert!(JobConfig::resolve(None, &Overrides::default()).is_err());
    }
}
