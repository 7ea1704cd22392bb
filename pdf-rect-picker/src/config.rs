use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::geometry::ZoomState;

/// Command-line options.
#[derive(Debug, Clone, Parser)]
#[command(name = "pdf-rect-picker", version, about = "Pick rectangles on PDF pages")]
pub struct Args {
    /// PDF file to open on startup
    pub path: Option<PathBuf>,

    /// Smallest allowed zoom factor
    #[arg(long, default_value_t = ZoomLimits::DEFAULT_MIN)]
    pub min_zoom: f32,

    /// Largest allowed zoom factor
    #[arg(long, default_value_t = ZoomLimits::DEFAULT_MAX)]
    pub max_zoom: f32,

    /// Multiplier applied by each zoom in / zoom out step
    #[arg(long, default_value_t = ZoomLimits::DEFAULT_STEP)]
    pub zoom_step: f32,

    /// Log filter directives, used when RUST_LOG is not set
    #[arg(long, default_value = "pdf_rect_picker=debug,info")]
    pub log_filter: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("zoom limit {0} must be positive and finite")]
    InvalidZoomLimit(f32),

    #[error("minimum zoom {min} is larger than maximum zoom {max}")]
    InvertedZoomRange { min: f32, max: f32 },

    #[error("zoom step {0} must be greater than 1")]
    InvalidZoomStep(f32),

    #[error("default zoom 1.0 must lie within {min}..={max}")]
    DefaultOutOfRange { min: f32, max: f32 },
}

/// Validated zoom bounds and step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    min: f32,
    max: f32,
    step: f32,
}

impl ZoomLimits {
    pub const DEFAULT_MIN: f32 = 0.2;
    pub const DEFAULT_MAX: f32 = 6.0;
    pub const DEFAULT_STEP: f32 = 1.25;

    pub fn new(min: f32, max: f32, step: f32) -> Result<Self, ConfigError> {
        for limit in [min, max] {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(ConfigError::InvalidZoomLimit(limit));
            }
        }
        if min > max {
            return Err(ConfigError::InvertedZoomRange { min, max });
        }
        if !step.is_finite() || step <= 1.0 {
            return Err(ConfigError::InvalidZoomStep(step));
        }
        if !(min..=max).contains(&ZoomState::DEFAULT.factor()) {
            return Err(ConfigError::DefaultOutOfRange { min, max });
        }
        Ok(Self { min, max, step })
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Bring any requested factor inside the limits.
    pub fn clamp(&self, factor: f32) -> ZoomState {
        let factor = if factor.is_nan() { self.min } else { factor };
        ZoomState::new(factor.clamp(self.min, self.max))
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
            step: Self::DEFAULT_STEP,
        }
    }
}

impl Args {
    pub fn zoom_limits(&self) -> Result<ZoomLimits, ConfigError> {
        ZoomLimits::new(self.min_zoom, self.max_zoom, self.zoom_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_into_default_limits() {
        let args = Args::try_parse_from(["pdf-rect-picker"]).unwrap();
        assert_eq!(args.path, None);
        assert_eq!(args.zoom_limits(), Ok(ZoomLimits::default()));
        assert_eq!(args.log_filter, "pdf_rect_picker=debug,info");
    }

    #[test]
    fn parses_path_and_zoom_overrides() {
        let args = Args::try_parse_from([
            "pdf-rect-picker",
            "--min-zoom",
            "0.5",
            "--max-zoom",
            "3",
            "--zoom-step",
            "1.5",
            "doc.pdf",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("doc.pdf")));
        let limits = args.zoom_limits().unwrap();
        assert_eq!(limits.step(), 1.5);
        assert_eq!(limits.clamp(10.0), ZoomState::new(3.0));
        assert_eq!(limits.clamp(0.1), ZoomState::new(0.5));
    }

    #[test]
    fn rejects_bad_limits() {
        assert_eq!(ZoomLimits::new(0.0, 2.0, 1.25), Err(ConfigError::InvalidZoomLimit(0.0)));
        assert_eq!(
            ZoomLimits::new(3.0, 2.0, 1.25),
            Err(ConfigError::InvertedZoomRange { min: 3.0, max: 2.0 })
        );
        assert_eq!(ZoomLimits::new(0.5, 2.0, 1.0), Err(ConfigError::InvalidZoomStep(1.0)));
        assert_eq!(
            ZoomLimits::new(1.5, 2.0, 1.25),
            Err(ConfigError::DefaultOutOfRange { min: 1.5, max: 2.0 })
        );
    }

    #[test]
    fn clamp_handles_nan() {
        assert_eq!(ZoomLimits::default().clamp(f32::NAN), ZoomState::new(0.2));
    }
}
