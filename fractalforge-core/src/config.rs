//! Render configuration.
//!
//! `RenderConfig` is a plain immutable value: it is constructed once per
//! render invocation (normally by the CLI) and never mutated afterwards.

use thiserror::Error;

/// Default configuration values.
pub mod defaults {
    pub const WIDTH: u32 = 1920;
    pub const HEIGHT: u32 = 1080;
    pub const MAX_ITERATIONS: u32 = 1000;
    pub const CENTER_X: f64 = -0.5;
    pub const CENTER_Y: f64 = 0.0;
    pub const ZOOM: f64 = 1.0;
    pub const JULIA_REAL: f64 = -0.7;
    pub const JULIA_IMAG: f64 = 0.27015;
    /// Let OpenCL choose the work-group size.
    pub const LOCAL_SIZE_AUTO: usize = 0;
    pub const PALETTE: &str = "default";
    pub const OUTPUT_PATH: &str = "images/fractal.png";
}

/// Configuration for a single render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Maximum escape iterations per pixel.
    pub max_iterations: u32,
    /// "mandelbrot" or "julia"; anything else renders as Mandelbrot.
    pub fractal_type: String,
    /// Complex plane center, real part.
    pub center_x: f64,
    /// Complex plane center, imaginary part.
    pub center_y: f64,
    /// Zoom factor (1.0 = full default viewport).
    pub zoom: f64,
    /// Julia parameter c, real part.
    pub julia_real: f64,
    /// Julia parameter c, imaginary part.
    pub julia_imag: f64,
    /// Work-group size override in X (0 = let OpenCL decide).
    pub local_size_x: usize,
    /// Work-group size override in Y (0 = let OpenCL decide).
    pub local_size_y: usize,
    /// Palette name; unrecognized names fall back to "default".
    pub palette: String,
    /// Output image path. A bare filename is rooted under `images/`.
    pub output_path: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            max_iterations: defaults::MAX_ITERATIONS,
            fractal_type: "mandelbrot".to_string(),
            center_x: defaults::CENTER_X,
            center_y: defaults::CENTER_Y,
            zoom: defaults::ZOOM,
            julia_real: defaults::JULIA_REAL,
            julia_imag: defaults::JULIA_IMAG,
            local_size_x: defaults::LOCAL_SIZE_AUTO,
            local_size_y: defaults::LOCAL_SIZE_AUTO,
            palette: defaults::PALETTE.to_string(),
            output_path: defaults::OUTPUT_PATH.to_string(),
        }
    }
}

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("max iterations must be at least 1")]
    InvalidIterations,

    #[error("zoom must be positive and finite")]
    InvalidZoom,

    #[error("local work-group sizes must be both zero or both positive, got {x}x{y}")]
    InvalidLocalSize { x: usize, y: usize },
}

impl RenderConfig {
    /// Number of pixels in the output image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check the configuration contract.
    ///
    /// Downstream stages treat violations as caller bugs, so the CLI runs
    /// this before handing the config to the pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_iterations < 1 {
            return Err(ConfigError::InvalidIterations);
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(ConfigError::InvalidZoom);
        }
        let explicit = [self.local_size_x, self.local_size_y];
        if explicit.iter().any(|&s| s > 0) && explicit.iter().any(|&s| s == 0) {
            return Err(ConfigError::InvalidLocalSize {
                x: self.local_size_x,
                y: self.local_size_y,
            });
        }
        Ok(())
    }
}
