//! Fractal variant tags.
//!
//! Both variants run the same compiled kernel; the tag only selects the
//! kernel's julia branch and, for Julia, carries the constant c. Adding a
//! new fractal family means adding a tag here and a matching branch in the
//! kernel, not a new dispatch path.

use crate::config::RenderConfig;

/// Which fractal to render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FractalVariant {
    Mandelbrot,
    /// Julia set with constant c = re + i*im.
    Julia { re: f64, im: f64 },
}

impl FractalVariant {
    /// Derive the variant from a render configuration.
    ///
    /// Unrecognized fractal types render as Mandelbrot.
    pub fn from_config(cfg: &RenderConfig) -> Self {
        if cfg.fractal_type == "julia" {
            FractalVariant::Julia {
                re: cfg.julia_real,
                im: cfg.julia_imag,
            }
        } else {
            FractalVariant::Mandelbrot
        }
    }

    /// Human-readable name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            FractalVariant::Mandelbrot => "Mandelbrot",
            FractalVariant::Julia { .. } => "Julia",
        }
    }

    /// Value of the kernel's `julia_mode` argument.
    pub fn julia_mode(&self) -> i32 {
        match self {
            FractalVariant::Mandelbrot => 0,
            FractalVariant::Julia { .. } => 1,
        }
    }

    /// The Julia constant c as (re, im). Zero for Mandelbrot, where the
    /// kernel ignores the corresponding arguments.
    pub fn julia_constant(&self) -> (f64, f64) {
        match self {
            FractalVariant::Mandelbrot => (0.0, 0.0),
            FractalVariant::Julia { re, im } => (*re, *im),
        }
    }

    /// Log the resolved render parameters. Diagnostics only; has no effect
    /// on dispatch.
    pub fn describe(&self, cfg: &RenderConfig) {
        match self {
            FractalVariant::Mandelbrot => {
                log::info!(
                    "Mandelbrot: {}x{}, max_iterations={}, center=({}, {}), zoom={}",
                    cfg.width,
                    cfg.height,
                    cfg.max_iterations,
                    cfg.center_x,
                    cfg.center_y,
                    cfg.zoom,
                );
            }
            FractalVariant::Julia { re, im } => {
                log::info!(
                    "Julia: {}x{}, max_iterations={}, center=({}, {}), zoom={}, c=({}, {})",
                    cfg.width,
                    cfg.height,
                    cfg.max_iterations,
                    cfg.center_x,
                    cfg.center_y,
                    cfg.zoom,
                    re,
                    im,
                );
            }
        }
    }
}
