//! Host-side types for the fractalforge renderer.
//!
//! This crate contains everything that does not touch OpenCL: the render
//! configuration, the fractal variant tags, palette mapping, and image
//! encoding. The compute pipeline lives in `fractalforge-cl`.

pub mod config;
pub mod output;
pub mod palette;
pub mod variant;

pub use config::{ConfigError, RenderConfig};
pub use output::{resolve_output_path, write_image, OutputError};
pub use palette::{iteration_to_rgb, Palette};
pub use variant::FractalVariant;
