//! Image encoding: iteration counts -> PPM or PNG file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::RenderConfig;
use crate::palette::{iteration_to_rgb, Palette};

/// Directory that bare output filenames are rooted under.
pub const OUTPUT_DIR: &str = "images";

/// Image writing failures.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("iteration buffer has {actual} entries but the image needs {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("failed to write image '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG '{path}': {source}")]
    Png {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Resolve the final output path.
///
/// A bare filename (no directory separators, not absolute) lands under
/// [`OUTPUT_DIR`]; any other path is used verbatim.
pub fn resolve_output_path(path: &str) -> PathBuf {
    let bare = !path.is_empty()
        && !path.contains('/')
        && !path.contains('\\')
        && !Path::new(path).is_absolute();
    if bare {
        Path::new(OUTPUT_DIR).join(path)
    } else {
        PathBuf::from(path)
    }
}

/// Encode the iteration counts as an image file at `path`.
///
/// The format is chosen by suffix: `.png` writes PNG via the image codec,
/// anything else writes binary PPM (P6).
pub fn write_image(
    cfg: &RenderConfig,
    iterations: &[i32],
    path: &Path,
) -> Result<(), OutputError> {
    let expected = cfg.pixel_count();
    if iterations.len() != expected {
        return Err(OutputError::SizeMismatch {
            expected,
            actual: iterations.len(),
        });
    }

    if path.to_string_lossy().ends_with(".png") {
        write_png(cfg, iterations, path)
    } else {
        write_ppm(cfg, iterations, path)
    }
}

/// Interleaved RGB bytes, row-major top-to-bottom, stride `width * 3`.
fn rgb_buffer(cfg: &RenderConfig, iterations: &[i32]) -> Vec<u8> {
    let palette = Palette::parse(&cfg.palette);
    let mut rgb = Vec::with_capacity(iterations.len() * 3);
    for &iter in iterations {
        let (r, g, b) = iteration_to_rgb(iter, cfg.max_iterations, palette);
        rgb.extend_from_slice(&[r, g, b]);
    }
    rgb
}

fn write_ppm(cfg: &RenderConfig, iterations: &[i32], path: &Path) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write!(out, "P6\n{} {}\n255\n", cfg.width, cfg.height).map_err(io_err)?;
    out.write_all(&rgb_buffer(cfg, iterations)).map_err(io_err)?;
    out.flush().map_err(io_err)
}

fn write_png(cfg: &RenderConfig, iterations: &[i32], path: &Path) -> Result<(), OutputError> {
    image::save_buffer_with_format(
        path,
        &rgb_buffer(cfg, iterations),
        cfg.width,
        cfg.height,
        image::ExtendedColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|source| OutputError::Png {
        path: path.to_path_buf(),
        source,
    })
}
