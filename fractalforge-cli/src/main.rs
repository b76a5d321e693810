//! fractalforge - OpenCL fractal renderer.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use fractalforge_cl::{ClContext, FractalProgram, FractalRenderer};
use fractalforge_core::config::defaults;
use fractalforge_core::{resolve_output_path, FractalVariant, RenderConfig};

#[derive(Parser, Debug)]
#[command(name = "fractalforge", version, about = "OpenCL Mandelbrot/Julia renderer")]
struct Args {
    /// Fractal type: mandelbrot or julia
    #[arg(long = "type", default_value = "mandelbrot")]
    fractal_type: String,

    /// Image width in pixels
    #[arg(long, default_value_t = defaults::WIDTH)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = defaults::HEIGHT)]
    height: u32,

    /// Max escape iterations
    #[arg(long, default_value_t = defaults::MAX_ITERATIONS)]
    iterations: u32,

    /// Complex plane center as two values: real imag
    #[arg(long, num_args = 2, value_names = ["REAL", "IMAG"],
          default_values_t = [defaults::CENTER_X, defaults::CENTER_Y],
          allow_hyphen_values = true)]
    center: Vec<f64>,

    /// Zoom factor
    #[arg(long, default_value_t = defaults::ZOOM)]
    zoom: f64,

    /// Julia parameter real part
    #[arg(long, default_value_t = defaults::JULIA_REAL, allow_hyphen_values = true)]
    julia_real: f64,

    /// Julia parameter imaginary part
    #[arg(long, default_value_t = defaults::JULIA_IMAG, allow_hyphen_values = true)]
    julia_imag: f64,

    /// Work-group size in X (0 = let OpenCL decide)
    #[arg(long, default_value_t = defaults::LOCAL_SIZE_AUTO)]
    local_size_x: usize,

    /// Work-group size in Y (0 = let OpenCL decide)
    #[arg(long, default_value_t = defaults::LOCAL_SIZE_AUTO)]
    local_size_y: usize,

    /// Color palette: default, sunset, or neon
    #[arg(long, default_value = defaults::PALETTE)]
    palette: String,

    /// Output image path (.png or .ppm); bare filenames land in images/
    #[arg(long, default_value = defaults::OUTPUT_PATH)]
    output: String,

    /// Directory holding mandelbrot.cl
    #[arg(long, default_value = "kernels")]
    kernels_root: PathBuf,
}

impl Args {
    fn into_config(self) -> (RenderConfig, PathBuf) {
        let cfg = RenderConfig {
            width: self.width,
            height: self.height,
            max_iterations: self.iterations,
            fractal_type: self.fractal_type,
            center_x: self.center[0],
            center_y: self.center[1],
            zoom: self.zoom,
            julia_real: self.julia_real,
            julia_imag: self.julia_imag,
            local_size_x: self.local_size_x,
            local_size_y: self.local_size_y,
            palette: self.palette,
            output_path: self.output,
        };
        (cfg, self.kernels_root)
    }
}

fn log_config_summary(cfg: &RenderConfig) {
    log::info!("Render configuration:");
    log::info!("  Type       : {}", cfg.fractal_type);
    log::info!("  Size       : {}x{}", cfg.width, cfg.height);
    log::info!("  Iterations : {}", cfg.max_iterations);
    log::info!("  Center     : ({}, {})", cfg.center_x, cfg.center_y);
    log::info!("  Zoom       : {}", cfg.zoom);
    log::info!("  Palette    : {}", cfg.palette);
    log::info!("  Output     : {}", cfg.output_path);
}

fn run(cfg: &RenderConfig, kernels_root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    cfg.validate()?;
    log_config_summary(cfg);

    // The encoder never creates directories; make sure the target exists.
    let resolved = resolve_output_path(&cfg.output_path);
    if let Some(parent) = resolved.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let context = ClContext::new()?;
    context.log_diagnostics();

    let program = FractalProgram::load(kernels_root, &context)?;

    let mut renderer = FractalRenderer::new(&context, &program);
    let stats = renderer.render(cfg, FractalVariant::from_config(cfg))?;

    if let Some(ms) = stats.kernel_time_ms {
        log::info!(
            "Rendered {} pixels in {ms:.3} ms of device time",
            stats.pixel_count
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (cfg, kernels_root) = Args::parse().into_config();
    match run(&cfg, &kernels_root) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
