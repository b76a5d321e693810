//! Kernel dispatch and readback.

use std::path::PathBuf;
use std::ptr;

use opencl3::error_codes::ClError;
use opencl3::event::Event;
use opencl3::types::{cl_float, cl_int, CL_BLOCKING};

use fractalforge_core::{resolve_output_path, write_image, FractalVariant, RenderConfig};

use crate::buffers::IterationBuffers;
use crate::device::ClContext;
use crate::error::{RenderError, RenderResult};
use crate::program::FractalProgram;

/// Outcome of one successful render.
pub struct RenderStats {
    pub pixel_count: usize,
    /// Device-side kernel execution time, from the dispatch profiling
    /// event. `None` if the timestamps could not be queried.
    pub kernel_time_ms: Option<f64>,
    /// Where the image was written.
    pub output_path: PathBuf,
}

/// Drives one render at a time: bind arguments, dispatch, wait, read back,
/// encode. Owns the iteration buffers; borrows the context and program.
///
/// Concurrent renders through one `FractalRenderer` are unsupported, which
/// the `&mut self` receiver enforces.
pub struct FractalRenderer<'a> {
    context: &'a ClContext,
    program: &'a FractalProgram,
    buffers: Option<IterationBuffers>,
}

/// Work sizes for a 2-D dispatch: global size plus the optional explicit
/// local size.
///
/// Global size is (width, height), one work-item per pixel. The local size
/// is used only when both components are positive; it must then divide the
/// global size evenly in both dimensions. A mismatch is an error, never
/// silently corrected.
fn dispatch_geometry(cfg: &RenderConfig) -> RenderResult<([usize; 2], Option<[usize; 2]>)> {
    let global = [cfg.width as usize, cfg.height as usize];
    if cfg.local_size_x == 0 || cfg.local_size_y == 0 {
        return Ok((global, None));
    }
    let local = [cfg.local_size_x, cfg.local_size_y];
    if global[0] % local[0] != 0 || global[1] % local[1] != 0 {
        return Err(RenderError::Dispatch {
            reason: format!(
                "global size {}x{} is not evenly divisible by local size {}x{}",
                global[0], global[1], local[0], local[1]
            ),
        });
    }
    Ok((global, Some(local)))
}

/// Device execution time in milliseconds from a profiling event.
fn event_elapsed_ms(event: &Event) -> Option<f64> {
    let start = event.profiling_command_start().ok()?;
    let end = event.profiling_command_end().ok()?;
    Some((end.saturating_sub(start)) as f64 * 1e-6)
}

fn bind_err(source: ClError) -> RenderError {
    RenderError::ArgumentBinding { source }
}

impl<'a> FractalRenderer<'a> {
    pub fn new(context: &'a ClContext, program: &'a FractalProgram) -> Self {
        Self {
            context,
            program,
            buffers: None,
        }
    }

    /// Render one image: allocate buffers for the current configuration,
    /// dispatch the kernel, read the escape counts back, and write the
    /// image file. Any failure aborts the remaining steps and leaves no
    /// image behind.
    pub fn render(
        &mut self,
        cfg: &RenderConfig,
        variant: FractalVariant,
    ) -> RenderResult<RenderStats> {
        log::info!("Starting render: {}", variant.name());
        variant.describe(cfg);

        // Fresh buffers every render so sizing always matches the config.
        self.buffers = None;
        let mut buffers = IterationBuffers::new(self.context, cfg)?;

        let (global, local) = dispatch_geometry(cfg)?;

        let kernel = self.program.kernel();
        let (julia_re, julia_im) = variant.julia_constant();
        unsafe {
            kernel.set_arg(0, buffers.device()).map_err(bind_err)?;
            kernel
                .set_arg(1, &(cfg.width as cl_int))
                .map_err(bind_err)?;
            kernel
                .set_arg(2, &(cfg.height as cl_int))
                .map_err(bind_err)?;
            kernel
                .set_arg(3, &(cfg.center_x as cl_float))
                .map_err(bind_err)?;
            kernel
                .set_arg(4, &(cfg.center_y as cl_float))
                .map_err(bind_err)?;
            kernel
                .set_arg(5, &(cfg.zoom as cl_float))
                .map_err(bind_err)?;
            kernel
                .set_arg(6, &(cfg.max_iterations as cl_int))
                .map_err(bind_err)?;
            kernel
                .set_arg(7, &(julia_re as cl_float))
                .map_err(bind_err)?;
            kernel
                .set_arg(8, &(julia_im as cl_float))
                .map_err(bind_err)?;
            kernel
                .set_arg(9, &variant.julia_mode())
                .map_err(bind_err)?;
        }

        let local_ptr = match &local {
            Some(l) => l.as_ptr(),
            None => ptr::null(),
        };
        let kernel_event = unsafe {
            self.context
                .queue()
                .enqueue_nd_range_kernel(kernel.get(), 2, ptr::null(), global.as_ptr(), local_ptr, &[])
        }
        .map_err(|e| RenderError::Dispatch {
            reason: e.to_string(),
        })?;

        // Single synchronization point: block until the device is done.
        kernel_event.wait().map_err(|e| RenderError::Dispatch {
            reason: e.to_string(),
        })?;

        let kernel_time_ms = event_elapsed_ms(&kernel_event);
        if let Some(ms) = kernel_time_ms {
            log::info!("Fractal kernel: {ms:.3} ms");
        }

        let (device_buf, host) = buffers.parts_mut();
        unsafe {
            self.context
                .queue()
                .enqueue_read_buffer(device_buf, CL_BLOCKING, 0, host, &[])
        }
        .map_err(|source| RenderError::Readback { source })?;

        log::info!("Escape iterations computed ({} pixels)", buffers.len());

        let output_path = resolve_output_path(&cfg.output_path);
        write_image(cfg, buffers.host(), &output_path)?;
        log::info!("Wrote image to '{}'", output_path.display());

        let stats = RenderStats {
            pixel_count: buffers.len(),
            kernel_time_ms,
            output_path,
        };
        self.buffers = Some(buffers);
        Ok(stats)
    }

    /// Host-side escape counts from the most recent render, if any.
    pub fn iterations(&self) -> Option<&[cl_int]> {
        self.buffers.as_ref().map(|b| b.host())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32, lx: usize, ly: usize) -> RenderConfig {
        RenderConfig {
            width,
            height,
            local_size_x: lx,
            local_size_y: ly,
            ..Default::default()
        }
    }

    #[test]
    fn global_size_is_one_work_item_per_pixel() {
        let (global, local) = dispatch_geometry(&config(640, 480, 0, 0)).unwrap();
        assert_eq!(global, [640, 480]);
        assert_eq!(local, None);
    }

    #[test]
    fn explicit_local_size_is_passed_through() {
        let (global, local) = dispatch_geometry(&config(1024, 512, 16, 8)).unwrap();
        assert_eq!(global, [1024, 512]);
        assert_eq!(local, Some([16, 8]));
    }

    #[test]
    fn indivisible_local_size_fails_dispatch() {
        // 1080 is not evenly divisible by 16.
        let err = dispatch_geometry(&config(1920, 1080, 16, 16)).unwrap_err();
        assert!(matches!(err, RenderError::Dispatch { .. }));
    }

    #[test]
    fn single_zero_local_size_means_auto() {
        // validate() rejects this earlier; geometry itself treats any zero
        // component as device-chosen.
        let (_, local) = dispatch_geometry(&config(1920, 1080, 16, 0)).unwrap();
        assert_eq!(local, None);
    }
}
