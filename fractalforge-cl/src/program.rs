//! Kernel program loading and compilation.

use std::fs;
use std::path::Path;

use opencl3::kernel::Kernel;
use opencl3::program::Program;

use crate::device::ClContext;
use crate::error::{RenderError, RenderResult};

/// Kernel source file name under the kernels root.
pub const KERNEL_FILE: &str = "mandelbrot.cl";

/// Entry point resolved from the compiled program.
pub const KERNEL_ENTRY: &str = "mandelbrot_iterations";

/// A compiled program with its resolved entry point.
///
/// Bound to the context and device it was built against; keep it inside the
/// [`ClContext`]'s lifetime. The kernel field precedes the program so it is
/// released first.
pub struct FractalProgram {
    kernel: Kernel,
    _program: Program,
}

impl FractalProgram {
    /// Read `<kernels_root>/mandelbrot.cl`, build it for the selected
    /// device, and resolve the `mandelbrot_iterations` entry point.
    ///
    /// A failed build surfaces the full compiler log in
    /// [`RenderError::Compile`].
    pub fn load(kernels_root: &Path, context: &ClContext) -> RenderResult<Self> {
        let path = kernels_root.join(KERNEL_FILE);
        let source = fs::read_to_string(&path).map_err(|source| RenderError::SourceNotFound {
            path: path.clone(),
            source,
        })?;

        let program = Program::create_and_build_from_source(context.context(), &source, "")
            .map_err(|log| RenderError::Compile { log })?;

        let kernel = Kernel::create(&program, KERNEL_ENTRY).map_err(|source| {
            RenderError::KernelNotFound {
                name: KERNEL_ENTRY,
                source,
            }
        })?;

        log::info!("Compiled kernel '{}' from '{}'", KERNEL_ENTRY, path.display());

        Ok(Self {
            kernel,
            _program: program,
        })
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }
}
