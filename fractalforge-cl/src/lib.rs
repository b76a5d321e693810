//! OpenCL render pipeline: device selection, kernel compilation, buffer
//! management, and dispatch.

mod buffers;
mod device;
mod error;
mod program;
mod renderer;
#[cfg(test)]
mod tests;

pub use buffers::IterationBuffers;
pub use device::{ClContext, DeviceDiagnostics};
pub use error::{RenderError, RenderResult};
pub use program::{FractalProgram, KERNEL_ENTRY, KERNEL_FILE};
pub use renderer::{FractalRenderer, RenderStats};
