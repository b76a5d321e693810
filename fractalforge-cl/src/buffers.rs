//! Device and host iteration buffers.

use std::ptr;

use opencl3::memory::{Buffer, CL_MEM_WRITE_ONLY};
use opencl3::types::cl_int;

use fractalforge_core::RenderConfig;

use crate::device::ClContext;
use crate::error::{RenderError, RenderResult};

/// One `cl_int` escape count per pixel: a write-only device buffer plus a
/// zero-filled host mirror of the same length.
///
/// Buffers are created sized to one configuration and never resized; a new
/// configuration gets a fresh `IterationBuffers`.
pub struct IterationBuffers {
    device: Buffer<cl_int>,
    host: Vec<cl_int>,
}

impl IterationBuffers {
    /// Allocate buffers for `width * height` pixels.
    ///
    /// Zero dimensions are a caller-contract violation prevented by
    /// `RenderConfig::validate`.
    pub fn new(context: &ClContext, cfg: &RenderConfig) -> RenderResult<Self> {
        let pixel_count = cfg.pixel_count();
        let device = unsafe {
            Buffer::<cl_int>::create(
                context.context(),
                CL_MEM_WRITE_ONLY,
                pixel_count,
                ptr::null_mut(),
            )
        }
        .map_err(|source| RenderError::Allocation { source })?;

        Ok(Self {
            device,
            host: vec![0; pixel_count],
        })
    }

    pub fn device(&self) -> &Buffer<cl_int> {
        &self.device
    }

    pub fn host(&self) -> &[cl_int] {
        &self.host
    }

    /// Borrow the device buffer and host mirror together, for readback.
    pub fn parts_mut(&mut self) -> (&Buffer<cl_int>, &mut [cl_int]) {
        (&self.device, &mut self.host)
    }

    pub fn len(&self) -> usize {
        self.host.len()
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_empty()
    }
}
