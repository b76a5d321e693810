//! OpenCL platform/device selection and context/queue creation.

use opencl3::command_queue::{CommandQueue, CL_QUEUE_PROFILING_ENABLE};
use opencl3::context::Context;
use opencl3::device::{Device, CL_DEVICE_TYPE_CPU, CL_DEVICE_TYPE_GPU};
use opencl3::platform::get_platforms;

use crate::error::{RenderError, RenderResult};

/// Read-only device facts for diagnostics.
#[derive(Debug, Clone)]
pub struct DeviceDiagnostics {
    pub name: String,
    pub vendor: String,
    pub max_work_group_size: usize,
    pub image_support: bool,
}

/// Owns the selected OpenCL platform, device, context, and command queue.
///
/// Downstream objects (program, kernel, buffers) borrow this context and
/// must not outlive it. Fields are declared dependents-first so drop order
/// releases the queue before the context.
pub struct ClContext {
    queue: CommandQueue,
    context: Context,
    device: Device,
}

impl ClContext {
    /// Select a device and create its context and profiling-enabled queue.
    ///
    /// Takes the first available platform and searches it for a GPU, then a
    /// CPU device. Fails with [`RenderError::DeviceUnavailable`] when
    /// nothing usable exists.
    pub fn new() -> RenderResult<Self> {
        let platforms = get_platforms().map_err(|_| RenderError::DeviceUnavailable)?;
        let platform = platforms
            .into_iter()
            .next()
            .ok_or(RenderError::DeviceUnavailable)?;

        let mut device_id = None;
        for device_type in [CL_DEVICE_TYPE_GPU, CL_DEVICE_TYPE_CPU] {
            if let Ok(ids) = platform.get_devices(device_type) {
                if let Some(&id) = ids.first() {
                    device_id = Some(id);
                    break;
                }
            }
        }
        let device = Device::new(device_id.ok_or(RenderError::DeviceUnavailable)?);

        log::info!(
            "Selected OpenCL device: {} ({})",
            device.name().unwrap_or_default().trim(),
            device.vendor().unwrap_or_default().trim(),
        );

        let context =
            Context::from_device(&device).map_err(|source| RenderError::ResourceCreation {
                what: "context",
                source,
            })?;

        // OpenCL 1.2 queue API for macOS compatibility, with profiling on so
        // dispatch events carry start/end timestamps.
        #[allow(deprecated)]
        let queue = CommandQueue::create_default(&context, CL_QUEUE_PROFILING_ENABLE).map_err(
            |source| RenderError::ResourceCreation {
                what: "command queue",
                source,
            },
        )?;

        Ok(Self {
            queue,
            context,
            device,
        })
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Query device facts. Read-only; never touches render state.
    pub fn diagnostics(&self) -> DeviceDiagnostics {
        DeviceDiagnostics {
            name: self.device.name().unwrap_or_default().trim().to_string(),
            vendor: self.device.vendor().unwrap_or_default().trim().to_string(),
            max_work_group_size: self.device.max_work_group_size().unwrap_or(1),
            image_support: self.device.image_support().unwrap_or(0) != 0,
        }
    }

    /// Log the device diagnostics.
    pub fn log_diagnostics(&self) {
        let d = self.diagnostics();
        log::info!("Device: {} ({})", d.name, d.vendor);
        log::info!("  Max work-group size: {}", d.max_work_group_size);
        log::info!(
            "  Image support      : {}",
            if d.image_support { "yes" } else { "no" }
        );
    }
}
