//! Render pipeline error types.

use std::path::PathBuf;

use opencl3::error_codes::ClError;
use thiserror::Error;

use fractalforge_core::OutputError;

/// Failure at any stage of the render pipeline.
///
/// Every stage fails fast: a failure aborts the rest of the pipeline and no
/// partial image is written. None of these are retried.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no OpenCL platform or device available")]
    DeviceUnavailable,

    #[error("failed to create OpenCL {what}: {source}")]
    ResourceCreation {
        what: &'static str,
        #[source]
        source: ClError,
    },

    #[error("failed to read kernel source '{path}': {source}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("kernel program build failed:\n{log}")]
    Compile { log: String },

    #[error("kernel entry point '{name}' not found: {source}")]
    KernelNotFound {
        name: &'static str,
        #[source]
        source: ClError,
    },

    #[error("failed to allocate device iteration buffer: {source}")]
    Allocation {
        #[source]
        source: ClError,
    },

    #[error("failed to bind kernel arguments: {source}")]
    ArgumentBinding {
        #[source]
        source: ClError,
    },

    #[error("kernel dispatch failed: {reason}")]
    Dispatch { reason: String },

    #[error("failed to read back iteration buffer: {source}")]
    Readback {
        #[source]
        source: ClError,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type RenderResult<T> = Result<T, RenderError>;
