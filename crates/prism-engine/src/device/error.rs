use std::fmt;

/// High-level response after a surface acquisition error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// GPU memory could not be allocated for a buffer.
///
/// Raised while uploading meshes during scene setup. Not retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceResourceError {
    /// Zero-length allocation was requested.
    EmptyBuffer { label: String },
    /// The request exceeds what the device can hold in a single buffer.
    BufferTooLarge { label: String, size: u64, max: u64 },
}

impl fmt::Display for DeviceResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceResourceError::EmptyBuffer { label } => {
                write!(f, "refusing to allocate empty buffer `{label}`")
            }
            DeviceResourceError::BufferTooLarge { label, size, max } => write!(
                f,
                "buffer `{label}` needs {size} bytes, device allows at most {max}"
            ),
        }
    }
}

impl std::error::Error for DeviceResourceError {}
