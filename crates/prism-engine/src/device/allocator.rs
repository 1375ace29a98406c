use wgpu::util::DeviceExt;

use crate::mesh::BufferAllocator;

use super::DeviceResourceError;

/// Mesh buffer allocator backed by a wgpu device.
///
/// Every allocation becomes its own immutable `wgpu::Buffer`, initialized from
/// the provided bytes at creation time.
pub struct WgpuAllocator<'a> {
    device: &'a wgpu::Device,
    max_buffer_size: u64,
}

impl<'a> WgpuAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self {
            device,
            max_buffer_size: device.limits().max_buffer_size,
        }
    }

    fn alloc(
        &mut self,
        label: &str,
        bytes: &[u8],
        usage: wgpu::BufferUsages,
    ) -> Result<wgpu::Buffer, DeviceResourceError> {
        check_request(label, bytes.len() as u64, self.max_buffer_size)?;

        Ok(self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytes,
            usage,
        }))
    }
}

impl BufferAllocator for WgpuAllocator<'_> {
    type Buffer = wgpu::Buffer;

    fn alloc_vertex(&mut self, label: &str, bytes: &[u8]) -> Result<wgpu::Buffer, DeviceResourceError> {
        self.alloc(label, bytes, wgpu::BufferUsages::VERTEX)
    }

    fn alloc_index(&mut self, label: &str, bytes: &[u8]) -> Result<wgpu::Buffer, DeviceResourceError> {
        self.alloc(label, bytes, wgpu::BufferUsages::INDEX)
    }
}

/// Validates an allocation request against the device limit.
pub(crate) fn check_request(label: &str, size: u64, max: u64) -> Result<(), DeviceResourceError> {
    if size == 0 {
        return Err(DeviceResourceError::EmptyBuffer { label: label.to_string() });
    }
    if size > max {
        return Err(DeviceResourceError::BufferTooLarge {
            label: label.to_string(),
            size,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_is_rejected() {
        assert_eq!(
            check_request("vbo", 0, 1024),
            Err(DeviceResourceError::EmptyBuffer { label: "vbo".into() })
        );
    }

    #[test]
    fn oversized_request_is_rejected() {
        let err = check_request("ibo", 2048, 1024).unwrap_err();
        assert_eq!(
            err,
            DeviceResourceError::BufferTooLarge { label: "ibo".into(), size: 2048, max: 1024 }
        );
        assert!(err.to_string().contains("2048"));
    }

    #[test]
    fn request_at_limit_is_accepted() {
        assert!(check_request("vbo", 1024, 1024).is_ok());
    }
}
