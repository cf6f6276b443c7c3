//! GPU buffers that grow when uploads outgrow them.
//!
//! Vertex and index data for the scene is re-uploaded whenever the scene
//! changes; these buffers reallocate with 2x growth and never shrink.

use std::marker::PhantomData;

/// Minimum allocation in bytes.
const MIN_CAPACITY: u64 = 64;

/// A typed GPU buffer that reallocates on overflow.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    /// Capacity in bytes.
    capacity: u64,
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Empty buffer with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes = byte_len::<T>(capacity).max(MIN_CAPACITY);
        Self {
            buffer: allocate(device, label, bytes, usage),
            capacity: bytes,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Upload `data`, growing the buffer if needed.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len() as u64;

        let reallocated = needed > self.capacity;
        if reallocated {
            let new_capacity = (needed * 2).max(self.capacity + 1024);
            log::debug!(
                "growing {} buffer: {} -> {new_capacity} bytes",
                self.label,
                self.capacity
            );
            self.buffer = allocate(device, &self.label, new_capacity, self.usage);
            self.capacity = new_capacity;
        }

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len();
        reallocated
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of items from the last write.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// `true` if the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Slice covering the items from the last write.
    #[must_use]
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..byte_len::<T>(self.count).max(1))
    }
}

fn byte_len<T>(count: usize) -> u64 {
    (count * size_of::<T>()) as u64
}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    size: u64,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
