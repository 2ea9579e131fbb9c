use super::RenderCtx;

/// Smallest allocation a stream buffer gets, in bytes.
pub const MIN_BUFFER_SIZE: u64 = 256;

/// A GPU buffer that is rewritten in place and reallocated only when the
/// data outgrows it.
pub struct GpuBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
    len: u64,
}

impl GpuBuffer {
    pub fn new(label: &'static str, usage: wgpu::BufferUsages) -> Self {
        Self {
            label,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            buffer: None,
            capacity: 0,
            len: 0,
        }
    }

    /// Allocates at least `size` bytes without writing anything.
    pub fn reserve(&mut self, ctx: &RenderCtx<'_>, size: u64) {
        if let Some(cap) = grown_capacity(self.capacity, size) {
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: cap,
                usage: self.usage,
                mapped_at_creation: false,
            }));
            self.capacity = cap;
            log::trace!("{}: capacity {cap} bytes", self.label);
        }
    }

    /// Replaces the buffer contents with `bytes`.
    ///
    /// `bytes.len()` must be a multiple of 4 (`wgpu::COPY_BUFFER_ALIGNMENT`).
    pub fn write(&mut self, ctx: &RenderCtx<'_>, bytes: &[u8]) {
        self.len = bytes.len() as u64;
        if bytes.is_empty() {
            return;
        }

        self.reserve(ctx, self.len);
        if let Some(buffer) = self.buffer.as_ref() {
            ctx.queue.write_buffer(buffer, 0, bytes);
        }
    }

    /// Slice covering the last write, if there is one.
    pub fn slice(&self) -> Option<wgpu::BufferSlice<'_>> {
        if self.len == 0 {
            return None;
        }
        self.buffer.as_ref().map(|b| b.slice(..self.len))
    }

    #[inline]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

/// New capacity when `required` bytes do not fit in `current`:
/// the next power of two, at least [`MIN_BUFFER_SIZE`].
pub fn grown_capacity(current: u64, required: u64) -> Option<u64> {
    if required <= current && current > 0 {
        return None;
    }
    Some(required.next_power_of_two().max(MIN_BUFFER_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_allocation_has_minimum_size() {
        assert_eq!(grown_capacity(0, 0), Some(MIN_BUFFER_SIZE));
        assert_eq!(grown_capacity(0, 12), Some(MIN_BUFFER_SIZE));
    }

    #[test]
    fn grows_to_next_power_of_two() {
        assert_eq!(grown_capacity(256, 257), Some(512));
        assert_eq!(grown_capacity(512, 3000), Some(4096));
    }

    #[test]
    fn fitting_data_keeps_the_buffer() {
        assert_eq!(grown_capacity(4096, 4096), None);
        assert_eq!(grown_capacity(4096, 16), None);
    }
}
