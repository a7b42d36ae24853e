//! Fixed-capacity ring buffer for real-time audio paths.

/// Fixed-capacity circular sample store.
///
/// Capacity is a power of two so positions wrap with a mask. The buffer never
/// allocates after construction and never shifts memory. It carries no cursor
/// of its own: callers own the position and ask for views relative to it, so
/// several buffers can share one cursor.
#[derive(Debug, Clone)]
pub struct RingBuffer<T>
where
    T: Copy + Default,
{
    data: Vec<T>,
    mask: usize,
}

impl<T> RingBuffer<T>
where
    T: Copy + Default,
{
    /// Creates a zeroed ring buffer.
    ///
    /// # Panics
    /// Panics if `cap` is not a power of two.
    pub fn with_capacity(cap: usize) -> Self {
        assert!(cap.is_power_of_two(), "ring capacity must be a power of two");
        Self {
            data: vec![T::default(); cap],
            mask: cap - 1,
        }
    }

    /// Wraps an arbitrary position into the buffer.
    #[inline]
    pub fn wrap(&self, pos: usize) -> usize {
        pos & self.mask
    }

    /// Resets every element to the default value.
    #[inline]
    pub fn clear(&mut self) {
        self.data.fill(T::default());
    }

    /// Contents in age order starting at `cursor`: `[cursor..]` then `[..cursor]`.
    #[inline]
    pub fn split_at_cursor(&self, cursor: usize) -> (&[T], &[T]) {
        let (head, tail) = self.data.split_at(cursor & self.mask);
        (tail, head)
    }

    /// Mutable counterpart of [`split_at_cursor`](Self::split_at_cursor).
    #[inline]
    pub fn split_at_cursor_mut(&mut self, cursor: usize) -> (&mut [T], &mut [T]) {
        let (head, tail) = self.data.split_at_mut(cursor & self.mask);
        (tail, head)
    }

    /// Contiguous run of up to `len` elements starting at `start`.
    ///
    /// The run stops at the physical end of the buffer; it does not wrap.
    #[inline]
    pub fn segment_mut(&mut self, start: usize, len: usize) -> &mut [T] {
        let start = start & self.mask;
        let end = (start + len).min(self.data.len());
        &mut self.data[start..end]
    }
}
