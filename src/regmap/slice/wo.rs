use super::macros::{impl_slice_common, impl_write_primitive, impl_write_primitives};

/// Write-only view of an outgoing record.
#[derive(Debug)]
pub struct WOSlice<'a>(&'a mut [u8]);

impl<'a> WOSlice<'a> {
    /// Creates a new write-only slice wrapper.
    #[inline]
    pub fn new(slice: &'a mut [u8]) -> Self {
        Self(slice)
    }

    /// Writes four raw name bytes at `offset`.
    ///
    /// # Panics
    /// Panics if `offset + 4 > len()`.
    #[inline]
    pub fn write_name_at(&mut self, offset: usize, name: &[u8; 4]) {
        self.0[offset..offset + 4].copy_from_slice(name);
    }

    /// Fills the entire slice with the given value.
    #[inline]
    pub fn fill(&mut self, value: u8) {
        self.0.fill(value);
    }

    impl_slice_common!();
    impl_write_primitives!();
}
