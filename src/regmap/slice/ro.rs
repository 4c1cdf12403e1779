use super::macros::{impl_read_primitive, impl_read_primitives, impl_slice_common};

/// Read-only view of an incoming record.
pub struct ROSlice<'a>(&'a [u8]);

impl<'a> ROSlice<'a> {
    /// Creates a new read-only slice wrapper.
    #[inline]
    pub fn new(slice: &'a [u8]) -> Self {
        Self(slice)
    }

    /// Reads the four raw name bytes at `offset`.
    ///
    /// # Panics
    /// Panics if `offset + 4 > len()`.
    #[inline]
    pub fn read_name_at(&self, offset: usize) -> [u8; 4] {
        let mut name = [0u8; 4];
        name.copy_from_slice(&self.0[offset..offset + 4]);
        name
    }

    impl_slice_common!();
    impl_read_primitives!();
}
