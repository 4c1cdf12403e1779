/// Generates read method(s) for a single primitive type.
macro_rules! impl_read_primitive {
    (u8) => {
        /// Reads a `u8` at the given offset.
        ///
        /// # Panics
        /// Panics if `offset >= len()`.
        #[inline]
        pub fn read_u8_at(&self, offset: usize) -> u8 {
            self.0[offset]
        }
    };
    ($type:ty, $size:literal) => {
        paste::paste! {
            #[doc = "Reads a native-endian `" $type "` at the given offset."]
            #[doc = ""]
            #[doc = "# Panics"]
            #[doc = "Panics if `offset + " $size " > len()`."]
            #[inline]
            pub fn [<read_ $type _ne_at>](&self, offset: usize) -> $type {
                assert!(
                    offset + $size <= self.0.len(),
                    "read out of bounds: offset {} + size {} > len {}",
                    offset, $size, self.0.len()
                );
                let mut bytes = [0u8; $size];
                bytes.copy_from_slice(&self.0[offset..offset + $size]);
                <$type>::from_ne_bytes(bytes)
            }
        }
    };
}

/// Generates read methods for the primitive types used in records.
macro_rules! impl_read_primitives {
    () => {
        impl_read_primitive!(u8);
        impl_read_primitive!(i32, 4);
        impl_read_primitive!(u32, 4);
    };
}

/// Generates write method(s) for a single primitive type.
macro_rules! impl_write_primitive {
    (u8) => {
        /// Writes a `u8` at the given offset.
        ///
        /// # Panics
        /// Panics if `offset >= len()`.
        #[inline]
        pub fn write_u8_at(&mut self, offset: usize, value: u8) {
            self.0[offset] = value;
        }
    };
    ($type:ty, $size:literal) => {
        paste::paste! {
            #[doc = "Writes a native-endian `" $type "` at the given offset."]
            #[doc = ""]
            #[doc = "# Panics"]
            #[doc = "Panics if `offset + " $size " > len()`."]
            #[inline]
            pub fn [<write_ $type _ne_at>](&mut self, offset: usize, value: $type) {
                assert!(
                    offset + $size <= self.0.len(),
                    "write out of bounds: offset {} + size {} > len {}",
                    offset, $size, self.0.len()
                );
                self.0[offset..offset + $size].copy_from_slice(&value.to_ne_bytes());
            }
        }
    };
}

/// Generates write methods for the primitive types used in records.
macro_rules! impl_write_primitives {
    () => {
        impl_write_primitive!(u8);
        impl_write_primitive!(i32, 4);
        impl_write_primitive!(u32, 4);
    };
}

/// Generates common slice methods (len, is_empty).
macro_rules! impl_slice_common {
    () => {
        /// Returns the length of the slice.
        #[inline]
        pub fn len(&self) -> usize {
            self.0.len()
        }

        /// Returns true if the slice is empty.
        #[inline]
        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }
    };
}

pub(super) use impl_read_primitive;
pub(super) use impl_read_primitives;
pub(super) use impl_slice_common;
pub(super) use impl_write_primitive;
pub(super) use impl_write_primitives;
