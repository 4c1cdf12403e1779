//! Mapping facilities that back an [`AddressWindow`](crate::regmap::AddressWindow).

mod memory;

#[cfg(feature = "devmem")]
mod devmem;

pub use memory::{MemoryBackend, MemoryRegion};

#[cfg(feature = "devmem")]
pub use devmem::{DevMemBackend, DevMemRegion};

use crate::regmap::{MapError, WindowOffset};

/// Establishes and releases mappings of a physical address range.
pub trait MapBackend {
    /// Accessible range produced by a successful mapping.
    type Region: MappedRegion;

    /// Maps `len` bytes starting at physical address `base`.
    fn map(&mut self, base: u32, len: usize) -> Result<Self::Region, MapError>;

    /// Releases a region previously returned by [`MapBackend::map`].
    fn unmap(&mut self, region: Self::Region);
}

/// Aligned 32-bit access to a mapped range.
///
/// Each call is exactly one bus transaction; implementations must not
/// cache, merge or split accesses.
pub trait MappedRegion {
    fn load32(&self, offset: WindowOffset) -> u32;
    fn store32(&mut self, offset: WindowOffset, value: u32);
}
