use crate::regmap::{
    MapError, WindowOffset,
    backend::{MapBackend, MappedRegion},
    types::{MAX_REGISTERS, WINDOW_SIZE},
};

/// In-memory stand-in for device memory.
///
/// Every mapping gets its own word array, seeded from the backend's initial
/// contents. Useful for tests and for running the engine without hardware.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    initial: [u32; MAX_REGISTERS],
    refuse: fn(u32) -> bool,
    live: usize,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Backend whose mappings start zero-filled and never fail.
    pub const fn new() -> Self {
        Self::with_contents([0; MAX_REGISTERS])
    }

    /// Backend whose mappings start with the given register words.
    pub const fn with_contents(initial: [u32; MAX_REGISTERS]) -> Self {
        Self {
            initial,
            refuse: refuse_none,
            live: 0,
        }
    }

    /// Makes [`MapBackend::map`] fail for every base where `refuse` returns true.
    pub fn refusing(mut self, refuse: fn(u32) -> bool) -> Self {
        self.refuse = refuse;
        self
    }

    /// Number of mappings handed out and not yet released.
    pub fn live_mappings(&self) -> usize {
        self.live
    }
}

fn refuse_none(_base: u32) -> bool {
    false
}

impl MapBackend for MemoryBackend {
    type Region = MemoryRegion;

    fn map(&mut self, base: u32, len: usize) -> Result<MemoryRegion, MapError> {
        if len > WINDOW_SIZE || (self.refuse)(base) {
            return Err(MapError::MappingFailed);
        }
        self.live += 1;
        Ok(MemoryRegion {
            base,
            words: self.initial,
        })
    }

    fn unmap(&mut self, _region: MemoryRegion) {
        self.live -= 1;
    }
}

/// One simulated mapping.
#[derive(Debug, Clone)]
pub struct MemoryRegion {
    base: u32,
    words: [u32; MAX_REGISTERS],
}

impl MemoryRegion {
    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn words(&self) -> &[u32; MAX_REGISTERS] {
        &self.words
    }
}

impl MappedRegion for MemoryRegion {
    #[inline]
    fn load32(&self, offset: WindowOffset) -> u32 {
        self.words[offset.word_index()]
    }

    #[inline]
    fn store32(&mut self, offset: WindowOffset, value: u32) {
        self.words[offset.word_index()] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_counts_live_regions() {
        let mut backend = MemoryBackend::new();
        let a = backend.map(0x1000, WINDOW_SIZE).unwrap();
        let b = backend.map(0x2000, WINDOW_SIZE).unwrap();
        assert_eq!(backend.live_mappings(), 2);

        backend.unmap(a);
        assert_eq!(backend.live_mappings(), 1);
        assert_eq!(b.base(), 0x2000);
    }

    #[test]
    fn regions_start_from_initial_contents() {
        let mut initial = [0u32; MAX_REGISTERS];
        initial[1] = 0xDEAD_BEEF;
        let mut backend = MemoryBackend::with_contents(initial);

        let mut region = backend.map(0x1000, WINDOW_SIZE).unwrap();
        let off = WindowOffset::new(4).unwrap();
        assert_eq!(region.load32(off), 0xDEAD_BEEF);

        region.store32(off, 1);
        assert_eq!(region.load32(off), 1);
        assert_eq!(region.words()[1], 1);

        // A fresh mapping does not see writes made through another one
        let other = backend.map(0x1000, WINDOW_SIZE).unwrap();
        assert_eq!(other.load32(off), 0xDEAD_BEEF);
    }

    #[test]
    fn refused_base_fails_without_leaking() {
        let mut backend = MemoryBackend::new().refusing(|base| base == 0);
        assert_eq!(backend.map(0, WINDOW_SIZE).unwrap_err(), MapError::MappingFailed);
        assert_eq!(backend.live_mappings(), 0);
        assert!(backend.map(0x1000, WINDOW_SIZE).is_ok());
    }

    #[test]
    fn oversized_request_fails() {
        let mut backend = MemoryBackend::new();
        assert_eq!(
            backend.map(0x1000, WINDOW_SIZE + 4).unwrap_err(),
            MapError::MappingFailed
        );
    }
}
