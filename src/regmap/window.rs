use crate::regmap::{
    EngineError, MapError, WindowOffset,
    backend::{MapBackend, MappedRegion},
    types::{REGISTER_WIDTH, WINDOW_SIZE},
};

struct Mapping<R> {
    base: u32,
    region: R,
}

/// One physical base address mapped to a `WINDOW_SIZE`-byte accessible range.
///
/// Accesses take a [`WindowOffset`], so they cannot leave the window.
pub struct AddressWindow<B: MapBackend> {
    backend: B,
    mapping: Option<Mapping<B::Region>>,
}

impl<B: MapBackend> core::fmt::Debug for AddressWindow<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AddressWindow")
            .field("base_address", &self.base_address())
            .field("mapped", &self.is_mapped())
            .finish_non_exhaustive()
    }
}

impl<B: MapBackend> AddressWindow<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            mapping: None,
        }
    }

    /// Maps the window at `base`, replacing any previous mapping.
    ///
    /// The new range is mapped before the old one is released, so on failure
    /// the previous mapping and base address stay in effect. Returns the base
    /// address of the released mapping, if there was one.
    pub fn configure(&mut self, base: u32) -> Result<Option<u32>, MapError> {
        if base as usize % REGISTER_WIDTH != 0 {
            return Err(MapError::UnalignedBase);
        }

        let region = self.backend.map(base, WINDOW_SIZE)?;
        let released = self.mapping.replace(Mapping { base, region }).map(|old| {
            self.backend.unmap(old.region);
            old.base
        });
        Ok(released)
    }

    /// Releases the mapping if present, returning its base address.
    /// Safe to call when unmapped.
    pub fn teardown(&mut self) -> Option<u32> {
        let old = self.mapping.take()?;
        self.backend.unmap(old.region);
        Some(old.base)
    }

    pub fn is_mapped(&self) -> bool {
        self.mapping.is_some()
    }

    /// Last successfully configured base address, or 0 if none.
    pub fn base_address(&self) -> u32 {
        self.mapping.as_ref().map_or(0, |m| m.base)
    }

    pub fn load32(&self, offset: WindowOffset) -> Result<u32, EngineError> {
        let mapping = self.mapping.as_ref().ok_or(EngineError::WindowNotMapped)?;
        Ok(mapping.region.load32(offset))
    }

    pub fn store32(&mut self, offset: WindowOffset, value: u32) -> Result<(), EngineError> {
        let mapping = self.mapping.as_mut().ok_or(EngineError::WindowNotMapped)?;
        mapping.region.store32(offset, value);
        Ok(())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn region(&self) -> Option<&B::Region> {
        self.mapping.as_ref().map(|m| &m.region)
    }
}

impl<B: MapBackend> Drop for AddressWindow<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
