use core::marker::PhantomData;

use crate::regmap::{
    EngineError,
    backend::{MapBackend, MemoryBackend},
    engine::RegisterEngine,
};

#[cfg(feature = "devmem")]
use crate::regmap::{MapError, backend::DevMemBackend};

// Builder states
pub struct NeedBackend;
pub struct Ready;

/// Typestate builder for [`RegisterEngine`].
///
/// ```
/// use embedded_regmap::prelude::*;
///
/// let engine = RegisterEngineBuilder::new().memory_backend().build().unwrap();
/// assert_eq!(engine.state(), EngineState::Uninitialized);
/// ```
pub struct RegisterEngineBuilder<B, State> {
    backend: B,
    base_address: Option<u32>,
    _phantom: PhantomData<State>,
}

impl Default for RegisterEngineBuilder<(), NeedBackend> {
    fn default() -> Self {
        Self::new()
    }
}

// Start the builder
impl RegisterEngineBuilder<(), NeedBackend> {
    pub fn new() -> Self {
        RegisterEngineBuilder {
            backend: (),
            base_address: None,
            _phantom: PhantomData,
        }
    }

    /// Use a custom mapping backend.
    pub fn backend<B: MapBackend>(self, backend: B) -> RegisterEngineBuilder<B, Ready> {
        RegisterEngineBuilder {
            backend,
            base_address: self.base_address,
            _phantom: PhantomData,
        }
    }

    /// Back the window with zero-filled simulated memory.
    pub fn memory_backend(self) -> RegisterEngineBuilder<MemoryBackend, Ready> {
        self.backend(MemoryBackend::new())
    }

    /// Back the window with physical memory through `/dev/mem`.
    #[cfg(feature = "devmem")]
    pub fn devmem_backend(self) -> Result<RegisterEngineBuilder<DevMemBackend, Ready>, MapError> {
        Ok(self.backend(DevMemBackend::open()?))
    }
}

impl<B: MapBackend> RegisterEngineBuilder<B, Ready> {
    /// Map the window at `base` as part of [`Self::build`].
    pub fn base_address(mut self, base: u32) -> Self {
        self.base_address = Some(base);
        self
    }

    /// Build the engine, mapping the initial base address if one was given.
    pub fn build(self) -> Result<RegisterEngine<B>, EngineError> {
        let engine = RegisterEngine::new(self.backend);
        if let Some(base) = self.base_address {
            engine.set_base_address(base)?;
        }
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regmap::{EngineState, MapError};

    #[test]
    fn build_without_base_is_uninitialized() {
        let engine = RegisterEngineBuilder::new().memory_backend().build().unwrap();
        assert_eq!(engine.state(), EngineState::Uninitialized);
    }

    #[test]
    fn build_with_base_maps_immediately() {
        let engine = RegisterEngineBuilder::new()
            .memory_backend()
            .base_address(0x1000)
            .build()
            .unwrap();
        assert_eq!(engine.state(), EngineState::Mapped);
        assert_eq!(engine.base_address(), Ok(0x1000));
    }

    #[test]
    fn build_surfaces_mapping_failure() {
        let result = RegisterEngineBuilder::new()
            .backend(MemoryBackend::new().refusing(|_| true))
            .base_address(0x1000)
            .build();
        assert_eq!(result.unwrap_err(), EngineError::Map(MapError::MappingFailed));
    }
}
