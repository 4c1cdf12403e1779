use crate::regmap::{
    EngineError, RegisterName, WindowOffset,
    backend::MapBackend,
    helpers::{apply_bit, bit_mask},
    table::RegisterTable,
    types::{RegisterDescriptor, RegisterValue, Registers},
    window::AddressWindow,
};

/// Exclusive view of the engine's window and register table.
///
/// A view only exists while the engine lock is held. Methods do no logging;
/// they hand back what the engine reports once the lock is released.
pub(crate) struct EngineView<'a, B: MapBackend> {
    window: &'a mut AddressWindow<B>,
    table: &'a mut RegisterTable,
    destroyed: bool,
}

impl<'a, B: MapBackend> core::fmt::Debug for EngineView<'a, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineView").finish_non_exhaustive()
    }
}

impl<'a, B: MapBackend> EngineView<'a, B> {
    pub(crate) fn new(
        window: &'a mut AddressWindow<B>,
        table: &'a mut RegisterTable,
        destroyed: bool,
    ) -> Self {
        Self {
            window,
            table,
            destroyed,
        }
    }

    fn ensure_live(&self) -> Result<(), EngineError> {
        if self.destroyed {
            return Err(EngineError::EngineDestroyed);
        }
        Ok(())
    }

    fn ensure_mapped(&self) -> Result<(), EngineError> {
        self.ensure_live()?;
        if !self.window.is_mapped() {
            return Err(EngineError::WindowNotMapped);
        }
        Ok(())
    }

    fn resolve(&self, name: RegisterName) -> Result<WindowOffset, EngineError> {
        self.table.lookup(&name).ok_or(EngineError::RegisterNotFound)
    }

    /// Maps the address window at `base`.
    ///
    /// On failure the previous base address and mapping are kept. Returns
    /// the base address whose mapping was released.
    pub fn set_base_address(&mut self, base: u32) -> Result<Option<u32>, EngineError> {
        self.ensure_live()?;
        Ok(self.window.configure(base)?)
    }

    /// Returns the last configured base address, or 0 if none was set.
    pub fn base_address(&self) -> Result<u32, EngineError> {
        self.ensure_live()?;
        Ok(self.window.base_address())
    }

    /// Adds `name` at `offset` to the first free table slot.
    pub fn define_register(
        &mut self,
        name: RegisterName,
        offset: u32,
    ) -> Result<WindowOffset, EngineError> {
        self.ensure_live()?;
        Ok(self.table.define(name, offset)?)
    }

    /// Stores `value` into the named register.
    pub fn write_register(&mut self, name: RegisterName, value: u32) -> Result<(), EngineError> {
        self.ensure_mapped()?;
        let offset = self.resolve(name)?;
        self.window.store32(offset, value)
    }

    /// Performs a fresh load of the named register.
    pub fn read_register(&self, name: RegisterName) -> Result<u32, EngineError> {
        self.ensure_mapped()?;
        let offset = self.resolve(name)?;
        self.window.load32(offset)
    }

    /// Sets or clears one bit of the named register with a load-modify-store.
    ///
    /// Returns the stored value.
    pub fn set_bit(&mut self, name: RegisterName, bit: u8, value: bool) -> Result<u32, EngineError> {
        self.ensure_live()?;
        bit_mask(bit)?;
        self.ensure_mapped()?;
        let offset = self.resolve(name)?;

        let current = self.window.load32(offset)?;
        let updated = apply_bit(current, bit, value)?;
        self.window.store32(offset, updated)?;
        Ok(updated)
    }

    /// Name and offset of every defined register, in slot order.
    pub fn register_descriptors(&self) -> Result<Registers<RegisterDescriptor>, EngineError> {
        self.ensure_live()?;
        Ok(self.table.snapshot())
    }

    /// Name and freshly loaded value of every defined register, in slot order.
    ///
    /// Empty slots are omitted. An empty table yields an empty sequence even
    /// before a base address is configured, since no load is needed.
    pub fn register_values(&self) -> Result<Registers<RegisterValue>, EngineError> {
        self.ensure_live()?;
        if self.table.is_empty() {
            return Ok(Registers::new());
        }
        self.ensure_mapped()?;

        self.table
            .iter()
            .map(|desc| {
                Ok(RegisterValue {
                    name: desc.name,
                    value: self.window.load32(desc.offset)?,
                })
            })
            .collect()
    }

    #[cfg(test)]
    pub fn window(&self) -> &AddressWindow<B> {
        self.window
    }

    #[cfg(test)]
    pub fn table(&self) -> &RegisterTable {
        self.table
    }
}
