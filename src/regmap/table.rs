use bitmaps::Bitmap;

use crate::regmap::{
    error::TableError,
    types::{MAX_REGISTERS, RegisterDescriptor, RegisterName, Registers, WindowOffset},
};

/// Bounded, insertion-ordered table of register names and window offsets.
///
/// Slots fill in ascending index order and are never vacated, so occupied
/// slots always form a prefix of the table. Lookups are linear scans.
pub struct RegisterTable {
    names: [[u8; 4]; MAX_REGISTERS],
    offsets: [WindowOffset; MAX_REGISTERS],
    occupied: Bitmap<MAX_REGISTERS>,
}

impl core::fmt::Debug for RegisterTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for RegisterTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterTable {
    pub fn new() -> Self {
        Self {
            names: [[0; 4]; MAX_REGISTERS],
            offsets: [WindowOffset::ZERO; MAX_REGISTERS],
            occupied: Bitmap::new(),
        }
    }

    /// Occupies the first empty slot with `name` at `offset`.
    ///
    /// An existing entry with the same name is not replaced; the earlier
    /// slot keeps winning lookups.
    pub fn define(&mut self, name: RegisterName, offset: u32) -> Result<WindowOffset, TableError> {
        let offset = WindowOffset::new(offset).ok_or(TableError::OffsetOutOfRange)?;
        let slot = (0..MAX_REGISTERS)
            .find(|&slot| !self.occupied.get(slot))
            .ok_or(TableError::Full)?;

        self.names[slot] = *name.as_bytes();
        self.offsets[slot] = offset;
        self.occupied.set(slot, true);
        Ok(offset)
    }

    /// Offset of the first slot whose name matches exactly.
    pub fn lookup(&self, name: &RegisterName) -> Option<WindowOffset> {
        self.iter()
            .find(|desc| desc.name == *name)
            .map(|desc| desc.offset)
    }

    /// All occupied slots in slot order.
    pub fn snapshot(&self) -> Registers<RegisterDescriptor> {
        self.iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = RegisterDescriptor> + '_ {
        core::iter::successors(self.occupied.first_index(), move |&slot| {
            self.occupied.next_index(slot)
        })
        .filter_map(move |slot| self.descriptor(slot))
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.occupied.is_full()
    }

    fn descriptor(&self, slot: usize) -> Option<RegisterDescriptor> {
        Some(RegisterDescriptor {
            name: RegisterName::new(self.names[slot])?,
            offset: self.offsets[slot],
        })
    }
}
