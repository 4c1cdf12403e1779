/// Errors raised while establishing the address window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The mapping facility refused the requested range.
    MappingFailed,
    /// Base address is not aligned to the register width.
    UnalignedBase,
}

impl core::fmt::Display for MapError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MapError::MappingFailed => write!(f, "failed to map physical memory"),
            MapError::UnalignedBase => write!(f, "base address is not 4-byte aligned"),
        }
    }
}

/// Errors raised by the register table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// Every slot is occupied.
    Full,
    /// Offset does not address a whole register inside the window.
    OffsetOutOfRange,
}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::Full => write!(f, "register table is full"),
            TableError::OffsetOutOfRange => {
                write!(f, "register offset is misaligned or outside the window")
            }
        }
    }
}

/// Errors returned by register engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Address window could not be configured.
    Map(MapError),
    /// Register table rejected the definition.
    Table(TableError),
    /// No register with the requested name is defined.
    RegisterNotFound,
    /// A register access was attempted before any base address was set.
    WindowNotMapped,
    /// The engine has been torn down.
    EngineDestroyed,
    /// Bit index is not in `0..32`.
    BitOutOfRange,
}

impl From<MapError> for EngineError {
    fn from(err: MapError) -> Self {
        EngineError::Map(err)
    }
}

impl From<TableError> for EngineError {
    fn from(err: TableError) -> Self {
        EngineError::Table(err)
    }
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::Map(err) => write!(f, "{err}"),
            EngineError::Table(err) => write!(f, "{err}"),
            EngineError::RegisterNotFound => write!(f, "register not found"),
            EngineError::WindowNotMapped => write!(f, "no base address has been mapped"),
            EngineError::EngineDestroyed => write!(f, "register engine has been torn down"),
            EngineError::BitOutOfRange => write!(f, "bit index must be in 0..32"),
        }
    }
}
