pub mod backend;
pub mod builder;
pub mod engine;
pub mod error;
pub mod helpers;
pub mod protocol;
pub mod slice;
pub mod table;
pub mod types;
mod view;
pub mod window;

#[cfg(test)]
mod test_support;

pub use backend::{MapBackend, MappedRegion, MemoryBackend, MemoryRegion};
#[cfg(feature = "devmem")]
pub use backend::{DevMemBackend, DevMemRegion};
pub use builder::RegisterEngineBuilder;
pub use engine::{EngineState, RegisterEngine};
pub use error::{EngineError, MapError, TableError};
pub use slice::{ROSlice, WOSlice};
pub use table::RegisterTable;
pub use types::{
    MAX_REGISTERS, REGISTER_WIDTH, RegisterDescriptor, RegisterName, RegisterValue, Registers,
    WINDOW_SIZE, WindowOffset,
};
pub use window::AddressWindow;

pub mod prelude {
    pub use super::{
        AddressWindow, EngineError, EngineState, MapBackend, MapError, MappedRegion,
        MemoryBackend, RegisterDescriptor, RegisterEngine, RegisterEngineBuilder, RegisterName,
        RegisterValue, Registers, TableError, WindowOffset,
    };
    #[cfg(feature = "devmem")]
    pub use super::DevMemBackend;
}
