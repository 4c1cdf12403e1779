//! Test support utilities - only compiled in test builds.

use crate::regmap::{
    RegisterName,
    backend::MemoryBackend,
    engine::RegisterEngine,
    table::RegisterTable,
    view::EngineView,
    window::AddressWindow,
};

pub type TestEngine = RegisterEngine<MemoryBackend>;

/// Shorthand for a valid register name.
pub fn name(bytes: &[u8; 4]) -> RegisterName {
    RegisterName::new(*bytes).unwrap()
}

/// Helper to create an engine over zero-filled simulated memory.
pub fn test_engine() -> TestEngine {
    RegisterEngine::new(MemoryBackend::new())
}

/// Fixture for EngineView tests without going through the engine lock.
pub struct TestFixture {
    pub window: AddressWindow<MemoryBackend>,
    pub table: RegisterTable,
    pub destroyed: bool,
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    pub fn with_backend(backend: MemoryBackend) -> Self {
        Self {
            window: AddressWindow::new(backend),
            table: RegisterTable::new(),
            destroyed: false,
        }
    }

    /// Fixture whose window is already mapped at `base`.
    pub fn mapped(base: u32) -> Self {
        let mut fx = Self::new();
        fx.window.configure(base).unwrap();
        fx
    }

    pub fn view(&mut self) -> EngineView<'_, MemoryBackend> {
        EngineView::new(&mut self.window, &mut self.table, self.destroyed)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
