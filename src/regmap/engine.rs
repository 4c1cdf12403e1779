#![allow(unsafe_code)]

use core::cell::{Cell, UnsafeCell};

use crate::regmap::{
    EngineError, RegisterName,
    backend::MapBackend,
    table::RegisterTable,
    types::{RegisterDescriptor, RegisterValue, Registers},
    view::EngineView,
    window::AddressWindow,
};

/// Lifecycle state of a [`RegisterEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No base address has been mapped yet.
    Uninitialized,
    /// A base address is mapped and register access is possible.
    Mapped,
    /// Torn down; every operation fails with [`EngineError::EngineDestroyed`].
    Destroyed,
}

struct EngineInner<B: MapBackend> {
    window: AddressWindow<B>,
    table: RegisterTable,
    destroyed: bool,
}

/// Register access engine.
///
/// Owns the address window and the register table. All operations run inside
/// a `critical_section`, which is the single lock serializing every access,
/// including the load-modify-store of [`RegisterEngine::set_bit`].
pub struct RegisterEngine<B: MapBackend> {
    inner: UnsafeCell<EngineInner<B>>,
    in_view: Cell<bool>,
}

// SAFETY: `inner` and `in_view` are only touched inside a critical section
// (or by a caller of the `unchecked` entry points who guarantees exclusivity).
unsafe impl<B> Sync for RegisterEngine<B>
where
    B: MapBackend + Send,
    B::Region: Send,
{
}

impl<B: MapBackend> core::fmt::Debug for RegisterEngine<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterEngine").finish_non_exhaustive()
    }
}

/// Clears the re-entrancy flag even if the view closure panics.
struct ViewGuard<'a>(&'a Cell<bool>);

impl<'a> ViewGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        assert!(!flag.replace(true), "register engine view entered re-entrantly");
        Self(flag)
    }
}

impl Drop for ViewGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<B: MapBackend> RegisterEngine<B> {
    /// Creates an engine with an empty table and an unmapped window.
    pub fn new(backend: B) -> Self {
        Self {
            inner: UnsafeCell::new(EngineInner {
                window: AddressWindow::new(backend),
                table: RegisterTable::new(),
                destroyed: false,
            }),
            in_view: Cell::new(false),
        }
    }

    /// # Safety
    /// Caller must guarantee no other access to the engine for the duration.
    unsafe fn with_inner_unchecked<R>(&self, f: impl FnOnce(&mut EngineInner<B>) -> R) -> R {
        let _guard = ViewGuard::enter(&self.in_view);
        let inner = unsafe { &mut *self.inner.get() };
        f(inner)
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut EngineInner<B>) -> R) -> R {
        critical_section::with(|_| unsafe { self.with_inner_unchecked(f) })
    }

    /// Runs `f` with exclusive access to the engine.
    ///
    /// Only fixed internal sequences run here; nothing inside `f` may block
    /// or log, since the engine-wide lock is held for its duration.
    ///
    /// # Panics
    /// Panics if called again from inside `f`.
    pub(crate) fn with_view<R>(&self, f: impl FnOnce(&mut EngineView<'_, B>) -> R) -> R {
        critical_section::with(|_| unsafe { self.with_view_unchecked(f) })
    }

    /// # Safety
    /// Requires exclusive access to the engine: no other code may access it
    /// at the same time, for example during single-threaded bring-up.
    pub(crate) unsafe fn with_view_unchecked<R>(
        &self,
        f: impl FnOnce(&mut EngineView<'_, B>) -> R,
    ) -> R {
        unsafe {
            self.with_inner_unchecked(|inner| {
                let mut view =
                    EngineView::new(&mut inner.window, &mut inner.table, inner.destroyed);
                f(&mut view)
            })
        }
    }

    pub fn state(&self) -> EngineState {
        self.with_inner(|inner| {
            if inner.destroyed {
                EngineState::Destroyed
            } else if inner.window.is_mapped() {
                EngineState::Mapped
            } else {
                EngineState::Uninitialized
            }
        })
    }

    /// Unmaps the window and moves the engine to [`EngineState::Destroyed`].
    pub fn teardown(&self) {
        let (released, was_live) = self.with_inner(|inner| {
            let was_live = !core::mem::replace(&mut inner.destroyed, true);
            (inner.window.teardown(), was_live)
        });

        if let Some(base) = released {
            log::info!("unmapped base address {base:#x}");
        }
        if was_live {
            log::info!("register engine torn down");
        }
    }

    /// Maps the address window at `base`.
    ///
    /// On failure the previous base address and mapping are kept.
    pub fn set_base_address(&self, base: u32) -> Result<(), EngineError> {
        match self.with_view(|view| view.set_base_address(base)) {
            Ok(released) => {
                if let Some(old) = released {
                    log::debug!("released previous mapping at {old:#x}");
                }
                log::info!("base address set to {base:#x} and mapped");
                Ok(())
            }
            Err(err) => {
                log::error!("cannot map base address {base:#x}: {err}");
                Err(err)
            }
        }
    }

    /// Last configured base address, or 0 if none was set.
    pub fn base_address(&self) -> Result<u32, EngineError> {
        self.with_view(|view| view.base_address())
    }

    pub fn define_register(&self, name: RegisterName, offset: u32) -> Result<(), EngineError> {
        match self.with_view(|view| view.define_register(name, offset)) {
            Ok(offset) => {
                log::debug!("defined register {name} at offset {:#x}", offset.get());
                Ok(())
            }
            Err(err) => {
                log::warn!("cannot define register {name}: {err}");
                Err(err)
            }
        }
    }

    pub fn write_register(&self, name: RegisterName, value: u32) -> Result<(), EngineError> {
        let result = self.with_view(|view| view.write_register(name, value));
        log_access(name, &result);
        if result.is_ok() {
            log::debug!("write {name} <- {value:#010x}");
        }
        result
    }

    /// Performs a fresh load of the named register.
    pub fn read_register(&self, name: RegisterName) -> Result<u32, EngineError> {
        let result = self.with_view(|view| view.read_register(name));
        log_access(name, &result);
        result
    }

    /// Sets or clears one bit of the named register.
    ///
    /// The load, modify and store happen under one lock acquisition.
    pub fn set_bit(&self, name: RegisterName, bit: u8, value: bool) -> Result<(), EngineError> {
        let result = self.with_view(|view| view.set_bit(name, bit, value));
        log_access(name, &result);
        let updated = result?;
        log::debug!("set bit {bit} of {name} to {value}: now {updated:#010x}");
        Ok(())
    }

    pub fn register_descriptors(&self) -> Result<Registers<RegisterDescriptor>, EngineError> {
        self.with_view(|view| view.register_descriptors())
    }

    pub fn register_values(&self) -> Result<Registers<RegisterValue>, EngineError> {
        self.with_view(|view| view.register_values())
    }
}

fn log_access<T>(name: RegisterName, result: &Result<T, EngineError>) {
    if let Err(EngineError::RegisterNotFound) = result {
        log::warn!("register {name} is not defined");
    }
}
