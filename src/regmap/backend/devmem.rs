#![allow(unsafe_code)]

use core::ptr::{self, NonNull};

use crate::regmap::{
    MapError, WindowOffset,
    backend::{MapBackend, MappedRegion},
};

/// Maps physical device memory through `/dev/mem`.
///
/// The descriptor is opened with `O_SYNC` so mappings are uncached.
#[derive(Debug)]
pub struct DevMemBackend {
    fd: libc::c_int,
}

impl DevMemBackend {
    /// Opens `/dev/mem` for reading and writing.
    ///
    /// Fails with [`MapError::MappingFailed`] when the device node is missing
    /// or the process lacks permission.
    pub fn open() -> Result<Self, MapError> {
        let fd = unsafe { libc::open(c"/dev/mem".as_ptr(), libc::O_RDWR | libc::O_SYNC) };
        if fd < 0 {
            log::error!("failed to open /dev/mem");
            return Err(MapError::MappingFailed);
        }
        Ok(Self { fd })
    }
}

impl Drop for DevMemBackend {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}

impl MapBackend for DevMemBackend {
    type Region = DevMemRegion;

    fn map(&mut self, base: u32, len: usize) -> Result<DevMemRegion, MapError> {
        let page = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if page <= 0 {
            return Err(MapError::MappingFailed);
        }
        let page = page as u64;

        // mmap offsets must be page aligned; keep the remainder as a delta.
        let base = u64::from(base);
        let aligned = base & !(page - 1);
        let delta = (base - aligned) as usize;
        let span = delta + len;

        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                span,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                self.fd,
                aligned as libc::off_t,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(MapError::MappingFailed);
        }
        let addr = NonNull::new(addr as *mut u8).ok_or(MapError::MappingFailed)?;

        Ok(DevMemRegion { addr, span, delta })
    }

    fn unmap(&mut self, region: DevMemRegion) {
        unsafe {
            libc::munmap(region.addr.as_ptr() as *mut libc::c_void, region.span);
        }
    }
}

/// A live `/dev/mem` mapping.
#[derive(Debug)]
pub struct DevMemRegion {
    addr: NonNull<u8>,
    span: usize,
    delta: usize,
}

// SAFETY: the region is plain device memory with no thread affinity; the
// engine serializes every access to it.
unsafe impl Send for DevMemRegion {}

impl DevMemRegion {
    #[inline]
    fn word(&self, offset: WindowOffset) -> *mut u32 {
        // WindowOffset keeps the word inside the mapped span, and both the
        // page-aligned mapping and the base are 4-byte aligned.
        unsafe { self.addr.as_ptr().add(self.delta + offset.get()) as *mut u32 }
    }
}

impl MappedRegion for DevMemRegion {
    #[inline]
    fn load32(&self, offset: WindowOffset) -> u32 {
        unsafe { ptr::read_volatile(self.word(offset)) }
    }

    #[inline]
    fn store32(&mut self, offset: WindowOffset, value: u32) {
        unsafe { ptr::write_volatile(self.word(offset), value) }
    }
}
