use crate::regmap::{EngineError, MapError, TableError};

const ENOENT: i32 = 2;
const ENXIO: i32 = 6;
const ENOMEM: i32 = 12;
const EFAULT: i32 = 14;
const ENODEV: i32 = 19;
const EINVAL: i32 = 22;
const ENOSPC: i32 = 28;
const ERANGE: i32 = 34;

/// Protocol-level failure status, carried on the wire as a negative errno.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Unknown command, malformed record, invalid name or bit index.
    InvalidArgument,
    /// Caller buffer too small for the request or response.
    BadAddress,
    /// The physical window could not be mapped.
    OutOfMemory,
    /// Register table is full.
    NoSpace,
    /// Register name is not defined.
    NotFound,
    /// No base address has been configured.
    NotMapped,
    /// Engine has been torn down.
    NoDevice,
    /// Register offset is outside the window.
    OutOfRange,
}

impl Status {
    pub const fn errno(self) -> i32 {
        match self {
            Status::InvalidArgument => EINVAL,
            Status::BadAddress => EFAULT,
            Status::OutOfMemory => ENOMEM,
            Status::NoSpace => ENOSPC,
            Status::NotFound => ENOENT,
            Status::NotMapped => ENXIO,
            Status::NoDevice => ENODEV,
            Status::OutOfRange => ERANGE,
        }
    }

    /// Wire return value, `-errno`.
    pub const fn to_wire(self) -> i32 {
        -self.errno()
    }
}

impl From<EngineError> for Status {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Map(MapError::MappingFailed) => Status::OutOfMemory,
            EngineError::Map(MapError::UnalignedBase) => Status::InvalidArgument,
            EngineError::Table(TableError::Full) => Status::NoSpace,
            EngineError::Table(TableError::OffsetOutOfRange) => Status::OutOfRange,
            EngineError::RegisterNotFound => Status::NotFound,
            EngineError::WindowNotMapped => Status::NotMapped,
            EngineError::EngineDestroyed => Status::NoDevice,
            EngineError::BitOutOfRange => Status::InvalidArgument,
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Status::InvalidArgument => write!(f, "invalid argument"),
            Status::BadAddress => write!(f, "bad buffer"),
            Status::OutOfMemory => write!(f, "out of memory"),
            Status::NoSpace => write!(f, "no space left in register table"),
            Status::NotFound => write!(f, "no such register"),
            Status::NotMapped => write!(f, "no base address mapped"),
            Status::NoDevice => write!(f, "no such device"),
            Status::OutOfRange => write!(f, "offset out of range"),
        }
    }
}
