//! Byte-slice wrappers used to marshal fixed-size command records.
//!
//! Multi-byte values are read and written in native byte order, which is the
//! layout the command records use.

mod macros;
mod ro;
mod wo;

pub use ro::ROSlice;
pub use wo::WOSlice;
