//! A `no_std`, no-alloc register access engine for memory-mapped peripherals.
//!
//! A client configures a physical base address, names up to 32 registers by
//! their byte offset inside a 128-byte window, and then reads, writes and
//! bit-twiddles them by name. Every operation is serialized by a single
//! `critical_section`, so concurrent clients never lose a read-modify-write.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   request code   ┌────────────────┐
//! │  client      │ ───────────────▶ │ protocol::     │
//! │  (records)   │ ◀─────────────── │ dispatch()     │
//! └──────────────┘   response       └───────┬────────┘
//!                                           │
//!                                   ┌───────▼────────┐
//!                                   │ RegisterEngine │  critical section
//!                                   │  ├ table       │  name -> offset
//!                                   │  └ window      │  base + 128 bytes
//!                                   └───────┬────────┘
//!                                           │ load32 / store32
//!                                   ┌───────▼────────┐
//!                                   │ MapBackend     │  memory, /dev/mem
//!                                   └────────────────┘
//! ```
//!
//! - **Base address** changes map the new window before releasing the old one;
//!   a failed remap leaves the previous mapping in place
//! - **Register names** are four raw bytes; a leading zero byte marks an empty slot
//! - **Bit updates** load, modify and store inside one critical section
//!
//! # Example
//!
//! ```rust
//! use embedded_regmap::prelude::*;
//!
//! let engine = RegisterEngineBuilder::new()
//!     .memory_backend()
//!     .base_address(0x1000)
//!     .build()
//!     .unwrap();
//!
//! let ctrl = RegisterName::new(*b"CTRL").unwrap();
//! engine.define_register(ctrl, 0x4).unwrap();
//! engine.write_register(ctrl, 0x1234).unwrap();
//! engine.set_bit(ctrl, 0, true).unwrap();
//!
//! let values = engine.register_values().unwrap();
//! assert_eq!(values[0].value, 0x1235);
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod regmap;

pub mod prelude {
    pub use crate::regmap::prelude::*;
}
