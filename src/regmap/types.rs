/// Number of slots in the register table. Protocol constant.
pub const MAX_REGISTERS: usize = 32;

/// Width of one register in bytes.
pub const REGISTER_WIDTH: usize = 4;

/// Size of the mapped address window in bytes.
pub const WINDOW_SIZE: usize = MAX_REGISTERS * REGISTER_WIDTH;

/// Fixed-capacity sequence returned by snapshot operations.
pub type Registers<T> = heapless::Vec<T, MAX_REGISTERS>;

/// Four-byte register identifier, compared byte for byte.
///
/// A zero first byte marks an unused table slot and is never a valid name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterName([u8; 4]);

impl RegisterName {
    /// Returns `None` for the empty-slot sentinel.
    pub const fn new(bytes: [u8; 4]) -> Option<Self> {
        if bytes[0] == 0 {
            None
        } else {
            Some(Self(bytes))
        }
    }

    /// Builds a name from a byte string literal such as `b"REG1"`.
    ///
    /// # Panics
    /// Panics (at compile time in const context) if the first byte is zero.
    pub const fn from_bytes(bytes: &[u8; 4]) -> Self {
        match Self::new(*bytes) {
            Some(name) => name,
            None => panic!("register name must not start with a NUL byte"),
        }
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl TryFrom<&[u8]> for RegisterName {
    type Error = ();

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; 4] = bytes.try_into().map_err(|_| ())?;
        Self::new(raw).ok_or(())
    }
}

impl core::fmt::Debug for RegisterName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}

impl core::fmt::Display for RegisterName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

/// Validated byte offset of one register inside the address window.
///
/// Only aligned offsets that leave room for a full register exist, so every
/// window access made with one stays in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowOffset(u16);

impl WindowOffset {
    /// Offset of the first register in the window.
    pub const ZERO: Self = Self(0);

    pub const fn new(offset: u32) -> Option<Self> {
        let offset = offset as usize;
        if offset % REGISTER_WIDTH != 0 || offset > WINDOW_SIZE - REGISTER_WIDTH {
            return None;
        }
        Some(Self(offset as u16))
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Index of the 32-bit word this offset addresses.
    #[inline]
    pub const fn word_index(self) -> usize {
        self.0 as usize / REGISTER_WIDTH
    }
}

/// Name and window offset of one defined register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDescriptor {
    pub name: RegisterName,
    pub offset: WindowOffset,
}

/// Name and freshly loaded value of one defined register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterValue {
    pub name: RegisterName,
    pub value: u32,
}
