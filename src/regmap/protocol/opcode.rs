use crate::regmap::types::MAX_REGISTERS;

/// Command type byte shared by every request code.
pub const IOCTL_MAGIC: u8 = b'k';

/// Length of a register name on the wire.
pub const NAME_LEN: usize = 4;

/// `name + 4-byte integer`, the unit of every register record.
pub const REGISTER_RECORD_LEN: usize = NAME_LEN + 4;

/// One full table of register records.
pub const TABLE_RECORD_LEN: usize = MAX_REGISTERS * REGISTER_RECORD_LEN;

const IOC_WRITE: u32 = 1;
const IOC_READ: u32 = 2;

const fn ioc(dir: u32, nr: u8, size: usize) -> u32 {
    (dir << 30) | ((size as u32) << 16) | ((IOCTL_MAGIC as u32) << 8) | nr as u32
}

/// The seven engine commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    SetBaseAddress = 1,
    DefineRegister = 2,
    WriteRegister = 3,
    SetBit = 4,
    GetBaseAddress = 5,
    ListRegisterDescriptors = 6,
    ReadAllRegisterValues = 7,
}

impl Opcode {
    pub const ALL: [Opcode; 7] = [
        Opcode::SetBaseAddress,
        Opcode::DefineRegister,
        Opcode::WriteRegister,
        Opcode::SetBit,
        Opcode::GetBaseAddress,
        Opcode::ListRegisterDescriptors,
        Opcode::ReadAllRegisterValues,
    ];

    /// Bytes the caller supplies.
    pub const fn request_len(self) -> usize {
        match self {
            Opcode::SetBaseAddress => 4,
            Opcode::DefineRegister | Opcode::WriteRegister => REGISTER_RECORD_LEN,
            Opcode::SetBit => NAME_LEN + 2,
            Opcode::GetBaseAddress
            | Opcode::ListRegisterDescriptors
            | Opcode::ReadAllRegisterValues => 0,
        }
    }

    /// Bytes copied back to the caller.
    pub const fn response_len(self) -> usize {
        match self {
            Opcode::GetBaseAddress => 4,
            Opcode::ListRegisterDescriptors | Opcode::ReadAllRegisterValues => TABLE_RECORD_LEN,
            Opcode::SetBaseAddress
            | Opcode::DefineRegister
            | Opcode::WriteRegister
            | Opcode::SetBit => 0,
        }
    }

    /// Linux ioctl request number: `_IOW('k', n, T)` for setters and
    /// `_IOR('k', n, T)` for getters.
    pub const fn request_code(self) -> u32 {
        let nr = self as u8;
        match self.response_len() {
            0 => ioc(IOC_WRITE, nr, self.request_len()),
            len => ioc(IOC_READ, nr, len),
        }
    }

    pub fn from_request_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.request_code() == code)
    }
}
