use crate::regmap::{
    RegisterName, WindowOffset,
    protocol::{
        Status,
        opcode::{NAME_LEN, Opcode, REGISTER_RECORD_LEN, TABLE_RECORD_LEN},
    },
    slice::{ROSlice, WOSlice},
    types::{MAX_REGISTERS, RegisterDescriptor, RegisterValue, Registers},
};

/// A decoded command record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    SetBaseAddress { base: i32 },
    DefineRegister { name: RegisterName, offset: i32 },
    WriteRegister { name: RegisterName, value: u32 },
    SetBit { name: RegisterName, bit: u8, value: bool },
    GetBaseAddress,
    ListRegisterDescriptors,
    ReadAllRegisterValues,
}

fn decode_name(slice: &ROSlice<'_>, offset: usize) -> Result<RegisterName, Status> {
    RegisterName::new(slice.read_name_at(offset)).ok_or(Status::InvalidArgument)
}

impl Request {
    pub fn opcode(&self) -> Opcode {
        match self {
            Request::SetBaseAddress { .. } => Opcode::SetBaseAddress,
            Request::DefineRegister { .. } => Opcode::DefineRegister,
            Request::WriteRegister { .. } => Opcode::WriteRegister,
            Request::SetBit { .. } => Opcode::SetBit,
            Request::GetBaseAddress => Opcode::GetBaseAddress,
            Request::ListRegisterDescriptors => Opcode::ListRegisterDescriptors,
            Request::ReadAllRegisterValues => Opcode::ReadAllRegisterValues,
        }
    }

    /// Decodes the request payload for `opcode` from the front of `buf`.
    pub fn decode(opcode: Opcode, buf: &[u8]) -> Result<Self, Status> {
        if buf.len() < opcode.request_len() {
            return Err(Status::BadAddress);
        }
        let slice = ROSlice::new(&buf[..opcode.request_len()]);

        let request = match opcode {
            Opcode::SetBaseAddress => Request::SetBaseAddress {
                base: slice.read_i32_ne_at(0),
            },
            Opcode::DefineRegister => Request::DefineRegister {
                name: decode_name(&slice, 0)?,
                offset: slice.read_i32_ne_at(NAME_LEN),
            },
            Opcode::WriteRegister => Request::WriteRegister {
                name: decode_name(&slice, 0)?,
                value: slice.read_u32_ne_at(NAME_LEN),
            },
            Opcode::SetBit => Request::SetBit {
                name: decode_name(&slice, 0)?,
                bit: slice.read_u8_at(NAME_LEN),
                value: slice.read_u8_at(NAME_LEN + 1) != 0,
            },
            Opcode::GetBaseAddress => Request::GetBaseAddress,
            Opcode::ListRegisterDescriptors => Request::ListRegisterDescriptors,
            Opcode::ReadAllRegisterValues => Request::ReadAllRegisterValues,
        };
        Ok(request)
    }

    /// Encodes the request payload into the front of `buf`, returning its length.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, Status> {
        let len = self.opcode().request_len();
        if buf.len() < len {
            return Err(Status::BadAddress);
        }
        let mut slice = WOSlice::new(&mut buf[..len]);

        match *self {
            Request::SetBaseAddress { base } => slice.write_i32_ne_at(0, base),
            Request::DefineRegister { name, offset } => {
                slice.write_name_at(0, name.as_bytes());
                slice.write_i32_ne_at(NAME_LEN, offset);
            }
            Request::WriteRegister { name, value } => {
                slice.write_name_at(0, name.as_bytes());
                slice.write_u32_ne_at(NAME_LEN, value);
            }
            Request::SetBit { name, bit, value } => {
                slice.write_name_at(0, name.as_bytes());
                slice.write_u8_at(NAME_LEN, bit);
                slice.write_u8_at(NAME_LEN + 1, u8::from(value));
            }
            Request::GetBaseAddress
            | Request::ListRegisterDescriptors
            | Request::ReadAllRegisterValues => {}
        }
        Ok(len)
    }
}

/// Result payload of an executed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Empty,
    BaseAddress(i32),
    Descriptors(Registers<RegisterDescriptor>),
    Values(Registers<RegisterValue>),
}

impl Response {
    /// Encodes the response into the front of `buf`, returning its length.
    ///
    /// Table responses always span all 32 slots; slots past the last
    /// defined register are zero-filled.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, Status> {
        let len = match self {
            Response::Empty => 0,
            Response::BaseAddress(_) => 4,
            Response::Descriptors(_) | Response::Values(_) => TABLE_RECORD_LEN,
        };
        if buf.len() < len {
            return Err(Status::BadAddress);
        }
        let mut slice = WOSlice::new(&mut buf[..len]);

        match self {
            Response::Empty => {}
            Response::BaseAddress(base) => slice.write_i32_ne_at(0, *base),
            Response::Descriptors(descriptors) => {
                slice.fill(0);
                for (slot, desc) in descriptors.iter().enumerate() {
                    let at = slot * REGISTER_RECORD_LEN;
                    slice.write_name_at(at, desc.name.as_bytes());
                    slice.write_i32_ne_at(at + NAME_LEN, desc.offset.get() as i32);
                }
            }
            Response::Values(values) => {
                slice.fill(0);
                for (slot, entry) in values.iter().enumerate() {
                    let at = slot * REGISTER_RECORD_LEN;
                    slice.write_name_at(at, entry.name.as_bytes());
                    slice.write_u32_ne_at(at + NAME_LEN, entry.value);
                }
            }
        }
        Ok(len)
    }

    /// Decodes the response to `opcode` from the front of `buf`.
    ///
    /// All-zero table records are skipped.
    pub fn decode(opcode: Opcode, buf: &[u8]) -> Result<Self, Status> {
        if buf.len() < opcode.response_len() {
            return Err(Status::BadAddress);
        }
        let slice = ROSlice::new(&buf[..opcode.response_len()]);

        let response = match opcode {
            Opcode::GetBaseAddress => Response::BaseAddress(slice.read_i32_ne_at(0)),
            Opcode::ListRegisterDescriptors => {
                let mut descriptors = Registers::new();
                for (name, at) in occupied_records(&slice) {
                    let offset = WindowOffset::new(slice.read_i32_ne_at(at + NAME_LEN) as u32)
                        .ok_or(Status::OutOfRange)?;
                    descriptors
                        .push(RegisterDescriptor { name, offset })
                        .map_err(|_| Status::NoSpace)?;
                }
                Response::Descriptors(descriptors)
            }
            Opcode::ReadAllRegisterValues => {
                let mut values = Registers::new();
                for (name, at) in occupied_records(&slice) {
                    let value = slice.read_u32_ne_at(at + NAME_LEN);
                    values
                        .push(RegisterValue { name, value })
                        .map_err(|_| Status::NoSpace)?;
                }
                Response::Values(values)
            }
            Opcode::SetBaseAddress
            | Opcode::DefineRegister
            | Opcode::WriteRegister
            | Opcode::SetBit => Response::Empty,
        };
        Ok(response)
    }
}

/// Names and byte positions of the non-sentinel records in a table payload.
fn occupied_records<'s>(
    slice: &'s ROSlice<'_>,
) -> impl Iterator<Item = (RegisterName, usize)> + 's {
    (0..MAX_REGISTERS)
        .map(|slot| slot * REGISTER_RECORD_LEN)
        .filter_map(move |at| Some((RegisterName::new(slice.read_name_at(at))?, at)))
}
