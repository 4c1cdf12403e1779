//! Fixed-size command records exchanged with the engine.
//!
//! A command shell hands [`dispatch`] the raw request code and the caller's
//! buffer; the request payload is read from the front of the buffer and the
//! response, if any, is written back over it.

mod opcode;
mod record;
mod status;

pub use opcode::{IOCTL_MAGIC, NAME_LEN, Opcode, REGISTER_RECORD_LEN, TABLE_RECORD_LEN};
pub use record::{Request, Response};
pub use status::Status;

use crate::regmap::{EngineError, RegisterEngine, backend::MapBackend};

/// Runs one decoded request against the engine.
pub fn execute<B: MapBackend>(
    engine: &RegisterEngine<B>,
    request: Request,
) -> Result<Response, EngineError> {
    // Wire integers are reinterpreted bit for bit; negative offsets land
    // far outside the window and are rejected by the table.
    match request {
        Request::SetBaseAddress { base } => {
            engine.set_base_address(base as u32)?;
            Ok(Response::Empty)
        }
        Request::DefineRegister { name, offset } => {
            engine.define_register(name, offset as u32)?;
            Ok(Response::Empty)
        }
        Request::WriteRegister { name, value } => {
            engine.write_register(name, value)?;
            Ok(Response::Empty)
        }
        Request::SetBit { name, bit, value } => {
            engine.set_bit(name, bit, value)?;
            Ok(Response::Empty)
        }
        Request::GetBaseAddress => Ok(Response::BaseAddress(engine.base_address()? as i32)),
        Request::ListRegisterDescriptors => {
            Ok(Response::Descriptors(engine.register_descriptors()?))
        }
        Request::ReadAllRegisterValues => Ok(Response::Values(engine.register_values()?)),
    }
}

/// Decodes the request for `request_code` from `buf`, executes it, and writes
/// the response back into `buf`.
///
/// Returns the number of response bytes written.
pub fn dispatch<B: MapBackend>(
    engine: &RegisterEngine<B>,
    request_code: u32,
    buf: &mut [u8],
) -> Result<usize, Status> {
    let Some(opcode) = Opcode::from_request_code(request_code) else {
        log::warn!("unknown request code {request_code:#010x}");
        return Err(Status::InvalidArgument);
    };
    let request = Request::decode(opcode, buf)?;
    let response = execute(engine, request)?;
    response.encode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regmap::test_support::{TestEngine, name, test_engine};

    fn send(engine: &TestEngine, request: Request) -> Result<usize, Status> {
        let mut buf = [0u8; TABLE_RECORD_LEN];
        request.encode(&mut buf)?;
        dispatch(engine, request.opcode().request_code(), &mut buf)
    }

    #[test]
    fn sample_session() {
        let engine = test_engine();

        send(&engine, Request::SetBaseAddress { base: 0x1000 }).unwrap();
        send(
            &engine,
            Request::DefineRegister {
                name: name(b"REG1"),
                offset: 0x4,
            },
        )
        .unwrap();
        send(
            &engine,
            Request::WriteRegister {
                name: name(b"REG1"),
                value: 0x1234,
            },
        )
        .unwrap();

        let mut buf = [0u8; 4];
        let len = dispatch(&engine, Opcode::GetBaseAddress.request_code(), &mut buf).unwrap();
        assert_eq!(len, 4);
        assert_eq!(
            Response::decode(Opcode::GetBaseAddress, &buf),
            Ok(Response::BaseAddress(0x1000))
        );

        let mut buf = [0u8; TABLE_RECORD_LEN];
        dispatch(&engine, Opcode::ReadAllRegisterValues.request_code(), &mut buf).unwrap();
        let Ok(Response::Values(values)) = Response::decode(Opcode::ReadAllRegisterValues, &buf)
        else {
            panic!("expected register values");
        };
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, 0x1234);
    }

    #[test]
    fn errors_become_status_codes() {
        let engine = test_engine();

        assert_eq!(
            send(
                &engine,
                Request::WriteRegister {
                    name: name(b"REG1"),
                    value: 1
                }
            ),
            Err(Status::NotMapped)
        );

        send(&engine, Request::SetBaseAddress { base: 0x1000 }).unwrap();
        assert_eq!(
            send(
                &engine,
                Request::WriteRegister {
                    name: name(b"REG1"),
                    value: 1
                }
            ),
            Err(Status::NotFound)
        );
        assert_eq!(
            send(
                &engine,
                Request::DefineRegister {
                    name: name(b"NEG_"),
                    offset: -4
                }
            ),
            Err(Status::OutOfRange)
        );
    }

    #[test]
    fn unknown_request_code_is_invalid() {
        let engine = test_engine();
        let mut buf = [0u8; 8];
        assert_eq!(dispatch(&engine, 0xDEAD_BEEF, &mut buf), Err(Status::InvalidArgument));
    }

    #[test]
    fn negative_base_round_trips_bitwise() {
        let engine = test_engine();
        send(&engine, Request::SetBaseAddress { base: -0x1000 }).unwrap();
        assert_eq!(engine.base_address(), Ok(0xFFFF_F000));

        let mut buf = [0u8; 4];
        dispatch(&engine, Opcode::GetBaseAddress.request_code(), &mut buf).unwrap();
        assert_eq!(i32::from_ne_bytes(buf), -0x1000);
    }
}
