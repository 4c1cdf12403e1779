//! Replays a typical client session against simulated device memory.
//!
//! Run with: `cargo run --example basic`

use embedded_regmap::{
    prelude::*,
    regmap::protocol::{Opcode, Request, Response, Status, TABLE_RECORD_LEN, dispatch},
};

fn send(engine: &RegisterEngine<MemoryBackend>, request: Request) -> Result<Response, Status> {
    let opcode = request.opcode();
    let mut buf = [0u8; TABLE_RECORD_LEN];
    request.encode(&mut buf)?;
    dispatch(engine, opcode.request_code(), &mut buf)?;
    Response::decode(opcode, &buf)
}

fn main() -> Result<(), Status> {
    let engine = RegisterEngineBuilder::new()
        .memory_backend()
        .build()
        .map_err(Status::from)?;

    let reg1 = RegisterName::new(*b"REG1").ok_or(Status::InvalidArgument)?;

    send(&engine, Request::SetBaseAddress { base: 0x1000 })?;
    send(&engine, Request::DefineRegister { name: reg1, offset: 0x4 })?;
    send(&engine, Request::WriteRegister { name: reg1, value: 0x1234 })?;
    send(&engine, Request::SetBit { name: reg1, bit: 31, value: true })?;

    if let Response::BaseAddress(base) = send(&engine, Request::GetBaseAddress)? {
        println!("Base Address: 0x{base:x}");
    }

    if let Response::Descriptors(descriptors) = send(&engine, Request::ListRegisterDescriptors)? {
        for desc in &descriptors {
            println!("Register: {}, Offset: 0x{:x}", desc.name, desc.offset.get());
        }
    }

    if let Response::Values(values) = send(&engine, Request::ReadAllRegisterValues)? {
        for entry in &values {
            println!("Register: {}, Value: 0x{:08x}", entry.name, entry.value);
        }
    }

    // Unknown names are reported instead of silently ignored
    let missing = RegisterName::new(*b"NOPE").ok_or(Status::InvalidArgument)?;
    if let Err(status) = send(&engine, Request::WriteRegister { name: missing, value: 1 }) {
        println!("write to {missing}: {status} ({})", status.to_wire());
    }

    println!("Request codes:");
    for op in Opcode::ALL {
        println!("  {op:?}: {:#010x}", op.request_code());
    }

    Ok(())
}
