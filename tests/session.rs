//! End-to-end command sessions through the record protocol.

use embedded_regmap::{
    prelude::*,
    regmap::protocol::{Opcode, Request, Response, Status, TABLE_RECORD_LEN, dispatch},
};

fn reg(bytes: &[u8; 4]) -> RegisterName {
    RegisterName::new(*bytes).unwrap()
}

fn send(engine: &RegisterEngine<MemoryBackend>, request: Request) -> Result<usize, Status> {
    let mut buf = [0u8; TABLE_RECORD_LEN];
    request.encode(&mut buf)?;
    dispatch(engine, request.opcode().request_code(), &mut buf)
}

fn query(engine: &RegisterEngine<MemoryBackend>, opcode: Opcode) -> Result<Response, Status> {
    let mut buf = [0u8; TABLE_RECORD_LEN];
    dispatch(engine, opcode.request_code(), &mut buf)?;
    Response::decode(opcode, &buf)
}

#[test]
fn sample_user_space_flow() {
    let engine = RegisterEngineBuilder::new().memory_backend().build().unwrap();

    send(&engine, Request::SetBaseAddress { base: 0x1000 }).unwrap();
    send(&engine, Request::DefineRegister { name: reg(b"REG1"), offset: 0x4 }).unwrap();
    send(&engine, Request::WriteRegister { name: reg(b"REG1"), value: 0x1234 }).unwrap();

    assert_eq!(query(&engine, Opcode::GetBaseAddress), Ok(Response::BaseAddress(0x1000)));

    let Ok(Response::Descriptors(descriptors)) = query(&engine, Opcode::ListRegisterDescriptors)
    else {
        panic!("expected descriptors");
    };
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].name, reg(b"REG1"));
    assert_eq!(descriptors[0].offset.get(), 0x4);

    let Ok(Response::Values(values)) = query(&engine, Opcode::ReadAllRegisterValues) else {
        panic!("expected values");
    };
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, 0x1234);
}

#[test]
fn set_bit_over_protocol() {
    let engine = RegisterEngineBuilder::new()
        .memory_backend()
        .base_address(0x1000)
        .build()
        .unwrap();

    send(&engine, Request::DefineRegister { name: reg(b"CTRL"), offset: 0x0 }).unwrap();
    send(&engine, Request::WriteRegister { name: reg(b"CTRL"), value: 0x0000_00F0 }).unwrap();
    send(&engine, Request::SetBit { name: reg(b"CTRL"), bit: 0, value: true }).unwrap();
    send(&engine, Request::SetBit { name: reg(b"CTRL"), bit: 4, value: false }).unwrap();

    assert_eq!(engine.read_register(reg(b"CTRL")), Ok(0x0000_00E1));
    assert_eq!(
        send(&engine, Request::SetBit { name: reg(b"CTRL"), bit: 32, value: true }),
        Err(Status::InvalidArgument)
    );
}

#[test]
fn failed_remap_keeps_previous_window() {
    let engine = RegisterEngineBuilder::new()
        .backend(MemoryBackend::new().refusing(|base| base == 0xDEAD_0000))
        .base_address(0x1000)
        .build()
        .unwrap();
    engine.define_register(reg(b"REG1"), 0x8).unwrap();
    engine.write_register(reg(b"REG1"), 7).unwrap();

    assert_eq!(
        send(&engine, Request::SetBaseAddress { base: 0xDEAD_0000u32 as i32 }),
        Err(Status::OutOfMemory)
    );
    assert_eq!(Status::OutOfMemory.to_wire(), -12);
    assert_eq!(engine.base_address(), Ok(0x1000));
    assert_eq!(engine.read_register(reg(b"REG1")), Ok(7));
}

#[test]
fn full_table_and_teardown() {
    let engine = RegisterEngineBuilder::new()
        .memory_backend()
        .base_address(0x1000)
        .build()
        .unwrap();

    for i in 0..32u8 {
        let name = RegisterName::new([b'R', b'0' + i / 10, b'0' + i % 10, b'_']).unwrap();
        send(&engine, Request::DefineRegister { name, offset: i32::from(i) * 4 }).unwrap();
    }
    assert_eq!(
        send(&engine, Request::DefineRegister { name: reg(b"MORE"), offset: 0 }),
        Err(Status::NoSpace)
    );

    engine.teardown();
    assert_eq!(engine.state(), EngineState::Destroyed);
    assert_eq!(query(&engine, Opcode::GetBaseAddress), Err(Status::NoDevice));
}
