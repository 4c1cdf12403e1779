use embedded_regmap::{
    prelude::*,
    regmap::{MAX_REGISTERS, WINDOW_SIZE},
};
use proptest::prelude::*;

fn engine_with(initial: u32) -> RegisterEngine<MemoryBackend> {
    let mut contents = [0; MAX_REGISTERS];
    contents[1] = initial;
    RegisterEngineBuilder::new()
        .backend(MemoryBackend::with_contents(contents))
        .base_address(0x2000)
        .build()
        .unwrap()
}

fn any_name() -> impl Strategy<Value = RegisterName> {
    (1u8..=255, any::<[u8; 3]>())
        .prop_map(|(first, rest)| RegisterName::new([first, rest[0], rest[1], rest[2]]).unwrap())
}

proptest! {
    #[test]
    fn set_bit_touches_only_its_bit(initial in any::<u32>(), bit in 0u8..32, value in any::<bool>()) {
        let engine = engine_with(initial);
        let name = RegisterName::new(*b"REG1").unwrap();
        engine.define_register(name, 0x4).unwrap();

        engine.set_bit(name, bit, value).unwrap();
        let after = engine.read_register(name).unwrap();

        let mask = 1u32 << bit;
        prop_assert_eq!(after & !mask, initial & !mask);
        prop_assert_eq!(after & mask != 0, value);
    }

    #[test]
    fn set_then_clear_restores_other_bits(initial in any::<u32>(), bit in 0u8..32) {
        let engine = engine_with(initial);
        let name = RegisterName::new(*b"REG1").unwrap();
        engine.define_register(name, 0x4).unwrap();

        engine.set_bit(name, bit, true).unwrap();
        engine.set_bit(name, bit, false).unwrap();

        prop_assert_eq!(engine.read_register(name), Ok(initial & !(1u32 << bit)));
    }

    #[test]
    fn bits_past_31_are_rejected(initial in any::<u32>(), bit in 32u8..) {
        let engine = engine_with(initial);
        let name = RegisterName::new(*b"REG1").unwrap();
        engine.define_register(name, 0x4).unwrap();

        prop_assert_eq!(engine.set_bit(name, bit, true), Err(EngineError::BitOutOfRange));
        prop_assert_eq!(engine.read_register(name), Ok(initial));
    }

    #[test]
    fn defined_names_resolve_to_their_offset(name in any_name(), word in 0u32..(WINDOW_SIZE as u32 / 4)) {
        let engine = engine_with(0);
        engine.define_register(name, word * 4).unwrap();

        let descriptors = engine.register_descriptors().unwrap();
        prop_assert_eq!(descriptors.len(), 1);
        prop_assert_eq!(descriptors[0].name, name);
        prop_assert_eq!(descriptors[0].offset.get(), word as usize * 4);

        engine.write_register(name, 0xA5A5_0000 | word).unwrap();
        prop_assert_eq!(engine.read_register(name), Ok(0xA5A5_0000 | word));
    }

    #[test]
    fn unaligned_or_outside_offsets_are_rejected(offset in any::<u32>()) {
        prop_assume!(offset % 4 != 0 || offset >= WINDOW_SIZE as u32);
        let engine = engine_with(0);
        let name = RegisterName::new(*b"BAD_").unwrap();

        prop_assert_eq!(
            engine.define_register(name, offset),
            Err(EngineError::Table(TableError::OffsetOutOfRange))
        );
        prop_assert!(engine.register_descriptors().unwrap().is_empty());
    }
}
