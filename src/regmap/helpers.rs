//! Bit arithmetic shared by the engine and by callers composing register values.

use crate::regmap::EngineError;

/// Number of bits in one register.
pub const REGISTER_BITS: u8 = 32;

/// Returns the single-bit mask for `bit`.
///
/// # Errors
/// * [`EngineError::BitOutOfRange`] - if `bit >= 32`
///
/// # Example
/// ```
/// use embedded_regmap::regmap::helpers::bit_mask;
///
/// assert_eq!(bit_mask(0), Ok(0x0000_0001));
/// assert_eq!(bit_mask(31), Ok(0x8000_0000));
/// assert!(bit_mask(32).is_err());
/// ```
pub fn bit_mask(bit: u8) -> Result<u32, EngineError> {
    if bit >= REGISTER_BITS {
        return Err(EngineError::BitOutOfRange);
    }
    Ok(1u32 << bit)
}

/// Sets or clears exactly one bit of `current`, leaving the other 31 untouched.
///
/// # Example
/// ```
/// use embedded_regmap::regmap::helpers::apply_bit;
///
/// assert_eq!(apply_bit(0x0000_00F0, 0, true), Ok(0x0000_00F1));
/// assert_eq!(apply_bit(0x0000_00F0, 4, false), Ok(0x0000_00E0));
/// ```
pub fn apply_bit(current: u32, bit: u8, value: bool) -> Result<u32, EngineError> {
    let mask = bit_mask(bit)?;
    if value {
        Ok(current | mask)
    } else {
        Ok(current & !mask)
    }
}

#[test]
fn apply_bit_edge_cases() {
    // Setting an already-set bit is a no-op
    assert_eq!(apply_bit(u32::MAX, 17, true), Ok(u32::MAX));

    // Clearing an already-clear bit is a no-op
    assert_eq!(apply_bit(0, 17, false), Ok(0));

    // Top bit
    assert_eq!(apply_bit(0, 31, true), Ok(0x8000_0000));
    assert_eq!(apply_bit(u32::MAX, 31, false), Ok(0x7FFF_FFFF));

    // Out of range leaves nothing to apply
    assert_eq!(apply_bit(0, 32, true), Err(EngineError::BitOutOfRange));
    assert_eq!(apply_bit(0, 255, false), Err(EngineError::BitOutOfRange));
}
