//! Constants for the prefixed integer representation

/// Base of each continuation digit
pub const DIVIDER: u32 = 128;

/// High bit of a digit byte: another digit follows
pub const CONTINUATION_BIT: u8 = 0x80;

/// Low 7 bits of a digit byte
pub const DIGIT_MASK: u8 = 0x7F;

/// Widest prefix the first byte may reserve
pub const MAX_PREFIX_BITS: u8 = 7;

/// Largest encodable value (2^31 - 1)
pub const MAX_VALUE: u32 = i32::MAX as u32;

/// Prefix byte plus five base-128 digits covers a 31-bit magnitude
pub const MAX_ENCODED_LEN: usize = 6;

/// Value that fills every prefix bit, e.g. 31 for a 5-bit prefix
pub const fn prefix_max(prefix_bits: u8) -> u32 {
    (1u32 << prefix_bits) - 1
}
