//! Integers whose first byte is shared with protocol flags.
//!
//! Header representations put their type bits above the prefix, so the first
//! byte has to be masked before it contributes to the value. Decoding here
//! also stops at the terminating digit, which lets a frame parser keep reading
//! the same buffer afterwards.

use tracing::{debug, trace};

use crate::codec::constants::{prefix_max, CONTINUATION_BIT, DIGIT_MASK, MAX_ENCODED_LEN, MAX_VALUE};
use crate::codec::error::VarIntError;
use crate::codec::varint::{check_prefix, encode};

/// Flag bits of a first byte, i.e. everything above the prefix
pub fn split_flags(first_byte: u8, prefix_bits: u8) -> Result<u8, VarIntError> {
    check_prefix(prefix_bits)?;
    Ok(first_byte & !(prefix_max(prefix_bits) as u8))
}

/// Encode `value` and set `flags` in the bits above the prefix.
///
/// Flag bits that overlap the prefix are dropped.
pub fn encode_with_flags(value: u32, prefix_bits: u8, flags: u8) -> Result<Vec<u8>, VarIntError> {
    let mut out = encode(value, prefix_bits)?;
    if let Some(first) = out.first_mut() {
        *first |= flags & !(prefix_max(prefix_bits) as u8);
    }
    Ok(out)
}

/// Decode one integer from the front of `buf`.
///
/// Returns the value and the number of bytes it occupied; anything after that
/// is left untouched.
pub fn decode_prefixed(buf: &[u8], prefix_bits: u8) -> Result<(u32, usize), VarIntError> {
    check_prefix(prefix_bits)?;
    let (&first, rest) = buf.split_first().ok_or(VarIntError::EmptyInput)?;

    let max = prefix_max(prefix_bits);
    let short = first as u32 & max;
    if short < max {
        return Ok((short, 1));
    }

    let mut value = max as u64;
    let mut shift = 0u32;
    for (i, &b) in rest.iter().enumerate() {
        let consumed = i + 2;
        if consumed > MAX_ENCODED_LEN {
            debug!("Integer runs past {} bytes", MAX_ENCODED_LEN);
            return Err(VarIntError::TooLong(consumed));
        }

        value += ((b & DIGIT_MASK) as u64) << shift;
        if value > MAX_VALUE as u64 {
            debug!("Integer overflow after {} bytes", consumed);
            return Err(VarIntError::Overflow);
        }

        if b & CONTINUATION_BIT == 0 {
            trace!("Decoded {} from {} bytes ({} prefix bits)", value, consumed, prefix_bits);
            return Ok((value as u32, consumed));
        }
        shift += 7;
    }

    debug!("Buffer ended inside integer after {} bytes", buf.len());
    Err(VarIntError::Truncated)
}
