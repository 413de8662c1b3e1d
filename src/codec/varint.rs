//! Prefixed variable-length integers (HPACK integer representation).
//!
//! Format: the first byte keeps `prefix_bits` low bits for the value. Values
//! that do not fit below the all-ones prefix spill into base-128 digits,
//! least significant first, with bit 7 as the continuation flag.

use tracing::{debug, trace};

use crate::codec::constants::{
    prefix_max, CONTINUATION_BIT, DIGIT_MASK, DIVIDER, MAX_ENCODED_LEN, MAX_PREFIX_BITS, MAX_VALUE,
};
use crate::codec::error::VarIntError;

pub(crate) fn check_prefix(prefix_bits: u8) -> Result<(), VarIntError> {
    if prefix_bits > MAX_PREFIX_BITS {
        debug!("Rejected prefix width {}", prefix_bits);
        return Err(VarIntError::PrefixOutOfRange(prefix_bits));
    }
    Ok(())
}

fn check_value(value: u32) -> Result<(), VarIntError> {
    if value > MAX_VALUE {
        debug!("Rejected value {} above {}", value, MAX_VALUE);
        return Err(VarIntError::ValueOutOfRange(value));
    }
    Ok(())
}

/// Number of bytes `encode` produces for `value`
pub fn encoded_len(value: u32, prefix_bits: u8) -> Result<usize, VarIntError> {
    check_prefix(prefix_bits)?;
    check_value(value)?;

    let max = prefix_max(prefix_bits);
    if value < max {
        return Ok(1);
    }

    let mut remainder = (value - max) / DIVIDER;
    let mut len = 2;
    while remainder > 0 {
        remainder /= DIVIDER;
        len += 1;
    }
    Ok(len)
}

/// Encode `value` with a `prefix_bits`-wide prefix.
///
/// A value equal to the prefix maximum does not use the short form: `31` with
/// a 5-bit prefix encodes as `[31, 0]`.
pub fn encode(value: u32, prefix_bits: u8) -> Result<Vec<u8>, VarIntError> {
    let mut out = Vec::with_capacity(encoded_len(value, prefix_bits)?);
    encode_into(value, prefix_bits, &mut out)?;
    Ok(out)
}

/// Append the encoding of `value` to `out`, returning the bytes written
pub fn encode_into(value: u32, prefix_bits: u8, out: &mut Vec<u8>) -> Result<usize, VarIntError> {
    check_prefix(prefix_bits)?;
    check_value(value)?;

    let max = prefix_max(prefix_bits);
    if value < max {
        out.push(value as u8);
        trace!("Encoded {} in prefix ({} bits)", value, prefix_bits);
        return Ok(1);
    }

    let start = out.len();
    out.push(max as u8);

    let mut remainder = value - max;
    loop {
        let carry = remainder / DIVIDER;
        let mut digit = (remainder % DIVIDER) as u8;
        if carry > 0 {
            digit |= CONTINUATION_BIT;
        }
        out.push(digit);
        remainder = carry;
        if carry == 0 {
            break;
        }
    }

    let written = out.len() - start;
    trace!("Encoded {} as {} bytes ({} prefix bits)", value, written, prefix_bits);
    Ok(written)
}

/// Decode a complete encoding.
///
/// Lenient: continuation bits are ignored and the first byte is added
/// unmasked, so flag bits in it end up in the result. Arithmetic wraps at 32
/// bits. Use [`decode_strict`] for untrusted input.
pub fn decode(bytes: &[u8]) -> Result<u32, VarIntError> {
    let (first, digits) = bytes.split_first().ok_or(VarIntError::EmptyInput)?;

    let value = digits.iter().rev().fold(0u32, |acc, &b| {
        acc.wrapping_mul(DIVIDER).wrapping_add((b & DIGIT_MASK) as u32)
    });

    Ok(value.wrapping_add(*first as u32))
}

/// Decode a complete encoding, rejecting anything `encode` would not produce
/// from the digit bytes alone.
pub fn decode_strict(bytes: &[u8]) -> Result<u32, VarIntError> {
    let (first, digits) = bytes.split_first().ok_or(VarIntError::EmptyInput)?;

    if bytes.len() > MAX_ENCODED_LEN {
        debug!("Encoding too long: {} bytes", bytes.len());
        return Err(VarIntError::TooLong(bytes.len()));
    }

    if let Some((last, body)) = digits.split_last() {
        if let Some(pos) = body.iter().position(|b| b & CONTINUATION_BIT == 0) {
            debug!("Digit {} lacks continuation bit", pos + 1);
            return Err(VarIntError::UnexpectedTerminator { index: pos + 1 });
        }
        if last & CONTINUATION_BIT != 0 {
            debug!("Final digit has continuation bit set");
            return Err(VarIntError::UnterminatedSequence);
        }
        if !body.is_empty() && *last == 0 {
            return Err(VarIntError::PaddedEncoding);
        }
    }

    let mut value = 0u32;
    for &b in digits.iter().rev() {
        value = value
            .checked_mul(DIVIDER)
            .and_then(|v| v.checked_add((b & DIGIT_MASK) as u32))
            .ok_or(VarIntError::Overflow)?;
    }

    match value.checked_add(*first as u32) {
        Some(v) if v <= MAX_VALUE => Ok(v),
        _ => Err(VarIntError::Overflow),
    }
}
