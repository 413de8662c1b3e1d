use std::fmt;

use crate::codec::constants::{MAX_ENCODED_LEN, MAX_PREFIX_BITS, MAX_VALUE};

/// Broad classification of a codec failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller broke a precondition (bad prefix, value or empty input)
    ContractViolation,
    /// The bytes do not form a well-shaped encoding
    MalformedInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarIntError {
    PrefixOutOfRange(u8),
    ValueOutOfRange(u32),
    EmptyInput,
    Truncated,
    UnterminatedSequence,
    UnexpectedTerminator { index: usize },
    PaddedEncoding,
    Overflow,
    TooLong(usize),
}

impl VarIntError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VarIntError::PrefixOutOfRange(_)
            | VarIntError::ValueOutOfRange(_)
            | VarIntError::EmptyInput => ErrorKind::ContractViolation,
            _ => ErrorKind::MalformedInput,
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        self.kind() == ErrorKind::ContractViolation
    }
}

impl fmt::Display for VarIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarIntError::PrefixOutOfRange(bits) =>
                write!(f, "prefix width {} out of range (max {})", bits, MAX_PREFIX_BITS),
            VarIntError::ValueOutOfRange(v) =>
                write!(f, "value {} exceeds maximum encodable value {}", v, MAX_VALUE),
            VarIntError::EmptyInput =>
                write!(f, "empty input"),
            VarIntError::Truncated =>
                write!(f, "truncated integer: continuation byte missing"),
            VarIntError::UnterminatedSequence =>
                write!(f, "last byte has continuation bit set"),
            VarIntError::UnexpectedTerminator { index } =>
                write!(f, "byte {} ends the integer before the last byte", index),
            VarIntError::PaddedEncoding =>
                write!(f, "non-canonical encoding: trailing zero digit"),
            VarIntError::Overflow =>
                write!(f, "decoded value exceeds {}", MAX_VALUE),
            VarIntError::TooLong(len) =>
                write!(f, "encoding too long: {} bytes (max {})", len, MAX_ENCODED_LEN),
        }
    }
}

impl std::error::Error for VarIntError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_contract_violations() {
        assert!(VarIntError::PrefixOutOfRange(8).is_contract_violation());
        assert!(VarIntError::ValueOutOfRange(u32::MAX).is_contract_violation());
        assert!(VarIntError::EmptyInput.is_contract_violation());
        assert_eq!(VarIntError::Truncated.kind(), ErrorKind::MalformedInput);
        assert_eq!(
            VarIntError::UnexpectedTerminator { index: 2 }.kind(),
            ErrorKind::MalformedInput
        );
    }

    #[test]
    fn display_names_the_offending_value() {
        assert_eq!(
            VarIntError::PrefixOutOfRange(9).to_string(),
            "prefix width 9 out of range (max 7)"
        );
        assert_eq!(
            VarIntError::TooLong(7).to_string(),
            "encoding too long: 7 bytes (max 6)"
        );
    }
}
