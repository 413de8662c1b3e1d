pub mod constants;
pub mod error;
pub mod prefixed;
pub mod varint;

pub use constants::{MAX_ENCODED_LEN, MAX_PREFIX_BITS, MAX_VALUE};
pub use error::{ErrorKind, VarIntError};
pub use prefixed::{decode_prefixed, encode_with_flags, split_flags};
pub use varint::{decode, decode_strict, encode, encode_into, encoded_len};
