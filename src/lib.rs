//! `prefixint`: HPACK-style prefixed variable-length integers.
//!
//! The codec lives in [`codec`]; [`utils::io`] moves integers over async byte
//! streams and [`config`] holds the settings of the `prefixint` tool.

pub mod codec;
pub mod config;
pub mod utils;

pub use codec::{decode, decode_prefixed, decode_strict, encode, encode_with_flags, VarIntError};
