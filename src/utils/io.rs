use anyhow::bail;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

use crate::codec::constants::{prefix_max, CONTINUATION_BIT, MAX_ENCODED_LEN};
use crate::codec::varint::check_prefix;
use crate::codec::{decode_prefixed, encode, VarIntError};

/// Read one prefixed integer.
///
/// Returns `Ok(None)` when the stream ends before the first byte; ending
/// anywhere inside an integer is an error.
pub async fn read_prefixed<R: AsyncRead + Unpin>(
    reader: &mut R,
    prefix_bits: u8,
) -> anyhow::Result<Option<u32>> {
    check_prefix(prefix_bits)?;

    let first = match reader.read_u8().await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let max = prefix_max(prefix_bits);
    let mut buf = Vec::with_capacity(MAX_ENCODED_LEN);
    buf.push(first);

    let mut pending = first as u32 & max == max;
    while pending && buf.len() < MAX_ENCODED_LEN {
        let b = match reader.read_u8().await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                debug!("Stream ended inside integer after {} bytes", buf.len());
                return Err(VarIntError::Truncated.into());
            }
            Err(e) => return Err(e.into()),
        };
        buf.push(b);
        pending = b & CONTINUATION_BIT != 0;
    }

    if pending {
        return Err(VarIntError::TooLong(buf.len() + 1).into());
    }

    let (value, _) = decode_prefixed(&buf, prefix_bits)?;
    trace!("Read {} ({} bytes)", value, buf.len());
    Ok(Some(value))
}

/// Read integers until EOF, failing once more than `limit` are seen
pub async fn read_all_prefixed<R: AsyncRead + Unpin>(
    reader: &mut R,
    prefix_bits: u8,
    limit: usize,
) -> anyhow::Result<Vec<u32>> {
    let mut values = Vec::new();
    while let Some(value) = read_prefixed(reader, prefix_bits).await? {
        if values.len() == limit {
            bail!("stream holds more than {} integers", limit);
        }
        values.push(value);
    }
    debug!("Read {} integers from stream", values.len());
    Ok(values)
}

/// Encode and write one integer, then flush
pub async fn write_prefixed<W: AsyncWrite + Unpin>(
    writer: &mut W,
    value: u32,
    prefix_bits: u8,
) -> anyhow::Result<usize> {
    let bytes = encode(value, prefix_bits)?;
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_then_read_back() {
        let mut out = Vec::new();
        let mut total = 0;
        for value in [10u32, 31, 1337, 0] {
            total += write_prefixed(&mut out, value, 5).await.unwrap();
        }
        assert_eq!(total, out.len());

        let mut reader: &[u8] = &out;
        let values = read_all_prefixed(&mut reader, 5, 16).await.unwrap();
        assert_eq!(values, vec![10, 31, 1337, 0]);
    }

    #[tokio::test]
    async fn empty_stream_yields_none() {
        let mut reader: &[u8] = &[];
        assert_eq!(read_prefixed(&mut reader, 7).await.unwrap(), None);
    }

    #[tokio::test]
    async fn stops_at_terminating_digit() {
        let mut reader: &[u8] = &[0x1F, 0x9A, 0x0A, 0x05];
        assert_eq!(read_prefixed(&mut reader, 5).await.unwrap(), Some(1337));
        assert_eq!(reader, &[0x05u8][..]);
    }

    #[tokio::test]
    async fn truncated_stream_is_an_error() {
        let mut reader: &[u8] = &[0x1F, 0x9A];
        let err = read_prefixed(&mut reader, 5).await.unwrap_err();
        assert_eq!(err.downcast_ref::<VarIntError>(), Some(&VarIntError::Truncated));
    }

    #[tokio::test]
    async fn runaway_continuation_is_an_error() {
        let mut reader: &[u8] = &[0x7F, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        let err = read_prefixed(&mut reader, 7).await.unwrap_err();
        assert_eq!(err.downcast_ref::<VarIntError>(), Some(&VarIntError::TooLong(7)));
    }

    #[tokio::test]
    async fn enforces_value_limit() {
        let mut reader: &[u8] = &[1, 2, 3];
        assert!(read_all_prefixed(&mut reader, 7, 2).await.is_err());
    }

    #[tokio::test]
    async fn rejects_bad_prefix() {
        let mut reader: &[u8] = &[1];
        let err = read_prefixed(&mut reader, 9).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<VarIntError>(),
            Some(&VarIntError::PrefixOutOfRange(9))
        );
    }
}
