use anyhow::{anyhow, Result};
use serde::Serialize;
use tokio::io::AsyncRead;
use tracing::info;

use prefixint::codec::{self, constants::CONTINUATION_BIT, constants::DIGIT_MASK, VarIntError};
use prefixint::config::{CodecConfig, DecodeMode};
use prefixint::utils::io::read_all_prefixed;

#[derive(Debug, Serialize)]
pub struct EncodeReport {
    pub value: u32,
    pub prefix_bits: u8,
    pub flags: u8,
    pub hex: String,
    pub len: usize,
}

#[derive(Debug, Serialize)]
pub struct DecodeReport {
    pub value: u32,
    pub consumed: usize,
    pub mode: String,
}

#[derive(Debug, Serialize)]
pub struct ByteInfo {
    pub index: usize,
    pub raw: u8,
    pub digit: Option<u8>,
    pub continuation: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub bytes: Vec<ByteInfo>,
    pub lenient_value: u32,
    pub strict: std::result::Result<u32, String>,
}

/// Parse a flag byte given as decimal or `0x`-prefixed hex
pub fn parse_byte(s: &str) -> std::result::Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => u8::from_str_radix(digits, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid byte {:?}: {}", s, e))
}

pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(&cleaned).map_err(|e| anyhow!("invalid hex input {:?}: {}", input, e))
}

pub fn encode_report(value: u32, prefix_bits: u8, flags: u8) -> Result<EncodeReport> {
    let bytes = codec::encode_with_flags(value, prefix_bits, flags)?;
    Ok(EncodeReport {
        value,
        prefix_bits,
        flags,
        hex: hex::encode(&bytes),
        len: bytes.len(),
    })
}

pub fn decode_report(bytes: &[u8], prefix_bits: Option<u8>, mode: DecodeMode) -> Result<DecodeReport> {
    let report = match (prefix_bits, mode) {
        (Some(bits), _) => {
            let (value, consumed) = codec::decode_prefixed(bytes, bits)?;
            DecodeReport { value, consumed, mode: format!("prefixed({})", bits) }
        }
        (None, DecodeMode::Lenient) => DecodeReport {
            value: codec::decode(bytes)?,
            consumed: bytes.len(),
            mode: "lenient".to_string(),
        },
        (None, DecodeMode::Strict) => DecodeReport {
            value: codec::decode_strict(bytes)?,
            consumed: bytes.len(),
            mode: "strict".to_string(),
        },
    };
    Ok(report)
}

pub fn inspect_report(bytes: &[u8]) -> Result<InspectReport> {
    let lenient_value = codec::decode(bytes)?;
    let strict = codec::decode_strict(bytes).map_err(|e: VarIntError| e.to_string());

    let bytes = bytes
        .iter()
        .enumerate()
        .map(|(index, &raw)| {
            if index == 0 {
                ByteInfo { index, raw, digit: None, continuation: None }
            } else {
                ByteInfo {
                    index,
                    raw,
                    digit: Some(raw & DIGIT_MASK),
                    continuation: Some(raw & CONTINUATION_BIT != 0),
                }
            }
        })
        .collect();

    Ok(InspectReport { bytes, lenient_value, strict })
}

pub fn run_encode(value: u32, prefix_bits: u8, flags: u8, json: bool) -> Result<()> {
    let report = encode_report(value, prefix_bits, flags)?;
    info!("Encoded {} with {} prefix bits", value, prefix_bits);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.hex);
    }
    Ok(())
}

pub fn run_decode(input: &str, prefix_bits: Option<u8>, mode: DecodeMode, json: bool) -> Result<()> {
    let bytes = parse_hex(input)?;
    let report = decode_report(&bytes, prefix_bits, mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.value);
        if report.consumed < bytes.len() {
            println!("   ({} trailing bytes not part of the integer)", bytes.len() - report.consumed);
        }
    }
    Ok(())
}

pub fn run_inspect(input: &str, json: bool) -> Result<()> {
    let bytes = parse_hex(input)?;
    let report = inspect_report(&bytes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("🔍 Integer Layout");
    println!("=================");
    for b in &report.bytes {
        match (b.digit, b.continuation) {
            (Some(digit), Some(more)) => println!(
                "  [{}] {:02x}  digit={:<3} {}",
                b.index,
                b.raw,
                digit,
                if more { "more" } else { "last" }
            ),
            _ => println!("  [{}] {:02x}  prefix byte", b.index, b.raw),
        }
    }
    println!("Lenient value: {}", report.lenient_value);
    match &report.strict {
        Ok(v) => println!("✅ Strict value: {}", v),
        Err(e) => println!("❌ Strict decode failed: {}", e),
    }
    Ok(())
}

pub async fn run_decode_stream(input: Option<&str>, prefix_bits: u8, limit: usize, json: bool) -> Result<()> {
    let values = match input {
        Some(path) => {
            let mut file = tokio::fs::File::open(path).await?;
            decode_stream(&mut file, prefix_bits, limit).await?
        }
        None => {
            let mut stdin = tokio::io::stdin();
            decode_stream(&mut stdin, prefix_bits, limit).await?
        }
    };

    if json {
        println!("{}", serde_json::json!({ "prefix_bits": prefix_bits, "values": values }));
    } else {
        for v in &values {
            println!("{}", v);
        }
    }
    Ok(())
}

async fn decode_stream<R: AsyncRead + Unpin>(reader: &mut R, prefix_bits: u8, limit: usize) -> Result<Vec<u32>> {
    let values = read_all_prefixed(reader, prefix_bits, limit).await?;
    info!("Decoded {} integers from stream", values.len());
    Ok(values)
}

pub fn run_generate_config(output: &str, json: bool) -> Result<()> {
    CodecConfig::default().save(output)?;
    if json {
        println!("{}", serde_json::json!({ "config": output }));
    } else {
        println!("✅ Config written to {}", output);
    }
    Ok(())
}
