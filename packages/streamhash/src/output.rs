//! Digest encoding
//!
//! Converts digest words into the caller's requested representation.

use crate::options::OutputOptions;
use crate::packed::{ByteOrder, PackedValue};
use crate::{HashError, Result};
use base64::{Engine as _, engine::general_purpose};
use std::str::FromStr;

/// Requested digest representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Hexadecimal string
    Hex,
    /// Base64 string
    Base64,
    /// Raw bytes
    Bytes,
}

impl FromStr for OutputFormat {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HEX" => Ok(Self::Hex),
            "B64" => Ok(Self::Base64),
            "BYTES" | "UINT8ARRAY" | "ARRAYBUFFER" => Ok(Self::Bytes),
            _ => Err(HashError::config(format!(
                "format must be HEX, B64, BYTES, UINT8ARRAY, or ARRAYBUFFER, got {s:?}"
            ))),
        }
    }
}

/// Encoded digest
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashOutput {
    /// Hex or base64 text
    Text(String),
    /// Raw digest bytes
    Bytes(Vec<u8>),
}

impl HashOutput {
    /// The text form, if this is a textual encoding
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Bytes(_) => None,
        }
    }

    /// The underlying bytes (UTF-8 bytes of the text for textual encodings)
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes.as_slice(),
        }
    }

    /// Convert to a `Vec<u8>`
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    /// Take the text form, if this is a textual encoding
    #[must_use]
    pub fn into_string(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes(_) => None,
        }
    }
}

impl AsRef<[u8]> for HashOutput {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Display for HashOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Bytes(bytes) => f.write_str(&hex::encode(bytes)),
        }
    }
}

/// Encode the first `bit_len` bits of `words` in `format`.
///
/// # Errors
///
/// Returns [`HashError::Config`] if `bit_len` is not a multiple of 8 or the
/// words hold fewer than `bit_len` bits.
pub fn encode(
    words: &[u32],
    bit_len: u32,
    order: ByteOrder,
    format: OutputFormat,
    opts: &OutputOptions,
) -> Result<HashOutput> {
    if bit_len % 8 != 0 {
        return Err(HashError::config("Output length must be a multiple of 8"));
    }
    let mut digest = PackedValue::new(words.to_vec(), u64::from(bit_len))?;
    digest.clear_tail(order);
    let bytes = digest.to_bytes(order);

    Ok(match format {
        OutputFormat::Hex if opts.output_upper => HashOutput::Text(hex::encode_upper(bytes)),
        OutputFormat::Hex => HashOutput::Text(hex::encode(bytes)),
        OutputFormat::Base64 => {
            let mut text = general_purpose::STANDARD_NO_PAD.encode(&bytes);
            if let Some(pad) = opts.b64_pad {
                text.extend(std::iter::repeat(pad).take((3 - bytes.len() % 3) % 3));
            }
            HashOutput::Text(text)
        }
        OutputFormat::Bytes => HashOutput::Bytes(bytes),
    })
}
