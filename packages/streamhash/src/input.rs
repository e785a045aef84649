//! Input decoding
//!
//! Turns caller input (text in a declared encoding, hex, base64, raw bytes or
//! an already packed bit sequence) into a [`PackedValue`] laid out in the
//! variant's byte order. [`resolve`] handles the named, optional inputs that
//! arrive through option objects, such as a KMAC key or a customization string.

use crate::packed::{ByteOrder, PackedValue};
use crate::{HashError, Result};
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const B64_DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Character encoding of text input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// UTF-8
    #[default]
    #[serde(rename = "UTF8")]
    Utf8,
    /// UTF-16, big-endian code units
    #[serde(rename = "UTF16BE")]
    Utf16Be,
    /// UTF-16, little-endian code units
    #[serde(rename = "UTF16LE")]
    Utf16Le,
}

impl FromStr for Encoding {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "UTF8" | "UTF-8" => Ok(Self::Utf8),
            "UTF16BE" | "UTF-16BE" => Ok(Self::Utf16Be),
            "UTF16LE" | "UTF-16LE" => Ok(Self::Utf16Le),
            _ => Err(HashError::config(format!(
                "encoding must be UTF8, UTF16BE, or UTF16LE, got {s:?}"
            ))),
        }
    }
}

/// Declared format of string input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// Text in an [`Encoding`]
    Text,
    /// Hexadecimal digits, two per byte
    Hex,
    /// Standard base64
    Base64,
    /// One byte per character, each at most U+00FF
    Bytes,
}

impl FromStr for InputFormat {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TEXT" => Ok(Self::Text),
            "HEX" => Ok(Self::Hex),
            "B64" => Ok(Self::Base64),
            "BYTES" => Ok(Self::Bytes),
            _ => Err(HashError::config(format!("format must be TEXT, HEX, B64, or BYTES, got {s:?}"))),
        }
    }
}

/// Input to an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Text encoded with the given encoding
    Text {
        /// The text
        value: String,
        /// How the text becomes bytes
        encoding: Encoding,
    },
    /// Hex string
    Hex(String),
    /// Base64 string
    Base64(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Pre-packed bits of any length; must use the engine's byte order
    Packed(PackedValue),
}

impl Input {
    /// UTF-8 text
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
            encoding: Encoding::Utf8,
        }
    }

    /// Text in an explicit encoding
    #[must_use]
    pub fn text_with_encoding(value: impl Into<String>, encoding: Encoding) -> Self {
        Self::Text {
            value: value.into(),
            encoding,
        }
    }

    /// Hex-encoded bytes
    #[must_use]
    pub fn hex(value: impl Into<String>) -> Self {
        Self::Hex(value.into())
    }

    /// Base64-encoded bytes
    #[must_use]
    pub fn base64(value: impl Into<String>) -> Self {
        Self::Base64(value.into())
    }

    /// Raw bytes
    #[must_use]
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(value.into())
    }

    /// Build an input from a string value and format names.
    ///
    /// `encoding` only applies to `TEXT` and defaults to UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] for unknown format or encoding names.
    pub fn parse(value: impl Into<String>, format: &str, encoding: Option<&str>) -> Result<Self> {
        let value = value.into();
        Ok(match format.parse::<InputFormat>()? {
            InputFormat::Text => Self::Text {
                value,
                encoding: encoding
                    .map(str::parse::<Encoding>)
                    .transpose()?
                    .unwrap_or_default(),
            },
            InputFormat::Hex => Self::Hex(value),
            InputFormat::Base64 => Self::Base64(value),
            InputFormat::Bytes => Self::Bytes(latin1_bytes(&value)?),
        })
    }

    /// Decode into packed bits in `order`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] for malformed hex or base64.
    pub fn into_packed(self, order: ByteOrder) -> Result<PackedValue> {
        let bytes = match self {
            Self::Text { value, encoding } => encode_text(&value, encoding),
            Self::Hex(value) => decode_hex(&value)?,
            Self::Base64(value) => B64_DECODER
                .decode(value.as_bytes())
                .map_err(|e| HashError::config(format!("Invalid B64 input: {e}")))?,
            Self::Bytes(bytes) => bytes,
            Self::Packed(mut packed) => {
                packed.clear_tail(order);
                return Ok(packed);
            }
        };
        Ok(PackedValue::from_bytes(&bytes, order))
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<&[u8]> for Input {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Input {
    fn from(value: &[u8; N]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Input {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<PackedValue> for Input {
    fn from(value: PackedValue) -> Self {
        Self::Packed(value)
    }
}

fn encode_text(value: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => value.as_bytes().to_vec(),
        Encoding::Utf16Be => value.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        Encoding::Utf16Le => value.encode_utf16().flat_map(u16::to_le_bytes).collect(),
    }
}

fn decode_hex(value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|e| match e {
        hex::FromHexError::OddLength => {
            HashError::config("String of HEX type must be in byte increments")
        }
        other => HashError::config(format!("String of HEX type contains invalid characters: {other}")),
    })
}

fn latin1_bytes(value: &str) -> Result<Vec<u8>> {
    value
        .chars()
        .map(|c| {
            u8::try_from(u32::from(c))
                .map_err(|_| HashError::config(format!("BYTES input holds a non-byte character {c:?}")))
        })
        .collect()
}

/// A named input as it appears inside an option object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct InputDescriptor {
    /// Raw value
    pub value: Option<String>,
    /// Format name: `TEXT`, `HEX`, `B64` or `BYTES`
    pub format: Option<String>,
    /// Encoding name for `TEXT`
    pub encoding: Option<String>,
}

impl InputDescriptor {
    /// Descriptor with a value and format
    #[must_use]
    pub fn new(value: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            format: Some(format.into()),
            encoding: None,
        }
    }

    /// Set the text encoding
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

/// Resolve a named optional input into packed bits.
///
/// An absent descriptor yields `fallback`; without a fallback the input is
/// required.
///
/// # Errors
///
/// Returns [`HashError::Config`] when the input is required but absent, when
/// the descriptor lacks a value or a format, or when decoding fails.
pub fn resolve(
    name: &str,
    input: Option<&InputDescriptor>,
    order: ByteOrder,
    fallback: Option<PackedValue>,
) -> Result<PackedValue> {
    let missing = || HashError::config(format!("{name} must include a value and format"));

    let Some(descriptor) = input else {
        return fallback.ok_or_else(missing);
    };
    let (Some(value), Some(format)) = (&descriptor.value, &descriptor.format) else {
        return Err(missing());
    };

    Input::parse(value.as_str(), format, descriptor.encoding.as_deref())?.into_packed(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_encodings() {
        let order = ByteOrder::BigEndian;
        let utf8 = Input::text("aé").into_packed(order).expect("utf8");
        assert_eq!(utf8.to_bytes(order), vec![0x61, 0xc3, 0xa9]);

        let be = Input::text_with_encoding("aé", Encoding::Utf16Be)
            .into_packed(order)
            .expect("utf16be");
        assert_eq!(be.to_bytes(order), vec![0x00, 0x61, 0x00, 0xe9]);

        let le = Input::text_with_encoding("aé", Encoding::Utf16Le)
            .into_packed(order)
            .expect("utf16le");
        assert_eq!(le.to_bytes(order), vec![0x61, 0x00, 0xe9, 0x00]);
    }

    #[test]
    fn binary_formats_decode_to_the_same_bytes() {
        let order = ByteOrder::LittleEndian;
        let expected = PackedValue::from_bytes(b"hello", order);
        for input in [
            Input::hex("68656c6c6f"),
            Input::base64("aGVsbG8="),
            Input::base64("aGVsbG8"),
            Input::bytes(b"hello".to_vec()),
            Input::parse("hello", "BYTES", None).expect("latin1"),
        ] {
            assert_eq!(input.into_packed(order).expect("decodes"), expected);
        }
    }

    #[test]
    fn malformed_inputs_are_config_errors() {
        let order = ByteOrder::BigEndian;
        assert!(Input::hex("abc").into_packed(order).expect_err("odd").is_config());
        assert!(Input::hex("zz").into_packed(order).expect_err("non-hex").is_config());
        assert!(Input::base64("a$==").into_packed(order).expect_err("bad b64").is_config());
        assert!(Input::parse("€", "BYTES", None).expect_err("wide char").is_config());
        assert!(Input::parse("x", "ASCII", None).expect_err("format").is_config());
        assert!(Input::parse("x", "TEXT", Some("UTF32")).expect_err("encoding").is_config());
    }

    #[test]
    fn packed_input_is_canonicalized() {
        let raw = PackedValue::new(vec![0xffff_ffff, 0xdead_beef], 4).expect("valid");
        let packed = Input::Packed(raw).into_packed(ByteOrder::BigEndian).expect("packed");
        assert_eq!(packed.words(), &[0xf000_0000]);
        assert_eq!(packed.bit_len(), 4);
    }

    #[test]
    fn resolve_uses_fallback_only_when_absent() {
        let order = ByteOrder::LittleEndian;
        let fallback = PackedValue::from_bytes(b"fb", order);

        let resolved = resolve("Customization", None, order, Some(fallback.clone())).expect("fallback");
        assert_eq!(resolved, fallback);

        let err = resolve("kmacKey", None, order, None).expect_err("required");
        assert_eq!(err, HashError::config("kmacKey must include a value and format"));

        let partial = InputDescriptor {
            value: Some("00".into()),
            ..InputDescriptor::default()
        };
        assert!(resolve("kmacKey", Some(&partial), order, Some(fallback)).is_err());

        let full = InputDescriptor::new("4142", "HEX");
        let resolved = resolve("kmacKey", Some(&full), order, None).expect("hex");
        assert_eq!(resolved.to_bytes(order), b"AB");

        let text = InputDescriptor::new("AB", "TEXT").with_encoding("UTF16LE");
        let resolved = resolve("funcName", Some(&text), order, None).expect("text");
        assert_eq!(resolved.to_bytes(order), vec![0x41, 0x00, 0x42, 0x00]);
    }
}
