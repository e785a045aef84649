//! Output formatting and engine configuration
//!
//! Raw option structs deserialize from JSON with camelCase keys, matching the
//! option objects callers hand to the engine. [`OutputConfig::validate`]
//! normalizes the raw form into [`OutputOptions`].

use crate::input::InputDescriptor;
use crate::{HashError, Result};
use serde::{Deserialize, Serialize};

const OUTPUT_LEN_ERROR: &str = "Output length must be a multiple of 8";

/// Output formatting options as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputConfig {
    /// Upper-case hex digits
    pub output_upper: Option<bool>,
    /// Base64 padding character; empty disables padding
    pub b64_pad: Option<String>,
    /// Output length in bits for variable-length variants
    pub output_len: Option<u32>,
    /// Alias of `output_len`, consulted only when `output_len` is absent
    pub shake_len: Option<u32>,
}

impl OutputConfig {
    /// Parse options from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] when a field has the wrong type or is unknown.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Request upper- or lower-case hex output
    #[must_use]
    pub fn with_output_upper(mut self, upper: bool) -> Self {
        self.output_upper = Some(upper);
        self
    }

    /// Set the base64 padding character
    #[must_use]
    pub fn with_b64_pad(mut self, pad: impl Into<String>) -> Self {
        self.b64_pad = Some(pad.into());
        self
    }

    /// Set the output length in bits
    #[must_use]
    pub fn with_output_len(mut self, bits: u32) -> Self {
        self.output_len = Some(bits);
        self
    }

    /// Normalize into [`OutputOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] if the output length is not a multiple of 8
    /// or the padding is longer than one character.
    pub fn validate(&self) -> Result<OutputOptions> {
        let output_len = match (self.output_len, self.shake_len) {
            (Some(bits), _) | (None, Some(bits)) => {
                if bits % 8 != 0 {
                    return Err(HashError::config(OUTPUT_LEN_ERROR));
                }
                Some(bits)
            }
            (None, None) => None,
        };

        let b64_pad = match self.b64_pad.as_deref() {
            None => Some('='),
            Some(pad) => {
                let mut chars = pad.chars();
                match (chars.next(), chars.next()) {
                    (None, _) => None,
                    (Some(c), None) => Some(c),
                    (Some(_), Some(_)) => {
                        return Err(HashError::config("Invalid b64Pad formatting option"));
                    }
                }
            }
        };

        Ok(OutputOptions {
            output_upper: self.output_upper.unwrap_or(false),
            b64_pad,
            output_len,
        })
    }
}

/// Validated output options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Upper-case hex digits
    pub output_upper: bool,
    /// Base64 padding character, `None` for unpadded output
    pub b64_pad: Option<char>,
    /// Requested output length in bits; `None` when unspecified
    pub output_len: Option<u32>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_upper: false,
            b64_pad: Some('='),
            output_len: None,
        }
    }
}

/// Options fixed when an engine is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EngineOptions {
    /// Number of times the digest is finalized; values above 1 re-hash the digest
    pub num_rounds: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { num_rounds: 1 }
    }
}

impl EngineOptions {
    /// Options with the given round count
    #[must_use]
    pub fn with_rounds(num_rounds: u32) -> Self {
        Self { num_rounds }
    }

    /// Parse options from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] when a field has the wrong type or is unknown.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.num_rounds < 1 {
            return Err(HashError::config("numRounds must be an integer >= 1"));
        }
        Ok(())
    }
}

/// Construction-time inputs of the customizable variants
///
/// Only cSHAKE (`funcName`, `customization`) and KMAC (`kmacKey`,
/// `customization`) read these; other variants ignore them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct VariantOptions {
    /// cSHAKE function-name string `N`
    #[serde(rename = "funcName")]
    pub function_name: Option<InputDescriptor>,
    /// Customization string `S`
    pub customization: Option<InputDescriptor>,
    /// KMAC key `K`
    pub kmac_key: Option<InputDescriptor>,
}

impl VariantOptions {
    /// Parse options from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] when a field has the wrong type or is unknown.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Set the function-name string
    #[must_use]
    pub fn with_function_name(mut self, input: InputDescriptor) -> Self {
        self.function_name = Some(input);
        self
    }

    /// Set the customization string
    #[must_use]
    pub fn with_customization(mut self, input: InputDescriptor) -> Self {
        self.customization = Some(input);
        self
    }

    /// Set the KMAC key
    #[must_use]
    pub fn with_kmac_key(mut self, input: InputDescriptor) -> Self {
        self.kmac_key = Some(input);
        self
    }
}
