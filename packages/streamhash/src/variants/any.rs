//! Variant chosen at runtime by name

use super::cshake::{Cshake, CshakeKind, Kmac};
use super::sha2::Sha2;
use super::sha3::{Sha3, Sha3Kind};
use super::sponge::KeccakState;
use crate::options::VariantOptions;
use crate::packed::ByteOrder;
use crate::variant::Variant;
use crate::{HashError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const UNSUPPORTED: &str = "Chosen SHA variant is not supported";

/// Every algorithm the engine can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// SHA-224
    #[serde(rename = "SHA-224")]
    Sha224,
    /// SHA-256
    #[serde(rename = "SHA-256")]
    Sha256,
    /// SHA3-224
    #[serde(rename = "SHA3-224")]
    Sha3_224,
    /// SHA3-256
    #[serde(rename = "SHA3-256")]
    Sha3_256,
    /// SHA3-384
    #[serde(rename = "SHA3-384")]
    Sha3_384,
    /// SHA3-512
    #[serde(rename = "SHA3-512")]
    Sha3_512,
    /// SHAKE128
    #[serde(rename = "SHAKE128")]
    Shake128,
    /// SHAKE256
    #[serde(rename = "SHAKE256")]
    Shake256,
    /// cSHAKE128
    #[serde(rename = "CSHAKE128")]
    Cshake128,
    /// cSHAKE256
    #[serde(rename = "CSHAKE256")]
    Cshake256,
    /// KMAC128
    #[serde(rename = "KMAC128")]
    Kmac128,
    /// KMAC256
    #[serde(rename = "KMAC256")]
    Kmac256,
}

impl Algorithm {
    /// All supported algorithms
    pub const ALL: [Self; 12] = [
        Self::Sha224,
        Self::Sha256,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Shake128,
        Self::Shake256,
        Self::Cshake128,
        Self::Cshake256,
        Self::Kmac128,
        Self::Kmac256,
    ];

    /// Canonical name, e.g. `"SHA3-256"`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha3_224 => "SHA3-224",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Shake128 => "SHAKE128",
            Self::Shake256 => "SHAKE256",
            Self::Cshake128 => "CSHAKE128",
            Self::Cshake256 => "CSHAKE256",
            Self::Kmac128 => "KMAC128",
            Self::Kmac256 => "KMAC256",
        }
    }
}

impl FromStr for Algorithm {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| HashError::config(UNSUPPORTED))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any supported variant, dispatched at runtime
#[derive(Debug, Clone)]
pub enum AnyVariant {
    /// SHA-224 or SHA-256
    Sha2(Sha2),
    /// SHA-3 or SHAKE
    Sha3(Sha3),
    /// cSHAKE
    Cshake(Cshake),
    /// KMAC
    Kmac(Kmac),
}

/// Chaining value of an [`AnyVariant`]
#[derive(Clone)]
pub enum AnyState {
    /// SHA-2 working state
    Sha2([u32; 8]),
    /// Keccak sponge state
    Keccak(KeccakState),
}

impl AnyVariant {
    /// Build the variant for `algorithm`; only cSHAKE and KMAC read `options`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] if the options required by the variant
    /// are missing or malformed.
    pub fn new(algorithm: Algorithm, options: &VariantOptions) -> Result<Self> {
        Ok(match algorithm {
            Algorithm::Sha224 => Self::Sha2(Sha2::sha224()),
            Algorithm::Sha256 => Self::Sha2(Sha2::sha256()),
            Algorithm::Sha3_224 => Self::Sha3(Sha3::new(Sha3Kind::Sha3_224)),
            Algorithm::Sha3_256 => Self::Sha3(Sha3::new(Sha3Kind::Sha3_256)),
            Algorithm::Sha3_384 => Self::Sha3(Sha3::new(Sha3Kind::Sha3_384)),
            Algorithm::Sha3_512 => Self::Sha3(Sha3::new(Sha3Kind::Sha3_512)),
            Algorithm::Shake128 => Self::Sha3(Sha3::new(Sha3Kind::Shake128)),
            Algorithm::Shake256 => Self::Sha3(Sha3::new(Sha3Kind::Shake256)),
            Algorithm::Cshake128 => Self::Cshake(Cshake::new(CshakeKind::Cshake128, options)?),
            Algorithm::Cshake256 => Self::Cshake(Cshake::new(CshakeKind::Cshake256, options)?),
            Algorithm::Kmac128 => Self::Kmac(Kmac::new(CshakeKind::Cshake128, options)?),
            Algorithm::Kmac256 => Self::Kmac(Kmac::new(CshakeKind::Cshake256, options)?),
        })
    }

    /// Build the variant named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] for unknown names or bad options.
    pub fn from_name(name: &str, options: &VariantOptions) -> Result<Self> {
        Self::new(name.parse()?, options)
    }
}

macro_rules! dispatch {
    ($self:expr, $v:ident => $body:expr) => {
        match $self {
            AnyVariant::Sha2($v) => $body,
            AnyVariant::Sha3($v) => $body,
            AnyVariant::Cshake($v) => $body,
            AnyVariant::Kmac($v) => $body,
        }
    };
}

/// Pair a variant with its state; a mismatch means the state came from a
/// different variant, which the engine never does.
macro_rules! with_state {
    ($self:expr, $state:expr, $v:ident, $s:ident => $body:expr) => {
        match ($self, $state) {
            (AnyVariant::Sha2($v), AnyState::Sha2($s)) => $body,
            (AnyVariant::Sha3($v), AnyState::Keccak($s)) => $body,
            (AnyVariant::Cshake($v), AnyState::Keccak($s)) => $body,
            (AnyVariant::Kmac($v), AnyState::Keccak($s)) => $body,
            _ => unreachable!("state does not belong to this variant"),
        }
    };
}

impl Variant for AnyVariant {
    type State = AnyState;

    fn name(&self) -> &'static str {
        dispatch!(self, v => v.name())
    }

    fn block_bits(&self) -> u32 {
        dispatch!(self, v => v.block_bits())
    }

    fn digest_bits(&self) -> Option<u32> {
        dispatch!(self, v => v.digest_bits())
    }

    fn supports_hmac(&self) -> bool {
        dispatch!(self, v => v.supports_hmac())
    }

    fn byte_order(&self) -> ByteOrder {
        dispatch!(self, v => v.byte_order())
    }

    fn new_state(&self) -> Self::State {
        match self {
            Self::Sha2(v) => AnyState::Sha2(v.new_state()),
            Self::Sha3(v) => AnyState::Keccak(v.new_state()),
            Self::Cshake(v) => AnyState::Keccak(v.new_state()),
            Self::Kmac(v) => AnyState::Keccak(v.new_state()),
        }
    }

    fn round(&self, block: &[u32], state: &mut Self::State) {
        with_state!(self, state, v, s => v.round(block, s));
    }

    fn finalize(
        &self,
        remainder: Vec<u32>,
        remainder_bits: u64,
        processed_bits: u64,
        state: Self::State,
        out_bits: u32,
    ) -> Vec<u32> {
        with_state!(self, state, v, s => {
            v.finalize(remainder, remainder_bits, processed_bits, s, out_bits)
        })
    }

    fn has_native_mac(&self) -> bool {
        dispatch!(self, v => v.has_native_mac())
    }

    fn native_mac(
        &self,
        remainder: Vec<u32>,
        remainder_bits: u64,
        processed_bits: u64,
        state: Self::State,
        out_bits: u32,
    ) -> Option<Vec<u32>> {
        with_state!(self, state, v, s => {
            v.native_mac(remainder, remainder_bits, processed_bits, s, out_bits)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputDescriptor;

    #[test]
    fn names_round_trip_through_parse_and_serde() {
        for alg in Algorithm::ALL {
            assert_eq!(alg.name().parse::<Algorithm>().expect("known"), alg);
            let json = serde_json::to_string(&alg).expect("serializes");
            assert_eq!(json, format!("\"{}\"", alg.name()));
        }
        assert_eq!("sha3-256".parse::<Algorithm>().expect("case-insensitive"), Algorithm::Sha3_256);
    }

    #[test]
    fn unknown_names_are_unsupported() {
        for name in ["SHA-1", "SHA-512", "MD5", ""] {
            let err = name.parse::<Algorithm>().expect_err("unsupported");
            assert_eq!(err, HashError::config(UNSUPPORTED));
        }
    }

    #[test]
    fn dispatch_reports_the_inner_variant() {
        let opts = VariantOptions::default();
        let sha = AnyVariant::from_name("SHA-224", &opts).expect("sha-224");
        assert_eq!(sha.name(), "SHA-224");
        assert_eq!(sha.byte_order(), ByteOrder::BigEndian);
        assert!(sha.supports_hmac());

        let shake = AnyVariant::from_name("SHAKE128", &opts).expect("shake");
        assert_eq!(shake.block_bits(), 1344);
        assert!(shake.is_variable_len());

        let keyed = VariantOptions::default().with_kmac_key(InputDescriptor::new("k", "TEXT"));
        let kmac = AnyVariant::new(Algorithm::Kmac256, &keyed).expect("kmac");
        assert!(kmac.has_native_mac());
        assert!(!kmac.supports_hmac());

        assert!(AnyVariant::new(Algorithm::Kmac128, &opts).is_err());
    }
}
