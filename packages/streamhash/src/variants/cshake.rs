//! cSHAKE and KMAC (SP 800-185)
//!
//! Both variants fold their construction-time strings into a primed sponge
//! state once; every fresh state handed to the engine is a copy of it.

use super::sponge::{self, Domain, KeccakState};
use crate::input;
use crate::options::VariantOptions;
use crate::packed::{self, ByteOrder, PackedValue};
use crate::variant::Variant;
use crate::Result;
use std::fmt;
use tracing::debug;
use zeroize::Zeroize;

const ORDER: ByteOrder = ByteOrder::LittleEndian;

/// Security strength of a cSHAKE-based variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CshakeKind {
    /// 128-bit strength, rate 1344
    Cshake128,
    /// 256-bit strength, rate 1088
    Cshake256,
}

impl CshakeKind {
    const fn rate_bits(self) -> u32 {
        match self {
            Self::Cshake128 => 1344,
            Self::Cshake256 => 1088,
        }
    }
}

/// Absorb `bytepad(encode_string(N) ‖ encode_string(S), rate)` into a zero state.
fn prime(rate_bits: u32, function_name: &PackedValue, customization: &PackedValue) -> KeccakState {
    let header = packed::concat(
        sponge::encode_string(function_name),
        &sponge::encode_string(customization),
        ORDER,
    );
    let mut state = [0; 25];
    sponge::absorb_blocks(&mut state, rate_bits, &sponge::bytepad(&header, rate_bits));
    state
}

fn customization(options: &VariantOptions) -> Result<PackedValue> {
    input::resolve(
        "Customization",
        options.customization.as_ref(),
        ORDER,
        Some(PackedValue::empty()),
    )
}

/// Customizable SHAKE
///
/// With an empty function name and customization string this is exactly
/// SHAKE of the same strength.
#[derive(Clone, PartialEq, Eq)]
pub struct Cshake {
    kind: CshakeKind,
    primed: KeccakState,
    plain: bool,
}

impl Cshake {
    /// Build from `funcName` and `customization`; both default to empty.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`](crate::HashError::Config) if either
    /// string is malformed.
    pub fn new(kind: CshakeKind, options: &VariantOptions) -> Result<Self> {
        let function_name = input::resolve(
            "funcName",
            options.function_name.as_ref(),
            ORDER,
            Some(PackedValue::empty()),
        )?;
        let customization = customization(options)?;
        let plain = function_name.is_empty() && customization.is_empty();

        let primed = if plain {
            [0; 25]
        } else {
            prime(kind.rate_bits(), &function_name, &customization)
        };
        debug!(
            ?kind,
            function_name_bits = function_name.bit_len(),
            customization_bits = customization.bit_len(),
            "cSHAKE primed"
        );

        Ok(Self {
            kind,
            primed,
            plain,
        })
    }

    /// cSHAKE128
    ///
    /// # Errors
    ///
    /// See [`Cshake::new`].
    pub fn cshake128(options: &VariantOptions) -> Result<Self> {
        Self::new(CshakeKind::Cshake128, options)
    }

    /// cSHAKE256
    ///
    /// # Errors
    ///
    /// See [`Cshake::new`].
    pub fn cshake256(options: &VariantOptions) -> Result<Self> {
        Self::new(CshakeKind::Cshake256, options)
    }

    /// Strength of this instance
    #[must_use]
    pub fn kind(&self) -> CshakeKind {
        self.kind
    }
}

impl fmt::Debug for Cshake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cshake")
            .field("kind", &self.kind)
            .field("plain", &self.plain)
            .finish_non_exhaustive()
    }
}

impl Variant for Cshake {
    type State = KeccakState;

    fn name(&self) -> &'static str {
        match self.kind {
            CshakeKind::Cshake128 => "CSHAKE128",
            CshakeKind::Cshake256 => "CSHAKE256",
        }
    }

    fn block_bits(&self) -> u32 {
        self.kind.rate_bits()
    }

    fn digest_bits(&self) -> Option<u32> {
        None
    }

    fn supports_hmac(&self) -> bool {
        false
    }

    fn byte_order(&self) -> ByteOrder {
        ORDER
    }

    fn new_state(&self) -> Self::State {
        self.primed
    }

    fn round(&self, block: &[u32], state: &mut Self::State) {
        sponge::absorb_block(state, block);
    }

    fn finalize(
        &self,
        remainder: Vec<u32>,
        remainder_bits: u64,
        _processed_bits: u64,
        state: Self::State,
        out_bits: u32,
    ) -> Vec<u32> {
        let domain = if self.plain { Domain::Shake } else { Domain::Cshake };
        sponge::finalize(
            self.kind.rate_bits(),
            &remainder,
            remainder_bits,
            state,
            domain,
            out_bits,
        )
    }
}

/// Keccak message authentication code
///
/// Keyed at construction: the primed state already holds
/// `bytepad(encode_string(K), rate)`. The MAC appends `right_encode(L)` to
/// the message, so each output length yields an unrelated tag.
#[derive(Clone)]
pub struct Kmac {
    kind: CshakeKind,
    primed: KeccakState,
}

impl Kmac {
    /// Build from `kmacKey` (required) and `customization` (default empty).
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`](crate::HashError::Config) if the key is
    /// missing or either input is malformed.
    pub fn new(kind: CshakeKind, options: &VariantOptions) -> Result<Self> {
        let mut key = input::resolve("kmacKey", options.kmac_key.as_ref(), ORDER, None)?;
        let customization = customization(options)?;
        let rate_bits = kind.rate_bits();

        let function_name = PackedValue::from_bytes(b"KMAC", ORDER);
        let mut primed = prime(rate_bits, &function_name, &customization);

        let mut encoded_key = sponge::bytepad(&sponge::encode_string(&key), rate_bits);
        sponge::absorb_blocks(&mut primed, rate_bits, &encoded_key);
        debug!(?kind, key_bits = key.bit_len(), "KMAC keyed");

        key.zeroize();
        encoded_key.zeroize();
        Ok(Self { kind, primed })
    }

    /// KMAC128
    ///
    /// # Errors
    ///
    /// See [`Kmac::new`].
    pub fn kmac128(options: &VariantOptions) -> Result<Self> {
        Self::new(CshakeKind::Cshake128, options)
    }

    /// KMAC256
    ///
    /// # Errors
    ///
    /// See [`Kmac::new`].
    pub fn kmac256(options: &VariantOptions) -> Result<Self> {
        Self::new(CshakeKind::Cshake256, options)
    }

    /// Strength of this instance
    #[must_use]
    pub fn kind(&self) -> CshakeKind {
        self.kind
    }
}

impl Drop for Kmac {
    fn drop(&mut self) {
        self.primed.zeroize();
    }
}

impl fmt::Debug for Kmac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kmac")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Variant for Kmac {
    type State = KeccakState;

    fn name(&self) -> &'static str {
        match self.kind {
            CshakeKind::Cshake128 => "KMAC128",
            CshakeKind::Cshake256 => "KMAC256",
        }
    }

    fn block_bits(&self) -> u32 {
        self.kind.rate_bits()
    }

    fn digest_bits(&self) -> Option<u32> {
        None
    }

    fn supports_hmac(&self) -> bool {
        false
    }

    fn byte_order(&self) -> ByteOrder {
        ORDER
    }

    fn new_state(&self) -> Self::State {
        self.primed
    }

    fn round(&self, block: &[u32], state: &mut Self::State) {
        sponge::absorb_block(state, block);
    }

    fn finalize(
        &self,
        remainder: Vec<u32>,
        remainder_bits: u64,
        _processed_bits: u64,
        state: Self::State,
        out_bits: u32,
    ) -> Vec<u32> {
        sponge::finalize(
            self.kind.rate_bits(),
            &remainder,
            remainder_bits,
            state,
            Domain::Cshake,
            out_bits,
        )
    }

    fn has_native_mac(&self) -> bool {
        true
    }

    fn native_mac(
        &self,
        remainder: Vec<u32>,
        remainder_bits: u64,
        _processed_bits: u64,
        state: Self::State,
        out_bits: u32,
    ) -> Option<Vec<u32>> {
        let message = packed::concat(
            PackedValue::from_parts(remainder, remainder_bits),
            &sponge::right_encode(u64::from(out_bits)),
            ORDER,
        );
        Some(sponge::finalize(
            self.kind.rate_bits(),
            message.words(),
            message.bit_len(),
            state,
            Domain::Cshake,
            out_bits,
        ))
    }
}
