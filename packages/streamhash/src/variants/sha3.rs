//! SHA3-224/256/384/512 and SHAKE128/256 (FIPS 202)

use super::sponge::{self, Domain, KeccakState};
use crate::packed::ByteOrder;
use crate::variant::Variant;

/// Which FIPS 202 function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sha3Kind {
    /// SHA3-224
    Sha3_224,
    /// SHA3-256
    Sha3_256,
    /// SHA3-384
    Sha3_384,
    /// SHA3-512
    Sha3_512,
    /// SHAKE128, variable length
    Shake128,
    /// SHAKE256, variable length
    Shake256,
}

impl Sha3Kind {
    const fn rate_bits(self) -> u32 {
        match self {
            Self::Sha3_224 => 1152,
            Self::Sha3_256 | Self::Shake256 => 1088,
            Self::Sha3_384 => 832,
            Self::Sha3_512 => 576,
            Self::Shake128 => 1344,
        }
    }

    const fn digest_bits(self) -> Option<u32> {
        match self {
            Self::Sha3_224 => Some(224),
            Self::Sha3_256 => Some(256),
            Self::Sha3_384 => Some(384),
            Self::Sha3_512 => Some(512),
            Self::Shake128 | Self::Shake256 => None,
        }
    }
}

/// Fixed-length SHA-3 or SHAKE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha3 {
    kind: Sha3Kind,
}

impl Sha3 {
    /// Variant for `kind`
    #[must_use]
    pub const fn new(kind: Sha3Kind) -> Self {
        Self { kind }
    }

    /// SHA3-224
    #[must_use]
    pub const fn sha3_224() -> Self {
        Self::new(Sha3Kind::Sha3_224)
    }

    /// SHA3-256
    #[must_use]
    pub const fn sha3_256() -> Self {
        Self::new(Sha3Kind::Sha3_256)
    }

    /// SHA3-384
    #[must_use]
    pub const fn sha3_384() -> Self {
        Self::new(Sha3Kind::Sha3_384)
    }

    /// SHA3-512
    #[must_use]
    pub const fn sha3_512() -> Self {
        Self::new(Sha3Kind::Sha3_512)
    }

    /// SHAKE128
    #[must_use]
    pub const fn shake128() -> Self {
        Self::new(Sha3Kind::Shake128)
    }

    /// SHAKE256
    #[must_use]
    pub const fn shake256() -> Self {
        Self::new(Sha3Kind::Shake256)
    }

    /// Which function this is
    #[must_use]
    pub const fn kind(&self) -> Sha3Kind {
        self.kind
    }

    fn domain(&self) -> Domain {
        match self.kind.digest_bits() {
            Some(_) => Domain::Sha3,
            None => Domain::Shake,
        }
    }
}

impl Variant for Sha3 {
    type State = KeccakState;

    fn name(&self) -> &'static str {
        match self.kind {
            Sha3Kind::Sha3_224 => "SHA3-224",
            Sha3Kind::Sha3_256 => "SHA3-256",
            Sha3Kind::Sha3_384 => "SHA3-384",
            Sha3Kind::Sha3_512 => "SHA3-512",
            Sha3Kind::Shake128 => "SHAKE128",
            Sha3Kind::Shake256 => "SHAKE256",
        }
    }

    fn block_bits(&self) -> u32 {
        self.kind.rate_bits()
    }

    fn digest_bits(&self) -> Option<u32> {
        self.kind.digest_bits()
    }

    fn supports_hmac(&self) -> bool {
        self.kind.digest_bits().is_some()
    }

    fn byte_order(&self) -> ByteOrder {
        ByteOrder::LittleEndian
    }

    fn new_state(&self) -> Self::State {
        [0; 25]
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
            self.domain(),
            out_bits,
        )
    }
}
