//! Streaming hash engine
//!
//! [`HashEngine`] absorbs input incrementally, compresses every complete block
//! as soon as it is available and buffers the rest. Digests are produced from
//! copies of the running state, so `get_hash` and `get_hmac` can be called any
//! number of times and absorption can continue afterwards.
//!
//! # Lifecycle
//!
//! ```text
//! Fresh --set_hmac_key--> Keyed
//! Fresh | Keyed --update--> Absorbing
//! ```
//!
//! An HMAC key must be set before the first `update`. Once either has
//! happened the other is no longer allowed in that order, and a key is never
//! accepted together with more than one round.

use crate::input::Input;
use crate::options::{EngineOptions, OutputConfig, OutputOptions};
use crate::output::{self, HashOutput, OutputFormat};
use crate::packed::{self, ByteOrder, PackedValue, words_for};
use crate::variant::Variant;
use crate::{HashError, Result};
use std::fmt;
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop};

const IPAD: u32 = 0x3636_3636;
const OPAD: u32 = 0x5c5c_5c5c;

const MAC_ROUNDS_ERROR: &str = "Cannot set numRounds with MAC";
const HMAC_UNSUPPORTED: &str = "Variant does not support HMAC";

/// Where an engine is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed; nothing absorbed and no key set
    Fresh,
    /// HMAC key set (or keyed by construction), nothing absorbed yet
    Keyed,
    /// At least one `update` call made
    Absorbing,
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct HmacPads {
    ipad: Vec<u32>,
    opad: Vec<u32>,
}

#[derive(Clone)]
enum MacKey {
    Unset,
    Hmac(HmacPads),
    Native,
}

/// Incremental hash engine driving a [`Variant`]
pub struct HashEngine<V: Variant> {
    variant: V,
    state: V::State,
    remainder: PackedValue,
    processed_bits: u64,
    update_called: bool,
    mac_key: MacKey,
    num_rounds: u32,
}

impl<V: Variant> HashEngine<V> {
    /// Create an engine with a fresh chaining value.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] if `num_rounds` is zero, or if it is not 1
    /// for a variant that is keyed by construction.
    pub fn new(variant: V, options: EngineOptions) -> Result<Self> {
        options.validate()?;
        if variant.has_native_mac() && options.num_rounds != 1 {
            return Err(HashError::config(MAC_ROUNDS_ERROR));
        }
        Ok(Self::build(variant, options.num_rounds))
    }

    /// Create an engine with default options (one round).
    #[must_use]
    pub fn with_defaults(variant: V) -> Self {
        Self::build(variant, 1)
    }

    fn build(variant: V, num_rounds: u32) -> Self {
        let mac_key = if variant.has_native_mac() {
            MacKey::Native
        } else {
            MacKey::Unset
        };

        debug!(variant = variant.name(), num_rounds, "hash engine created");

        Self {
            state: variant.new_state(),
            variant,
            remainder: PackedValue::empty(),
            processed_bits: 0,
            update_called: false,
            mac_key,
            num_rounds,
        }
    }

    /// The variant this engine drives
    #[must_use]
    pub fn variant(&self) -> &V {
        &self.variant
    }

    /// Current lifecycle phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        match (&self.mac_key, self.update_called) {
            (_, true) => Phase::Absorbing,
            (MacKey::Unset, false) => Phase::Fresh,
            (_, false) => Phase::Keyed,
        }
    }

    /// Number of finalization rounds
    #[must_use]
    pub fn num_rounds(&self) -> u32 {
        self.num_rounds
    }

    /// Bits compressed into complete blocks so far (an HMAC key counts as one block)
    #[must_use]
    pub fn processed_bits(&self) -> u64 {
        self.processed_bits
    }

    /// Bits buffered while waiting for a complete block
    #[must_use]
    pub fn remainder_bits(&self) -> u64 {
        self.remainder.bit_len()
    }

    fn order(&self) -> ByteOrder {
        self.variant.byte_order()
    }

    /// Absorb more input.
    ///
    /// Every complete block is compressed immediately; the tail is buffered.
    /// Splitting input across calls at arbitrary bit boundaries yields the same
    /// digest as a single call with the concatenation.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] if the input cannot be decoded; the engine
    /// is left unchanged.
    pub fn update(&mut self, input: impl Into<Input>) -> Result<&mut Self> {
        let order = self.order();
        let input = input.into().into_packed(order)?;

        self.update_called = true;
        if input.is_empty() {
            return Ok(self);
        }

        let block_bits = u64::from(self.variant.block_bits());
        let block_words = words_for(block_bits);

        let merged = packed::concat(std::mem::take(&mut self.remainder), &input, order);
        let total_bits = merged.bit_len();
        let blocks = total_bits / block_bits;
        let consumed = blocks * block_bits;

        let mut words = merged.into_words();
        for block in words.chunks_exact(block_words).take(blocks as usize) {
            self.variant.round(block, &mut self.state);
        }

        let tail = words.split_off(words_for(consumed));
        self.remainder = PackedValue::from_parts(tail, total_bits - consumed);
        self.processed_bits += consumed;

        trace!(
            variant = self.variant.name(),
            input_bits = input.bit_len(),
            blocks,
            remainder_bits = self.remainder.bit_len(),
            "absorbed input"
        );
        Ok(self)
    }

    fn output_bits(&self, opts: &OutputOptions) -> Result<u32> {
        match self.variant.digest_bits() {
            Some(bits) => Ok(bits),
            None => opts
                .output_len
                .ok_or_else(|| HashError::config("Output length must be specified in options")),
        }
    }

    fn finalize_current(&self, out_bits: u32) -> Vec<u32> {
        self.variant.finalize(
            self.remainder.words().to_vec(),
            self.remainder.bit_len(),
            self.processed_bits,
            self.variant.clone_state(&self.state),
            out_bits,
        )
    }

    /// Digest of everything absorbed so far.
    ///
    /// With more than one round, the digest is re-hashed from a fresh state
    /// `num_rounds - 1` times. On an HMAC-keyed engine this yields the inner
    /// hash; use [`HashEngine::get_hmac`] for the MAC.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] for invalid options, or when a
    /// variable-length variant is asked for a digest without `outputLen`.
    pub fn get_hash(&self, format: OutputFormat, config: &OutputConfig) -> Result<HashOutput> {
        let opts = config.validate()?;
        let out_bits = self.output_bits(&opts)?;
        let order = self.order();

        if matches!(self.mac_key, MacKey::Native) {
            if let Some(mac) = self.variant.native_mac(
                self.remainder.words().to_vec(),
                self.remainder.bit_len(),
                self.processed_bits,
                self.variant.clone_state(&self.state),
                out_bits,
            ) {
                return output::encode(&mac, out_bits, order, format, &opts);
            }
        }

        let mut digest = self.finalize_current(out_bits);
        for _ in 1..self.num_rounds {
            trim_digest(&mut digest, out_bits, order);
            digest = self.variant.finalize(
                digest,
                u64::from(out_bits),
                0,
                self.variant.new_state(),
                out_bits,
            );
        }

        output::encode(&digest, out_bits, order, format, &opts)
    }

    /// Key the engine for HMAC.
    ///
    /// Keys longer than a block are first hashed down to the digest length.
    /// The inner pad is compressed right away, so later updates build the
    /// inner hash incrementally.
    ///
    /// # Errors
    ///
    /// - [`HashError::Config`] if the variant has no HMAC, the key cannot be
    ///   decoded, or the engine runs more than one round.
    /// - [`HashError::Sequence`] after `update`, or when a key is already set.
    pub fn set_hmac_key(&mut self, key: impl Into<Input>) -> Result<()> {
        if !self.variant.supports_hmac() {
            return Err(HashError::config(HMAC_UNSUPPORTED));
        }
        if self.update_called {
            return Err(HashError::sequence("Cannot set MAC key after calling update"));
        }
        if !matches!(self.mac_key, MacKey::Unset) {
            return Err(HashError::sequence("MAC key already set"));
        }

        let key = key.into().into_packed(self.order())?;
        if self.num_rounds != 1 {
            return Err(HashError::config(MAC_ROUNDS_ERROR));
        }
        let digest_bits = self
            .variant
            .digest_bits()
            .ok_or_else(|| HashError::config(HMAC_UNSUPPORTED))?;

        let block_bits = self.variant.block_bits();
        let key_bits = key.bit_len();
        let mut key_words = if key_bits > u64::from(block_bits) {
            debug!(
                variant = self.variant.name(),
                key_bits, block_bits, "hashing oversized HMAC key"
            );
            let mut reduced = self.variant.finalize(
                key.into_words(),
                key_bits,
                0,
                self.variant.new_state(),
                digest_bits,
            );
            trim_digest(&mut reduced, digest_bits, self.order());
            reduced
        } else {
            key.into_words()
        };
        key_words.resize(words_for(u64::from(block_bits)), 0);

        let pads = HmacPads {
            ipad: key_words.iter().map(|w| w ^ IPAD).collect(),
            opad: key_words.iter().map(|w| w ^ OPAD).collect(),
        };
        key_words.zeroize();

        self.variant.round(&pads.ipad, &mut self.state);
        self.processed_bits = u64::from(block_bits);
        self.mac_key = MacKey::Hmac(pads);

        debug!(variant = self.variant.name(), "HMAC key set");
        Ok(())
    }

    /// HMAC of everything absorbed since the key was set.
    ///
    /// Computes `H(opad ‖ H(ipad ‖ message))`, finalizing the outer hash over
    /// the short inner digest only.
    ///
    /// # Errors
    ///
    /// - [`HashError::Config`] if the variant has no HMAC or the options are invalid.
    /// - [`HashError::Sequence`] if no key has been set.
    pub fn get_hmac(&self, format: OutputFormat, config: &OutputConfig) -> Result<HashOutput> {
        if !self.variant.supports_hmac() {
            return Err(HashError::config(HMAC_UNSUPPORTED));
        }
        let opts = config.validate()?;
        let MacKey::Hmac(pads) = &self.mac_key else {
            return Err(HashError::sequence(
                "Cannot call getHMAC without first setting MAC key",
            ));
        };
        let digest_bits = self
            .variant
            .digest_bits()
            .ok_or_else(|| HashError::config(HMAC_UNSUPPORTED))?;
        let block_bits = self.variant.block_bits();

        let inner = self.finalize_current(digest_bits);

        let mut outer = self.variant.new_state();
        self.variant.round(&pads.opad, &mut outer);
        let mac = self.variant.finalize(
            inner,
            u64::from(digest_bits),
            u64::from(block_bits),
            outer,
            digest_bits,
        );

        output::encode(&mac, digest_bits, self.order(), format, &opts)
    }
}

/// Drop digest words past `bits` and zero the unused bits of the last one.
fn trim_digest(digest: &mut Vec<u32>, bits: u32, order: ByteOrder) {
    digest.truncate(words_for(u64::from(bits)));
    let used = bits % 32;
    if used != 0 {
        if let Some(last) = digest.last_mut() {
            *last &= order.leading_mask(used);
        }
    }
}

impl<V> Clone for HashEngine<V>
where
    V: Variant + Clone,
{
    fn clone(&self) -> Self {
        Self {
            variant: self.variant.clone(),
            state: self.variant.clone_state(&self.state),
            remainder: self.remainder.clone(),
            processed_bits: self.processed_bits,
            update_called: self.update_called,
            mac_key: self.mac_key.clone(),
            num_rounds: self.num_rounds,
        }
    }
}

impl<V: Variant> fmt::Debug for HashEngine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashEngine")
            .field("variant", &self.variant.name())
            .field("phase", &self.phase())
            .field("processed_bits", &self.processed_bits)
            .field("remainder_bits", &self.remainder.bit_len())
            .field("num_rounds", &self.num_rounds)
            .finish_non_exhaustive()
    }
}
