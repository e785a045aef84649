//! The per-algorithm capability interface
//!
//! A [`Variant`] supplies everything algorithm specific: block and digest
//! sizes, the byte order of its words, and the compression and finalization
//! functions. [`HashEngine`](crate::HashEngine) owns the streaming, buffering,
//! multi-round and HMAC machinery and drives any variant through this trait.

use crate::packed::ByteOrder;

/// An algorithm plugged into the streaming engine
pub trait Variant {
    /// Chaining value carried from one block to the next
    type State: Clone;

    /// Algorithm name, e.g. `"SHA-256"`
    fn name(&self) -> &'static str;

    /// Bits consumed by one call to [`Variant::round`]
    fn block_bits(&self) -> u32;

    /// Digest length in bits; `None` for extendable-output variants
    fn digest_bits(&self) -> Option<u32>;

    /// Whether the caller chooses the output length
    fn is_variable_len(&self) -> bool {
        self.digest_bits().is_none()
    }

    /// Whether the generic HMAC construction applies
    fn supports_hmac(&self) -> bool;

    /// Word layout of input and digest
    fn byte_order(&self) -> ByteOrder;

    /// Fresh initial chaining value
    fn new_state(&self) -> Self::State;

    /// Independent copy of a chaining value
    fn clone_state(&self, state: &Self::State) -> Self::State {
        state.clone()
    }

    /// Compress one full block (`block_bits / 32` words) into `state`.
    fn round(&self, block: &[u32], state: &mut Self::State);

    /// Pad and compress `remainder` and squeeze `out_bits` of digest.
    ///
    /// `remainder` may span several blocks. `processed_bits` counts the bits
    /// already compressed into `state` and feeds the length encoding of
    /// variants that have one.
    fn finalize(
        &self,
        remainder: Vec<u32>,
        remainder_bits: u64,
        processed_bits: u64,
        state: Self::State,
        out_bits: u32,
    ) -> Vec<u32>;

    /// Whether the variant is keyed by construction and produces its MAC
    /// through [`Variant::native_mac`]
    fn has_native_mac(&self) -> bool {
        false
    }

    /// Built-in keyed digest; replaces [`Variant::finalize`] when
    /// [`Variant::has_native_mac`] is true.
    fn native_mac(
        &self,
        remainder: Vec<u32>,
        remainder_bits: u64,
        processed_bits: u64,
        state: Self::State,
        out_bits: u32,
    ) -> Option<Vec<u32>> {
        let _ = (remainder, remainder_bits, processed_bits, state, out_bits);
        None
    }
}
