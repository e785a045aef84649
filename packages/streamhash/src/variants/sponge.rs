//! Keccak sponge shared by the SHA-3 family
//!
//! Words are little-endian and two consecutive words form one 64-bit lane,
//! low word first. The permutation itself is `keccak::f1600`.

use crate::packed::{self, ByteOrder, PackedValue, words_for};

/// Keccak-f\[1600\] state: 25 lanes
pub type KeccakState = [u64; 25];

/// Domain separation bits appended before `pad10*1`, LSB first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Domain {
    /// `01`
    Sha3 = 0x06,
    /// `1111`
    Shake = 0x1f,
    /// `00`
    Cshake = 0x04,
}

impl Domain {
    fn bits(self) -> u8 {
        self as u8
    }

    /// Bits occupied by the suffix together with the first padding bit
    fn width(self) -> u64 {
        u64::from(8 - self.bits().leading_zeros())
    }
}

/// XOR one rate-sized block into the state and permute.
pub(crate) fn absorb_block(state: &mut KeccakState, block: &[u32]) {
    for (lane, pair) in state.iter_mut().zip(block.chunks_exact(2)) {
        *lane ^= u64::from(pair[0]) | (u64::from(pair[1]) << 32);
    }
    keccak::f1600(state);
}

/// Absorb `value`, which must be a whole number of rate-sized blocks.
pub(crate) fn absorb_blocks(state: &mut KeccakState, rate_bits: u32, value: &PackedValue) {
    for block in value.words().chunks_exact(rate_words(rate_bits)) {
        absorb_block(state, block);
    }
}

fn rate_words(rate_bits: u32) -> usize {
    words_for(u64::from(rate_bits))
}

/// Pad, absorb and squeeze.
///
/// The remainder may span several blocks and may end mid-byte. When the
/// domain suffix leaves no room for the final padding bit in the current
/// block, padding continues into one more block.
pub(crate) fn finalize(
    rate_bits: u32,
    remainder: &[u32],
    remainder_bits: u64,
    mut state: KeccakState,
    domain: Domain,
    out_bits: u32,
) -> Vec<u32> {
    let rate = u64::from(rate_bits);
    let block_words = rate_words(rate_bits);

    let whole = (remainder_bits / rate) as usize;
    for block in remainder.chunks_exact(block_words).take(whole) {
        absorb_block(&mut state, block);
    }
    let tail_bits = remainder_bits % rate;
    let start = whole * block_words;
    let mut tail = remainder[start.min(remainder.len())..].to_vec();
    tail.truncate(words_for(tail_bits));

    let padded_blocks = if tail_bits + domain.width() < rate { 1 } else { 2 };
    tail.resize(padded_blocks * block_words, 0);
    xor_byte_at(&mut tail, tail_bits, domain.bits());
    if let Some(last) = tail.last_mut() {
        *last ^= 0x8000_0000;
    }

    for block in tail.chunks_exact(block_words) {
        absorb_block(&mut state, block);
    }
    squeeze(&mut state, rate_bits, out_bits)
}

/// XOR `byte` into `words` starting at bit `pos`, spilling into the next word.
fn xor_byte_at(words: &mut [u32], pos: u64, byte: u8) {
    let index = (pos / 32) as usize;
    let shift = (pos % 32) as u32;
    words[index] ^= u32::from(byte) << shift;
    if shift > 24 {
        let spill = u32::from(byte) >> (32 - shift);
        if spill != 0 {
            words[index + 1] ^= spill;
        }
    }
}

fn squeeze(state: &mut KeccakState, rate_bits: u32, out_bits: u32) -> Vec<u32> {
    let needed = words_for(u64::from(out_bits));
    let lanes = (rate_bits / 64) as usize;
    let mut out = Vec::with_capacity(needed + 2 * lanes);
    loop {
        for lane in &state[..lanes] {
            out.push(*lane as u32);
            out.push((*lane >> 32) as u32);
        }
        if out.len() >= needed {
            break;
        }
        keccak::f1600(state);
    }
    out.truncate(needed);
    out
}

/// `left_encode(x)` from SP 800-185: byte count, then big-endian bytes
pub(crate) fn left_encode(x: u64) -> PackedValue {
    let (len, bytes) = minimal_be_bytes(x);
    let mut out = Vec::with_capacity(len + 1);
    out.push(len as u8);
    out.extend_from_slice(&bytes[8 - len..]);
    PackedValue::from_bytes(&out, ByteOrder::LittleEndian)
}

/// `right_encode(x)` from SP 800-185: big-endian bytes, then byte count
pub(crate) fn right_encode(x: u64) -> PackedValue {
    let (len, bytes) = minimal_be_bytes(x);
    let mut out = bytes[8 - len..].to_vec();
    out.push(len as u8);
    PackedValue::from_bytes(&out, ByteOrder::LittleEndian)
}

fn minimal_be_bytes(x: u64) -> (usize, [u8; 8]) {
    let len = (8 - x.leading_zeros() as usize / 8).max(1);
    (len, x.to_be_bytes())
}

/// `encode_string(s)`: the bit length of `s`, left-encoded, then `s`
pub(crate) fn encode_string(s: &PackedValue) -> PackedValue {
    packed::concat(left_encode(s.bit_len()), s, ByteOrder::LittleEndian)
}

/// `bytepad(x, w)`: prefix with `left_encode(w)` and zero-fill to a multiple of `w` bytes
pub(crate) fn bytepad(x: &PackedValue, rate_bits: u32) -> PackedValue {
    let w_bytes = u64::from(rate_bits / 8);
    let joined = packed::concat(left_encode(w_bytes), x, ByteOrder::LittleEndian);
    let padded_bits = joined.bit_len().div_ceil(u64::from(rate_bits)) * u64::from(rate_bits);
    let mut words = joined.into_words();
    words.resize(words_for(padded_bits), 0);
    PackedValue::from_parts(words, padded_bits)
}
