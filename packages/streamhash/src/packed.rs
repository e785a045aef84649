//! Packed bit sequences and the remainder merge used by the engine
//!
//! A [`PackedValue`] is a run of 32-bit words plus an exact bit length. How the
//! bit stream maps onto a word depends on the variant's [`ByteOrder`]:
//!
//! - `BigEndian` fills each word from the most significant bit down (byte 0 in
//!   bits 31..24), which is the SHA-2 convention.
//! - `LittleEndian` fills each word from the least significant bit up (byte 0
//!   in bits 7..0), which is the Keccak convention.

use crate::{HashError, Result};
use zeroize::Zeroize;

/// Byte order a variant uses to pack its input and digest words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Most significant byte first (SHA-2)
    BigEndian,
    /// Least significant byte first (SHA-3, SHAKE, cSHAKE, KMAC)
    LittleEndian,
}

impl ByteOrder {
    /// Bit offset of byte `index` inside its word.
    #[inline]
    #[must_use]
    pub fn byte_shift(self, index: usize) -> u32 {
        let pos = (index % 4) as u32 * 8;
        match self {
            Self::BigEndian => 24 - pos,
            Self::LittleEndian => pos,
        }
    }

    /// Mask selecting the first `bits` stream bits of a word (`0 < bits < 32`).
    #[inline]
    #[must_use]
    pub fn leading_mask(self, bits: u32) -> u32 {
        debug_assert!(bits > 0 && bits < 32);
        match self {
            Self::BigEndian => u32::MAX << (32 - bits),
            Self::LittleEndian => u32::MAX >> (32 - bits),
        }
    }
}

/// Number of words needed to hold `bits` bits.
#[inline]
#[must_use]
pub fn words_for(bits: u64) -> usize {
    bits.div_ceil(32) as usize
}

/// An exact-length bit sequence packed into 32-bit words
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize)]
pub struct PackedValue {
    words: Vec<u32>,
    bit_len: u64,
}

impl PackedValue {
    /// Wrap caller-supplied words.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`] if `bit_len` exceeds the bits the words can hold.
    pub fn new(words: Vec<u32>, bit_len: u64) -> Result<Self> {
        if bit_len > words.len() as u64 * 32 {
            return Err(HashError::config(format!(
                "bit length {bit_len} exceeds the {} bits held by {} words",
                words.len() as u64 * 32,
                words.len()
            )));
        }
        Ok(Self { words, bit_len })
    }

    /// Internal constructor for values the crate produces itself.
    pub(crate) fn from_parts(words: Vec<u32>, bit_len: u64) -> Self {
        debug_assert!(bit_len <= words.len() as u64 * 32);
        Self { words, bit_len }
    }

    /// The empty sequence
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pack whole bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], order: ByteOrder) -> Self {
        let mut words = vec![0u32; bytes.len().div_ceil(4)];
        for (i, &byte) in bytes.iter().enumerate() {
            words[i / 4] |= u32::from(byte) << order.byte_shift(i);
        }
        Self {
            words,
            bit_len: bytes.len() as u64 * 8,
        }
    }

    /// Unpack into bytes; a trailing partial byte is included.
    #[must_use]
    pub fn to_bytes(&self, order: ByteOrder) -> Vec<u8> {
        let len = self.bit_len.div_ceil(8) as usize;
        (0..len)
            .map(|i| (self.words[i / 4] >> order.byte_shift(i)) as u8)
            .collect()
    }

    /// Packed words
    #[must_use]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Take the packed words
    #[must_use]
    pub fn into_words(self) -> Vec<u32> {
        self.words
    }

    /// Exact length in bits
    #[must_use]
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Whether the sequence holds no bits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Zero every bit past `bit_len` and drop words that hold none of the sequence.
    pub fn clear_tail(&mut self, order: ByteOrder) {
        self.words.truncate(words_for(self.bit_len));
        let used = (self.bit_len % 32) as u32;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= order.leading_mask(used);
            }
        }
    }
}

/// Append `b` to `a`, consuming `a`.
///
/// When `a` ends inside a word, every word of `b` is split across that word and
/// the next one, shifted by `a.bit_len() mod 32`. A word the split allocated
/// but left empty is trimmed, so the result holds exactly
/// `words_for(a.bit_len() + b.bit_len())` words.
#[must_use]
pub fn concat(mut a: PackedValue, b: &PackedValue, order: ByteOrder) -> PackedValue {
    let total = a.bit_len + b.bit_len;
    let shift = (a.bit_len % 32) as u32;
    let b_words = &b.words[..words_for(b.bit_len)];

    a.words.truncate(words_for(a.bit_len));
    if shift == 0 {
        a.words.extend_from_slice(b_words);
    } else {
        a.words.reserve(b_words.len());
        let mut offset = a.words.len() - 1;
        for &word in b_words {
            let (head, tail) = match order {
                ByteOrder::BigEndian => (word >> shift, word << (32 - shift)),
                ByteOrder::LittleEndian => (word << shift, word >> (32 - shift)),
            };
            a.words[offset] |= head;
            a.words.push(tail);
            offset += 1;
        }
        a.words.truncate(words_for(total));
    }

    a.bit_len = total;
    a
}
