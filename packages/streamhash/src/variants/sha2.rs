//! SHA-224 and SHA-256 (FIPS 180-4)

use crate::constants::{H_FULL, H_TRUNC, SHA2_K};
use crate::packed::ByteOrder;
use crate::variant::Variant;

const BLOCK_BITS: u32 = 512;
const BLOCK_WORDS: usize = 16;

/// Which member of the 32-bit SHA-2 family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sha2Kind {
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
}

/// SHA-2 variant over 32-bit words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha2 {
    kind: Sha2Kind,
}

impl Sha2 {
    /// SHA-224
    #[must_use]
    pub const fn sha224() -> Self {
        Self {
            kind: Sha2Kind::Sha224,
        }
    }

    /// SHA-256
    #[must_use]
    pub const fn sha256() -> Self {
        Self {
            kind: Sha2Kind::Sha256,
        }
    }

    /// Which family member this is
    #[must_use]
    pub const fn kind(&self) -> Sha2Kind {
        self.kind
    }

    const fn digest_words(&self) -> usize {
        match self.kind {
            Sha2Kind::Sha224 => 7,
            Sha2Kind::Sha256 => 8,
        }
    }
}

impl Variant for Sha2 {
    type State = [u32; 8];

    fn name(&self) -> &'static str {
        match self.kind {
            Sha2Kind::Sha224 => "SHA-224",
            Sha2Kind::Sha256 => "SHA-256",
        }
    }

    fn block_bits(&self) -> u32 {
        BLOCK_BITS
    }

    fn digest_bits(&self) -> Option<u32> {
        Some(self.digest_words() as u32 * 32)
    }

    fn supports_hmac(&self) -> bool {
        true
    }

    fn byte_order(&self) -> ByteOrder {
        ByteOrder::BigEndian
    }

    fn new_state(&self) -> Self::State {
        match self.kind {
            Sha2Kind::Sha224 => H_TRUNC,
            Sha2Kind::Sha256 => H_FULL,
        }
    }

    fn round(&self, block: &[u32], state: &mut Self::State) {
        compress(state, block);
    }

    fn finalize(
        &self,
        remainder: Vec<u32>,
        remainder_bits: u64,
        processed_bits: u64,
        mut state: Self::State,
        _out_bits: u32,
    ) -> Vec<u32> {
        // one padding bit plus a 64-bit length must fit after the message
        let blocks = ((remainder_bits + 65 + 511) / u64::from(BLOCK_BITS)) as usize;
        let mut message = remainder;
        message.resize(blocks * BLOCK_WORDS, 0);

        let pad_word = (remainder_bits / 32) as usize;
        message[pad_word] |= 0x8000_0000u32 >> (remainder_bits % 32) as u32;

        let total_bits = remainder_bits + processed_bits;
        let last = message.len() - 1;
        message[last - 1] = (total_bits >> 32) as u32;
        message[last] = total_bits as u32;

        for block in message.chunks_exact(BLOCK_WORDS) {
            compress(&mut state, block);
        }
        state[..self.digest_words()].to_vec()
    }
}

fn compress(state: &mut [u32; 8], block: &[u32]) {
    let mut w = [0u32; 64];
    w[..BLOCK_WORDS].copy_from_slice(&block[..BLOCK_WORDS]);
    for t in BLOCK_WORDS..64 {
        let s0 = w[t - 15].rotate_right(7) ^ w[t - 15].rotate_right(18) ^ (w[t - 15] >> 3);
        let s1 = w[t - 2].rotate_right(17) ^ w[t - 2].rotate_right(19) ^ (w[t - 2] >> 10);
        w[t] = w[t - 16]
            .wrapping_add(s0)
            .wrapping_add(w[t - 7])
            .wrapping_add(s1);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
    for t in 0..64 {
        let sigma1 = e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25);
        let ch = (e & f) ^ (!e & g);
        let t1 = h
            .wrapping_add(sigma1)
            .wrapping_add(ch)
            .wrapping_add(SHA2_K[t])
            .wrapping_add(w[t]);
        let sigma0 = a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22);
        let maj = (a & b) ^ (a & c) ^ (b & c);
        let t2 = sigma0.wrapping_add(maj);

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (word, add) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *word = word.wrapping_add(add);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packed::PackedValue;
    use hex_literal::hex;

    fn digest(variant: Sha2, msg: &[u8]) -> Vec<u8> {
        let packed = PackedValue::from_bytes(msg, ByteOrder::BigEndian);
        let bits = packed.bit_len();
        let words = variant.finalize(packed.into_words(), bits, 0, variant.new_state(), 0);
        words.iter().flat_map(|w| w.to_be_bytes()).collect()
    }

    #[test]
    fn sha256_known_answers() {
        assert_eq!(
            digest(Sha2::sha256(), b""),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
        assert_eq!(
            digest(Sha2::sha256(), b"abc"),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert_eq!(
            digest(
                Sha2::sha256(),
                b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"
            ),
            hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1")
        );
    }

    #[test]
    fn sha224_known_answers() {
        assert_eq!(
            digest(Sha2::sha224(), b""),
            hex!("d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f")
        );
        assert_eq!(
            digest(Sha2::sha224(), b"abc"),
            hex!("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
        );
    }

    #[test]
    fn length_field_spills_into_an_extra_block() {
        // 56 bytes leave no room for the length in the first block
        let msg = [0x61u8; 56];
        let packed = PackedValue::from_bytes(&msg, ByteOrder::BigEndian);
        let mut words = packed.into_words();
        words.resize(32, 0);
        words[14] = 0x8000_0000;
        words[31] = 448;

        let mut state = Sha2::sha256().new_state();
        let mut blocks = 0;
        for block in words.chunks_exact(BLOCK_WORDS) {
            compress(&mut state, block);
            blocks += 1;
        }
        assert_eq!(blocks, 2);
        let expected: Vec<u8> = state.iter().flat_map(|w| w.to_be_bytes()).collect();
        assert_eq!(digest(Sha2::sha256(), &msg), expected);
    }

    #[test]
    fn metadata() {
        let v = Sha2::sha224();
        assert_eq!(v.name(), "SHA-224");
        assert_eq!(v.digest_bits(), Some(224));
        assert_eq!(v.block_bits(), 512);
        assert!(v.supports_hmac());
        assert!(!v.is_variable_len());
        assert_eq!(Sha2::sha256().digest_bits(), Some(256));
    }
}
