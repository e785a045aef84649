//! However input is split across `update` calls, the digest is the same

use cryypt_streamhash::{
    ByteOrder, EngineOptions, Hash, HashEngine, InputDescriptor, OutputConfig, OutputFormat,
    PackedValue, Variant, VariantOptions,
};
use proptest::prelude::*;

const ALGORITHMS: [&str; 8] = [
    "SHA-224", "SHA-256", "SHA3-224", "SHA3-512", "SHAKE128", "SHAKE256", "CSHAKE256", "KMAC128",
];

fn variant_options() -> VariantOptions {
    VariantOptions::default()
        .with_function_name(InputDescriptor::new("prop", "TEXT"))
        .with_customization(InputDescriptor::new("test", "TEXT"))
        .with_kmac_key(InputDescriptor::new("0f0e0d0c", "HEX"))
}

fn engine(name: &str) -> HashEngine<cryypt_streamhash::AnyVariant> {
    Hash::with_algorithm(name, &variant_options(), EngineOptions::default()).expect("engine")
}

fn digest<V: Variant>(e: &HashEngine<V>) -> Vec<u8> {
    e.get_hash(OutputFormat::Bytes, &OutputConfig::default().with_output_len(328))
        .expect("digest")
        .into_bytes()
}

/// Split `len` at the given cut points (taken modulo `len + 1`, sorted).
fn segments(len: usize, cuts: &[usize]) -> Vec<(usize, usize)> {
    let mut points: Vec<usize> = cuts.iter().map(|c| c % (len + 1)).collect();
    points.push(0);
    points.push(len);
    points.sort_unstable();
    points.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Pack `bits` (stream order) into words for `order`.
fn pack_bits(bits: &[bool], order: ByteOrder) -> PackedValue {
    let mut words = vec![0u32; bits.len().div_ceil(32)];
    for (i, bit) in bits.iter().enumerate() {
        if *bit {
            let shift = match order {
                ByteOrder::BigEndian => 31 - (i % 32),
                ByteOrder::LittleEndian => i % 32,
            };
            words[i / 32] |= 1 << shift;
        }
    }
    PackedValue::new(words, bits.len() as u64).expect("bits fit")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn byte_chunking_is_invisible(
        data in proptest::collection::vec(any::<u8>(), 0..600),
        cuts in proptest::collection::vec(any::<usize>(), 0..8),
    ) {
        for name in ALGORITHMS {
            let mut whole = engine(name);
            whole.update(data.as_slice()).expect("update");

            let mut pieces = engine(name);
            for (start, end) in segments(data.len(), &cuts) {
                pieces.update(&data[start..end]).expect("update");
            }
            prop_assert_eq!(digest(&whole), digest(&pieces), "{}", name);
        }
    }

    #[test]
    fn bit_chunking_is_invisible(
        bits in proptest::collection::vec(any::<bool>(), 0..2400),
        cuts in proptest::collection::vec(any::<usize>(), 0..8),
    ) {
        for name in ALGORITHMS {
            let order = engine(name).variant().byte_order();

            let mut whole = engine(name);
            whole.update(pack_bits(&bits, order)).expect("update");

            let mut pieces = engine(name);
            for (start, end) in segments(bits.len(), &cuts) {
                pieces.update(pack_bits(&bits[start..end], order)).expect("update");
            }
            prop_assert_eq!(digest(&whole), digest(&pieces), "{}", name);
        }
    }

    #[test]
    fn hmac_chunking_is_invisible(
        key in proptest::collection::vec(any::<u8>(), 0..200),
        data in proptest::collection::vec(any::<u8>(), 0..300),
        cut in any::<usize>(),
    ) {
        for name in ["SHA-256", "SHA3-256"] {
            let mut whole = engine(name);
            whole.set_hmac_key(key.as_slice()).expect("key");
            whole.update(data.as_slice()).expect("update");

            let split = cut % (data.len() + 1);
            let mut pieces = engine(name);
            pieces.set_hmac_key(key.as_slice()).expect("key");
            pieces.update(&data[..split]).expect("update");
            pieces.update(&data[split..]).expect("update");

            let cfg = OutputConfig::default();
            prop_assert_eq!(
                whole.get_hmac(OutputFormat::Hex, &cfg).expect("hmac"),
                pieces.get_hmac(OutputFormat::Hex, &cfg).expect("hmac")
            );
        }
    }

    #[test]
    fn digests_are_deterministic(data in proptest::collection::vec(any::<u8>(), 0..300)) {
        for name in ALGORITHMS {
            let mut a = engine(name);
            a.update(data.as_slice()).expect("update");
            let mut b = engine(name);
            b.update(data.as_slice()).expect("update");
            prop_assert_eq!(digest(&a), digest(&a));
            prop_assert_eq!(digest(&a), digest(&b));
        }
    }
}
