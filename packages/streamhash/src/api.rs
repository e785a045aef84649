//! Entry point for building engines
//!
//! ```
//! use cryypt_streamhash::{Hash, OutputConfig, OutputFormat};
//!
//! let mut engine = Hash::sha256();
//! engine.update("ab")?.update("c")?;
//! let digest = engine.get_hash(OutputFormat::Hex, &OutputConfig::default())?;
//! assert_eq!(
//!     digest.as_str(),
//!     Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
//! );
//! # Ok::<(), cryypt_streamhash::HashError>(())
//! ```

use crate::engine::HashEngine;
use crate::options::{EngineOptions, VariantOptions};
use crate::variants::{AnyVariant, Cshake, Kmac, Sha2, Sha3};
use crate::Result;

/// Entry point for hash engines
pub struct Hash;

impl Hash {
    /// SHA-224
    #[must_use]
    pub fn sha224() -> HashEngine<Sha2> {
        HashEngine::with_defaults(Sha2::sha224())
    }

    /// SHA-256
    #[must_use]
    pub fn sha256() -> HashEngine<Sha2> {
        HashEngine::with_defaults(Sha2::sha256())
    }

    /// SHA3-224
    #[must_use]
    pub fn sha3_224() -> HashEngine<Sha3> {
        HashEngine::with_defaults(Sha3::sha3_224())
    }

    /// SHA3-256
    #[must_use]
    pub fn sha3_256() -> HashEngine<Sha3> {
        HashEngine::with_defaults(Sha3::sha3_256())
    }

    /// SHA3-384
    #[must_use]
    pub fn sha3_384() -> HashEngine<Sha3> {
        HashEngine::with_defaults(Sha3::sha3_384())
    }

    /// SHA3-512
    #[must_use]
    pub fn sha3_512() -> HashEngine<Sha3> {
        HashEngine::with_defaults(Sha3::sha3_512())
    }

    /// SHAKE128; digests need `outputLen`
    #[must_use]
    pub fn shake128() -> HashEngine<Sha3> {
        HashEngine::with_defaults(Sha3::shake128())
    }

    /// SHAKE256; digests need `outputLen`
    #[must_use]
    pub fn shake256() -> HashEngine<Sha3> {
        HashEngine::with_defaults(Sha3::shake256())
    }

    /// cSHAKE128 with the given function name and customization
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`](crate::HashError::Config) if either string is malformed.
    pub fn cshake128(options: &VariantOptions) -> Result<HashEngine<Cshake>> {
        Ok(HashEngine::with_defaults(Cshake::cshake128(options)?))
    }

    /// cSHAKE256 with the given function name and customization
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`](crate::HashError::Config) if either string is malformed.
    pub fn cshake256(options: &VariantOptions) -> Result<HashEngine<Cshake>> {
        Ok(HashEngine::with_defaults(Cshake::cshake256(options)?))
    }

    /// KMAC128, keyed from `kmacKey`
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`](crate::HashError::Config) if the key is
    /// missing or an input is malformed.
    pub fn kmac128(options: &VariantOptions) -> Result<HashEngine<Kmac>> {
        Ok(HashEngine::with_defaults(Kmac::kmac128(options)?))
    }

    /// KMAC256, keyed from `kmacKey`
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`](crate::HashError::Config) if the key is
    /// missing or an input is malformed.
    pub fn kmac256(options: &VariantOptions) -> Result<HashEngine<Kmac>> {
        Ok(HashEngine::with_defaults(Kmac::kmac256(options)?))
    }

    /// Any variant by name, e.g. `"SHA3-512"` or `"KMAC128"`
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Config`](crate::HashError::Config) for unknown
    /// names, invalid variant options, or invalid engine options.
    pub fn with_algorithm(
        name: &str,
        variant: &VariantOptions,
        engine: EngineOptions,
    ) -> Result<HashEngine<AnyVariant>> {
        HashEngine::new(AnyVariant::from_name(name, variant)?, engine)
    }
}
