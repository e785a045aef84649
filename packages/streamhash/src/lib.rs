//! Streaming hash engine with pluggable compression functions
//!
//! One generic [`HashEngine`] handles input buffering, block scheduling,
//! finalization, HMAC and multi-round hashing for every algorithm. Algorithms
//! plug in through the [`Variant`] trait; SHA-2, SHA-3, SHAKE, cSHAKE and
//! KMAC ship in [`variants`].

#![forbid(unsafe_code)]

pub mod api;
pub mod constants;
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod output;
pub mod packed;
pub mod streaming;
pub mod variant;
pub mod variants;

// Re-export error types
pub use error::{HashError, Result};

// Re-export the engine and its plugin interface
pub use api::Hash;
pub use engine::{HashEngine, Phase};
pub use variant::Variant;
pub use variants::{Algorithm, AnyVariant};

// Re-export input, options and output types
pub use input::{Encoding, Input, InputDescriptor, InputFormat};
pub use options::{EngineOptions, OutputConfig, OutputOptions, VariantOptions};
pub use output::{HashOutput, OutputFormat};
pub use packed::{ByteOrder, PackedValue};
pub use streaming::{AbsorbProgress, StreamAbsorber, absorb_stream};
