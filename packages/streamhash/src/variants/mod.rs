//! Built-in variants

pub mod any;
pub mod cshake;
pub mod sha2;
pub mod sha3;
pub(crate) mod sponge;

pub use any::{Algorithm, AnyState, AnyVariant};
pub use cshake::{Cshake, CshakeKind, Kmac};
pub use sha2::{Sha2, Sha2Kind};
pub use sha3::{Sha3, Sha3Kind};
pub use sponge::KeccakState;
