//! AES-SIV (RFC 5297): a misuse-resistant authenticated encryption scheme.
//!
//! Unlike nonce-based AEAD modes, AES-SIV derives its internal
//! initialization vector from the associated data and plaintext via the
//! [`s2v`] construction, so accidental nonce reuse degrades gracefully:
//! encrypting the same plaintext under the same associated data twice
//! just produces the same ciphertext twice, rather than breaking
//! confidentiality the way nonce reuse does under GCM or CTR alone.
//!
//! Three entry points, in order of how most callers will want them:
//!
//! - [`aead::Aead`] — a fixed-nonce-size facade matching the shape of
//!   other AEAD crates (`seal`/`open` with a nonce and optional AD).
//! - [`siv::CmacAesSiv`] / [`siv::PmacAesSiv`] — the underlying
//!   variable-associated-data SIV cipher, for callers who want to
//!   authenticate an ordered vector of strings directly.
//! - [`stream::Encryptor`] / [`stream::Decryptor`] — chains SIV
//!   invocations across a segmented message under per-segment nonces, for
//!   large messages that shouldn't be buffered whole.
//!
//! [`cmac::Cmac`] and [`pmac::Pmac`] are exposed for callers who need a
//! general-purpose MAC over one of this crate's block ciphers; [`s2v::s2v`]
//! is exposed for implementing other SIV-like constructions.

pub mod aead;
pub mod block;
pub mod cipher;
pub mod cmac;
pub mod error;
pub mod mac;
pub mod pmac;
pub mod s2v;
pub mod siv;
pub mod stream;

pub use aead::Aead;
pub use cipher::{Aes, BlockCipher};
pub use cmac::Cmac;
pub use error::Error;
pub use mac::Mac;
pub use pmac::Pmac;
pub use s2v::s2v;
pub use siv::{CmacAesSiv, PmacAesSiv, Siv};
pub use stream::{Decryptor, Encryptor};
