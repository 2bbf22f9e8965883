//! Component (B): the block-cipher capability CMAC, PMAC, and the SIV CTR
//! layer are all built on. Exposes exactly `block_size`/`encrypt_block`/
//! `decrypt_block`, no key schedule.

use std::convert::TryFrom;

use aes::cipher::{typenum::U16, Array, BlockCipherDecrypt, BlockCipherEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use crate::error::Error;

/// A fixed-key block cipher capable of encrypting/decrypting one 16-byte
/// block at a time, in place. `dst == src` aliasing is valid.
pub trait BlockCipher {
    /// Block size in bytes. Always 16 for the AES instances this crate
    /// provides.
    fn block_size(&self) -> usize;
    fn encrypt_block(&self, block: &mut [u8]);
    fn decrypt_block(&self, block: &mut [u8]);
}

macro_rules! aes_block_cipher {
    ($wrapper:ident, $inner:ty) => {
        /// Thin [`BlockCipher`] wrapper around `aes::
        #[doc = stringify!($inner)]
        /// `.
        #[derive(Clone, Debug)]
        pub struct $wrapper($inner);

        impl $wrapper {
            pub(crate) fn new(key: &[u8]) -> Self {
                $wrapper(<$inner>::new_from_slice(key).expect("key already length-checked"))
            }
        }

        impl BlockCipher for $wrapper {
            fn block_size(&self) -> usize {
                16
            }

            fn encrypt_block(&self, block: &mut [u8]) {
                let mut ga: Array<u8, U16> = Array::try_from(&block[..]).expect("caller passed a 16-byte block");
                self.0.encrypt_block(&mut ga);
                block.copy_from_slice(&ga);
            }

            fn decrypt_block(&self, block: &mut [u8]) {
                let mut ga: Array<u8, U16> = Array::try_from(&block[..]).expect("caller passed a 16-byte block");
                self.0.decrypt_block(&mut ga);
                block.copy_from_slice(&ga);
            }
        }
    };
}

aes_block_cipher!(Aes128BlockCipher, Aes128);
aes_block_cipher!(Aes192BlockCipher, Aes192);
aes_block_cipher!(Aes256BlockCipher, Aes256);

/// A block cipher resolved at construction time from a key's length: 16
/// bytes selects AES-128, 24 selects AES-192, 32 selects AES-256. Downstream
/// code never re-inspects which one was picked (see Design Notes in
/// SPEC_FULL.md, "Dynamic algorithm selection").
#[derive(Clone, Debug)]
pub enum Aes {
    Aes128(Aes128BlockCipher),
    Aes192(Aes192BlockCipher),
    Aes256(Aes256BlockCipher),
}

impl Aes {
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        match key.len() {
            16 => Ok(Aes::Aes128(Aes128BlockCipher::new(key))),
            24 => Ok(Aes::Aes192(Aes192BlockCipher::new(key))),
            32 => Ok(Aes::Aes256(Aes256BlockCipher::new(key))),
            _ => Err(Error::BadKeySize),
        }
    }
}

impl BlockCipher for Aes {
    fn block_size(&self) -> usize {
        16
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        match self {
            Aes::Aes128(c) => c.encrypt_block(block),
            Aes::Aes192(c) => c.encrypt_block(block),
            Aes::Aes256(c) => c.encrypt_block(block),
        }
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        match self {
            Aes::Aes128(c) => c.decrypt_block(block),
            Aes::Aes192(c) => c.decrypt_block(block),
            Aes::Aes256(c) => c.decrypt_block(block),
        }
    }
}
