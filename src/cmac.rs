//! CMAC (NIST SP 800-38B), a cipher-based MAC built on any 128-bit (or
//! 64-bit) block cipher. Grounded structurally on `original_source/cmac.go`
//! (fields `k1, k2, ci, digest, p`) and RFC 4493.

use zeroize::Zeroize;

use crate::block::{dbl, xor, zero};
use crate::cipher::BlockCipher;
use crate::error::Error;
use crate::mac::Mac;

/// An incremental CMAC instance over block cipher `C`.
pub struct Cmac<C: BlockCipher> {
    cipher: C,
    k1: Vec<u8>,
    k2: Vec<u8>,
    /// Accumulator.
    c: Vec<u8>,
    /// Position in `c` up to which bytes of the current (unfinished) tail
    /// block have been written. May equal `c.len()`: a full block sits
    /// buffered, unencrypted, until either more data arrives (it then
    /// becomes an interior block) or `sum` is called (it then selects K1
    /// instead of K2 — see the Open Question discussion in
    /// SPEC_FULL.md).
    p: usize,
}

impl<C: BlockCipher> Cmac<C> {
    /// Derives K1/K2 from `cipher` and returns a fresh CMAC instance.
    /// Fails if the cipher's block size is neither 8 nor 16 bytes.
    pub fn new(cipher: C) -> Result<Self, Error> {
        let bs = cipher.block_size();
        if bs != 8 && bs != 16 {
            return Err(Error::BadKeySize);
        }
        let mut l = vec![0u8; bs];
        cipher.encrypt_block(&mut l);
        let mut k1 = l;
        dbl(&mut k1);
        let mut k2 = k1.clone();
        dbl(&mut k2);
        Ok(Cmac {
            cipher,
            k1,
            k2,
            c: vec![0u8; bs],
            p: 0,
        })
    }
}

impl<C: BlockCipher> Mac for Cmac<C> {
    fn reset(&mut self) {
        zero(&mut self.c);
        self.p = 0;
    }

    fn write(&mut self, mut data: &[u8]) {
        if data.is_empty() {
            return;
        }
        let bs = self.c.len();
        let left = bs - self.p;
        if data.len() > left {
            xor(&mut self.c[self.p..], &data[..left]);
            data = &data[left..];
            self.cipher.encrypt_block(&mut self.c);
            self.p = 0;
        }
        while data.len() > bs {
            xor(&mut self.c, &data[..bs]);
            data = &data[bs..];
            self.cipher.encrypt_block(&mut self.c);
        }
        if !data.is_empty() {
            xor(&mut self.c[self.p..], data);
            self.p += data.len();
        }
    }

    fn sum(&self, out: &mut Vec<u8>) {
        let bs = self.c.len();
        let mut digest = self.c.clone();
        if self.p == bs {
            xor(&mut digest, &self.k1);
        } else {
            xor(&mut digest, &self.k2);
            digest[self.p] ^= 0x80;
        }
        self.cipher.encrypt_block(&mut digest);
        out.extend_from_slice(&digest);
        digest.zeroize();
    }

    fn block_size(&self) -> usize {
        self.c.len()
    }
}

impl<C: BlockCipher> Drop for Cmac<C> {
    fn drop(&mut self) {
        self.k1.zeroize();
        self.k2.zeroize();
        self.c.zeroize();
    }
}
