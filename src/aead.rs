//! A thin adapter presenting fixed-nonce-size AEAD semantics over the
//! variable-AD [`crate::siv`] cipher: the nonce is passed through as the
//! final associated-data string, with the caller's own (optional) AD
//! preceding it.
//!
//! Grounded on `original_source/aead.go`'s `aead` wrapper: same panic
//! discipline for nonce-size/algorithm-name contract violations (both are
//! programmer errors, not data-dependent failures — SPEC_FULL.md §7), and
//! the same "nil/None AD" special case to avoid allocating an empty slice
//! on every call.

use crate::error::Error;
use crate::siv::AnySiv;

/// Fixed-nonce-size AEAD facade over AES-SIV.
pub struct Aead {
    inner: AnySiv,
    nonce_size: i32,
}

impl Aead {
    /// `algorithm` must be one of `"AES-SIV"`, `"AES-CMAC-SIV"`, or
    /// `"AES-PMAC-SIV"`.
    ///
    /// # Panics
    ///
    /// Panics on an unrecognized algorithm name: this is a programmer
    /// error, not a recoverable runtime condition (SPEC_FULL.md §7).
    pub fn new(algorithm: &str, key: &[u8], nonce_size: i32) -> Result<Self, Error> {
        let inner = AnySiv::resolve(algorithm, key)?;
        Ok(Aead { inner, nonce_size })
    }

    /// The nonce size this instance was constructed with. Negative means
    /// any nonce size is accepted.
    pub fn nonce_size(&self) -> i32 {
        self.nonce_size
    }

    /// Always one block (16 bytes for AES-SIV).
    pub fn overhead(&self) -> usize {
        self.inner.overhead()
    }

    /// Seals `plaintext`, authenticating `ad` (if given) and `nonce`,
    /// appending the result to `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `nonce.len() != self.nonce_size()` and `nonce_size() >=
    /// 0`: a mismatched nonce size is a contract violation at the call
    /// site, not a recoverable error (SPEC_FULL.md §7).
    pub fn seal(&mut self, dst: &mut Vec<u8>, nonce: &[u8], plaintext: &[u8], ad: Option<&[u8]>) {
        self.check_nonce_size(nonce);
        let result = match ad {
            Some(ad) => self.seal_inner(dst, plaintext, &[ad, nonce]),
            None => self.seal_inner(dst, plaintext, &[nonce]),
        };
        result.expect("aes-siv: AEAD facade never passes more than 2 associated-data items");
    }

    /// Opens `ciphertext`, appending the recovered plaintext to `dst` on
    /// success.
    ///
    /// # Panics
    ///
    /// As [`Aead::seal`], on a mismatched nonce size.
    pub fn open(
        &mut self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        ciphertext: &[u8],
        ad: Option<&[u8]>,
    ) -> Result<(), Error> {
        self.check_nonce_size(nonce);
        match ad {
            Some(ad) => self.open_inner(dst, ciphertext, &[ad, nonce]),
            None => self.open_inner(dst, ciphertext, &[nonce]),
        }
    }

    fn check_nonce_size(&self, nonce: &[u8]) {
        if self.nonce_size >= 0 && nonce.len() as i32 != self.nonce_size {
            panic!(
                "aes-siv: AEAD facade: incorrect nonce length {} (expected {})",
                nonce.len(),
                self.nonce_size
            );
        }
    }

    fn seal_inner(&mut self, dst: &mut Vec<u8>, plaintext: &[u8], ad: &[&[u8]]) -> Result<(), Error> {
        self.inner.seal(dst, plaintext, ad)
    }

    fn open_inner(&mut self, dst: &mut Vec<u8>, ciphertext: &[u8], ad: &[&[u8]]) -> Result<(), Error> {
        self.inner.open(dst, ciphertext, ad)
    }
}
