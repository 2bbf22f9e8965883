//! AES-SIV: Seal/Open combining [`crate::s2v`] for authentication with
//! AES-CTR over the synthetic IV for encryption (RFC 5297).
//!
//! Grounded on `original_source/go/siv.go`'s `Cipher` (fields `h`, `b`,
//! `tmp1`, `tmp2`) and `Seal`/`Open`/`zeroIVBits`. CTR is hand-rolled here
//! (not delegated to a `ctr`-mode crate) because incrementing the
//! counter under "Q" — RFC 5297 §2.5's bit-cleared IV — is specified
//! behavior of the SIV cipher itself, not an external collaborator.

use zeroize::Zeroize;

use crate::block::zero;
use crate::cipher::{Aes, BlockCipher};
use crate::cmac::Cmac;
use crate::error::{Error, MAX_ASSOCIATED_DATA_ITEMS};
use crate::mac::Mac;
use crate::pmac::Pmac;
use crate::s2v::s2v;

/// AES-SIV keyed with a CMAC-based S2V. Selected by `"AES-SIV"` and
/// `"AES-CMAC-SIV"` at the [`crate::aead::Aead`] facade.
pub type CmacAesSiv = Siv<Aes, Cmac<Aes>>;

/// AES-SIV keyed with a PMAC-based S2V. Selected by `"AES-PMAC-SIV"` at
/// the facade.
pub type PmacAesSiv = Siv<Aes, Pmac<Aes>>;

/// A SIV cipher: a MAC-capable authentication side (`M`, built on `C`) and
/// a CTR-mode encryption side (also `C`), keyed from two independent
/// halves of the same key material.
pub struct Siv<C: BlockCipher, M: Mac> {
    mac: M,
    ctr_cipher: C,
    /// Scratch block reused across `Seal`/`Open` so neither call allocates
    /// beyond the output buffer.
    scratch: Vec<u8>,
}

impl CmacAesSiv {
    /// `key` must be 32, 48, or 64 bytes: twice an AES-128/192/256 key.
    /// The first half keys CMAC, the second half keys CTR.
    pub fn new_aes(key: &[u8]) -> Result<Self, Error> {
        let half = split_key(key)?;
        let mac_cipher = Aes::new(half.0)?;
        let ctr_cipher = Aes::new(half.1)?;
        let mac = Cmac::new(mac_cipher)?;
        Ok(Siv::from_parts(mac, ctr_cipher))
    }
}

impl PmacAesSiv {
    /// As [`CmacAesSiv::new_aes`], but authenticates with PMAC instead of
    /// CMAC.
    pub fn new_aes_pmac(key: &[u8]) -> Result<Self, Error> {
        let half = split_key(key)?;
        let mac_cipher = Aes::new(half.0)?;
        let ctr_cipher = Aes::new(half.1)?;
        let mac = Pmac::new(mac_cipher)?;
        Ok(Siv::from_parts(mac, ctr_cipher))
    }
}

fn split_key(key: &[u8]) -> Result<(&[u8], &[u8]), Error> {
    match key.len() {
        32 | 48 | 64 => Ok(key.split_at(key.len() / 2)),
        _ => Err(Error::BadKeySize),
    }
}

impl<C: BlockCipher, M: Mac> Siv<C, M> {
    fn from_parts(mac: M, ctr_cipher: C) -> Self {
        let bs = ctr_cipher.block_size();
        Siv {
            mac,
            ctr_cipher,
            scratch: vec![0u8; bs],
        }
    }

    /// One block: the size of the synthetic IV this cipher prepends to
    /// every ciphertext.
    pub fn overhead(&self) -> usize {
        self.mac.block_size()
    }

    /// Computes and appends `S2V(ad, plaintext) ‖ CTR(plaintext)` to
    /// `dst`. `dst` and `plaintext` are taken as separate borrows here, so
    /// this signature cannot itself accept them pointing at the same
    /// storage; see [`Self::seal_in_place`] for the variant that operates
    /// on a single buffer in place and genuinely exercises that aliasing.
    pub fn seal(&mut self, dst: &mut Vec<u8>, plaintext: &[u8], ad: &[&[u8]]) -> Result<(), Error> {
        if ad.len() > MAX_ASSOCIATED_DATA_ITEMS {
            return Err(Error::TooManyAssociatedDataItems);
        }

        let iv = s2v(&mut self.mac, ad, plaintext);
        let start = dst.len();
        dst.extend_from_slice(&iv);
        dst.extend_from_slice(plaintext);

        self.scratch.copy_from_slice(&iv);
        zero_ctr_bits(&mut self.scratch);
        ctr_xor(&self.ctr_cipher, &mut self.scratch, &mut dst[start + iv.len()..]);

        Ok(())
    }

    /// Verifies and decrypts `ciphertext`, appending the recovered
    /// plaintext to `dst` on success. On `NotAuthentic`, any bytes staged
    /// into `dst` during decryption are zeroed before the error is
    /// returned so a caller observing `dst` afterwards cannot recover a
    /// forged plaintext.
    pub fn open(&mut self, dst: &mut Vec<u8>, ciphertext: &[u8], ad: &[&[u8]]) -> Result<(), Error> {
        if ad.len() > MAX_ASSOCIATED_DATA_ITEMS {
            return Err(Error::TooManyAssociatedDataItems);
        }
        let bs = self.overhead();
        if ciphertext.len() < bs {
            return Err(Error::NotAuthentic);
        }

        self.scratch.copy_from_slice(&ciphertext[..bs]);
        zero_ctr_bits(&mut self.scratch);

        let start = dst.len();
        dst.extend_from_slice(&ciphertext[bs..]);
        ctr_xor(&self.ctr_cipher, &mut self.scratch, &mut dst[start..]);

        let expected = s2v(&mut self.mac, ad, &dst[start..]);
        let authentic = bool::from(subtle::ConstantTimeEq::ct_eq(
            expected.as_slice(),
            &ciphertext[..bs],
        ));
        if !authentic {
            zero(&mut dst[start..]);
            dst.truncate(start);
            return Err(Error::NotAuthentic);
        }
        Ok(())
    }

    /// As [`Self::seal`], but in place: `buf` holds the plaintext on entry
    /// and `S2V(ad, plaintext) ‖ CTR(plaintext)` on return. There is only
    /// ever one buffer here — read as plaintext to authenticate, then
    /// overwritten as ciphertext with the synthetic IV spliced in at the
    /// front — so this is the variant that actually exercises same-storage
    /// aliasing rather than merely documenting it.
    pub fn seal_in_place(&mut self, buf: &mut Vec<u8>, ad: &[&[u8]]) -> Result<(), Error> {
        if ad.len() > MAX_ASSOCIATED_DATA_ITEMS {
            return Err(Error::TooManyAssociatedDataItems);
        }

        let iv = s2v(&mut self.mac, ad, buf);
        self.scratch.copy_from_slice(&iv);
        zero_ctr_bits(&mut self.scratch);
        ctr_xor(&self.ctr_cipher, &mut self.scratch, buf);
        buf.splice(0..0, iv);

        Ok(())
    }

    /// As [`Self::open`], but in place: `buf` holds `iv ‖ ciphertext` on
    /// entry and the recovered plaintext on success. On `NotAuthentic`,
    /// `buf` is left empty rather than holding a forged plaintext.
    pub fn open_in_place(&mut self, buf: &mut Vec<u8>, ad: &[&[u8]]) -> Result<(), Error> {
        if ad.len() > MAX_ASSOCIATED_DATA_ITEMS {
            return Err(Error::TooManyAssociatedDataItems);
        }
        let bs = self.overhead();
        if buf.len() < bs {
            return Err(Error::NotAuthentic);
        }

        let mut received_iv = buf[..bs].to_vec();
        self.scratch.copy_from_slice(&received_iv);
        zero_ctr_bits(&mut self.scratch);
        buf.drain(..bs);
        ctr_xor(&self.ctr_cipher, &mut self.scratch, buf);

        let expected = s2v(&mut self.mac, ad, buf);
        let authentic = bool::from(subtle::ConstantTimeEq::ct_eq(
            expected.as_slice(),
            &received_iv,
        ));
        received_iv.zeroize();
        if !authentic {
            zero(buf);
            buf.clear();
            return Err(Error::NotAuthentic);
        }
        Ok(())
    }
}

impl<C: BlockCipher, M: Mac> Drop for Siv<C, M> {
    fn drop(&mut self) {
        self.scratch.zeroize();
    }
}

/// A SIV cipher resolved from one of the three algorithm names the AEAD
/// facade and STREAM both accept. Shared between [`crate::aead::Aead`]
/// and [`crate::stream`] so algorithm resolution lives in one place (see
/// Design Notes, "Dynamic algorithm selection").
pub(crate) enum AnySiv {
    Cmac(CmacAesSiv),
    Pmac(PmacAesSiv),
}

impl AnySiv {
    /// # Panics
    ///
    /// Panics on an unrecognized `name`: a contract violation at
    /// construction time, not a recoverable error (SPEC_FULL.md §7).
    pub(crate) fn resolve(name: &str, key: &[u8]) -> Result<Self, Error> {
        match name {
            "AES-SIV" | "AES-CMAC-SIV" => Ok(AnySiv::Cmac(CmacAesSiv::new_aes(key)?)),
            "AES-PMAC-SIV" => Ok(AnySiv::Pmac(PmacAesSiv::new_aes_pmac(key)?)),
            other => panic!("aes-siv: unknown AEAD algorithm {:?}", other),
        }
    }

    pub(crate) fn overhead(&self) -> usize {
        match self {
            AnySiv::Cmac(c) => c.overhead(),
            AnySiv::Pmac(c) => c.overhead(),
        }
    }

    pub(crate) fn seal(&mut self, dst: &mut Vec<u8>, plaintext: &[u8], ad: &[&[u8]]) -> Result<(), Error> {
        match self {
            AnySiv::Cmac(c) => c.seal(dst, plaintext, ad),
            AnySiv::Pmac(c) => c.seal(dst, plaintext, ad),
        }
    }

    pub(crate) fn open(&mut self, dst: &mut Vec<u8>, ciphertext: &[u8], ad: &[&[u8]]) -> Result<(), Error> {
        match self {
            AnySiv::Cmac(c) => c.open(dst, ciphertext, ad),
            AnySiv::Pmac(c) => c.open(dst, ciphertext, ad),
        }
    }
}

/// "Q" from RFC 5297 §2.5: clears bits 31 and 63 from the end of the IV so
/// the 32-bit CTR counters embedded in it can never wrap into each other.
fn zero_ctr_bits(iv: &mut [u8]) {
    let n = iv.len();
    iv[n - 8] &= 0x7f;
    iv[n - 4] &= 0x7f;
}

/// XORs a CTR-mode keystream generated from `iv` into `data`, in place.
/// The counter is the big-endian last 32 bits of the 16-byte block,
/// incrementing by one per block and wrapping within those 32 bits (as
/// Go's `crypto/cipher.NewCTR` does for a 128-bit block).
fn ctr_xor(cipher: &impl BlockCipher, iv: &mut [u8], data: &mut [u8]) {
    let bs = iv.len();
    let mut counter_block = iv.to_vec();
    let mut keystream = vec![0u8; bs];
    for chunk in data.chunks_mut(bs) {
        keystream.copy_from_slice(&counter_block);
        cipher.encrypt_block(&mut keystream);
        for (d, k) in chunk.iter_mut().zip(&keystream) {
            *d ^= k;
        }
        increment_counter(&mut counter_block);
    }
    keystream.zeroize();
    counter_block.zeroize();
}

fn increment_counter(block: &mut [u8]) {
    for byte in block.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}
