//! STREAM: chains SIV invocations with a per-segment nonce for segmented
//! encryption of large messages, so a caller never has to hold an entire
//! message in memory to authenticate it.
//!
//! Per-segment nonce format: `nonce_prefix ‖ counter_be64 ‖ last_flag_byte`.
//! Grounded on the vector shape in `original_source/go/stream_test.go`
//! (`name`, `alg`, `key`, `nonce`, per-block `ad`/`plaintext`/
//! `ciphertext`), which is itself miscreant's STREAM construction.

use crate::error::Error;
use crate::siv::AnySiv;

fn segment_nonce(prefix: &[u8], counter: u64, is_last: bool) -> Vec<u8> {
    let mut nonce = Vec::with_capacity(prefix.len() + 9);
    nonce.extend_from_slice(prefix);
    nonce.extend_from_slice(&counter.to_be_bytes());
    nonce.push(if is_last { 0x01 } else { 0x00 });
    nonce
}

/// Seals a stream of segments under chained per-segment nonces.
pub struct Encryptor {
    siv: AnySiv,
    nonce_prefix: Vec<u8>,
    counter: u64,
    /// Set once a final segment has been sealed; further calls are a
    /// contract violation (SPEC_FULL.md §4.H).
    finished: bool,
}

impl Encryptor {
    /// `algorithm` as accepted by [`crate::aead::Aead::new`].
    pub fn new(algorithm: &str, key: &[u8], nonce_prefix: &[u8]) -> Result<Self, Error> {
        Ok(Encryptor {
            siv: AnySiv::resolve(algorithm, key)?,
            nonce_prefix: nonce_prefix.to_vec(),
            counter: 0,
            finished: false,
        })
    }

    /// Seals one segment, appending it to `dst`. `ad` authenticates this
    /// segment only (it precedes the per-segment nonce as the first
    /// associated-data item, mirroring [`crate::aead::Aead::seal`]'s
    /// shape). `is_last` must be true for exactly the final segment of
    /// the stream.
    ///
    /// # Panics
    ///
    /// Panics if called again after a segment with `is_last = true` has
    /// already been sealed, and on the stream's 2^64th segment (the
    /// counter must not wrap — SPEC_FULL.md §4.H).
    pub fn seal(&mut self, dst: &mut Vec<u8>, plaintext: &[u8], ad: &[u8], is_last: bool) -> Result<(), Error> {
        assert!(!self.finished, "aes-siv: STREAM encryptor used after a final segment");
        let nonce = segment_nonce(&self.nonce_prefix, self.counter, is_last);
        self.siv.seal(dst, plaintext, &[ad, &nonce])?;
        self.counter = self
            .counter
            .checked_add(1)
            .expect("aes-siv: STREAM segment counter exhausted (2^64 segments)");
        if is_last {
            self.finished = true;
        }
        Ok(())
    }

    /// Overhead of one segment: one block.
    pub fn overhead(&self) -> usize {
        self.siv.overhead()
    }
}

/// Opens a stream of segments sealed by [`Encryptor`]. Segment ordering is
/// enforced by the embedded counter: out-of-order or replayed segments, or
/// a segment whose `is_last` flag doesn't match how it was sealed, fail
/// authentication because the nonce tail differs.
pub struct Decryptor {
    siv: AnySiv,
    nonce_prefix: Vec<u8>,
    counter: u64,
    finished: bool,
}

impl Decryptor {
    pub fn new(algorithm: &str, key: &[u8], nonce_prefix: &[u8]) -> Result<Self, Error> {
        Ok(Decryptor {
            siv: AnySiv::resolve(algorithm, key)?,
            nonce_prefix: nonce_prefix.to_vec(),
            counter: 0,
            finished: false,
        })
    }

    /// Opens one segment, appending the recovered plaintext to `dst` on
    /// success.
    ///
    /// # Panics
    ///
    /// As [`Encryptor::seal`], if called again after `is_last = true`.
    pub fn open(
        &mut self,
        dst: &mut Vec<u8>,
        ciphertext: &[u8],
        ad: &[u8],
        is_last: bool,
    ) -> Result<(), Error> {
        assert!(!self.finished, "aes-siv: STREAM decryptor used after a final segment");
        let nonce = segment_nonce(&self.nonce_prefix, self.counter, is_last);
        self.siv.open(dst, ciphertext, &[ad, &nonce])?;
        self.counter = self
            .counter
            .checked_add(1)
            .expect("aes-siv: STREAM segment counter exhausted (2^64 segments)");
        if is_last {
            self.finished = true;
        }
        Ok(())
    }

    pub fn overhead(&self) -> usize {
        self.siv.overhead()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_multiple_segments() {
        let key = [0u8; 32];
        let prefix = [0x11u8; 8];
        let mut enc = Encryptor::new("AES-SIV", &key, &prefix).unwrap();
        let mut dec = Decryptor::new("AES-SIV", &key, &prefix).unwrap();

        let segments: [(&[u8], &[u8], bool); 3] = [
            (b"segment one", b"ad-1", false),
            (b"segment two", b"ad-2", false),
            (b"segment three (last)", b"ad-3", true),
        ];

        for (plaintext, ad, is_last) in segments {
            let mut ciphertext = Vec::new();
            enc.seal(&mut ciphertext, plaintext, ad, is_last).unwrap();

            let mut recovered = Vec::new();
            dec.open(&mut recovered, &ciphertext, ad, is_last).unwrap();
            assert_eq!(recovered, plaintext);
        }
    }

    #[test]
    fn flipping_the_final_is_last_flag_fails_authentication() {
        let key = [0u8; 32];
        let prefix = [0x22u8; 4];
        let mut enc = Encryptor::new("AES-SIV", &key, &prefix).unwrap();
        let mut dec = Decryptor::new("AES-SIV", &key, &prefix).unwrap();

        let mut ciphertext = Vec::new();
        enc.seal(&mut ciphertext, b"final segment", b"ad", true).unwrap();

        let mut recovered = Vec::new();
        let err = dec.open(&mut recovered, &ciphertext, b"ad", false).unwrap_err();
        assert_eq!(err, Error::NotAuthentic);
    }

    #[test]
    fn out_of_order_segments_fail_authentication() {
        let key = [0u8; 32];
        let prefix = [0x33u8; 4];
        let mut enc = Encryptor::new("AES-SIV", &key, &prefix).unwrap();

        let mut first = Vec::new();
        enc.seal(&mut first, b"first", b"", false).unwrap();
        let mut second = Vec::new();
        enc.seal(&mut second, b"second", b"", false).unwrap();

        let mut dec = Decryptor::new("AES-SIV", &key, &prefix).unwrap();
        // Decryptor expects segment 0 first; feed it segment 1's ciphertext.
        let mut recovered = Vec::new();
        let err = dec.open(&mut recovered, &second, b"", false).unwrap_err();
        assert_eq!(err, Error::NotAuthentic);
    }

    #[test]
    #[should_panic(expected = "used after a final segment")]
    fn sealing_after_final_segment_panics() {
        let key = [0u8; 32];
        let mut enc = Encryptor::new("AES-SIV", &key, &[]).unwrap();
        let mut dst = Vec::new();
        enc.seal(&mut dst, b"last", b"", true).unwrap();
        dst.clear();
        let _ = enc.seal(&mut dst, b"oops", b"", false);
    }
}
