//! S2V, the "string to vector" construction (RFC 5297 §2.4) that folds an
//! ordered vector of associated-data strings plus a final string into one
//! block-sized synthetic IV.
//!
//! Grounded on `original_source/go/siv.go`'s `(c *Cipher) s2v` method, with
//! the long-`sn`-prefix streamed through the MAC rather than copied (the
//! MAC's incremental `write` makes this possible, and it's required for
//! acceptable performance on large plaintexts — SPEC_FULL.md §4.E).

use crate::block::{dbl, xor, zero};
use crate::mac::Mac;

/// Computes S2V over `ad` (in order) and the final string `sn`, resetting
/// `mac` before every invocation (S2V's contract requires it between every
/// MAC call). The degenerate RFC 5297 case of zero `ad` strings *and* an
/// empty `sn` (which would return `MAC(1)`) is never reached from
/// [`crate::siv::Siv`], which always passes the plaintext as `sn` even
/// when empty — see SPEC_FULL.md §4.E.
pub fn s2v<M: Mac>(mac: &mut M, ad: &[&[u8]], sn: &[u8]) -> Vec<u8> {
    let bs = mac.block_size();

    mac.reset();
    let zero_block = vec![0u8; bs];
    mac.write(&zero_block);
    let mut d = Vec::with_capacity(bs);
    mac.sum(&mut d);

    for s in ad {
        mac.reset();
        mac.write(s);
        let mut t = Vec::with_capacity(bs);
        mac.sum(&mut t);

        dbl(&mut d);
        xor(&mut d, &t);
    }

    mac.reset();
    if sn.len() >= bs {
        let n = sn.len() - bs;
        mac.write(&sn[..n]);
        let mut t = sn[n..].to_vec();
        xor(&mut t, &d);
        mac.write(&t);
    } else {
        let mut t = vec![0u8; bs];
        t[..sn.len()].copy_from_slice(sn);
        t[sn.len()] = 0x80;
        dbl(&mut d);
        xor(&mut t, &d);
        mac.write(&t);
    }
    zero(&mut d);

    let mut out = Vec::with_capacity(bs);
    mac.sum(&mut out);
    out
}
