//! End-to-end scenarios against literal published vectors (RFC 5297
//! Appendix A and the "proposed modes" SIV test suite at
//! csrc.nist.gov/groups/ST/toolkit/BCM/documents/proposedmodes/siv/siv-test-vectors.txt),
//! plus property-based checks for the remaining scenarios that have no
//! single published answer (CMAC streaming equivalence, STREAM segment
//! chaining).

use aes_siv::{CmacAesSiv, Decryptor, Encryptor, Error};

fn hex(s: &str) -> Vec<u8> {
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

/// RFC 5297 A.1, Deterministic Authenticated Encryption Example.
#[test]
fn s1_rfc5297_deterministic_ae() {
    let key = hex("fffefdfcfbfaf9f8f7f6f5f4f3f2f1f0 f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    let ad = hex("101112131415161718191a1b1c1d1e1f 2021222324252627");
    let plaintext = hex("112233445566778899aabbccddee");
    let expected = hex("85632d07c6e8f37f950acd320a2ecc93 40c02b9690c4dc04daef7f6afe5c");

    let mut siv = CmacAesSiv::new_aes(&key).unwrap();
    let mut dst = Vec::new();
    siv.seal(&mut dst, &plaintext, &[&ad]).unwrap();
    assert_eq!(dst, expected);

    let mut recovered = Vec::new();
    siv.open(&mut recovered, &dst, &[&ad]).unwrap();
    assert_eq!(recovered, plaintext);
}

/// RFC 5297 A.2, Nonce-Based Authenticated Encryption Example.
#[test]
fn s2_rfc5297_nonce_based_ae() {
    let key = hex("7f7e7d7c7b7a7978 77767574 73727170 40414243 44454647 48494a4b 4c4d4e4f");
    let ad1 = hex(
        "00112233 44556677 8899aabb ccddeeff deaddada deaddada ffeeddcc bbaa9988 77665544 33221100",
    );
    let ad2 = hex("10203040 50607080 90a0");
    let nonce = hex("09f91102 9d74e35b d84156c5 635688c0");
    let plaintext = b"this is some plaintext to encrypt using SIV-AES";
    let expected = hex(
        "7bdb6e3b432667eb06f4d14bff2fbd0f cb900f2fddbe4043266019 \
         65c889bf17dba77ceb094fa663b7a3f748ba8af829ea64ad54 4a272e9c485b62a3fd5c0d",
    );

    let mut siv = CmacAesSiv::new_aes(&key).unwrap();
    let mut dst = Vec::new();
    siv.seal(&mut dst, plaintext, &[&ad1, &ad2, &nonce]).unwrap();
    assert_eq!(dst, expected);

    let mut recovered = Vec::new();
    siv.open(&mut recovered, &dst, &[&ad1, &ad2, &nonce]).unwrap();
    assert_eq!(recovered, plaintext);
}

/// RFC 5297 A.3-equivalent, empty plaintext and empty associated data.
#[test]
fn s3_empty_plaintext_and_ad() {
    let key = hex("fffefdfcfbfaf9f8f7f6f5f4f3f2f1f0 f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    let expected = hex("f2007a5beb2b8900c588a7adf599f172");

    let mut siv = CmacAesSiv::new_aes(&key).unwrap();
    let mut dst = Vec::new();
    siv.seal(&mut dst, b"", &[]).unwrap();
    assert_eq!(dst, expected);
    assert_eq!(dst.len(), siv.overhead());
}

/// 192-bit subkeys (AES-SIV-CMAC-384): the S1 key material extended to 48
/// bytes, from the "proposed modes" SIV test vector suite's TEST CASE #1.
#[test]
fn s4_192_bit_subkeys() {
    let key = hex(
        "fffefdfc fbfaf9f8 f7f6f5f4 f3f2f1f0 6f6e6d6c 6b6a6968 \
         f0f1f2f3 f4f5f6f7 f8f9fafb fcfdfeff 00010203 04050607",
    );
    let ad = hex("10111213 14151617 18191a1b 1c1d1e1f 20212223 24252627");
    let plaintext = hex("11223344 55667788 99aabbcc ddee");
    let expected = hex("02347811 daa8b274 91f24448 932775a6 2af34a06 ac0016e8 ac284a55 14f6");

    let mut siv = CmacAesSiv::new_aes(&key).unwrap();
    let mut dst = Vec::new();
    siv.seal(&mut dst, &plaintext, &[&ad]).unwrap();
    assert_eq!(dst, expected);

    let mut recovered = Vec::new();
    siv.open(&mut recovered, &dst, &[&ad]).unwrap();
    assert_eq!(recovered, plaintext);
}

/// 256-bit subkeys (AES-SIV-CMAC-512), same test case family as S4.
#[test]
fn s4b_256_bit_subkeys() {
    let key = hex(
        "fffefdfc fbfaf9f8 f7f6f5f4 f3f2f1f0 6f6e6d6c 6b6a6968 67666564 63626160 \
         f0f1f2f3 f4f5f6f7 f8f9fafb fcfdfeff 00010203 04050607 08090a0b 0c0d0e0f",
    );
    let ad = hex("10111213 14151617 18191a1b 1c1d1e1f 20212223 24252627");
    let plaintext = hex("11223344 55667788 99aabbcc ddee");
    let expected = hex("f125274c 598065cf c26b0e71 57502908 8b035217 e380cac8 919ee800 c126");

    let mut siv = CmacAesSiv::new_aes(&key).unwrap();
    let mut dst = Vec::new();
    siv.seal(&mut dst, &plaintext, &[&ad]).unwrap();
    assert_eq!(dst, expected);
}

/// CMAC streaming: the longest published RFC 4493 test vector (64 bytes),
/// written byte-by-byte, in halves, in thirds, and half-then-Sum-then-rest,
/// must all yield the same published tag.
#[test]
fn s5_cmac_streaming_equivalence() {
    use aes_siv::{Aes, Cmac, Mac};

    let key = hex("2b7e151628aed2a6abf7158809cf4f3c");
    let message = hex(
        "6bc1bee22e409f96e93d7e117393172a ae2d8a571e03ac9c9eb76fac45af8e51 \
         30c81c46a35ce411e5fbc1191a0a52ef f69f2445df4f9b17ad2b417be66c3710",
    );
    let expected = hex("51f0bebf7e3b9d92fc49741779363cfe");

    let mac = || Cmac::new(Aes::new(&key).unwrap()).unwrap();

    let mut whole = mac();
    whole.write(&message);
    let mut whole_tag = Vec::new();
    whole.sum(&mut whole_tag);
    assert_eq!(whole_tag, expected);

    let mut bytewise = mac();
    for b in &message {
        bytewise.write(std::slice::from_ref(b));
    }
    let mut got = Vec::new();
    bytewise.sum(&mut got);
    assert_eq!(got, expected, "byte-by-byte");

    let mut halves = mac();
    halves.write(&message[..message.len() / 2]);
    halves.write(&message[message.len() / 2..]);
    got.clear();
    halves.sum(&mut got);
    assert_eq!(got, expected, "two halves");

    let mut thirds = mac();
    let third = message.len() / 3;
    thirds.write(&message[..third]);
    thirds.write(&message[third..2 * third]);
    thirds.write(&message[2 * third..]);
    got.clear();
    thirds.sum(&mut got);
    assert_eq!(got, expected, "three thirds");

    let mut half_then_sum = mac();
    half_then_sum.write(&message[..message.len() / 2]);
    let mut intermediate = Vec::new();
    half_then_sum.sum(&mut intermediate);
    half_then_sum.write(&message[message.len() / 2..]);
    got.clear();
    half_then_sum.sum(&mut got);
    assert_eq!(got, expected, "half-then-sum-then-rest-then-sum");
}

/// STREAM: a segmented message sealed and reopened segment by segment, and
/// the negative case where flipping the final segment's `is_last` flag
/// during Open must fail authentication rather than silently accept.
#[test]
fn s6_stream_segmented_round_trip_and_is_last_tamper() {
    let key = [0x21u8; 32];
    let nonce_prefix = hex("000102030405060708090a0b");

    let segments: [(&[u8], &[u8]); 4] = [
        (b"segment the first, short", b"header-0"),
        (b"segment the second, a little bit longer than the first", b"header-1"),
        (b"", b"header-2"),
        (b"the final segment carries the closing flag", b"header-3"),
    ];

    let mut enc = Encryptor::new("AES-SIV", &key, &nonce_prefix).unwrap();
    let mut ciphertexts = Vec::new();
    for (i, (plaintext, ad)) in segments.iter().enumerate() {
        let is_last = i + 1 == segments.len();
        let mut ct = Vec::new();
        enc.seal(&mut ct, plaintext, ad, is_last).unwrap();
        ciphertexts.push(ct);
    }

    let mut dec = Decryptor::new("AES-SIV", &key, &nonce_prefix).unwrap();
    for (i, ((plaintext, ad), ct)) in segments.iter().zip(&ciphertexts).enumerate() {
        let is_last = i + 1 == segments.len();
        let mut recovered = Vec::new();
        dec.open(&mut recovered, ct, ad, is_last).unwrap();
        assert_eq!(&recovered, plaintext);
    }

    // Swapping the final segment's is_last flag to false must fail: the
    // nonce tail byte it authenticates no longer matches what was sealed.
    let mut dec2 = Decryptor::new("AES-SIV", &key, &nonce_prefix).unwrap();
    for (i, ((_, ad), ct)) in segments.iter().zip(&ciphertexts).enumerate() {
        let is_last = i + 1 == segments.len();
        let mut recovered = Vec::new();
        if is_last {
            let err = dec2.open(&mut recovered, ct, ad, false).unwrap_err();
            assert_eq!(err, Error::NotAuthentic);
        } else {
            dec2.open(&mut recovered, ct, ad, is_last).unwrap();
        }
    }
}
