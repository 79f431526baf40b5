//! Crypto built-ins: hashing, the demonstration cipher, and CSPRNG draws.
//!
//! The cipher is repeating-key XOR with hex armor. It satisfies the
//! `decrypt(encrypt(x, k), k) == x` contract and nothing more; it is a
//! teaching cipher, not protection against a real adversary. The digest
//! and the random source are real (SHA-256, OS CSPRNG).

use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

use falcon_diagnostic::Diagnostic;

use crate::errors::{
    empty_cipher_key, invalid_ciphertext, invalid_random_range, undecodable_plaintext,
};

/// SHA-256 of the text, as 64 lowercase hex characters.
pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    to_hex(&hasher.finalize())
}

/// Repeating-key XOR, hex-armored so ciphertext is printable.
pub fn xor_encrypt(text: &str, key: &str) -> Result<String, Diagnostic> {
    if key.is_empty() {
        return Err(empty_cipher_key());
    }
    Ok(to_hex(&xor_bytes(text.as_bytes(), key)))
}

/// Reverse of [`xor_encrypt`]. Fails when the ciphertext is not hex or
/// the key does not recover UTF-8 text.
pub fn xor_decrypt(ciphertext: &str, key: &str) -> Result<String, Diagnostic> {
    if key.is_empty() {
        return Err(empty_cipher_key());
    }
    let bytes = from_hex(ciphertext).ok_or_else(invalid_ciphertext)?;
    String::from_utf8(xor_bytes(&bytes, key)).map_err(|_| undecodable_plaintext())
}

/// Uniform draw from the inclusive range `[min, max]`, OS CSPRNG.
pub fn random_in_range(min: i64, max: i64) -> Result<i64, Diagnostic> {
    if min > max {
        return Err(invalid_random_range(min, max));
    }
    Ok(OsRng.gen_range(min..=max))
}

fn xor_bytes(data: &[u8], key: &str) -> Vec<u8> {
    data.iter()
        .zip(key.as_bytes().iter().cycle())
        .map(|(byte, key_byte)| byte ^ key_byte)
        .collect()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn from_hex(text: &str) -> Option<Vec<u8>> {
    let pairs = text.as_bytes().chunks_exact(2);
    if !pairs.remainder().is_empty() {
        return None;
    }
    let mut bytes = Vec::new();
    for pair in pairs {
        let pair = std::str::from_utf8(pair).ok()?;
        bytes.push(u8::from_str_radix(pair, 16).ok()?);
    }
    Some(bytes)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests assert on known-good input")]
mod tests {
    use super::*;
    use falcon_diagnostic::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn hash_is_deterministic_lowercase_hex() {
        let a = sha256_hex("falcon");
        let b = sha256_hex("falcon");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, sha256_hex("falcon "));
    }

    #[test]
    fn known_digest() {
        // SHA-256 of the empty string.
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn encrypt_decrypt_round_trips() {
        for (text, key) in [
            ("secret", "k"),
            ("", "key"),
            ("longer message with spaces", "repeating key"),
            ("unicode: påfågel", "k2"),
        ] {
            let sealed = xor_encrypt(text, key).unwrap();
            assert_eq!(xor_decrypt(&sealed, key).unwrap(), text);
        }
    }

    #[test]
    fn ciphertext_is_hex_armored() {
        let sealed = xor_encrypt("secret", "k").unwrap();
        assert!(sealed.chars().all(|c| c.is_ascii_hexdigit()));
        // 6 input bytes, two hex chars each.
        assert_eq!(sealed.len(), 12);
    }

    #[test]
    fn empty_key_is_type_error() {
        assert_eq!(
            xor_encrypt("x", "").unwrap_err().kind,
            ErrorKind::Type
        );
        assert_eq!(
            xor_decrypt("78", "").unwrap_err().kind,
            ErrorKind::Type
        );
    }

    #[test]
    fn bad_ciphertext_is_rejected() {
        let err = xor_decrypt("zz", "k").unwrap_err();
        assert_eq!(err.message, "ciphertext is not valid hex");
        let err = xor_decrypt("abc", "k").unwrap_err();
        assert_eq!(err.message, "ciphertext is not valid hex");
    }

    #[test]
    fn random_stays_in_inclusive_range() {
        for _ in 0..64 {
            let n = random_in_range(-3, 3).unwrap();
            assert!((-3..=3).contains(&n));
        }
        assert_eq!(random_in_range(7, 7).unwrap(), 7);
    }

    #[test]
    fn empty_range_is_type_error() {
        let err = random_in_range(5, 2).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "random range is empty: 5 > 2");
    }
}
