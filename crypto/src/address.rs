//! Checksummed text form for identities.
//!
//! Format: `gg_` + base32(identity, 52 chars) + base32(checksum, 8 chars)
//!
//! Checksum: first 5 bytes of Blake2b-256(identity).
//! Base32 alphabet: `13456789abcdefghijkmnopqrstuwxyz` (avoids ambiguous chars).
//! Total length: 3 (prefix) + 52 + 8 = 63 characters.

use gate_types::Identity;

const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

const PREFIX: &str = "gg_";
/// 52 key chars + 8 checksum chars.
const ENCODED_LEN: usize = 60;
/// 256 bits → ceil(256/5) = 52.
const KEY_CHARS: usize = 52;

fn encode_base32(bytes: &[u8]) -> String {
    let mut result = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    // Trailing bits are right-padded with zeros.
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }
    result
}

fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        let val = *BASE32_DECODE.get(c as usize)?;
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    if pos < N {
        return None;
    }
    Some(result)
}

/// Render an identity in its checksummed `gg_` text form.
pub fn encode_identity(identity: &Identity) -> String {
    let checksum = crate::blake2b_256(identity.as_bytes());
    format!(
        "{}{}{}",
        PREFIX,
        encode_base32(identity.as_bytes()),
        encode_base32(&checksum[..5])
    )
}

/// Parse a `gg_` identity. Returns `None` on a bad prefix, length, character,
/// or checksum.
pub fn decode_identity(text: &str) -> Option<Identity> {
    let encoded = text.strip_prefix(PREFIX)?;
    if encoded.len() != ENCODED_LEN || !encoded.is_ascii() {
        return None;
    }
    let (key_part, checksum_part) = encoded.split_at(KEY_CHARS);

    let key: [u8; 32] = decode_base32_fixed(key_part)?;
    let checksum: [u8; 5] = decode_base32_fixed(checksum_part)?;
    if checksum[..] != crate::blake2b_256(&key)[..5] {
        return None;
    }
    Some(Identity::new(key))
}

/// Whether `text` is a well-formed identity with a valid checksum.
pub fn validate_identity(text: &str) -> bool {
    decode_identity(text).is_some()
}
