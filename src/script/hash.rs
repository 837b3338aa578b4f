//! Fast non-cryptographic hashing for scripts.
//!
//! # Design Decisions
//! - MurmurHash3, x64_128 variant, seed 0; the script-visible digest is the
//!   first 64-bit half (the low bits of the `murmur3` crate's `u128`)
//! - Digests are a stable contract: scripts may persist them across
//!   deployments, so reference values are pinned in tests

use std::io::{self, Cursor};

/// 64-bit digest of `data` as exposed to scripts.
pub fn hash64(data: &[u8]) -> io::Result<u64> {
    let digest = murmur3::murmur3_x64_128(&mut Cursor::new(data), 0)?;
    Ok(digest as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_digests() {
        assert_eq!(hash64(b"").unwrap(), 0);
        assert_eq!(hash64(b"hello").unwrap(), 0xcbd8_a7b3_41bd_9b02);
        assert_eq!(hash64(b"test").unwrap(), 0xac7d_28cc_74bd_e19d);
        assert_eq!(hash64(b"hello, world").unwrap(), 0x342f_ac62_3a5e_bc8e);
        assert_eq!(hash64(b"19 Jan 2038 at 3:14:07 AM").unwrap(), 0xb89e_5988_b737_affc);
        assert_eq!(
            hash64(b"The quick brown fox jumps over the lazy dog.").unwrap(),
            0xcd99_481f_9ee9_02c9
        );
    }

    #[test]
    fn test_digest_is_low_half() {
        let full = murmur3::murmur3_x64_128(&mut Cursor::new(b"hello"), 0).unwrap();
        assert_eq!(full >> 64, 0x5b1e_906a_48ae_1d19);
        assert_eq!(hash64(b"hello").unwrap(), full as u64);
    }

    #[test]
    fn test_utf8_bytes_are_hashed() {
        assert_eq!(hash64("héllo".as_bytes()).unwrap(), 0x4e31_7b11_7285_5c8a);
        assert_ne!(hash64("héllo".as_bytes()).unwrap(), hash64(b"hello").unwrap());
    }
}
