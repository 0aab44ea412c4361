//! Shard checksum

use crc::{Algorithm, Crc};

/// CRC-32 with the "Q" polynomial 0x814141AB, reflected, as used by the
/// on-disk layout (reversed table constant 0xD5828281).
pub const SHARD_CRC_ALGORITHM: Algorithm<u32> = Algorithm {
    width: 32,
    poly: 0x8141_41ab,
    init: 0xffff_ffff,
    refin: true,
    refout: true,
    xorout: 0xffff_ffff,
    check: 0xa9cc_8179,
    residue: 0x4ac2_a509,
};

static SHARD_CRC: Crc<u32> = Crc::<u32>::new(&SHARD_CRC_ALGORITHM);

/// 32-bit checksum of a raw cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShardHash(u32);

impl ShardHash {
    /// Checksum the raw bytes of `key`
    #[inline]
    pub fn of(key: &str) -> Self {
        Self(SHARD_CRC.checksum(key.as_bytes()))
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Directory names, most significant byte first, lowercase hex without padding
    pub fn segments(self) -> [String; 4] {
        self.0.to_be_bytes().map(|byte| format!("{byte:x}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        assert_eq!(SHARD_CRC.checksum(b"123456789"), SHARD_CRC_ALGORITHM.check);
    }

    #[test]
    fn test_known_keys() {
        assert_eq!(ShardHash::of("").value(), 0);
        assert_eq!(ShardHash::of("hello").value(), 0xc4e4_d7be);
        assert_eq!(ShardHash::of("GET|host|/a").value(), 0xf3cf_3e4a);
    }

    #[test]
    fn test_segments() {
        assert_eq!(ShardHash::of("GET|host|/a").segments(), ["f3", "cf", "3e", "4a"]);
        assert_eq!(ShardHash::of("").segments(), ["0", "0", "0", "0"]);
    }
}
