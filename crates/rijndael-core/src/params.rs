//! Cipher parameters: key size, block size and the derived `Nb`/`Nk`/`Nr`.

use core::fmt;

use crate::error::{Error, Result};

/// Largest block in bytes (256-bit block).
pub const MAX_BLOCK_BYTES: usize = 32;

/// Largest key schedule in words (`Nb = 8`, `Nr = 14`).
pub const MAX_SCHEDULE_WORDS: usize = 8 * (14 + 1);

/// Supported key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key, `Nk = 4`, `Nr = 10`.
    Aes128,
    /// 192-bit key, `Nk = 6`, `Nr = 12`.
    Aes192,
    /// 256-bit key, `Nk = 8`, `Nr = 14`.
    Aes256,
}

impl KeySize {
    /// Maps a key length in bytes to its size class.
    pub fn from_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            _ => Err(Error::InvalidKeyLength { len }),
        }
    }

    /// Key length in 32-bit words (`Nk`).
    pub const fn words(self) -> usize {
        match self {
            Self::Aes128 => 4,
            Self::Aes192 => 6,
            Self::Aes256 => 8,
        }
    }

    /// Number of rounds (`Nr`).
    pub const fn rounds(self) -> usize {
        match self {
            Self::Aes128 => 10,
            Self::Aes192 => 12,
            Self::Aes256 => 14,
        }
    }

    /// Key length in bytes.
    pub const fn bytes(self) -> usize {
        self.words() * 4
    }

    /// Key length in bits.
    pub const fn bits(self) -> usize {
        self.bytes() * 8
    }
}

/// Supported block widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockSize {
    /// 128-bit block, `Nb = 4` (the AES block).
    Bits128,
    /// 192-bit block, `Nb = 6`.
    Bits192,
    /// 256-bit block, `Nb = 8`.
    Bits256,
}

impl BlockSize {
    /// Maps a block width in bits to its size class.
    pub fn from_bits(bits: usize) -> Result<Self> {
        match bits {
            128 => Ok(Self::Bits128),
            192 => Ok(Self::Bits192),
            256 => Ok(Self::Bits256),
            _ => Err(Error::InvalidBlockBits { bits }),
        }
    }

    /// Block width in 32-bit words (`Nb`).
    pub const fn words(self) -> usize {
        match self {
            Self::Bits128 => 4,
            Self::Bits192 => 6,
            Self::Bits256 => 8,
        }
    }

    /// Block length in bytes.
    pub const fn bytes(self) -> usize {
        self.words() * 4
    }

    /// Block width in bits.
    pub const fn bits(self) -> usize {
        self.bytes() * 8
    }

    /// Left-rotation distance of each state row during ShiftRows.
    pub const fn shift_offsets(self) -> [usize; 4] {
        match self {
            Self::Bits128 | Self::Bits192 => [0, 1, 2, 3],
            Self::Bits256 => [0, 1, 2, 4],
        }
    }
}

/// Fixed parameter set of one cipher context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Params {
    key: KeySize,
    block: BlockSize,
}

impl Params {
    /// Validates a key length (bytes) and block width (bits).
    pub fn new(key_len: usize, block_bits: usize) -> Result<Self> {
        Ok(Self::from_sizes(
            KeySize::from_len(key_len)?,
            BlockSize::from_bits(block_bits)?,
        ))
    }

    /// Combines already validated size classes.
    pub const fn from_sizes(key: KeySize, block: BlockSize) -> Self {
        Self { key, block }
    }

    /// Key size class.
    pub const fn key_size(&self) -> KeySize {
        self.key
    }

    /// Block size class.
    pub const fn block_size(&self) -> BlockSize {
        self.block
    }

    /// Block words `Nb`.
    pub const fn nb(&self) -> usize {
        self.block.words()
    }

    /// Key words `Nk`.
    pub const fn nk(&self) -> usize {
        self.key.words()
    }

    /// Rounds `Nr`.
    pub const fn nr(&self) -> usize {
        self.key.rounds()
    }

    /// Words in the expanded schedule, `Nb * (Nr + 1)`.
    pub const fn schedule_words(&self) -> usize {
        self.nb() * (self.nr() + 1)
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rijndael-{}/{} (Nb={}, Nk={}, Nr={})",
            self.block.bits(),
            self.key.bits(),
            self.nb(),
            self.nk(),
            self.nr()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_follow_key_size() {
        for (len, nk, nr) in [(16, 4, 10), (24, 6, 12), (32, 8, 14)] {
            let params = Params::new(len, 128).expect("valid params");
            assert_eq!(params.nk(), nk);
            assert_eq!(params.nr(), nr);
            assert_eq!(params.nb(), 4);
        }
    }

    #[test]
    fn schedule_never_exceeds_capacity() {
        for len in [16, 24, 32] {
            for bits in [128, 192, 256] {
                let params = Params::new(len, bits).unwrap();
                assert!(params.schedule_words() <= MAX_SCHEDULE_WORDS);
                assert!(params.block_size().bytes() <= MAX_BLOCK_BYTES);
            }
        }
        assert_eq!(Params::new(32, 256).unwrap().schedule_words(), MAX_SCHEDULE_WORDS);
    }

    #[test]
    fn rejects_unsupported_sizes() {
        assert_eq!(Params::new(20, 128), Err(Error::InvalidKeyLength { len: 20 }));
        assert_eq!(Params::new(16, 100), Err(Error::InvalidBlockBits { bits: 100 }));
        assert_eq!(Params::new(0, 0), Err(Error::InvalidKeyLength { len: 0 }));
    }

    #[test]
    fn wide_block_uses_large_shift_offsets() {
        assert_eq!(BlockSize::Bits128.shift_offsets(), [0, 1, 2, 3]);
        assert_eq!(BlockSize::Bits192.shift_offsets(), [0, 1, 2, 3]);
        assert_eq!(BlockSize::Bits256.shift_offsets(), [0, 1, 2, 4]);
    }

    #[test]
    fn display_names_variant() {
        let params = Params::new(24, 256).unwrap();
        assert_eq!(params.to_string(), "Rijndael-256/192 (Nb=8, Nk=6, Nr=12)");
    }
}
