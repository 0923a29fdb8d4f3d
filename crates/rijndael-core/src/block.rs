//! Block representation helpers.

use core::ops::Deref;

use crate::error::{Error, Result};
use crate::params::{BlockSize, MAX_BLOCK_BYTES};

/// One cipher block held in a fixed 32-byte buffer.
///
/// Only the first `size.bytes()` bytes are meaningful; the tail stays zero so
/// the derived equality compares blocks by content and width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    bytes: [u8; MAX_BLOCK_BYTES],
    size: BlockSize,
}

impl Block {
    /// All-zero block of the given width.
    pub const fn zeroed(size: BlockSize) -> Self {
        Self {
            bytes: [0u8; MAX_BLOCK_BYTES],
            size,
        }
    }

    /// Copies `bytes` into a block, which must be exactly `size.bytes()` long.
    pub fn from_slice(size: BlockSize, bytes: &[u8]) -> Result<Self> {
        check_len(size, bytes.len())?;
        let mut block = Self::zeroed(size);
        block.bytes[..bytes.len()].copy_from_slice(bytes);
        Ok(block)
    }

    /// Width of the block.
    pub const fn size(&self) -> BlockSize {
        self.size
    }

    /// Meaningful bytes of the block.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.size.bytes()]
    }

    /// Mutable view of the meaningful bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.size.bytes();
        &mut self.bytes[..len]
    }
}

impl Deref for Block {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Fails with [`Error::BlockLength`] unless `actual` matches the block width.
#[inline]
pub(crate) fn check_len(size: BlockSize, actual: usize) -> Result<()> {
    let expected = size.bytes();
    if actual != expected {
        return Err(Error::BlockLength { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_keeps_only_declared_width() {
        let data = [0xabu8; 24];
        let block = Block::from_slice(BlockSize::Bits192, &data).unwrap();
        assert_eq!(block.len(), 24);
        assert_eq!(block.as_bytes(), &data[..]);
        assert_eq!(block.size(), BlockSize::Bits192);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        let err = Block::from_slice(BlockSize::Bits128, &[0u8; 15]).unwrap_err();
        assert_eq!(
            err,
            Error::BlockLength {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn equality_includes_width() {
        let narrow = Block::zeroed(BlockSize::Bits128);
        let wide = Block::zeroed(BlockSize::Bits256);
        assert_ne!(narrow, wide);
        assert_eq!(narrow, Block::from_slice(BlockSize::Bits128, &[0u8; 16]).unwrap());
    }
}
