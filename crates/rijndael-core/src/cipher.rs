//! Block encryption/decryption and the `Rijndael` cipher context.

use log::debug;

use crate::block::{check_len, Block};
use crate::error::Result;
use crate::key::{expand_key, RoundKeys};
use crate::params::{BlockSize, Params};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes, State,
};

fn encrypt_state(state: &mut State, round_keys: &RoundKeys) {
    let nr = round_keys.params().nr();

    add_round_key(state, round_keys, 0);
    for round in 1..nr {
        sub_bytes(state);
        shift_rows(state);
        mix_columns(state);
        add_round_key(state, round_keys, round);
    }

    sub_bytes(state);
    shift_rows(state);
    add_round_key(state, round_keys, nr);
}

fn decrypt_state(state: &mut State, round_keys: &RoundKeys) {
    let nr = round_keys.params().nr();

    add_round_key(state, round_keys, nr);
    for round in (1..nr).rev() {
        inv_shift_rows(state);
        inv_sub_bytes(state);
        add_round_key(state, round_keys, round);
        inv_mix_columns(state);
    }
    inv_shift_rows(state);
    inv_sub_bytes(state);
    add_round_key(state, round_keys, 0);
}

/// Encrypts `block` in place with pre-expanded round keys.
///
/// `block` must be exactly `4 * Nb` bytes for the schedule's block width.
pub fn encrypt_in_place(block: &mut [u8], round_keys: &RoundKeys) -> Result<()> {
    let size = round_keys.params().block_size();
    check_len(size, block.len())?;
    let mut state = State::load(size, block);
    encrypt_state(&mut state, round_keys);
    state.store(block);
    Ok(())
}

/// Decrypts `block` in place with pre-expanded round keys.
pub fn decrypt_in_place(block: &mut [u8], round_keys: &RoundKeys) -> Result<()> {
    let size = round_keys.params().block_size();
    check_len(size, block.len())?;
    let mut state = State::load(size, block);
    decrypt_state(&mut state, round_keys);
    state.store(block);
    Ok(())
}

/// Encrypts a single block with pre-expanded round keys.
pub fn encrypt_block(block: &[u8], round_keys: &RoundKeys) -> Result<Block> {
    let mut out = Block::from_slice(round_keys.params().block_size(), block)?;
    encrypt_in_place(out.as_bytes_mut(), round_keys)?;
    Ok(out)
}

/// Decrypts a single block with pre-expanded round keys.
pub fn decrypt_block(block: &[u8], round_keys: &RoundKeys) -> Result<Block> {
    let mut out = Block::from_slice(round_keys.params().block_size(), block)?;
    decrypt_in_place(out.as_bytes_mut(), round_keys)?;
    Ok(out)
}

/// Rijndael cipher context: validated parameters plus their key schedule.
///
/// The schedule is expanded once in [`Rijndael::new`] and never mutated, so a
/// context can be shared by reference between threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rijndael {
    round_keys: RoundKeys,
}

impl Rijndael {
    /// Builds a context from a 16/24/32-byte key and a 128/192/256-bit block width.
    pub fn new(key: &[u8], block_bits: usize) -> Result<Self> {
        let params = Params::new(key.len(), block_bits)?;
        let round_keys = expand_key(key, params)?;
        debug!("initialized {}", params);
        Ok(Self { round_keys })
    }

    /// Parameters fixed at construction.
    pub fn params(&self) -> Params {
        self.round_keys.params()
    }

    /// Block width of this context.
    pub fn block_size(&self) -> BlockSize {
        self.params().block_size()
    }

    /// Block length in bytes (`4 * Nb`).
    pub fn block_len(&self) -> usize {
        self.block_size().bytes()
    }

    /// Expanded key schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts one block, returning the ciphertext.
    pub fn encrypt_block(&self, block: &[u8]) -> Result<Block> {
        encrypt_block(block, &self.round_keys)
    }

    /// Decrypts one block, returning the plaintext.
    pub fn decrypt_block(&self, block: &[u8]) -> Result<Block> {
        decrypt_block(block, &self.round_keys)
    }

    /// Encrypts one block in place.
    pub fn encrypt_in_place(&self, block: &mut [u8]) -> Result<()> {
        encrypt_in_place(block, &self.round_keys)
    }

    /// Decrypts one block in place.
    pub fn decrypt_in_place(&self, block: &mut [u8]) -> Result<()> {
        decrypt_in_place(block, &self.round_keys)
    }
}
