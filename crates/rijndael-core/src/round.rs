//! Round transformations over a 4×Nb state.

use crate::gf::mul_column;
use crate::key::RoundKeys;
use crate::params::{BlockSize, MAX_BLOCK_BYTES};
use crate::sbox::{inv_sbox, sbox};

const MIX_ROW: [u8; 4] = [0x02, 0x01, 0x01, 0x03];
const INV_MIX_ROW: [u8; 4] = [0x0e, 0x09, 0x0d, 0x0b];

/// Working grid of one block, stored row-major as `cells[nb * row + col]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct State {
    cells: [u8; MAX_BLOCK_BYTES],
    size: BlockSize,
}

impl State {
    /// Loads a block; byte `k` lands in row `k % 4`, column `k / 4`.
    ///
    /// `block` must already be `size.bytes()` long.
    pub(crate) fn load(size: BlockSize, block: &[u8]) -> Self {
        let nb = size.words();
        let mut cells = [0u8; MAX_BLOCK_BYTES];
        for (k, &byte) in block.iter().enumerate() {
            cells[nb * (k % 4) + k / 4] = byte;
        }
        Self { cells, size }
    }

    /// Writes the state back with the column-major layout used by `load`.
    pub(crate) fn store(&self, out: &mut [u8]) {
        let nb = self.nb();
        for (k, byte) in out.iter_mut().enumerate() {
            *byte = self.cells[nb * (k % 4) + k / 4];
        }
    }

    #[inline]
    fn nb(&self) -> usize {
        self.size.words()
    }

    #[inline]
    fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let nb = self.nb();
        &mut self.cells[nb * row..nb * (row + 1)]
    }

    fn column(&self, col: usize) -> [u8; 4] {
        let nb = self.nb();
        [
            self.cells[col],
            self.cells[nb + col],
            self.cells[2 * nb + col],
            self.cells[3 * nb + col],
        ]
    }

    fn set_column(&mut self, col: usize, column: [u8; 4]) {
        let nb = self.nb();
        for (row, byte) in column.into_iter().enumerate() {
            self.cells[nb * row + col] = byte;
        }
    }

    fn active_mut(&mut self) -> &mut [u8] {
        let len = self.size.bytes();
        &mut self.cells[..len]
    }
}

/// Applies SubBytes to the state in place.
#[inline]
pub(crate) fn sub_bytes(state: &mut State) {
    for byte in state.active_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub(crate) fn inv_sub_bytes(state: &mut State) {
    for byte in state.active_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// Rotates row `r` left by the block width's offset for that row.
pub(crate) fn shift_rows(state: &mut State) {
    let offsets = state.size.shift_offsets();
    for (row, &offset) in offsets.iter().enumerate().skip(1) {
        state.row_mut(row).rotate_left(offset);
    }
}

/// Inverse of [`shift_rows`]: rotates each row right.
pub(crate) fn inv_shift_rows(state: &mut State) {
    let offsets = state.size.shift_offsets();
    for (row, &offset) in offsets.iter().enumerate().skip(1) {
        state.row_mut(row).rotate_right(offset);
    }
}

fn mix_with(state: &mut State, row: &[u8; 4]) {
    for col in 0..state.nb() {
        let mixed = mul_column(row, &state.column(col));
        state.set_column(col, mixed);
    }
}

/// MixColumns over all `Nb` columns.
#[inline]
pub(crate) fn mix_columns(state: &mut State) {
    mix_with(state, &MIX_ROW);
}

/// Inverse MixColumns over all `Nb` columns.
#[inline]
pub(crate) fn inv_mix_columns(state: &mut State) {
    mix_with(state, &INV_MIX_ROW);
}

/// XORs the key of `round` into the state; word `col` covers column `col`.
#[inline]
pub(crate) fn add_round_key(state: &mut State, round_keys: &RoundKeys, round: usize) {
    let nb = state.nb();
    for (col, word) in round_keys.round_key(round).iter().enumerate() {
        for (row, &byte) in word.iter().enumerate() {
            state.cells[nb * row + col] ^= byte;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::expand_key;
    use crate::params::Params;

    fn counting_state(size: BlockSize) -> (Vec<u8>, State) {
        let block: Vec<u8> = (0..size.bytes() as u8).collect();
        let state = State::load(size, &block);
        (block, state)
    }

    fn stored(state: &State) -> Vec<u8> {
        let mut out = vec![0u8; state.size.bytes()];
        state.store(&mut out);
        out
    }

    #[test]
    fn load_is_column_major() {
        let (block, state) = counting_state(BlockSize::Bits192);
        // Row 1 holds bytes 1, 5, 9, ... of the block.
        assert_eq!(&state.cells[6..12], &[1, 5, 9, 13, 17, 21]);
        assert_eq!(stored(&state), block);
    }

    #[test]
    fn shift_rows_matches_aes_permutation() {
        let (_, mut state) = counting_state(BlockSize::Bits128);
        shift_rows(&mut state);
        assert_eq!(
            stored(&state),
            vec![0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]
        );
    }

    #[test]
    fn wide_block_rotates_last_row_by_four() {
        let (_, mut state) = counting_state(BlockSize::Bits256);
        shift_rows(&mut state);
        let nb = 8;
        let row3 = &state.cells[3 * nb..4 * nb];
        assert_eq!(row3, &[19, 23, 27, 31, 3, 7, 11, 15]);
        let row2 = &state.cells[2 * nb..3 * nb];
        assert_eq!(row2, &[10, 14, 18, 22, 26, 30, 2, 6]);
    }

    #[test]
    fn inverse_steps_undo_forward_steps() {
        for size in [BlockSize::Bits128, BlockSize::Bits192, BlockSize::Bits256] {
            let (block, mut state) = counting_state(size);
            shift_rows(&mut state);
            inv_shift_rows(&mut state);
            sub_bytes(&mut state);
            inv_sub_bytes(&mut state);
            mix_columns(&mut state);
            inv_mix_columns(&mut state);
            assert_eq!(stored(&state), block);
        }
    }

    #[test]
    fn mix_columns_known_answer() {
        let block = [
            0xdb, 0x13, 0x53, 0x45, 0xf2, 0x0a, 0x22, 0x5c, 0x01, 0x01, 0x01, 0x01, 0xc6, 0xc6,
            0xc6, 0xc6,
        ];
        let mut state = State::load(BlockSize::Bits128, &block);
        mix_columns(&mut state);
        assert_eq!(
            stored(&state),
            vec![
                0x8e, 0x4d, 0xa1, 0xbc, 0x9f, 0xdc, 0x58, 0x9d, 0x01, 0x01, 0x01, 0x01, 0xc6,
                0xc6, 0xc6, 0xc6
            ]
        );
    }

    #[test]
    fn add_round_key_twice_is_identity() {
        let key: Vec<u8> = (0u8..16).collect();
        let rks = expand_key(&key, Params::new(16, 256).unwrap()).unwrap();
        let (block, mut state) = counting_state(BlockSize::Bits256);
        add_round_key(&mut state, &rks, 0);
        // Round 0 of a 128-bit key is the key itself, spread over the first four columns.
        let mut expected = block.clone();
        for (b, k) in expected.iter_mut().zip(key.iter()) {
            *b ^= k;
        }
        assert_eq!(&stored(&state)[..16], &expected[..16]);
        add_round_key(&mut state, &rks, 0);
        assert_eq!(stored(&state), block);
    }
}
