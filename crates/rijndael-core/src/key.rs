//! Key schedule: expansion of a cipher key into round keys.

use log::{debug, log_enabled, trace, Level};

use crate::error::{Error, Result};
use crate::gf::round_constant;
use crate::params::{Params, MAX_SCHEDULE_WORDS};
use crate::sbox::sbox;

/// One schedule word, kept as four bytes in key order.
pub type Word = [u8; 4];

/// Expanded round keys of one cipher context.
///
/// Holds `Nb * (Nr + 1)` words in a fixed-capacity buffer together with the
/// parameters they were derived for. Read-only once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys {
    words: [Word; MAX_SCHEDULE_WORDS],
    params: Params,
}

impl RoundKeys {
    /// Parameters the schedule was expanded for.
    pub const fn params(&self) -> Params {
        self.params
    }

    /// All schedule words, `Nb * (Nr + 1)` of them.
    pub fn words(&self) -> &[Word] {
        &self.words[..self.params.schedule_words()]
    }

    /// The `Nb` words XORed into the state in `round`.
    ///
    /// # Panics
    ///
    /// Panics if `round > Nr`.
    #[inline]
    pub fn round_key(&self, round: usize) -> &[Word] {
        let nb = self.params.nb();
        &self.words()[nb * round..nb * (round + 1)]
    }

    /// Flattens the schedule into its `4 * Nb * (Nr + 1)` byte form.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.words().iter().flatten().copied().collect()
    }
}

fn rot_word(word: Word) -> Word {
    let [b0, b1, b2, b3] = word;
    [b1, b2, b3, b0]
}

fn sub_word(word: Word) -> Word {
    word.map(sbox)
}

fn xor_word(a: Word, b: Word) -> Word {
    [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}

/// Expands `key` into the round keys for `params`.
///
/// The key must be exactly `4 * Nk` bytes.
pub fn expand_key(key: &[u8], params: Params) -> Result<RoundKeys> {
    let nk = params.nk();
    if key.len() != nk * 4 {
        return Err(Error::InvalidKeyLength { len: key.len() });
    }

    let total = params.schedule_words();
    let mut words = [[0u8; 4]; MAX_SCHEDULE_WORDS];
    for (word, chunk) in words.iter_mut().zip(key.chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    for i in nk..total {
        let mut temp = words[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp));
            temp[0] ^= round_constant(i / nk);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        words[i] = xor_word(words[i - nk], temp);
    }

    let round_keys = RoundKeys { words, params };
    debug!("expanded {} schedule words for {}", total, params);
    if log_enabled!(Level::Trace) {
        for round in 0..=params.nr() {
            trace!("round {:2}: {}", round, hex_words(round_keys.round_key(round)));
        }
    }
    Ok(round_keys)
}

fn hex_words(words: &[Word]) -> String {
    words
        .iter()
        .flatten()
        .map(|b| format!("{b:02x}"))
        .collect()
}
