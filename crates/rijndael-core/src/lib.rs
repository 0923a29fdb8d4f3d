//! Rijndael block cipher core.
//!
//! This crate follows FIPS-197 for the 128-bit block and generalizes the same
//! round structure to 192- and 256-bit blocks. It provides:
//! - Parameter validation for 128/192/256-bit keys and blocks.
//! - Key schedule expansion.
//! - Single-block encryption and decryption, owned or in place.
//!
//! Chaining modes, padding and side-channel hardening are left to callers;
//! table lookups here are not constant-time.
//!
//! ```
//! use rijndael_core::Rijndael;
//!
//! let key: Vec<u8> = (0u8..16).collect();
//! let cipher = Rijndael::new(&key, 128)?;
//! let plain = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
//!              0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
//! let ct = cipher.encrypt_block(&plain)?;
//! assert_eq!(ct[0], 0x69);
//! assert_eq!(cipher.decrypt_block(&ct)?.as_bytes(), &plain[..]);
//! # Ok::<(), rijndael_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod gf;
mod key;
mod params;
mod round;
mod sbox;

pub use crate::block::Block;
pub use crate::cipher::{
    decrypt_block, decrypt_in_place, encrypt_block, encrypt_in_place, Rijndael,
};
pub use crate::error::{Error, Result};
pub use crate::gf::{gf_mul, round_constant, xtime};
pub use crate::key::{expand_key, RoundKeys, Word};
pub use crate::params::{BlockSize, KeySize, Params, MAX_BLOCK_BYTES, MAX_SCHEDULE_WORDS};
pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, SBOX};
