//! GF(2^8) arithmetic with reduction polynomial `x^8 + x^4 + x^3 + x + 1`.

const REDUCTION: u8 = 0x1b;

/// Multiplies by `x` (0x02).
#[inline]
pub fn xtime(byte: u8) -> u8 {
    let carry = byte >> 7;
    (byte << 1) ^ (carry * REDUCTION)
}

/// Product of two field elements: XOR of `a * x^k` over the set bits `k` of `b`.
pub fn gf_mul(a: u8, b: u8) -> u8 {
    let mut acc = 0u8;
    let mut power = a;
    for bit in 0..8 {
        if (b >> bit) & 1 == 1 {
            acc ^= power;
        }
        power = xtime(power);
    }
    acc
}

/// Multiplies a column by the circulant matrix whose first row is `row`.
///
/// Output byte `i` is `XOR_j row[(i + 4 - j) % 4] * column[j]`, so
/// `row = [2, 1, 1, 3]` yields the MixColumns matrix with rows
/// `2 3 1 1 / 1 2 3 1 / 1 1 2 3 / 3 1 1 2`.
pub fn mul_column(row: &[u8; 4], column: &[u8; 4]) -> [u8; 4] {
    let mut out = [0u8; 4];
    for (i, byte) in out.iter_mut().enumerate() {
        for (j, &c) in column.iter().enumerate() {
            *byte ^= gf_mul(row[(i + 4 - j) % 4], c);
        }
    }
    out
}

/// Round constant `Rcon(i)` for `i >= 1`: `x^(i-1)` in the field.
pub fn round_constant(i: usize) -> u8 {
    debug_assert!(i >= 1, "round constants start at index 1");
    let mut rcon = 0x01;
    for _ in 1..i {
        rcon = xtime(rcon);
    }
    rcon
}
