//! Bit manipulation on amplitude indices.
//!
//! Bit `q` of an amplitude index is qubit `q`'s basis value, with qubit 0 in
//! the least-significant position.
//!
//! For a two-target gate on `[t1, t2]` the local 2-qubit index used to select
//! matrix rows and columns is `2 * bit(t2) + bit(t1)`: the *second* listed
//! target is the high bit, regardless of which register position is larger.
//! [`local_pair_index`] and [`scatter_pair`] are the only places that encode
//! this packing.

use crate::error::{SimError, SimResult};

/// Value of bit `pos` of `index` (0 or 1).
#[inline]
pub fn bit(index: usize, pos: usize) -> usize {
    (index >> pos) & 1
}

/// `index` with bit `pos` forced to `value`, other bits unchanged.
#[inline]
pub fn replace_bit(index: usize, pos: usize, value: bool) -> usize {
    if value {
        index | (1 << pos)
    } else {
        index & !(1 << pos)
    }
}

/// Apply several single-bit replacements in order.
///
/// `positions` and `values` must have the same length.
pub fn replace_bits(index: usize, positions: &[usize], values: &[bool]) -> SimResult<usize> {
    if positions.len() != values.len() {
        return Err(SimError::BitCountMismatch {
            positions: positions.len(),
            values: values.len(),
        });
    }
    Ok(positions
        .iter()
        .zip(values)
        .fold(index, |acc, (&pos, &value)| replace_bit(acc, pos, value)))
}

/// Local 2-qubit index (`0..4`) of `index` for the target pair `[first, second]`.
#[inline]
pub fn local_pair_index(index: usize, first: usize, second: usize) -> usize {
    2 * bit(index, second) + bit(index, first)
}

/// `index` with the target pair `[first, second]` set to the bits of `local`.
///
/// Inverse of [`local_pair_index`] on those two positions.
#[inline]
pub fn scatter_pair(index: usize, first: usize, second: usize, local: usize) -> usize {
    let index = replace_bit(index, first, local & 1 == 1);
    replace_bit(index, second, local & 2 == 2)
}
