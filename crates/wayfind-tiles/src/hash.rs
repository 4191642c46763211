//! Perfect hashing of permutations by Lehmer-code ranking.

use wayfind_core::traits::StateHash;

use crate::state::TileState;

/// `n!` for `n <= 20`; 21! overflows 64 bits.
const FACTORIALS: [u64; 21] = [
    1,
    1,
    2,
    6,
    24,
    120,
    720,
    5_040,
    40_320,
    362_880,
    3_628_800,
    39_916_800,
    479_001_600,
    6_227_020_800,
    87_178_291_200,
    1_307_674_368_000,
    20_922_789_888_000,
    355_687_428_096_000,
    6_402_373_705_728_000,
    121_645_100_408_832_000,
    2_432_902_008_176_640_000,
];

/// `n!` as a 64-bit value, saturating at `u64::MAX` for `n > 20`.
pub fn factorial_64(n: usize) -> u64 {
    if n > 20 {
        return u64::MAX;
    }
    FACTORIALS[n]
}

/// Ranks a permutation into `0..n!` via its Lehmer code: position `i`
/// contributes `(number of smaller values to its right) * (n - 1 - i)!`.
/// A perfect (injective, dense) hash for puzzles of up to 20 positions.
pub struct PermutationHash;

impl StateHash<TileState> for PermutationHash {
    fn state_hash(&self, state: &TileState) -> u64 {
        let perm = state.permutation();
        let mut hash_value = 0u64;
        for (i, &value) in perm.iter().enumerate() {
            let smaller_after = perm[i + 1..].iter().filter(|&&other| other < value).count();
            hash_value += smaller_after as u64 * factorial_64(perm.len() - 1 - i);
        }
        hash_value
    }
}
