//! Process-wide, lazily-built tables translating between a permutation's
//! image array and its sign-alternating S_N index (spec.md §3: even
//! permutations occupy even indices, odd permutations occupy odd indices).
//!
//! One table is built per monomorphization of `N`, the first time it is
//! needed, and cached for the lifetime of the process — mirroring the
//! `precompute<n>()` once-per-n memoization the original engine performs
//! under a mutex, but expressed as an idiomatic `OnceLock`.

use std::sync::OnceLock;

use crate::perm::Perm;

/// `n!` for `n <= 20` (fits in a `u64`; `20! ≈ 2.4×10^18`).
pub(crate) fn factorial(n: u64) -> u64 {
    (1..=n.max(1)).product()
}

struct SnTable {
    /// `by_index[i]` is the lexicographic rank of the permutation that our
    /// sign-alternating index `i` refers to.
    by_index: Vec<u64>,
    /// Inverse of `by_index`: lexicographic rank -> sign-alternating index.
    index_of_rank: Vec<u64>,
}

impl SnTable {
    fn build<const N: usize>() -> SnTable {
        let n_fact = factorial(N as u64);
        let mut by_index = vec![0u64; n_fact as usize];
        let mut index_of_rank = vec![0u64; n_fact as usize];

        let mut even_count = 0u64;
        let mut odd_count = 0u64;
        for rank in 0..n_fact {
            let p = Perm::<N>::from_lex_rank(rank);
            let index = if p.sign() == 1 {
                let i = 2 * even_count;
                even_count += 1;
                i
            } else {
                let i = 2 * odd_count + 1;
                odd_count += 1;
                i
            };
            by_index[index as usize] = rank;
            index_of_rank[rank as usize] = index;
        }

        log::debug!(
            "built S_{N} index table: {even_count} even, {odd_count} odd permutations"
        );

        SnTable {
            by_index,
            index_of_rank,
        }
    }
}

/// Generic functions cannot share a single `static` across monomorphizations,
/// so each `N` gets its own lazily-initialised cell via this helper, called
/// from a `static` declared locally inside a generic function — the pattern
/// spec.md §9 asks for in place of the original's mutex-guarded globals.
macro_rules! table_for {
    ($n:expr) => {{
        static TABLE: OnceLock<SnTable> = OnceLock::new();
        TABLE.get_or_init(SnTable::build::<$n>)
    }};
}

fn table<const N: usize>() -> &'static SnTable {
    // `N` is a const generic, so this match turns into one lazily-built
    // table per distinct permutation size actually instantiated.
    match N {
        0 => table_for!(0),
        1 => table_for!(1),
        2 => table_for!(2),
        3 => table_for!(3),
        4 => table_for!(4),
        5 => table_for!(5),
        6 => table_for!(6),
        7 => table_for!(7),
        8 => table_for!(8),
        9 => table_for!(9),
        10 => table_for!(10),
        11 => table_for!(11),
        12 => table_for!(12),
        13 => table_for!(13),
        14 => table_for!(14),
        15 => table_for!(15),
        16 => table_for!(16),
        other => panic!("perm_kernel only supports n in 0..=16, got {other}"),
    }
}

pub(crate) fn index_of<const N: usize>(p: &Perm<N>) -> u64 {
    table::<N>().index_of_rank[p.lex_rank() as usize]
}

pub(crate) fn perm_at<const N: usize>(index: u64) -> Perm<N> {
    let t = table::<N>();
    let rank = t.by_index[index as usize];
    Perm::from_lex_rank(rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_values() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(5), 120);
    }

    #[test]
    fn every_index_used_exactly_once() {
        let t = table::<5>();
        let mut seen = vec![false; 120];
        for &rank in &t.by_index {
            assert!(!seen[rank as usize]);
            seen[rank as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
