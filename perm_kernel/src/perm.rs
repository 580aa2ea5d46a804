use std::fmt;

/// A permutation of `{0, ..., N-1}`, stored as an image-pack array.
///
/// `compose`, `inverse`, `power` and `sign` operate directly on the image
/// array and cost O(N) regardless of N. Converting to or from an "S_n
/// index" additionally touches the lazily-built, process-wide table from
/// [`crate::table`] and is only fast once that table exists.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Perm<const N: usize> {
    images: [u8; N],
}

impl<const N: usize> fmt::Debug for Perm<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Perm{:?}", self.images)
    }
}

impl<const N: usize> Default for Perm<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> Perm<N> {
    /// Build a permutation directly from an image array.
    ///
    /// # Panics
    ///
    /// Panics if `images` is not a bijection on `0..N`.
    #[must_use]
    pub fn from_images(images: [u8; N]) -> Self {
        let mut seen = [false; N];
        for &v in &images {
            assert!((v as usize) < N, "image out of range");
            assert!(!seen[v as usize], "not a bijection");
            seen[v as usize] = true;
        }
        Perm { images }
    }

    #[must_use]
    pub fn identity() -> Self {
        let mut images = [0u8; N];
        for (i, slot) in images.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Perm { images }
    }

    #[must_use]
    pub fn images(&self) -> &[u8; N] {
        &self.images
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.images.iter().enumerate().all(|(i, &v)| i as u8 == v)
    }

    /// `self.apply(x)` is where `x` is sent to.
    #[must_use]
    pub fn apply(&self, x: usize) -> usize {
        self.images[x] as usize
    }

    /// `(p.compose(q))[x] == p[q[x]]`, matching the convention in spec.md §3.
    #[must_use]
    pub fn compose(&self, other: &Perm<N>) -> Perm<N> {
        let mut images = [0u8; N];
        for i in 0..N {
            images[i] = self.images[other.images[i] as usize];
        }
        Perm { images }
    }

    #[must_use]
    pub fn inverse(&self) -> Perm<N> {
        let mut images = [0u8; N];
        for (i, &v) in self.images.iter().enumerate() {
            images[v as usize] = i as u8;
        }
        Perm { images }
    }

    /// `self` raised to an integer power, with fast paths for `1` and `-1`.
    #[must_use]
    pub fn power(&self, exponent: i64) -> Perm<N> {
        match exponent {
            0 => Perm::identity(),
            1 => *self,
            -1 => self.inverse(),
            e if e > 0 => {
                let mut result = Perm::identity();
                let mut base = *self;
                let mut e = e as u64;
                while e > 0 {
                    if e & 1 == 1 {
                        result = result.compose(&base);
                    }
                    base = base.compose(&base);
                    e >>= 1;
                }
                result
            }
            e => self.inverse().power(-e),
        }
    }

    /// `+1` for even permutations, `-1` for odd.
    #[must_use]
    pub fn sign(&self) -> i8 {
        if self.inversion_parity() { -1 } else { 1 }
    }

    /// `true` iff the permutation is odd.
    fn inversion_parity(&self) -> bool {
        let mut visited = [false; N];
        let mut odd = false;
        for start in 0..N {
            if visited[start] {
                continue;
            }
            let mut len = 0;
            let mut cur = start;
            while !visited[cur] {
                visited[cur] = true;
                cur = self.images[cur] as usize;
                len += 1;
            }
            // A cycle of length `len` contributes `len - 1` transpositions.
            if (len - 1) % 2 == 1 {
                odd = !odd;
            }
        }
        odd
    }

    /// The cycle decomposition, omitting fixed points.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = [false; N];
        let mut cycles = Vec::new();
        for start in 0..N {
            if visited[start] {
                continue;
            }
            let mut cycle = vec![start];
            visited[start] = true;
            let mut cur = self.images[start] as usize;
            while cur != start {
                visited[cur] = true;
                cycle.push(cur);
                cur = self.images[cur] as usize;
            }
            if cycle.len() > 1 {
                cycles.push(cycle);
            }
        }
        cycles
    }

    /// The cycle type of the permutation: cycle lengths (including fixed
    /// points as length-1 cycles), sorted ascending. This is exactly the
    /// S_N-conjugacy-class invariant.
    #[must_use]
    pub fn cycle_type(&self) -> Vec<u8> {
        let mut visited = [false; N];
        let mut lengths = Vec::new();
        for start in 0..N {
            if visited[start] {
                continue;
            }
            let mut len = 0u8;
            let mut cur = start;
            while !visited[cur] {
                visited[cur] = true;
                cur = self.images[cur] as usize;
                len += 1;
            }
            lengths.push(len);
        }
        lengths.sort_unstable();
        lengths
    }

    /// The standard lexicographic rank of this permutation's image array
    /// among all `N!` permutations (the Lehmer-code rank), not to be
    /// confused with [`Perm::index`].
    #[must_use]
    pub(crate) fn lex_rank(&self) -> u64 {
        let mut rank = 0u64;
        let mut fact = crate::table::factorial((N.max(1) - 1) as u64);
        for i in 0..N {
            let smaller = self.images[i + 1..]
                .iter()
                .filter(|&&v| v < self.images[i])
                .count() as u64;
            rank += smaller * fact;
            if i + 1 < N {
                fact /= (N - 1 - i) as u64;
            }
        }
        rank
    }

    pub(crate) fn from_lex_rank(mut rank: u64) -> Perm<N> {
        let mut avail: Vec<u8> = (0..N as u8).collect();
        let mut images = [0u8; N];
        let mut fact = crate::table::factorial((N.max(1) - 1) as u64);
        for i in 0..N {
            let idx = (rank / fact) as usize;
            rank %= fact;
            images[i] = avail.remove(idx);
            if i + 1 < N {
                fact /= (N - 1 - i) as u64;
            }
        }
        Perm { images }
    }

    /// The S_N-index of this permutation under the sign-alternating order:
    /// even permutations occupy even indices, odd permutations occupy odd
    /// indices (spec.md §3). Requires the process-wide S_N table, built on
    /// first use.
    #[must_use]
    pub fn index(&self) -> u64 {
        crate::table::index_of(self)
    }

    /// Inverse of [`Perm::index`]: the permutation at the given S_N-index.
    #[must_use]
    pub fn from_index(index: u64) -> Perm<N> {
        crate::table::perm_at(index)
    }
}

impl<const N: usize> PartialOrd for Perm<N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for Perm<N> {
    /// Ordered by S_N-index, matching spec.md §3's `perm.compose` /
    /// ordered-comparison contract.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_and_inverse() {
        let p = Perm::<4>::from_images([1, 2, 3, 0]);
        let inv = p.inverse();
        assert!(p.compose(&inv).is_identity());
        assert!(inv.compose(&p).is_identity());
    }

    #[test]
    fn sign_multiplicative() {
        let p = Perm::<4>::from_images([1, 0, 2, 3]); // one transposition: odd
        let q = Perm::<4>::from_images([0, 2, 1, 3]); // one transposition: odd
        assert_eq!(p.sign(), -1);
        assert_eq!(q.sign(), -1);
        assert_eq!(p.compose(&q).sign(), p.sign() * q.sign());
    }

    #[test]
    fn power_matches_repeated_compose() {
        let p = Perm::<5>::from_images([1, 2, 3, 4, 0]);
        let mut expected = Perm::<5>::identity();
        for _ in 0..4 {
            expected = expected.compose(&p);
        }
        assert_eq!(p.power(4), expected);
    }

    #[test]
    fn negative_power_is_inverse_power() {
        let p = Perm::<5>::from_images([1, 2, 3, 4, 0]);
        assert_eq!(p.power(-1), p.inverse());
        assert_eq!(p.power(-2), p.inverse().compose(&p.inverse()));
    }

    #[test]
    fn index_round_trip() {
        for r in 0..24u64 {
            let p = Perm::<4>::from_lex_rank(r % 24);
            let idx = p.index();
            assert_eq!(Perm::<4>::from_index(idx), p);
        }
    }

    #[test]
    fn index_parity_matches_sign() {
        for r in 0..120u64 {
            let p = Perm::<5>::from_lex_rank(r);
            let even = p.sign() == 1;
            assert_eq!(p.index() % 2 == 0, even);
        }
    }
}
