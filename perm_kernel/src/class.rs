//! S_N conjugacy classes and their centralisers.
//!
//! A conjugacy class of `S_N` is uniquely identified by a cycle type (a
//! partition of `N`); see [`crate::partition`]. Each class's canonical
//! representative is built directly from the partition rather than found
//! by search, and each class's centraliser is built combinatorially from
//! the representative's cycle structure rather than by scanning `S_N`.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::partition::partitions_of;
use crate::perm::Perm;

/// The centraliser of a permutation within `S_N`.
///
/// The identity's centraliser is all of `S_N`, which is never materialised
/// as an explicit list (it can be as large as `N!`); every other class's
/// centraliser is built out explicitly, since the largest non-identity
/// centraliser for `N <= 11` is well under a million elements.
#[derive(Debug, Clone)]
pub enum Centraliser<const N: usize> {
    Whole,
    Explicit(Vec<Perm<N>>),
}

impl<const N: usize> Centraliser<N> {
    #[must_use]
    pub fn size(&self) -> u64 {
        match self {
            Centraliser::Whole => crate::table::factorial(N as u64),
            Centraliser::Explicit(v) => v.len() as u64,
        }
    }

    /// `None` for [`Centraliser::Whole`]: its elements are never listed.
    #[must_use]
    pub fn elements(&self) -> Option<&[Perm<N>]> {
        match self {
            Centraliser::Whole => None,
            Centraliser::Explicit(v) => Some(v),
        }
    }
}

/// A single conjugacy class of `S_N`, identified by cycle type.
#[derive(Debug, Clone)]
pub struct PermClass<const N: usize> {
    pub cycle_type: Vec<u8>,
    pub representative: Perm<N>,
    pub centraliser: Centraliser<N>,
}

impl<const N: usize> PermClass<N> {
    /// The conjugacy class that `p` belongs to.
    #[must_use]
    pub fn of(p: &Perm<N>) -> PermClass<N> {
        Self::from_cycle_type(p.cycle_type())
    }

    /// The class for a given cycle type (a partition of `N`).
    #[must_use]
    pub fn from_cycle_type(cycle_type: Vec<u8>) -> PermClass<N> {
        let representative = minimal_representative(&cycle_type);
        let centraliser = if representative.is_identity() {
            Centraliser::Whole
        } else {
            Centraliser::Explicit(centraliser_elements(&representative))
        };
        PermClass {
            cycle_type,
            representative,
            centraliser,
        }
    }

    /// Every conjugacy class of `S_N`, ordered by increasing representative
    /// index. Not cached: the expensive shared state is the S_N index table
    /// in [`crate::table`], which this walk reuses; a full centraliser build
    /// per class is cheap enough (bounded well under a million elements for
    /// `N <= 11`) to redo on demand rather than hold a second process-wide
    /// cache keyed by `N`.
    #[must_use]
    pub fn all() -> Vec<PermClass<N>> {
        let mut classes: Vec<PermClass<N>> = partitions_of(N as u8)
            .into_iter()
            .map(PermClass::from_cycle_type)
            .collect();
        classes.sort_by_key(|c| c.representative.index());
        classes
    }

    /// `true` iff `p` is the canonical minimal representative of its class.
    #[must_use]
    pub fn is_conjugacy_minimal(p: &Perm<N>) -> bool {
        minimal_representative::<N>(&p.cycle_type()).index() == p.index()
    }
}

/// The lexicographically-minimal permutation with the given cycle type:
/// sort the parts ascending, then lay them out as contiguous forward-rotated
/// blocks of increasing labels. Smaller parts (which fix more of the small
/// labels in place) sort earlier than having a single long cycle swallow
/// the small labels, and within a block forward rotation is the
/// lexicographically smallest non-identity cyclic arrangement.
fn minimal_representative<const N: usize>(cycle_type: &[u8]) -> Perm<N> {
    let mut parts = cycle_type.to_vec();
    parts.sort_unstable();

    let mut images = [0u8; N];
    let mut next_label = 0u8;
    for len in parts {
        let start = next_label;
        for j in 0..len {
            let cur = start + j;
            let nxt = if j + 1 == len { start } else { start + j + 1 };
            images[cur as usize] = nxt;
        }
        next_label += len;
    }
    Perm::from_images(images)
}

/// Groups the cycles of `p` (including fixed points, as length-1 cycles)
/// by length.
fn cycle_groups<const N: usize>(p: &Perm<N>) -> BTreeMap<u8, Vec<Vec<usize>>> {
    let images = p.images();
    let mut visited = [false; N];
    let mut groups: BTreeMap<u8, Vec<Vec<usize>>> = BTreeMap::new();
    for start in 0..N {
        if visited[start] {
            continue;
        }
        let mut cycle = vec![start];
        visited[start] = true;
        let mut cur = images[start] as usize;
        while cur != start {
            visited[cur] = true;
            cycle.push(cur);
            cur = images[cur] as usize;
        }
        groups.entry(cycle.len() as u8).or_default().push(cycle);
    }
    groups
}

/// The elements of the centraliser of `p`: independently, for each group of
/// same-length cycles, every way to permute the cycles among themselves
/// combined with every way to rotate each cycle, then combined across
/// groups (which act on disjoint labels).
fn centraliser_elements<const N: usize>(p: &Perm<N>) -> Vec<Perm<N>> {
    let groups = cycle_groups(p);

    let per_group_variants: Vec<Vec<Vec<(usize, u8)>>> = groups
        .into_iter()
        .map(|(len, cycles)| {
            let m = cycles.len();
            (0..m)
                .permutations(m)
                .flat_map(|cycle_perm| {
                    let cycles = cycles.clone();
                    (0..m)
                        .map(|_| (0..len as usize).collect::<Vec<_>>())
                        .multi_cartesian_product()
                        .map(move |offsets| {
                            let mut entries = Vec::with_capacity(m * len as usize);
                            for (i, cycle) in cycles.iter().enumerate() {
                                let target = &cycles[cycle_perm[i]];
                                for (j, &label) in cycle.iter().enumerate() {
                                    let dest = target[(j + offsets[i]) % len as usize];
                                    entries.push((label, dest as u8));
                                }
                            }
                            entries
                        })
                        .collect::<Vec<_>>()
                })
                .collect()
        })
        .collect();

    per_group_variants
        .into_iter()
        .multi_cartesian_product()
        .map(|combo| {
            let mut images = [0u8; N];
            for entries in combo {
                for (label, dest) in entries {
                    images[label] = dest;
                }
            }
            Perm::from_images(images)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_partition_all_of_sn() {
        let classes = PermClass::<5>::all();
        assert!(classes.iter().all(|c| c.centraliser.size() > 0));
        // orbit-stabiliser: sum of |S_5| / |centraliser| over classes is |S_5|.
        let orbit_sizes: u64 = classes.iter().map(|c| 120 / c.centraliser.size()).sum();
        assert_eq!(orbit_sizes, 120);
    }

    #[test]
    fn identity_class_is_whole_group() {
        let classes = PermClass::<4>::all();
        let identity_class = classes
            .iter()
            .find(|c| c.representative.is_identity())
            .unwrap();
        assert!(matches!(identity_class.centraliser, Centraliser::Whole));
        assert_eq!(identity_class.centraliser.size(), 24);
    }

    #[test]
    fn minimal_representative_is_conjugacy_minimal() {
        for class in PermClass::<6>::all() {
            assert!(PermClass::<6>::is_conjugacy_minimal(&class.representative));
        }
    }

    #[test]
    fn non_minimal_conjugate_is_rejected() {
        // A 3-cycle not in minimal form: (1 2 3) fixing 0 is not minimal
        // because (0 1 2) fixing 3 has the same cycle type and smaller index.
        let p = Perm::<4>::from_images([0, 2, 3, 1]);
        assert!(!PermClass::<4>::is_conjugacy_minimal(&p));
    }

    #[test]
    fn centraliser_size_matches_formula() {
        // Cycle type (2,2) in S_4: centraliser size = 2^2 * 2! = 8.
        let p = Perm::<4>::from_images([1, 0, 3, 2]);
        let class = PermClass::of(&p);
        assert_eq!(class.cycle_type, vec![2, 2]);
        assert_eq!(class.centraliser.size(), 8);
    }
}
