//! Integer partitions of `n`, used as the invariant labelling S_n conjugacy
//! classes (a permutation's cycle type is a partition of `n`).

/// All partitions of `n` as ascending-sorted part lists, themselves sorted
/// so that `partitions_of(n)[0]` is `[1, 1, ..., 1]` (the identity's cycle
/// type) and the list order is reproducible across runs.
pub fn partitions_of(n: u8) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    build(n, n, &mut current, &mut out);
    out.sort();
    out
}

/// Recursive partition generator: fill `current` with parts no larger than
/// `max_part`, summing to `remaining`.
fn build(remaining: u8, max_part: u8, current: &mut Vec<u8>, out: &mut Vec<Vec<u8>>) {
    if remaining == 0 {
        let mut parts = current.clone();
        parts.sort_unstable();
        out.push(parts);
        return;
    }
    for part in 1..=max_part.min(remaining) {
        current.push(part);
        build(remaining - part, part, current, out);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_counts() {
        // p(n): standard partition-number sequence.
        assert_eq!(partitions_of(1).len(), 1);
        assert_eq!(partitions_of(2).len(), 2);
        assert_eq!(partitions_of(3).len(), 3);
        assert_eq!(partitions_of(4).len(), 5);
        assert_eq!(partitions_of(5).len(), 7);
        assert_eq!(partitions_of(6).len(), 11);
    }

    #[test]
    fn parts_sum_to_n() {
        for p in partitions_of(7) {
            assert_eq!(p.iter().map(|&x| x as u32).sum::<u32>(), 7);
        }
    }

    #[test]
    fn identity_partition_is_first() {
        let ps = partitions_of(4);
        assert_eq!(ps[0], vec![1, 1, 1, 1]);
    }
}
