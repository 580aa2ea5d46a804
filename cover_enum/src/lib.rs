//! Enumeration of finite-index subgroups of a finitely presented group by
//! backtracking search over transitive homomorphisms into `S_index`,
//! followed by Reidemeister-Schreier rewriting of the stabiliser of point 0
//! back into a presentation.
//!
//! The search assigns each generator a trial image in `S_index` one at a
//! time, checking partial relations as soon as every generator they mention
//! has an assigned image ([`relator_scheme::RelatorScheme::compute_for`]),
//! and pruning branches that are conjugate (by an automorphism of the
//! partial assignment built so far) to an already-visited branch. Only
//! fully-assigned, transitive, conjugacy-minimal homomorphisms are reported.

use group_presentation::{GroupPresentation, Term};
use perm_kernel::{Centraliser, Perm, PermClass};
use relator_scheme::{RelatorScheme, SignScheme};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cover index {0} is outside the supported range 2..=11")]
pub struct InvalidIndex(pub u8);

/// Calls `emit` once for every transitive degree-`index` cover of `g`'s
/// presentation, up to conjugacy in `S_index`, and returns how many there
/// were.
///
/// `index` must be in `2..=11`; `perm_kernel::Perm` only supports up to
/// `N = 16`, but the search's `S_index` automorphism bookkeeping was only
/// checked against the original engine's own tested range.
///
/// # Errors
///
/// Returns [`InvalidIndex`] if `index` is outside `2..=11`.
pub fn enumerate_covers(
    g: &GroupPresentation,
    index: u8,
    mut emit: impl FnMut(GroupPresentation),
) -> Result<usize, InvalidIndex> {
    match index {
        2 => Ok(enumerate_covers_n::<2>(g, &mut emit)),
        3 => Ok(enumerate_covers_n::<3>(g, &mut emit)),
        4 => Ok(enumerate_covers_n::<4>(g, &mut emit)),
        5 => Ok(enumerate_covers_n::<5>(g, &mut emit)),
        6 => Ok(enumerate_covers_n::<6>(g, &mut emit)),
        7 => Ok(enumerate_covers_n::<7>(g, &mut emit)),
        8 => Ok(enumerate_covers_n::<8>(g, &mut emit)),
        9 => Ok(enumerate_covers_n::<9>(g, &mut emit)),
        10 => Ok(enumerate_covers_n::<10>(g, &mut emit)),
        11 => Ok(enumerate_covers_n::<11>(g, &mut emit)),
        other => Err(InvalidIndex(other)),
    }
}

fn enumerate_covers_n<const N: usize>(
    base: &GroupPresentation,
    emit: &mut dyn FnMut(GroupPresentation),
) -> usize {
    let n_generators = base.n_generators() as usize;
    if n_generators == 0 {
        // The trivial group has no transitive degree-N cover for N > 1.
        return 0;
    }

    let mut g = base.clone();
    g.minimax_generators();

    let mut scheme = RelatorScheme::<N>::new(&g);
    let signs = SignScheme::new(&g);
    let classes = PermClass::<N>::all();
    let n_perms: u64 = (1..=N as u64).product();

    // aut[p] is the automorphism group of the partial assignment rep[0..=p]:
    // every permutation of {0, ..., N-1} fixing 0 that conjugates rep[i] to
    // itself (as a labelled assignment) for every i <= p. `Centraliser::Whole`
    // stands in for "all of S_index currently still applies", exactly as
    // `nAut[pos] == 0` does in the original engine.
    let mut aut: Vec<Centraliser<N>> = (0..n_generators).map(|_| Centraliser::Whole).collect();
    let mut n_found = 0usize;
    let mut pos = 0usize;

    loop {
        let mut ok = scheme.compute_for(pos);

        if ok {
            match check_conjugacy_minimal::<N>(&scheme, &classes, &aut, pos) {
                Some(new_aut) => aut[pos] = new_aut,
                None => ok = false,
            }
        }

        if ok {
            pos += 1;
            if pos == n_generators {
                if let Some(spanning_tree) = transitivity_test::<N>(&scheme, n_generators) {
                    let sub = rewrite_subgroup::<N>(&g, &scheme, n_generators, N, &spanning_tree);
                    n_found += 1;
                    log::debug!("found cover #{n_found}: {} generator(s)", sub.n_generators());
                    emit(sub);
                }
                pos -= 1;
                advance_or_backtrack::<N>(&mut scheme, &signs, &classes, &aut, &mut pos, n_perms);
            } else {
                apply_sign_constraint(&mut scheme, &signs, pos);
            }
        } else {
            advance_or_backtrack::<N>(&mut scheme, &signs, &classes, &aut, &mut pos, n_perms);
        }

        // `advance_or_backtrack` reports exhaustion by driving `pos` below 0,
        // which is not representable in `usize`; it signals this by leaving
        // `pos` at `usize::MAX` instead.
        if pos == usize::MAX {
            return n_found;
        }
    }
}

/// If generator `pos`'s assigned image is conjugacy-minimal given the
/// automorphism group established by generators `0..pos`, returns the
/// narrowed automorphism group to store at `aut[pos]` (the subgroup that
/// also fixes this new image); otherwise returns `None`.
fn check_conjugacy_minimal<const N: usize>(
    scheme: &RelatorScheme<N>,
    classes: &[PermClass<N>],
    aut: &[Centraliser<N>],
    pos: usize,
) -> Option<Centraliser<N>> {
    if N <= 2 {
        // S_2 is abelian: every element centralises every other, so every
        // assignment is trivially conjugacy-minimal.
        return Some(Centraliser::Whole);
    }

    let prev_whole = pos == 0 || matches!(aut[pos - 1], Centraliser::Whole);
    if prev_whole {
        let p = scheme.perm(pos as u32);
        if !PermClass::<N>::is_conjugacy_minimal(&p) {
            return None;
        }
        Some(if p.is_identity() {
            Centraliser::Whole
        } else {
            classes[class_position(classes, p.index())].centraliser.clone()
        })
    } else {
        let target = scheme.rep()[pos];
        let p = scheme.perm(pos as u32);
        let mut next_aut = Vec::new();
        for &a in aut[pos - 1]
            .elements()
            .expect("non-Whole centraliser always has explicit elements")
        {
            let conj = a.compose(&p).compose(&a.inverse());
            match conj.index().cmp(&target) {
                std::cmp::Ordering::Less => return None,
                std::cmp::Ordering::Equal => next_aut.push(a),
                std::cmp::Ordering::Greater => {}
            }
        }
        Some(Centraliser::Explicit(next_aut))
    }
}

/// The position of the class whose representative has S_N-index `rep_index`
/// within `classes` (sorted ascending by representative index).
fn class_position<const N: usize>(classes: &[PermClass<N>], rep_index: u64) -> usize {
    classes
        .binary_search_by_key(&rep_index, |c| c.representative.index())
        .expect("rep_index always names some class's representative")
}

/// If generator `pos`'s sign is pinned by earlier representatives, rounds
/// its index up to the one required parity.
fn apply_sign_constraint<const N: usize>(scheme: &mut RelatorScheme<N>, signs: &SignScheme, pos: usize) {
    if let Some(deps) = signs.constraint(pos as u32) {
        let mut need_odd = false;
        for &dep in deps {
            if scheme.rep()[dep as usize] % 2 == 1 {
                need_odd = !need_odd;
            }
        }
        if need_odd && scheme.rep()[pos] % 2 == 0 {
            scheme.set_rep(pos as u32, scheme.rep()[pos] + 1);
        }
    }
}

/// Moves generator `pos`'s representative to the next candidate, backtracking
/// to earlier generators as each one's candidates are exhausted. Leaves
/// `*pos` at `usize::MAX` once the whole search tree is exhausted.
fn advance_or_backtrack<const N: usize>(
    scheme: &mut RelatorScheme<N>,
    signs: &SignScheme,
    classes: &[PermClass<N>],
    aut: &[Centraliser<N>],
    pos: &mut usize,
    n_perms: u64,
) {
    loop {
        let class_jump = N > 2 && (*pos == 0 || matches!(aut[*pos - 1], Centraliser::Whole));
        let advanced = if class_jump {
            advance_by_class(scheme, signs, classes, *pos)
        } else {
            advance_by_one(scheme, signs, *pos, n_perms)
        };
        if advanced {
            return;
        }
        if *pos == 0 {
            *pos = usize::MAX;
            return;
        }
        scheme.set_rep((*pos) as u32, 0);
        *pos -= 1;
    }
}

/// Jumps generator `pos`'s representative forward to the next conjugacy
/// class's representative (skipping classes of the wrong parity if its sign
/// is constrained). Returns `false` if no class remains.
fn advance_by_class<const N: usize>(
    scheme: &mut RelatorScheme<N>,
    signs: &SignScheme,
    classes: &[PermClass<N>],
    pos: usize,
) -> bool {
    let cur = scheme.rep()[pos];
    let mut class_pos = class_position(classes, cur) + 1;

    if let Some(deps) = signs.constraint(pos as u32) {
        let mut need_odd = false;
        for &dep in deps {
            if scheme.rep()[dep as usize] % 2 == 1 {
                need_odd = !need_odd;
            }
        }
        while class_pos < classes.len()
            && (classes[class_pos].representative.index() % 2 == 1) != need_odd
        {
            class_pos += 1;
        }
    }

    if class_pos >= classes.len() {
        return false;
    }
    scheme.set_rep(pos as u32, classes[class_pos].representative.index());
    true
}

/// Advances generator `pos`'s representative by one index (or two, if its
/// sign is constrained and the next index has the wrong parity). Returns
/// `false` if the index range is exhausted.
fn advance_by_one<const N: usize>(
    scheme: &mut RelatorScheme<N>,
    signs: &SignScheme,
    pos: usize,
    n_perms: u64,
) -> bool {
    let mut next = scheme.rep()[pos] + 1;
    if let Some(deps) = signs.constraint(pos as u32) {
        let mut need_odd = false;
        for &dep in deps {
            if scheme.rep()[dep as usize] % 2 == 1 {
                need_odd = !need_odd;
            }
        }
        if (next % 2 == 1) != need_odd && next < n_perms {
            next += 1;
        }
    }
    if next >= n_perms {
        return false;
    }
    scheme.set_rep(pos as u32, next);
    true
}

/// Checks whether the generators' images act transitively on `{0, ..., N-1}`
/// by a breadth-first search from point 0, recording a spanning tree of
/// `(generator, sheet)` edges as `generator * N + sheet` in discovery order.
/// Returns `None` if some point is unreachable.
fn transitivity_test<const N: usize>(scheme: &RelatorScheme<N>, n_generators: usize) -> Option<Vec<u64>> {
    let mut seen = [false; N];
    seen[0] = true;
    let mut n_seen = 1usize;
    let mut frontier = vec![0usize];
    let mut spanning_tree = Vec::with_capacity(N.saturating_sub(1));

    while n_seen < N {
        let Some(from) = frontier.pop() else {
            return None;
        };
        for gen in 0..n_generators {
            let to = scheme.perm(gen as u32).apply(from);
            if !seen[to] {
                seen[to] = true;
                n_seen += 1;
                frontier.push(to);
                spanning_tree.push((gen as u64) * (N as u64) + from as u64);
            }
        }
    }
    Some(spanning_tree)
}

/// Reidemeister-Schreier rewriting: builds the presentation of the subgroup
/// corresponding to the stabiliser of sheet 0 under the assigned action,
/// given a spanning tree of the action's Schreier graph.
///
/// Subgroup generators are indexed `gen_index(gen, sheet) = gen * index +
/// sheet` for every `(gen, sheet)` pair except the ones used as spanning-tree
/// edges (those represent the identity in the subgroup and are dropped); the
/// remaining pairs are relabelled to a dense `0..sub_n_generators` range.
fn rewrite_subgroup<const N: usize>(
    g: &GroupPresentation,
    scheme: &RelatorScheme<N>,
    n_generators: usize,
    index: usize,
    spanning_tree: &[u64],
) -> GroupPresentation {
    let mut tree = spanning_tree.to_vec();
    tree.sort_unstable();

    let total = n_generators * index;
    let mut rewrite: Vec<Option<u32>> = vec![None; total];
    let mut tree_idx = 0;
    let mut next_label = 0u32;
    for i in 0..total {
        if tree_idx < tree.len() && tree[tree_idx] == i as u64 {
            tree_idx += 1;
        } else {
            rewrite[i] = Some(next_label);
            next_label += 1;
        }
    }

    let mut relations = Vec::new();
    for rel in g.relations() {
        for start_sheet in 0..index {
            let mut word = Vec::new();
            let mut sheet = start_sheet;
            for t in rel {
                let gen = t.generator as usize;
                if t.exponent > 0 {
                    for _ in 0..t.exponent {
                        if let Some(new_gen) = rewrite[gen * index + sheet] {
                            word.push(Term::new(new_gen, 1));
                        }
                        sheet = scheme.perm(t.generator).apply(sheet);
                    }
                } else {
                    for _ in 0..(-t.exponent) {
                        sheet = scheme.perm(t.generator).inverse().apply(sheet);
                        if let Some(new_gen) = rewrite[gen * index + sheet] {
                            word.push(Term::new(new_gen, -1));
                        }
                    }
                }
            }
            relations.push(word);
        }
    }

    GroupPresentation::new(next_label, relations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_index() {
        let g = GroupPresentation::new(1, vec![]);
        assert_eq!(enumerate_covers(&g, 1, |_| {}), Err(InvalidIndex(1)));
        assert_eq!(enumerate_covers(&g, 12, |_| {}), Err(InvalidIndex(12)));
    }

    #[test]
    fn trivial_group_has_no_covers() {
        let g = GroupPresentation::new(0, vec![]);
        let n = enumerate_covers(&g, 3, |_| {}).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn infinite_cyclic_group_has_exactly_one_cover_per_index() {
        // <a |> (no relations): every index has exactly one transitive
        // cover, namely Z itself (generated by one index-N cycle).
        let g = GroupPresentation::new(1, vec![]);
        for index in 2..=6u8 {
            let mut n = 0;
            enumerate_covers(&g, index, |_| n += 1).unwrap();
            assert_eq!(n, 1, "index {index}");
        }
    }
}
