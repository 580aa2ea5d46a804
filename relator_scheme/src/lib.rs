//! Relator schemes: a precomputed decomposition of a group presentation's
//! relations into shared subexpressions, so the cover enumerator can check
//! relations incrementally as each generator's representative is chosen
//! rather than re-evaluating whole relation words from scratch.

mod sign_scheme;

pub use sign_scheme::SignScheme;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use group_presentation::{Expression, GroupPresentation, Term};
use perm_kernel::Perm;

/// A relation (`isRelation == true`) or a contiguous subexpression shared
/// between relations. Terms with `generator < n_generators` reference an
/// original generator; terms with `generator >= n_generators` reference an
/// earlier formula by its final index (offset by `n_generators`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub terms: Expression,
    pub is_relation: bool,
}

impl Formula {
    /// Replaces every non-overlapping contiguous occurrence of `inner`'s
    /// terms within `self`'s terms with a single reference to formula
    /// `index`. A no-op if `inner` is empty.
    fn try_replace(&mut self, inner: &Formula, index: u32) {
        if inner.terms.is_empty() {
            return;
        }
        let mut out = Vec::with_capacity(self.terms.len());
        let mut from = 0;
        while from < self.terms.len() {
            let end = from + inner.terms.len();
            if end <= self.terms.len() && self.terms[from..end] == inner.terms[..] {
                out.push(Term::new(index, 1));
                from = end;
            } else {
                out.push(self.terms[from]);
                from += 1;
            }
        }
        self.terms = out;
    }
}

/// Orders relations before subexpressions (so a failing relation is
/// detected as early as possible), then shorter formulae before longer
/// ones (so their values are available as substitutable subexpressions
/// of longer formulae), then lexicographically by terms.
impl PartialOrd for Formula {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Formula {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_relation, other.is_relation) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => self
                .terms
                .len()
                .cmp(&other.terms.len())
                .then_with(|| self.terms.cmp(&other.terms)),
        }
    }
}

/// The core-A work buffer: a precomputed set of formulae grouped by depth
/// (the highest original generator index each formula uses), plus the
/// current candidate representative and cached value for each.
pub struct RelatorScheme<const N: usize> {
    n_generators: u32,
    formulae: Vec<Formula>,
    /// `comp_count[d]..comp_count[d + 1]` indexes the formulae at depth `d`.
    comp_count: Vec<usize>,
    rep: Vec<u64>,
    computed: Vec<Perm<N>>,
}

impl<const N: usize> RelatorScheme<N> {
    /// Builds the scheme for a presentation already passed through
    /// [`group_presentation::GroupPresentation::minimax_generators`].
    #[must_use]
    pub fn new(g: &GroupPresentation) -> RelatorScheme<N> {
        let n_gen = g.n_generators();
        let mut n_seen: i64 = n_gen as i64;

        let mut cur_exp: Vec<Expression> = vec![Vec::new(); n_gen as usize];
        let mut found_exp: Vec<BTreeMap<Formula, i64>> =
            (0..n_gen).map(|_| BTreeMap::new()).collect();

        for rel in g.relations() {
            let mut depth = n_gen;
            let mut prev: u32 = 0;

            for t in rel {
                if t.generator < depth {
                    depth = t.generator;
                    cur_exp[depth as usize].push(Term::new(depth, t.exponent));
                } else {
                    while depth < t.generator {
                        let bucket = &mut cur_exp[depth as usize];
                        if bucket.len() == 1 && bucket[0].exponent == 1 {
                            prev = bucket[0].generator;
                            bucket.clear();
                        } else {
                            let terms = std::mem::take(bucket);
                            let formula = Formula {
                                terms,
                                is_relation: false,
                            };
                            let id = *found_exp[depth as usize].entry(formula).or_insert_with(|| {
                                let id = n_seen;
                                n_seen += 1;
                                id
                            });
                            prev = id as u32;
                        }
                        depth += 1;
                        cur_exp[depth as usize].push(Term::new(prev, 1));
                    }
                    cur_exp[depth as usize].push(Term::new(t.generator, t.exponent));
                }
            }

            let terms = std::mem::take(&mut cur_exp[depth as usize]);
            let formula = Formula {
                terms,
                is_relation: true,
            };
            found_exp[depth as usize]
                .entry(formula)
                .or_insert_with(|| {
                    let id = n_seen;
                    n_seen += 1;
                    id
                });
        }

        // Reindex: all depth-0 formulae first, then depth 1, and so on;
        // within a depth, the BTreeMap's order (relations first, then
        // shorter-terms-first, then lexicographic) is already the order
        // we want to assign final indices in.
        let mut reindex = vec![0u32; n_seen.max(0) as usize];
        let mut new_index = n_gen;
        for depth in 0..n_gen {
            for &temp_id in found_exp[depth as usize].values() {
                reindex[temp_id as usize] = new_index;
                new_index += 1;
            }
        }

        let mut formulae = Vec::new();
        for depth in 0..n_gen {
            for formula in found_exp[depth as usize].keys() {
                let terms = formula
                    .terms
                    .iter()
                    .map(|t| {
                        if t.generator < n_gen {
                            *t
                        } else {
                            Term::new(reindex[t.generator as usize], t.exponent)
                        }
                    })
                    .collect();
                formulae.push(Formula {
                    terms,
                    is_relation: formula.is_relation,
                });
            }
        }

        let mut comp_count = vec![0usize; n_gen as usize + 1];
        for depth in 0..n_gen {
            comp_count[depth as usize + 1] =
                comp_count[depth as usize] + found_exp[depth as usize].len();
        }

        // Second pass: try to express later (longer) formulae in terms of
        // earlier (shorter) ones, working from the longest formula down so
        // the largest substitutions are tried first.
        for outer in (0..formulae.len()).rev() {
            for inner in (0..outer).rev() {
                let inner_formula = formulae[inner].clone();
                formulae[outer].try_replace(&inner_formula, inner as u32 + n_gen);
            }
        }

        log::debug!(
            "relator scheme: {} generator(s), {} formula(e) across {} depths",
            n_gen,
            formulae.len(),
            n_gen
        );

        let computed_len = comp_count[n_gen as usize];
        RelatorScheme {
            n_generators: n_gen,
            formulae,
            comp_count,
            rep: vec![0; n_gen as usize],
            computed: vec![Perm::identity(); computed_len],
        }
    }

    #[must_use]
    pub fn n_generators(&self) -> u32 {
        self.n_generators
    }

    #[must_use]
    pub fn n_formulae(&self) -> usize {
        self.formulae.len()
    }

    #[must_use]
    pub fn rep(&self) -> &[u64] {
        &self.rep
    }

    pub fn set_rep(&mut self, generator: u32, index: u64) {
        self.rep[generator as usize] = index;
    }

    #[must_use]
    pub fn perm(&self, generator: u32) -> Perm<N> {
        Perm::from_index(self.rep[generator as usize])
    }

    fn compute_piece(&mut self, piece: usize) -> bool {
        let mut comb = Perm::<N>::identity();
        for t in &self.formulae[piece].terms {
            let gen_perm = if t.generator < self.n_generators {
                self.perm(t.generator)
            } else {
                self.computed[(t.generator - self.n_generators) as usize]
            };
            let factor = match t.exponent {
                1 => gen_perm,
                -1 => gen_perm.inverse(),
                e => gen_perm.power(e),
            };
            comb = factor.compose(&comb);
        }
        if self.formulae[piece].is_relation && !comb.is_identity() {
            false
        } else {
            self.computed[piece] = comb;
            true
        }
    }

    /// Computes every formula at `depth`, assuming `rep[0..=depth]` is set
    /// and formulae at lesser depths are already computed. Returns `false`
    /// (without writing any result for the offending formula) as soon as a
    /// relation formula evaluates to a non-identity permutation.
    pub fn compute_for(&mut self, depth: usize) -> bool {
        for i in self.comp_count[depth]..self.comp_count[depth + 1] {
            if !self.compute_piece(i) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use group_presentation::Term;

    #[test]
    fn free_generator_relation_detects_non_identity() {
        // <a | a> forces rep[a] = identity to satisfy the relation.
        let g = GroupPresentation::new(1, vec![vec![Term::new(0, 1)]]);
        let mut scheme = RelatorScheme::<3>::new(&g);
        scheme.set_rep(0, 1); // a non-identity permutation
        assert!(!scheme.compute_for(0));
        scheme.set_rep(0, 0); // identity
        assert!(scheme.compute_for(0));
    }

    #[test]
    fn shared_subexpression_is_deduplicated() {
        // Two relations sharing the prefix "a b" should produce fewer
        // formulae than if each relation were scanned independently.
        let g = GroupPresentation::new(
            3,
            vec![
                vec![Term::new(0, 1), Term::new(1, 1), Term::new(2, 1)],
                vec![Term::new(0, 1), Term::new(1, 1)],
            ],
        );
        let scheme = RelatorScheme::<4>::new(&g);
        assert!(scheme.n_formulae() >= 2);
    }
}
