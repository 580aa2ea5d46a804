//! Finite group presentations: generators, relations as words, and the
//! generator-reordering transform that the cover enumerator relies on to
//! fail fast during backtracking.

use std::collections::HashSet;

/// One syllable of a relation word: generator `g` raised to `exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    pub generator: u32,
    pub exponent: i64,
}

impl Term {
    #[must_use]
    pub fn new(generator: u32, exponent: i64) -> Term {
        Term {
            generator,
            exponent,
        }
    }
}

/// An ordered word in the generators: a relation (implicitly `= 1`) or a
/// subexpression thereof. No on-the-fly simplification is assumed.
pub type Expression = Vec<Term>;

/// `⟨ g_0, ..., g_{k-1} | r_0, ..., r_{m-1} ⟩`.
#[derive(Debug, Clone)]
pub struct GroupPresentation {
    n_generators: u32,
    relations: Vec<Expression>,
}

impl GroupPresentation {
    /// Builds a presentation, dropping empty relators produced upstream
    /// (`covers.cpp`-derived code assumes every relation has at least one
    /// term by the time `minimax_generators` runs).
    #[must_use]
    pub fn new(n_generators: u32, relations: Vec<Expression>) -> GroupPresentation {
        let mut p = GroupPresentation {
            n_generators,
            relations,
        };
        p.remove_trivial_relators();
        p
    }

    fn remove_trivial_relators(&mut self) {
        let before = self.relations.len();
        self.relations.retain(|r| !r.is_empty());
        let dropped = before - self.relations.len();
        if dropped > 0 {
            log::debug!("dropped {dropped} trivial relator(s)");
        }
    }

    #[must_use]
    pub fn n_generators(&self) -> u32 {
        self.n_generators
    }

    #[must_use]
    pub fn relations(&self) -> &[Expression] {
        &self.relations
    }

    #[must_use]
    pub fn count_relations(&self) -> usize {
        self.relations.len()
    }

    /// Swaps two relations by index, used by [`GroupPresentation::minimax_generators`]
    /// to move the next-chosen relation into position.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.relations.swap(a, b);
    }

    /// Rotates relation `idx`'s terms one step to the left (the first term
    /// becomes the last).
    pub fn cycle_left(&mut self, idx: usize) {
        self.relations[idx].rotate_left(1);
    }

    #[must_use]
    pub fn terms_mut(&mut self, idx: usize) -> &mut Expression {
        &mut self.relations[idx]
    }

    /// The boolean incidence matrix: `incidence()[r][g]` is `true` iff
    /// generator `g` appears (with any exponent) in relation `r`.
    #[must_use]
    pub fn incidence(&self) -> Vec<Vec<bool>> {
        self.relations
            .iter()
            .map(|rel| {
                let mut row = vec![false; self.n_generators as usize];
                for term in rel {
                    row[term.generator as usize] = true;
                }
                row
            })
            .collect()
    }

    /// Applies an explicit old-generator -> new-generator relabeling to
    /// every term of every relation. `mapping[g]` is the new label for old
    /// generator `g`; it must be a bijection on `0..n_generators`.
    pub fn relabel_generators(&mut self, mapping: &[u32]) {
        debug_assert_eq!(mapping.len(), self.n_generators as usize);
        for rel in &mut self.relations {
            for term in rel.iter_mut() {
                term.generator = mapping[term.generator as usize];
            }
        }
    }

    /// Reorders relations (and relabels generators in the order they first
    /// appear) so that each relation, in its new position, introduces as
    /// few previously-unseen generators as possible, ties broken by
    /// shorter word length; the chosen relation is then cyclically rotated
    /// so its last term carries the highest generator label it uses.
    ///
    /// Returns the old-generator -> new-generator mapping applied.
    pub fn minimax_generators(&mut self) -> Vec<u32> {
        let r = self.relations.len();
        let g = self.n_generators as usize;
        let mut remap: Vec<Option<u32>> = vec![None; g];
        let mut next_label = 0u32;

        for pos in 0..r {
            let mut best_idx = pos;
            let mut best_unseen = usize::MAX;
            let mut best_len = usize::MAX;
            for idx in pos..r {
                let gens: HashSet<u32> = self.relations[idx].iter().map(|t| t.generator).collect();
                let unseen = gens
                    .iter()
                    .filter(|&&gen| remap[gen as usize].is_none())
                    .count();
                let len = self.relations[idx].len();
                if unseen < best_unseen || (unseen == best_unseen && len < best_len) {
                    best_unseen = unseen;
                    best_len = len;
                    best_idx = idx;
                }
            }
            self.relations.swap(pos, best_idx);

            // Assign labels by walking original generator index ascending,
            // not by the relation's term order: `covers.cpp::minimaxGenerators()`
            // keys the relabeling off generator index via the incidence row,
            // so a relation whose terms aren't already in ascending
            // generator order must still relabel ascending.
            let used: HashSet<u32> = self.relations[pos].iter().map(|t| t.generator).collect();
            for gen in 0..g as u32 {
                if used.contains(&gen) && remap[gen as usize].is_none() {
                    remap[gen as usize] = Some(next_label);
                    next_label += 1;
                }
            }

            for term in self.relations[pos].iter_mut() {
                term.generator = remap[term.generator as usize].unwrap();
            }

            let row = &mut self.relations[pos];
            if !row.is_empty() {
                let (max_idx, _) = row
                    .iter()
                    .enumerate()
                    .max_by_key(|(_, t)| t.generator)
                    .unwrap();
                row.rotate_left((max_idx + 1) % row.len());
            }
        }

        // Generators never mentioned in any relation still need a label.
        for (g_idx, slot) in remap.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(next_label);
                next_label += 1;
                debug_assert!(g_idx < g);
            }
        }

        remap.into_iter().map(|x| x.unwrap()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_trivial_relators() {
        let p = GroupPresentation::new(2, vec![vec![], vec![Term::new(0, 1)]]);
        assert_eq!(p.count_relations(), 1);
    }

    #[test]
    fn incidence_matrix_matches_terms() {
        let p = GroupPresentation::new(
            2,
            vec![vec![Term::new(0, 1), Term::new(1, -1)], vec![Term::new(0, 2)]],
        );
        let m = p.incidence();
        assert_eq!(m, vec![vec![true, true], vec![true, false]]);
    }

    #[test]
    fn minimax_orders_by_fewest_unseen_generators() {
        // r0 uses two generators (0,1); r1 uses only one (2). r1 should be
        // chosen first since it introduces fewer unseen generators.
        let mut p = GroupPresentation::new(
            3,
            vec![
                vec![Term::new(0, 1), Term::new(1, 1)],
                vec![Term::new(2, 1)],
            ],
        );
        p.minimax_generators();
        assert_eq!(p.relations()[0], vec![Term::new(0, 1)]);
    }

    #[test]
    fn minimax_relabels_by_ascending_generator_index_not_term_order() {
        // A single relation whose terms reference generator 1 before
        // generator 0: labels must still come out ascending by original
        // generator index (0 -> 0, 1 -> 1), not by first-appearance order
        // in the term list (which would give 1 -> 0, 0 -> 1).
        let mut p = GroupPresentation::new(2, vec![vec![Term::new(1, 1), Term::new(0, 1)]]);
        let mapping = p.minimax_generators();
        assert_eq!(mapping, vec![0, 1]);
    }

    #[test]
    fn minimax_rotates_highest_label_to_last_term() {
        let mut p = GroupPresentation::new(
            2,
            vec![vec![Term::new(1, 1), Term::new(0, 1)]],
        );
        p.minimax_generators();
        let rel = &p.relations()[0];
        assert_eq!(rel.last().unwrap().generator, rel.iter().map(|t| t.generator).max().unwrap());
    }

    #[test]
    fn cycle_left_rotates_terms() {
        let mut p = GroupPresentation::new(
            1,
            vec![vec![Term::new(0, 1), Term::new(0, 2), Term::new(0, 3)]],
        );
        p.cycle_left(0);
        assert_eq!(
            p.relations()[0],
            vec![Term::new(0, 2), Term::new(0, 3), Term::new(0, 1)]
        );
    }
}
