//! Derives linear relations between the signs of generator representatives
//! from a presentation's relations, by reducing the relator-incidence
//! matrix over GF(2). Each relation contributes a constraint
//! `sign(rep[i]) = sign(rep[a_0]) * ... * sign(rep[a_j])` with
//! `a_0 < ... < a_j < i`; knowing this in advance for a generator lets the
//! cover enumerator start its search for that generator's representative
//! at the only parity that can possibly work, cutting the search roughly
//! in half per constrained generator.

use group_presentation::GroupPresentation;

pub struct SignScheme {
    /// `constraint[g]` is `Some(deps)` when the sign of generator `g` is
    /// pinned to the product of the signs of the generators in `deps`
    /// (each strictly less than `g`); `None` if unconstrained.
    constraint: Vec<Option<Vec<u32>>>,
}

impl SignScheme {
    #[must_use]
    pub fn new(g: &GroupPresentation) -> SignScheme {
        let n_gen = g.n_generators() as usize;
        if n_gen == 0 || g.count_relations() == 0 {
            return SignScheme {
                constraint: vec![None; n_gen],
            };
        }

        let rows = g.count_relations();
        let mut m = vec![vec![false; n_gen]; rows];
        for (row, rel) in g.relations().iter().enumerate() {
            for t in rel {
                if t.exponent % 2 != 0 {
                    m[row][t.generator as usize] ^= true;
                }
            }
        }

        // Row-reduce from the bottom-right corner: repeatedly pick the
        // rightmost unprocessed column with a nonzero entry among the
        // unprocessed rows, move that entry to the last unprocessed row,
        // and clear the rest of the column via row XOR.
        let mut pivot_row_for_col: Vec<Option<usize>> = vec![None; n_gen];
        let mut rows_remain = rows;
        let mut cols_remain = n_gen;

        while rows_remain > 0 && cols_remain > 0 {
            cols_remain -= 1;
            let col = cols_remain;

            let found_row = (0..rows_remain).find(|&row| m[row][col]);
            let Some(row) = found_row else {
                continue;
            };

            rows_remain -= 1;
            if row < rows_remain {
                m.swap(row, rows_remain);
            }

            for r in 0..m.len() {
                if r != rows_remain && m[r][col] {
                    for c in 0..n_gen {
                        if m[rows_remain][c] {
                            m[r][c] ^= true;
                        }
                    }
                }
            }

            pivot_row_for_col[col] = Some(rows_remain);
        }

        let mut constraint = vec![None; n_gen];
        for (col, pivot) in pivot_row_for_col.into_iter().enumerate() {
            if let Some(row) = pivot {
                let deps = (0..col).filter(|&i| m[row][i]).map(|i| i as u32).collect();
                constraint[col] = Some(deps);
            }
        }

        SignScheme { constraint }
    }

    /// The generators whose representative signs, multiplied together,
    /// must equal the sign of generator `generator`'s representative;
    /// `None` if generator `generator`'s sign is unconstrained.
    #[must_use]
    pub fn constraint(&self, generator: u32) -> Option<&[u32]> {
        self.constraint[generator as usize].as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use group_presentation::Term;

    #[test]
    fn no_relations_means_no_constraints() {
        let g = GroupPresentation::new(2, vec![]);
        let s = SignScheme::new(&g);
        assert!(s.constraint(0).is_none());
        assert!(s.constraint(1).is_none());
    }

    #[test]
    fn single_odd_generator_relation_pins_its_sign() {
        // a^2 = 1 forces sign(rep[a]) to a fixed parity (no dependencies,
        // since there is nothing before generator 0 to depend on).
        let g = GroupPresentation::new(1, vec![vec![Term::new(0, 2)]]);
        let s = SignScheme::new(&g);
        // exponent 2 is even, so this relation contributes nothing over GF(2).
        assert!(s.constraint(0).is_none());
    }

    #[test]
    fn relation_with_two_odd_generators_links_their_signs() {
        // a*b = 1 (both exponent 1, odd) ties sign(rep[1]) to sign(rep[0]).
        let g = GroupPresentation::new(2, vec![vec![Term::new(0, 1), Term::new(1, 1)]]);
        let s = SignScheme::new(&g);
        assert_eq!(s.constraint(1), Some(&[0u32][..]));
    }
}
