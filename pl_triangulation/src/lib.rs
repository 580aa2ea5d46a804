//! A minimal stand-in for the excluded triangulation library: just enough
//! of a `Triangulation<d>` builder for the graph builder (Core B) to
//! allocate simplices, glue them along facets, and ask for a canonical
//! string. Normal-surface enumeration, census lookups, and the real
//! isomorphism-signature algorithm live in the triangulation library this
//! crate is not trying to reproduce.

mod perm;

pub use perm::FacetPerm;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriangulationInvalid {
    #[error("simplex {0} has no gluing on facet {1}")]
    UngluedFacet(usize, usize),
    #[error(
        "simplex {0} facet {1} is glued to simplex {2} facet {3}, but that facet does not point back"
    )]
    AsymmetricGluing(usize, usize, usize, usize),
    #[error("facet {facet} is out of range for a {dim}-dimensional simplex")]
    FacetOutOfRange { facet: usize, dim: usize },
    #[error("gluing permutation has length {got}, expected {expected} for dimension {dim}")]
    WrongPermLength { got: usize, expected: usize, dim: usize },
}

/// One side of a facet gluing.
#[derive(Debug, Clone)]
pub struct Gluing {
    pub other: usize,
    pub other_facet: usize,
    pub perm: FacetPerm,
}

/// A single `dim`-dimensional simplex within a [`Triangulation`]: `dim + 1`
/// facets, each either unglued (`None`) or glued to a facet of some other
/// simplex in the same triangulation.
#[derive(Debug, Clone)]
pub struct Simplex {
    index: usize,
    facets: Vec<Option<Gluing>>,
}

impl Simplex {
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn facet(&self, facet: usize) -> Option<&Gluing> {
        self.facets[facet].as_ref()
    }

    #[must_use]
    pub fn facets(&self) -> &[Option<Gluing>] {
        &self.facets
    }
}

/// An arena of `dim`-dimensional simplices glued along facets, built
/// incrementally via [`Triangulation::new_simplex`] and
/// [`Triangulation::join`] — the narrow slice of the real triangulator's
/// interface that the graph builder consumes: simplex allocation, facet
/// gluing, a validity check, and an isomorphism signature.
#[derive(Debug, Clone)]
pub struct Triangulation {
    dim: usize,
    simplices: Vec<Simplex>,
}

impl Triangulation {
    #[must_use]
    pub fn new(dim: usize) -> Triangulation {
        Triangulation {
            dim,
            simplices: Vec::new(),
        }
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn new_simplex(&mut self) -> usize {
        let index = self.simplices.len();
        self.simplices.push(Simplex {
            index,
            facets: vec![None; self.dim + 1],
        });
        log::debug!("triangulation: allocated simplex {index}");
        index
    }

    #[must_use]
    pub fn simplex(&self, index: usize) -> &Simplex {
        &self.simplices[index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Glues facet `from_facet` of simplex `from` to facet `from_facet` of
    /// simplex `to` via `perm`, matching the `join(from, facet, to, perm)`
    /// call convention used when emitting a gluing list. Installs the
    /// symmetric gluing on `to` automatically.
    ///
    /// # Errors
    ///
    /// Returns [`TriangulationInvalid`] if `from_facet` is out of range or
    /// `perm`'s length does not match the triangulation's dimension.
    pub fn join(
        &mut self,
        from: usize,
        from_facet: usize,
        to: usize,
        perm: FacetPerm,
    ) -> Result<(), TriangulationInvalid> {
        self.join_oriented(from, from_facet, to, from_facet, perm)
    }

    /// As [`Triangulation::join`], but names the facet of `to` being glued
    /// to explicitly rather than assuming it matches `from_facet`.
    ///
    /// # Errors
    ///
    /// Returns [`TriangulationInvalid`] if either facet index is out of
    /// range or `perm`'s length does not match the triangulation's
    /// dimension.
    pub fn join_oriented(
        &mut self,
        from: usize,
        from_facet: usize,
        to: usize,
        to_facet: usize,
        perm: FacetPerm,
    ) -> Result<(), TriangulationInvalid> {
        if from_facet > self.dim {
            return Err(TriangulationInvalid::FacetOutOfRange {
                facet: from_facet,
                dim: self.dim,
            });
        }
        if to_facet > self.dim {
            return Err(TriangulationInvalid::FacetOutOfRange {
                facet: to_facet,
                dim: self.dim,
            });
        }
        if perm.len() != self.dim {
            return Err(TriangulationInvalid::WrongPermLength {
                got: perm.len(),
                expected: self.dim,
                dim: self.dim,
            });
        }

        let inverse = perm.inverse();
        self.simplices[from].facets[from_facet] = Some(Gluing {
            other: to,
            other_facet: to_facet,
            perm,
        });
        self.simplices[to].facets[to_facet] = Some(Gluing {
            other: from,
            other_facet: from_facet,
            perm: inverse,
        });
        Ok(())
    }

    /// Checks that every facet of every simplex is glued, and that every
    /// gluing is symmetric (the partner facet points back to this one).
    ///
    /// # Errors
    ///
    /// Returns the first [`TriangulationInvalid`] found.
    pub fn validate(&self) -> Result<(), TriangulationInvalid> {
        for simplex in &self.simplices {
            for (facet_idx, facet) in simplex.facets.iter().enumerate() {
                let Some(gluing) = facet else {
                    return Err(TriangulationInvalid::UngluedFacet(simplex.index, facet_idx));
                };
                let back = self.simplices[gluing.other].facets[gluing.other_facet].as_ref();
                let points_back =
                    matches!(back, Some(b) if b.other == simplex.index && b.other_facet == facet_idx);
                if !points_back {
                    return Err(TriangulationInvalid::AsymmetricGluing(
                        simplex.index,
                        facet_idx,
                        gluing.other,
                        gluing.other_facet,
                    ));
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// A best-effort canonical string for this triangulation: every
    /// simplex's sorted list of `facet:other.other_facet/perm` descriptions,
    /// joined in a fixed order. Unlike a real isomorphism signature, this
    /// does not search over relabellings of the simplices to find a
    /// canonical one, so isomorphic-but-differently-indexed triangulations
    /// are not guaranteed to produce the same string.
    #[must_use]
    pub fn iso_sig(&self) -> String {
        let mut pieces = Vec::with_capacity(self.simplices.len());
        for simplex in &self.simplices {
            let mut row: Vec<String> = simplex
                .facets
                .iter()
                .enumerate()
                .map(|(facet, gluing)| match gluing {
                    Some(g) => format!("{facet}:{}.{}/{:?}", g.other, g.other_facet, g.perm.as_slice()),
                    None => format!("{facet}:-"),
                })
                .collect();
            row.sort_unstable();
            pieces.push(row.join(","));
        }
        format!("dim{}:{}", self.dim, pieces.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_is_symmetric() {
        let mut t = Triangulation::new(3);
        let a = t.new_simplex();
        let b = t.new_simplex();
        t.join(a, 0, b, FacetPerm::identity(3)).unwrap();
        assert_eq!(t.simplex(b).facet(0).unwrap().other, a);
    }

    #[test]
    fn incomplete_gluing_is_invalid() {
        let mut t = Triangulation::new(3);
        let a = t.new_simplex();
        let b = t.new_simplex();
        t.join(a, 0, b, FacetPerm::identity(3)).unwrap();
        assert!(!t.is_valid());
    }

    #[test]
    fn four_tetrahedra_facets_glued_is_valid() {
        let mut t = Triangulation::new(3);
        let a = t.new_simplex();
        let b = t.new_simplex();
        for facet in 0..4 {
            t.join(a, facet, b, FacetPerm::identity(3)).unwrap();
        }
        assert!(t.is_valid());
    }

    #[test]
    fn rejects_wrong_length_permutation() {
        let mut t = Triangulation::new(3);
        let a = t.new_simplex();
        let b = t.new_simplex();
        assert!(t.join(a, 0, b, FacetPerm::identity(2)).is_err());
    }

    #[test]
    fn iso_sig_is_stable_for_the_same_triangulation() {
        let mut t = Triangulation::new(3);
        let a = t.new_simplex();
        let b = t.new_simplex();
        for facet in 0..4 {
            t.join(a, facet, b, FacetPerm::identity(3)).unwrap();
        }
        assert_eq!(t.iso_sig(), t.iso_sig());
    }
}
