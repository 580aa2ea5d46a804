//! A small variable-length permutation for facet gluings, distinct from
//! `perm_kernel::Perm<N>`: a facet's vertex count varies with the
//! triangulation's dimension, which is only known at runtime here, so this
//! type carries its length in a `Vec` rather than as a const generic.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetPerm(Vec<u8>);

impl FacetPerm {
    /// The identity permutation of `n` vertices.
    #[must_use]
    pub fn identity(n: usize) -> FacetPerm {
        FacetPerm((0..n as u8).collect())
    }

    /// Builds a permutation directly from an image array.
    ///
    /// # Panics
    ///
    /// Panics if `images` is not a bijection on `0..images.len()`.
    #[must_use]
    pub fn from_images(images: Vec<u8>) -> FacetPerm {
        let n = images.len();
        let mut seen = vec![false; n];
        for &v in &images {
            assert!((v as usize) < n, "image out of range");
            assert!(!seen[v as usize], "not a bijection");
            seen[v as usize] = true;
        }
        FacetPerm(images)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn apply(&self, x: usize) -> usize {
        self.0[x] as usize
    }

    #[must_use]
    pub fn inverse(&self) -> FacetPerm {
        let mut images = vec![0u8; self.0.len()];
        for (i, &v) in self.0.iter().enumerate() {
            images[v as usize] = i as u8;
        }
        FacetPerm(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips() {
        let p = FacetPerm::identity(4);
        assert_eq!(p.inverse(), p);
    }

    #[test]
    fn inverse_undoes_apply() {
        let p = FacetPerm::from_images(vec![2, 0, 1]);
        let inv = p.inverse();
        for x in 0..3 {
            assert_eq!(inv.apply(p.apply(x)), x);
        }
    }
}
