//! Integration tests against hand-verifiable cover counts: a free group, an
//! infinite cyclic group, a finite cyclic group, a surface group, and a knot
//! group, each at index 2 (or parametrically at index n).

use cover_enum::enumerate_covers;
use group_presentation::{GroupPresentation, Term};

#[test]
fn free_group_on_two_generators_index_2_has_three_covers() {
    // <a, b |>: index-2 transitive homomorphisms into S_2 correspond to
    // surjections {a, b} -> S_2 (nontrivial on at least one generator,
    // transitive since S_2 acts transitively on 2 points as soon as either
    // generator maps to the transposition). There are exactly 3: (a,b) with
    // images in {(id, swap), (swap, id), (swap, swap)}.
    let g = GroupPresentation::new(2, vec![]);
    let mut count = 0;
    enumerate_covers(&g, 2, |_| count += 1).unwrap();
    assert_eq!(count, 3);
}

#[test]
fn infinite_cyclic_group_index_n_has_one_cover() {
    // <a |>: the unique transitive action of Z on n points is the one
    // n-cycle, up to conjugacy, regardless of n.
    let g = GroupPresentation::new(1, vec![]);
    for index in 2..=7u8 {
        let mut count = 0;
        enumerate_covers(&g, index, |_| count += 1).unwrap();
        assert_eq!(count, 1, "index {index}");
    }
}

#[test]
fn cyclic_group_of_order_6_index_2_has_one_cover_presented_as_a_cubed() {
    // <a | a^6>, index 2: a must map to an order-dividing-12 permutation in
    // S_2 whose 6th power is the identity and which acts transitively, so a
    // must map to the transposition. The stabiliser of a point has index 2
    // in Z/6, i.e. it is the subgroup of order 3, presented as <a | a^3>.
    let g = GroupPresentation::new(1, vec![vec![Term::new(0, 6)]]);
    let mut covers = Vec::new();
    enumerate_covers(&g, 2, |sub| covers.push(sub)).unwrap();
    assert_eq!(covers.len(), 1);
    assert_eq!(covers[0].n_generators(), 1);
    assert_eq!(covers[0].count_relations(), 1);
    assert_eq!(covers[0].relations()[0], vec![Term::new(0, 3)]);
}

#[test]
fn surface_group_index_2_has_three_covers() {
    // <a, b | a b a^-1 b^-1> (genus-1 surface group, i.e. Z^2): index-2
    // covers correspond to the 3 nonzero homomorphisms Z^2 -> Z/2.
    let g = GroupPresentation::new(
        2,
        vec![vec![
            Term::new(0, 1),
            Term::new(1, 1),
            Term::new(0, -1),
            Term::new(1, -1),
        ]],
    );
    let mut count = 0;
    enumerate_covers(&g, 2, |_| count += 1).unwrap();
    assert_eq!(count, 3);
}

#[test]
fn trefoil_knot_group_index_2_has_one_cover() {
    // <a, b | a b a = b a b>: the unique index-2 subgroup is the kernel of
    // the abelianisation map onto Z/2 (a, b both map to the nontrivial
    // transposition since the relation forces them to have equal image).
    let g = GroupPresentation::new(
        2,
        vec![vec![
            Term::new(0, 1),
            Term::new(1, 1),
            Term::new(0, 1),
            Term::new(1, -1),
            Term::new(0, -1),
            Term::new(1, -1),
        ]],
    );
    let mut count = 0;
    enumerate_covers(&g, 2, |_| count += 1).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn subgroup_rewrite_preserves_index_times_original_relation_count_as_an_upper_bound() {
    // Every relation of the base presentation contributes at most `index`
    // relations (one Schreier-reduced word per coset) to each subgroup.
    let g = GroupPresentation::new(
        2,
        vec![vec![
            Term::new(0, 1),
            Term::new(1, 1),
            Term::new(0, -1),
            Term::new(1, -1),
        ]],
    );
    let mut max_relations = 0;
    enumerate_covers(&g, 2, |sub| {
        max_relations = max_relations.max(sub.count_relations());
    })
    .unwrap();
    assert!(max_relations <= g.count_relations() * 2);
}
