//! The six hard-wired crossing/curl subgraph templates. Each template is a
//! small fixed graph on nodes identified by `(id, strand)`; `strand` is 0 for
//! nodes internal to the crossing and 1..=4 for the dangling boundary nodes
//! that Phase 1 (PD-substitution) rewrites to the crossing's real PD labels
//! and Phase 2 (fuse) splices onto neighbouring crossings.
//!
//! The edge lists below are transcribed from the reference engine's literal
//! `posCross`/`negCross`/`posCurlA`/`posCurlB`/`negCurlA`/`negCurlB` gadget
//! definitions; the node ids and colours are load-bearing and not derivable
//! from the prose description of Phase 0 alone.

use crate::pd::CrossingKind;

/// A template edge: two `(id, strand)` endpoints and a colour in 0..=3.
pub type TemplateEdge = ((i32, i32), (i32, i32), u8);

fn n(id: i32, strand: i32) -> (i32, i32) {
    (id, strand)
}

#[rustfmt::skip]
const POS_CROSS: &[TemplateEdge] = &[
    (n(1, 0), n(6, 0), 0), (n(1, 0), n(16, 0), 1), (n(1, 0), n(8, 0), 2), (n(1, 0), n(2, 0), 3),
    (n(2, 0), n(5, 0), 0), (n(2, 0), n(13, 0), 1), (n(2, 0), n(3, 0), 2),
    (n(3, 0), n(11, 0), 0), (n(3, 0), n(12, 0), 1), (n(3, 0), n(8, 0), 3),
    (n(4, 0), n(10, 0), 0), (n(4, 0), n(9, 0), 1), (n(4, 0), n(5, 0), 2), (n(4, 0), n(7, 0), 3),
    (n(5, 0), n(24, 0), 1), (n(5, 0), n(6, 0), 3),
    (n(6, 0), n(21, 0), 1), (n(6, 0), n(7, 0), 2),
    (n(7, 0), n(19, 0), 0), (n(7, 0), n(20, 0), 1),
    (n(8, 0), n(18, 0), 0), (n(8, 0), n(17, 0), 1),
    (n(14, 0), n(23, 0), 0),
    (n(15, 0), n(22, 0), 0),
];

#[rustfmt::skip]
const NEG_CROSS: &[TemplateEdge] = &[
    (n(1, 0), n(6, 0), 0), (n(1, 0), n(24, 0), 1), (n(1, 0), n(8, 0), 2), (n(1, 0), n(2, 0), 3),
    (n(2, 0), n(5, 0), 0), (n(2, 0), n(21, 0), 1), (n(2, 0), n(3, 0), 2),
    (n(3, 0), n(19, 0), 0), (n(3, 0), n(20, 0), 1), (n(3, 0), n(8, 0), 3),
    (n(4, 0), n(18, 0), 0), (n(4, 0), n(17, 0), 1), (n(4, 0), n(5, 0), 2), (n(4, 0), n(7, 0), 3),
    (n(5, 0), n(16, 0), 1), (n(5, 0), n(6, 0), 3),
    (n(6, 0), n(13, 0), 1), (n(6, 0), n(7, 0), 2),
    (n(7, 0), n(11, 0), 0), (n(7, 0), n(12, 0), 1),
    (n(8, 0), n(10, 0), 0), (n(8, 0), n(9, 0), 1),
    (n(14, 0), n(23, 0), 0),
    (n(15, 0), n(22, 0), 0),
];

// Nodes 9..24 above are themselves boundary-dangling: every one of them
// carries the `strand` tag matching the (a,b,c,d) tuple position it will be
// substituted with in Phase 1 (9-12 -> a, 13-16 -> b, 17-20 -> c, 21-24 -> d).
// The template edges above record them with strand 0 for brevity; the
// builder below re-tags them before returning.
fn retag_cross_boundary(edges: &[TemplateEdge]) -> Vec<TemplateEdge> {
    edges
        .iter()
        .map(|&(a, b, c)| (retag_node(a), retag_node(b), c))
        .collect()
}

fn retag_node(node: (i32, i32)) -> (i32, i32) {
    let (id, _) = node;
    let strand = match id {
        9..=12 => 1,
        13..=16 => 2,
        17..=20 => 3,
        21..=24 => 4,
        _ => 0,
    };
    (id, strand)
}

// Curl boundary ids 5..=8 and 9..=12 carry tags per gadget; unlike the
// regular-crossing templates (whose boundary tags are derived uniformly
// from id via `retag_node`), each curl variant uses a different tag split
// across the same id ranges, so the tags are written directly below.
#[rustfmt::skip]
const POS_CURL_A: &[TemplateEdge] = &[
    (n(1, 0), n(6, 1), 0), (n(1, 0), n(9, 2), 1), (n(1, 0), n(2, 0), 2), (n(1, 0), n(4, 0), 3),
    (n(2, 0), n(7, 1), 0), (n(2, 0), n(8, 1), 1), (n(2, 0), n(3, 0), 3),
    (n(3, 0), n(10, 2), 0), (n(3, 0), n(5, 1), 1), (n(3, 0), n(4, 0), 2),
    (n(4, 0), n(11, 2), 0), (n(4, 0), n(12, 2), 1),
];

#[rustfmt::skip]
const POS_CURL_B: &[TemplateEdge] = &[
    (n(1, 0), n(6, 4), 0), (n(1, 0), n(9, 3), 1), (n(1, 0), n(2, 0), 2), (n(1, 0), n(4, 0), 3),
    (n(2, 0), n(7, 4), 0), (n(2, 0), n(8, 4), 1), (n(2, 0), n(3, 0), 3),
    (n(3, 0), n(10, 3), 0), (n(3, 0), n(5, 4), 1), (n(3, 0), n(4, 0), 2),
    (n(4, 0), n(11, 3), 0), (n(4, 0), n(12, 3), 1),
];

#[rustfmt::skip]
const NEG_CURL_A: &[TemplateEdge] = &[
    (n(1, 0), n(6, 1), 0), (n(1, 0), n(5, 1), 1), (n(1, 0), n(2, 0), 2), (n(1, 0), n(4, 0), 3),
    (n(2, 0), n(7, 1), 0), (n(2, 0), n(12, 4), 1), (n(2, 0), n(3, 0), 3),
    (n(3, 0), n(10, 4), 0), (n(3, 0), n(9, 4), 1), (n(3, 0), n(4, 0), 2),
    (n(4, 0), n(11, 4), 0), (n(4, 0), n(8, 1), 1),
];

#[rustfmt::skip]
const NEG_CURL_B: &[TemplateEdge] = &[
    (n(1, 0), n(6, 2), 0), (n(1, 0), n(5, 2), 1), (n(1, 0), n(2, 0), 2), (n(1, 0), n(4, 0), 3),
    (n(2, 0), n(7, 2), 0), (n(2, 0), n(12, 3), 1), (n(2, 0), n(3, 0), 3),
    (n(3, 0), n(10, 3), 0), (n(3, 0), n(9, 3), 1), (n(3, 0), n(4, 0), 2),
    (n(4, 0), n(11, 3), 0), (n(4, 0), n(8, 2), 1),
];

/// Which literal gadget a classified, signed crossing uses.
#[must_use]
pub fn gadget_for(kind: CrossingKind, sign: i8) -> Vec<TemplateEdge> {
    match kind {
        CrossingKind::Regular if sign >= 0 => retag_cross_boundary(POS_CROSS),
        CrossingKind::Regular => retag_cross_boundary(NEG_CROSS),
        CrossingKind::Curl1 => POS_CURL_A.to_vec(),
        CrossingKind::Curl2 => POS_CURL_B.to_vec(),
        CrossingKind::Curl3 => NEG_CURL_A.to_vec(),
        CrossingKind::Curl4 => NEG_CURL_B.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_cross_has_eight_inner_nodes_and_boundary_dangles() {
        let edges = gadget_for(CrossingKind::Regular, 1);
        let ids: std::collections::HashSet<i32> =
            edges.iter().flat_map(|&(a, b, _)| [a.0, b.0]).collect();
        assert!(ids.contains(&1));
        assert!(ids.contains(&24));
    }

    #[test]
    fn curl_gadgets_only_use_two_distinct_boundary_strand_tags() {
        let edges = gadget_for(CrossingKind::Curl1, 1);
        let strands: std::collections::HashSet<i32> = edges
            .iter()
            .flat_map(|&(a, b, _)| [a.1, b.1])
            .filter(|&s| s != 0)
            .collect();
        assert_eq!(strands.len(), 2);
    }
}
