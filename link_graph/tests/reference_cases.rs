//! Golden and round-trip cases for the Kirby-diagram-to-triangulation
//! pipeline: a handful of PD codes whose resulting triangulation or bare
//! graph invariant is independently known.

use link_graph::{build_graph, build_triangulation, Dim};

const GOLDEN_PD: &str = "(4,8,1,9),(9,3,10,4),(1,5,2,6),(6,2,7,3),(7,5,8,10)";

#[test]
fn golden_pd_code_produces_a_valid_dim4_triangulation() {
    let t = build_triangulation(GOLDEN_PD, "x 0", Dim::Four).unwrap();
    assert!(t.is_valid());
    assert!(!t.iso_sig().is_empty());
}

#[test]
fn golden_pd_code_graph_satisfies_the_five_colour_invariant() {
    let g = build_graph(GOLDEN_PD, "x 0", Dim::Four).unwrap();
    for idx in g.alive_nodes() {
        for colour in 0..5u8 {
            assert!(
                g.neighbour(idx, colour).is_some(),
                "node {idx:?} missing a colour-{colour} neighbour"
            );
        }
    }
}

// The simplest closed unknot PD code: a single positive curl where both
// boundary pairs close on themselves, (1,1,2,2).
const UNKNOT_CURL: &str = "1,1,2,2";

#[test]
fn unknot_framing_zero_dim3_is_a_valid_triangulation() {
    // Framed to 0, this cancels the curl's own +1 self-writhe with one
    // extra curl of the opposite sign.
    let t = build_triangulation(UNKNOT_CURL, "0", Dim::Three).unwrap();
    assert!(t.is_valid());
}

#[test]
fn unknot_framing_plus_one_dim3_is_a_valid_triangulation() {
    // Framing +1 exactly matches the single positive curl's self-writhe, so
    // self-framing adds only the designated cancelling pair.
    let t = build_triangulation(UNKNOT_CURL, "1", Dim::Three).unwrap();
    assert!(t.is_valid());
}

#[test]
fn unknot_framing_minus_one_dim3_is_a_valid_triangulation() {
    let t = build_triangulation(UNKNOT_CURL, "-1", Dim::Three).unwrap();
    assert!(t.is_valid());
}

#[test]
fn hopf_link_both_framings_zero_dim3_is_a_valid_triangulation() {
    let hopf = "1,4,2,3,3,2,4,1";
    let t = build_triangulation(hopf, "0 0", Dim::Three).unwrap();
    assert!(t.is_valid());
}

#[test]
fn one_handle_component_must_have_zero_self_writhe() {
    // A single positive curl declared as a 1-handle (writhe +1 != 0) must
    // be rejected rather than silently self-framed.
    let err = build_graph(UNKNOT_CURL, "x", Dim::Three).unwrap_err();
    assert!(matches!(err, link_graph::LinkGraphError::BadOneHandleWrithe(0)));
}

#[test]
fn one_handle_component_with_zero_self_writhe_is_accepted() {
    let hopf = "1,4,2,3,3,2,4,1";
    let g = build_graph(hopf, "x 0", Dim::Three).unwrap();
    for idx in g.alive_nodes() {
        for colour in 0..4u8 {
            assert!(g.neighbour(idx, colour).is_some());
        }
    }
}

#[test]
fn all_zero_labelled_pd_code_is_reindexed_rather_than_rejected() {
    // The same single-crossing unknot as `UNKNOT_CURL`, shifted down by one
    // (0-indexed, "SnapPy-style" input): the parser must detect the zero
    // label and bump everything back up rather than erroring out.
    let shifted = "0,0,1,1";
    let t = build_triangulation(shifted, "0", Dim::Three);
    assert!(t.is_ok());
}

#[test]
fn malformed_pd_code_is_rejected() {
    assert!(build_graph("not a pd code at all", "0", Dim::Four).is_err());
}

#[test]
fn framing_token_count_mismatch_is_rejected() {
    let err = build_graph(UNKNOT_CURL, "0 0", Dim::Three).unwrap_err();
    assert!(matches!(err, link_graph::LinkGraphError::MalformedPd));
}
