//! PD-code parsing, crossing classification, orientation, and the writhe
//! bookkeeping that drives self-framing.
//!
//! A planar-diagram (PD) code is a list of 4-tuples of strand labels, one per
//! crossing, read counterclockwise starting at the incoming understrand.
//! Each label appears in exactly two tuple slots across the whole code —
//! the two ends of that strand segment.

use crate::LinkGraphError;

/// How a PD-tuple classifies, per the four labels' coincidences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingKind {
    Regular,
    Curl1,
    Curl2,
    Curl3,
    Curl4,
}

impl CrossingKind {
    #[must_use]
    pub fn is_curl(self) -> bool {
        !matches!(self, CrossingKind::Regular)
    }

    /// The sign a curl's type fixes on its own; `None` for a regular
    /// crossing, whose sign instead comes from the orientation walk.
    #[must_use]
    pub fn fixed_sign(self) -> Option<i8> {
        match self {
            CrossingKind::Regular => None,
            CrossingKind::Curl1 | CrossingKind::Curl2 => Some(1),
            CrossingKind::Curl3 | CrossingKind::Curl4 => Some(-1),
        }
    }
}

/// A single classified, signed, component-assigned crossing.
#[derive(Debug, Clone)]
pub struct Crossing {
    pub tuple: [i64; 4],
    pub kind: CrossingKind,
    pub sign: i8,
    pub link_component: usize,
    /// True for crossings synthesised by self-framing rather than present
    /// in the user's original PD code.
    pub synthetic: bool,
}

fn classify(tuple: [i64; 4]) -> CrossingKind {
    let [a, b, c, d] = tuple;
    if c == d {
        CrossingKind::Curl1
    } else if a == b {
        CrossingKind::Curl2
    } else if b == c {
        CrossingKind::Curl3
    } else if a == d {
        CrossingKind::Curl4
    } else {
        CrossingKind::Regular
    }
}

/// Splits `input` on runs of non-digit characters, groups the resulting
/// integers into 4-tuples, and applies the 0-indexed-variant bump ("if any
/// integer is 0, increment all integers by 1").
pub fn parse_pd_code(input: &str) -> Result<Vec<[i64; 4]>, LinkGraphError> {
    let mut numbers = Vec::new();
    let mut current = String::new();
    for ch in input.chars() {
        if ch.is_ascii_digit() {
            current.push(ch);
        } else if !current.is_empty() {
            numbers.push(current.parse::<i64>().map_err(|_| LinkGraphError::MalformedPd)?);
            current.clear();
        }
    }
    if !current.is_empty() {
        numbers.push(current.parse::<i64>().map_err(|_| LinkGraphError::MalformedPd)?);
    }
    if numbers.is_empty() || numbers.len() % 4 != 0 {
        return Err(LinkGraphError::MalformedPd);
    }
    if numbers.iter().any(|&n| n == 0) {
        log::info!("pd code: zero label present, treating as 0-indexed (SnapPy-style) input");
        for n in &mut numbers {
            *n += 1;
        }
    }
    let tuples = numbers
        .chunks_exact(4)
        .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]])
        .collect();
    Ok(tuples)
}

/// Per-crossing extended orientation vector, and which component (by
/// discovery order of the walk) each of a crossing's two strand-passages
/// belongs to. `pair_component[i][0]` is the understrand passage (tuple
/// positions 0 and 2); `[1]` is the overstrand passage (positions 1 and 3).
struct Walk {
    eov: Vec<[i8; 4]>,
    pair_component: Vec<[Option<usize>; 2]>,
    /// Per component (by discovery order), the sequence of crossing indices
    /// visited while tracing it, in walk order.
    order: Vec<Vec<usize>>,
    n_components: usize,
}

fn walk_pd_code(code: &[[i64; 4]]) -> Walk {
    let n = code.len();
    if n == 0 {
        return Walk { eov: Vec::new(), pair_component: Vec::new(), order: Vec::new(), n_components: 0 };
    }

    let mut eov = vec![[0i8; 4]; n];
    let mut visited = vec![[false; 4]; n];
    let mut pair_component = vec![[None, None]; n];
    let mut seen_strands: Vec<i64> = Vec::new();
    let mut order: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();

    let mut component = 0usize;
    let mut i = 0usize;
    let mut j = 0usize;
    let mut count = 1i64;

    loop {
        if visited[i][j] {
            break;
        }
        visited[i][j] = true;
        let strand = code[i][j];
        seen_strands.push(strand);
        eov[i][j] = if count % 2 == 1 { 1 } else { -1 };
        pair_component[i][j % 2] = Some(component);
        count += 1;

        let j2 = (j + 2) % 4;
        let strand2 = code[i][j2];
        visited[i][j2] = true;
        seen_strands.push(strand2);
        eov[i][j2] = if count % 2 == 1 { 1 } else { -1 };
        pair_component[i][j2 % 2] = Some(component);
        count += 1;

        current.push(i);

        let closes = seen_strands.iter().filter(|&&s| s == strand2).count() == 2;
        let next = if closes {
            component += 1;
            order.push(std::mem::take(&mut current));
            (0..n).find(|&r| !visited[r][0]).map(|r| (r, 0))
        } else {
            (0..n)
                .flat_map(|r| (0..4).map(move |c| (r, c)))
                .find(|&(r, c)| !visited[r][c] && code[r][c] == strand2)
        };

        match next {
            Some((ni, nj)) => {
                i = ni;
                j = nj;
            }
            None => break,
        }
    }
    if !current.is_empty() {
        order.push(current);
    }

    Walk { eov, pair_component, order, n_components: component }
}

/// For each crossing, which component (by discovery order) each of its two
/// strand-passages belongs to — `[understrand, overstrand]`. Exposed so
/// framing can find crossings shared between a 2-handle and a 1-handle.
pub fn crossing_components(code: &[[i64; 4]]) -> Vec<[Option<usize>; 2]> {
    walk_pd_code(code).pair_component
}

/// For each component (by discovery order), the sequence of crossing
/// indices visited while tracing it, in walk order.
pub fn component_walk_order(code: &[[i64; 4]]) -> Vec<Vec<usize>> {
    walk_pd_code(code).order
}

const POSITIVE_EOV: [i8; 4] = [1, -1, -1, 1];
const NEGATIVE_EOV: [i8; 4] = [1, 1, -1, -1];

/// Classifies every tuple, assigns signs (curls from their type, regular
/// crossings from the orientation walk), and groups crossings into
/// components in the order the walk discovers them. Also returns, per
/// component, the self-crossing writhe (the sum of signs over crossings
/// where both strand-passages of that component pass through it).
pub fn classify_and_orient(
    code: &[[i64; 4]],
) -> Result<(Vec<Crossing>, usize, Vec<i64>), LinkGraphError> {
    let walk = walk_pd_code(code);
    let mut crossings = Vec::with_capacity(code.len());
    let mut writhes = vec![0i64; walk.n_components];
    for (i, &tuple) in code.iter().enumerate() {
        let kind = classify(tuple);
        let sign = match kind.fixed_sign() {
            Some(s) => s,
            None => match walk.eov.get(i) {
                Some(&row) if row == POSITIVE_EOV => 1,
                Some(&row) if row == NEGATIVE_EOV => -1,
                _ => {
                    log::warn!("crossing {i}: orientation vector did not resolve cleanly, defaulting to +1");
                    1
                }
            },
        };
        let [u, o] = walk.pair_component[i];
        let component = u.or(o).ok_or(LinkGraphError::MalformedPd)?;
        if u.is_some() && u == o {
            writhes[component] += i64::from(sign);
        }
        // A crossing shared between two different components doesn't
        // contribute to either one's self-writhe, but still needs a single
        // "home" component for gadget bookkeeping; the smaller id is as
        // good a choice as any other.
        let home = match (u, o) {
            (Some(u), Some(o)) => u.min(o),
            _ => component,
        };
        crossings.push(Crossing { tuple, kind, sign, link_component: home, synthetic: false });
    }

    Ok((crossings, walk.n_components, writhes))
}

/// Splices a signed Reidemeister-I curl onto the strand currently occupying
/// `code[site][0]`, replacing that single label with two fresh ones that
/// bracket a new curl tuple. Returns the index of the newly appended
/// crossing.
pub fn insert_curl(code: &mut Vec<[i64; 4]>, site: usize, sign: i8) -> usize {
    let max_label = code.iter().flatten().copied().max().unwrap_or(0);
    let old_label = code[site][0];
    let new_label_1 = max_label + 1;
    let new_label_2 = max_label + 2;

    code[site][0] = new_label_1;
    let other = code
        .iter()
        .enumerate()
        .flat_map(|(r, t)| t.iter().enumerate().map(move |(c, &v)| (r, c, v)))
        .find(|&(r, c, v)| !(r == site && c == 0) && v == old_label);
    if let Some((r, c, _)) = other {
        code[r][c] = new_label_2;
    }

    let curl_tuple = if sign >= 0 {
        // Curl1 pattern (a, b, c, c): positive.
        [new_label_1, new_label_2, old_label, old_label]
    } else {
        // Curl3 pattern (a, b, b, d): negative.
        [new_label_1, old_label, old_label, new_label_2]
    };
    code.push(curl_tuple);
    code.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_groups_into_tuples() {
        let tuples = parse_pd_code("[(4,8,1,9),(9,3,10,4),(1,5,2,6),(6,2,7,3),(7,5,8,10)]").unwrap();
        assert_eq!(tuples.len(), 5);
        assert_eq!(tuples[0], [4, 8, 1, 9]);
        assert_eq!(tuples[4], [7, 5, 8, 10]);
    }

    #[test]
    fn rejects_non_multiple_of_four() {
        assert!(parse_pd_code("1,2,3").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_pd_code("no numbers here").is_err());
    }

    #[test]
    fn zero_label_triggers_reindex() {
        let tuples = parse_pd_code("0,1,2,3").unwrap();
        assert_eq!(tuples, vec![[1, 2, 3, 4]]);
    }

    #[test]
    fn classifies_curls_by_coincidence() {
        assert_eq!(classify([1, 2, 3, 3]), CrossingKind::Curl1);
        assert_eq!(classify([1, 1, 2, 3]), CrossingKind::Curl2);
        assert_eq!(classify([1, 2, 2, 3]), CrossingKind::Curl3);
        assert_eq!(classify([1, 2, 3, 1]), CrossingKind::Curl4);
        assert_eq!(classify([1, 2, 3, 4]), CrossingKind::Regular);
    }

    #[test]
    fn curl_signs_are_fixed_by_type() {
        assert_eq!(CrossingKind::Curl1.fixed_sign(), Some(1));
        assert_eq!(CrossingKind::Curl2.fixed_sign(), Some(1));
        assert_eq!(CrossingKind::Curl3.fixed_sign(), Some(-1));
        assert_eq!(CrossingKind::Curl4.fixed_sign(), Some(-1));
        assert_eq!(CrossingKind::Regular.fixed_sign(), None);
    }

    #[test]
    fn insert_curl_preserves_the_label_count_and_adds_one_crossing() {
        let mut code = vec![[1, 2, 3, 4], [4, 5, 6, 1]];
        let idx = insert_curl(&mut code, 0, 1);
        assert_eq!(idx, 2);
        assert_eq!(code.len(), 3);
        // the old label (1) still appears exactly twice, now as two fresh
        // labels bracketing the new curl.
        assert_ne!(code[0][0], 1);
    }

    #[test]
    fn single_component_unknot_has_one_component() {
        // A single positive curl as a closed 1-crossing diagram: both
        // boundary pairs close on themselves, (1,1,2,2).
        let code = vec![[1, 1, 2, 2]];
        let (crossings, n_components, writhes) = classify_and_orient(&code).unwrap();
        assert_eq!(n_components, 1);
        assert_eq!(crossings[0].kind, CrossingKind::Curl1);
        assert_eq!(crossings[0].sign, 1);
        assert_eq!(writhes, vec![1]);
    }
}
