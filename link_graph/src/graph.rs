//! The 5-valent edge-coloured graph: an arena of nodes plus `[Option<NodeIdx>; 5]`
//! adjacency, replacing the reference engine's `std::map<node, array<node, dim+1>>`
//! with index-based storage (the cyclic node-to-node references that map
//! induces are exactly the redesign this arena avoids).

use std::collections::HashMap;

use crate::gadget::{self, TemplateEdge};
use crate::pd::{Crossing, CrossingKind};
use crate::LinkGraphError;

pub type NodeIdx = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub id: i32,
    pub strand: i32,
    pub component: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    adj: Vec<[Option<NodeIdx>; 5]>,
    alive: Vec<bool>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Graph {
        Graph::default()
    }

    fn alloc(&mut self, node: Node) -> NodeIdx {
        let idx = self.nodes.len();
        self.nodes.push(node);
        self.adj.push([None, None, None, None, None]);
        self.alive.push(true);
        idx
    }

    #[must_use]
    pub fn node(&self, idx: NodeIdx) -> Node {
        self.nodes[idx]
    }

    #[must_use]
    pub fn neighbour(&self, idx: NodeIdx, colour: u8) -> Option<NodeIdx> {
        self.adj[idx][colour as usize]
    }

    fn set_edge(&mut self, a: NodeIdx, b: NodeIdx, colour: u8) {
        self.adj[a][colour as usize] = Some(b);
        self.adj[b][colour as usize] = Some(a);
    }

    #[must_use]
    pub fn alive_nodes(&self) -> Vec<NodeIdx> {
        (0..self.nodes.len()).filter(|&i| self.alive[i]).collect()
    }

    /// Phase 0: disjoint-unions one crossing's gadget template into the
    /// graph, tagging every node with `component`.
    pub fn add_gadget(&mut self, component: i32, kind: CrossingKind, sign: i8) {
        let edges: Vec<TemplateEdge> = gadget::gadget_for(kind, sign);
        let mut local: HashMap<(i32, i32), NodeIdx> = HashMap::new();
        for (a, b, colour) in edges {
            let ia = *local.entry(a).or_insert_with(|| {
                self.alloc(Node { id: a.0, strand: a.1, component })
            });
            let ib = *local.entry(b).or_insert_with(|| {
                self.alloc(Node { id: b.0, strand: b.1, component })
            });
            self.set_edge(ia, ib, colour);
        }
    }

    /// Phase 1: within `component`, rewrite every node whose `strand` is in
    /// 1..=4 to the corresponding entry of the crossing's PD tuple.
    pub fn substitute(&mut self, component: i32, tuple: [i64; 4]) {
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if !self.alive[i] || node.component != component {
                continue;
            }
            if (1..=4).contains(&node.strand) {
                node.strand = tuple[(node.strand - 1) as usize] as i32;
            }
        }
    }

    /// Phase 2: fuse every matching boundary pair, splicing their
    /// neighbours together and retiring both nodes.
    pub fn fuse_all(&mut self) {
        let n = self.nodes.len();
        let mut used = vec![false; n];
        let mut pairs = Vec::new();
        for i in 0..n {
            if !self.alive[i] || used[i] || self.nodes[i].strand == 0 {
                continue;
            }
            for j in 0..n {
                if i == j || !self.alive[j] || used[j] || self.nodes[j].strand == 0 {
                    continue;
                }
                let (ni, nj) = (self.nodes[i], self.nodes[j]);
                if ni.component < nj.component
                    && ni.strand == nj.strand
                    && nj.id.rem_euclid(4) == (5 - ni.id.rem_euclid(4)).rem_euclid(4)
                {
                    pairs.push((i, j));
                    used[i] = true;
                    used[j] = true;
                    break;
                }
            }
        }
        for (i, j) in pairs {
            self.fuse(i, j);
        }
    }

    fn fuse(&mut self, a: NodeIdx, b: NodeIdx) {
        let adj_a = self.adj[a];
        let adj_b = self.adj[b];
        for colour in 0..5 {
            if let Some(x) = adj_a[colour] {
                self.adj[x][colour] = adj_b[colour];
            }
            if let Some(y) = adj_b[colour] {
                self.adj[y][colour] = adj_a[colour];
            }
        }
        self.alive[a] = false;
        self.alive[b] = false;
        self.adj[a] = [None; 5];
        self.adj[b] = [None; 5];
    }

    /// Finds a node by `(id, component)` among nodes with `strand == 0`
    /// (internal gadget nodes, never touched by substitution).
    #[must_use]
    pub fn find_internal(&self, id: i32, component: i32) -> Option<NodeIdx> {
        (0..self.nodes.len()).find(|&i| {
            self.alive[i]
                && self.nodes[i].id == id
                && self.nodes[i].component == component
                && self.nodes[i].strand == 0
        })
    }

    /// Phase 3: all ordered quadricolours `(a, b, c, d)` currently in the
    /// fused graph: a-b coloured 0, b-c coloured 1, c-d coloured 2, d-a
    /// coloured 3.
    #[must_use]
    pub fn find_quadricolours(&self) -> Vec<(NodeIdx, NodeIdx, NodeIdx, NodeIdx)> {
        let mut found = Vec::new();
        for a in self.alive_nodes() {
            let Some(b) = self.neighbour(a, 0) else { continue };
            let Some(d) = self.neighbour(a, 3) else { continue };
            let Some(c_from_b) = self.neighbour(b, 1) else { continue };
            let Some(c_from_d) = self.neighbour(d, 2) else { continue };
            if c_from_b == c_from_d {
                found.push((a, b, c_from_b, d));
            }
        }
        found
    }

    /// Phase 3: colour-4 edges (a-b), (c-d), and
    /// (colour-1-neighbour-of-d)-(colour-1-neighbour-of-a).
    pub fn add_quadri_edges(
        &mut self,
        quad: (NodeIdx, NodeIdx, NodeIdx, NodeIdx),
    ) -> Result<(), LinkGraphError> {
        let (a, b, c, d) = quad;
        let e = self.neighbour(d, 1).ok_or(LinkGraphError::NoQuadricolourPossible)?;
        let f = self.neighbour(a, 1).ok_or(LinkGraphError::NoQuadricolourPossible)?;
        self.set_edge(a, b, 4);
        self.set_edge(c, d, 4);
        self.set_edge(e, f, 4);
        Ok(())
    }

    /// Phase 4: the single colour-4 edge marking a 1-handle, between the
    /// sign-selected node of its left crossing and that of its right one.
    pub fn add_one_handle_marker_edge(
        &mut self,
        left_component: i32,
        left_sign: i8,
        right_component: i32,
        right_sign: i8,
    ) -> Result<(), LinkGraphError> {
        let left_id = if left_sign >= 0 { 7 } else { 3 };
        let right_id = if right_sign >= 0 { 4 } else { 8 };
        let left = self
            .find_internal(left_id, left_component)
            .ok_or(LinkGraphError::GraphInvariantFailed)?;
        let right = self
            .find_internal(right_id, right_component)
            .ok_or(LinkGraphError::GraphInvariantFailed)?;
        self.set_edge(left, right, 4);
        Ok(())
    }

    fn has_colour4(&self, idx: NodeIdx) -> bool {
        self.adj[idx][4].is_some()
    }

    /// Phase 5: highlight edges for one crossing, keyed by its role along
    /// the 2-handle's trace (under-strand / over-strand / curl).
    pub fn add_highlight_edges(&mut self, component: i32, role: HighlightRole) {
        let pairs: &[(i32, i32)] = match role {
            HighlightRole::Under => &[(1, 6), (2, 5), (3, 4), (7, 8)],
            HighlightRole::Over => &[(1, 2), (5, 6)],
            HighlightRole::Curl => &[(1, 4), (2, 3)],
        };
        for &(x, y) in pairs {
            let (Some(ix), Some(iy)) =
                (self.find_internal(x, component), self.find_internal(y, component))
            else {
                continue;
            };
            if !self.has_colour4(ix) && !self.has_colour4(iy) {
                self.set_edge(ix, iy, 4);
            }
        }
    }

    /// Phase 6: for every colour-4-less node whose colour-1 neighbour is
    /// also colour-4-less, add a colour-4 edge between them.
    pub fn add_double_one_edges(&mut self) {
        for x in self.alive_nodes() {
            if self.has_colour4(x) {
                continue;
            }
            let Some(y) = self.neighbour(x, 1) else { continue };
            if x < y && !self.has_colour4(y) {
                self.set_edge(x, y, 4);
            }
        }
    }

    /// Phase 7: for every remaining colour-4-less node, walk alternately
    /// via colour 1 then colour 4 (when present) until another
    /// colour-4-less node is reached, and connect them.
    pub fn add_remainder_edges(&mut self) {
        loop {
            let Some(x) = self.alive_nodes().into_iter().find(|&n| !self.has_colour4(n)) else {
                break;
            };
            let mut y = x;
            let mut j = 0usize;
            loop {
                let colour = if j % 2 == 0 { 1 } else { 4 };
                let Some(next) = self.neighbour(y, colour) else { break };
                y = next;
                j += 1;
                if y != x && !self.has_colour4(y) {
                    break;
                }
            }
            if y == x {
                // Nothing reachable; avoid spinning forever on a malformed graph.
                break;
            }
            self.set_edge(x, y, 4);
        }
    }

    /// The completion invariant: every alive node has a neighbour in every
    /// colour `0..=max_colour`.
    pub fn validate_complete(&self, max_colour: u8) -> Result<(), LinkGraphError> {
        for idx in self.alive_nodes() {
            for colour in 0..=max_colour {
                if self.adj[idx][colour as usize].is_none() {
                    return Err(LinkGraphError::GraphInvariantFailed);
                }
            }
        }
        Ok(())
    }

    /// Emits a sorted gluing list: one `(from, to, colour)` triple per edge,
    /// with `from < to`, over a dense `0..alive_nodes().len()` relabelling.
    #[must_use]
    pub fn gluing_list(&self, max_colour: u8) -> Vec<(usize, usize, u8)> {
        let alive = self.alive_nodes();
        let index: HashMap<NodeIdx, usize> =
            alive.iter().enumerate().map(|(dense, &real)| (real, dense)).collect();
        let mut edges = Vec::new();
        for &real in &alive {
            let from = index[&real];
            for colour in 0..=max_colour {
                if let Some(other) = self.adj[real][colour as usize] {
                    let to = index[&other];
                    if from < to {
                        edges.push((from, to, colour));
                    }
                }
            }
        }
        edges.sort_unstable();
        edges
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightRole {
    Under,
    Over,
    Curl,
}

/// Builds the fused (post Phase-2) graph from a classified, signed, and
/// component-assigned crossing list.
pub fn build_fused_graph(crossings: &[Crossing]) -> Graph {
    let mut g = Graph::new();
    for (i, crossing) in crossings.iter().enumerate() {
        g.add_gadget(i as i32, crossing.kind, crossing.sign);
    }
    for (i, crossing) in crossings.iter().enumerate() {
        g.substitute(i as i32, crossing.tuple);
    }
    g.fuse_all();
    g
}
