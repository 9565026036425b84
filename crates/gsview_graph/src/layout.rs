// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layered graph layout.
//!
//! Functional nodes go through a Sugiyama-style pipeline: longest-path
//! layering over flow edges, compaction, oversized-layer splitting,
//! barycenter crossing reduction, then grid placement per layer. Nodes
//! that supply variables are kept out of the layered region and placed on
//! a separate grid below it. The layout never fails: any node set yields
//! exactly one finite position per node, and identical inputs yield
//! identical positions.

use crate::connection::{Edge, EdgeKind};
use crate::node::Position;
use std::collections::VecDeque;

/// Horizontal distance between layers.
pub const LAYER_GAP_X: f32 = 360.0;
/// Vertical distance between nodes of a layer.
pub const LAYER_GAP_Y: f32 = 140.0;
/// Maximum nodes per layer before the layer splits.
pub const MAX_PER_LAYER: usize = 4;
/// Variable grid cell width.
pub const VARIABLE_CELL_X: f32 = 240.0;
/// Variable grid cell height.
pub const VARIABLE_CELL_Y: f32 = 100.0;
/// Variable grid column count.
pub const VARIABLE_COLUMNS: usize = 6;
/// Vertical gap between the layered region and the variable grid.
pub const VARIABLE_ZONE_GAP: f32 = 160.0;

/// Horizontal spacing of the orphan row.
const ORPHAN_GAP_X: f32 = 300.0;
/// Barycenter sweep count, alternating forward and backward.
const BARYCENTER_PASSES: usize = 8;

/// Compute one position per node index.
pub fn compute(node_count: usize, edges: &[Edge]) -> Vec<Position> {
    let n = node_count;
    if n == 0 {
        return Vec::new();
    }

    // Partition: a node that supplies any variable edge leaves the layered
    // region; everything else is functional.
    let mut is_variable = vec![false; n];
    for edge in edges {
        if edge.kind == EdgeKind::Variable {
            if let Some(flag) = is_variable.get_mut(edge.source_index as usize) {
                *flag = true;
            }
        }
    }

    // Flow adjacency restricted to functional endpoints.
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    for edge in edges {
        let (s, t) = (edge.source_index as usize, edge.target_index as usize);
        if edge.kind == EdgeKind::Flow && s < n && t < n && !is_variable[s] && !is_variable[t] {
            children[s].push(t);
            parents[t].push(s);
        }
    }

    let layers = layer_functional(n, &is_variable, &parents, &children);
    let layers = split_oversized(layers);
    let layers = order_by_barycenter(n, layers, &parents, &children);

    let mut positions: Vec<Option<Position>> = vec![None; n];
    for (li, layer) in layers.iter().enumerate() {
        let k = layer.len();
        for (i, &v) in layer.iter().enumerate() {
            let x = li as f32 * LAYER_GAP_X;
            let y = (i as f32 - (k as f32 - 1.0) / 2.0) * LAYER_GAP_Y;
            positions[v] = Some(Position::new(x, y));
        }
    }

    // Variable grid below the functional extent.
    let placed: Vec<Position> = positions.iter().flatten().copied().collect();
    let bottom_y = placed.iter().map(|p| p.y).fold(0.0f32, f32::max);
    let min_x = placed.iter().map(|p| p.x).fold(0.0f32, f32::min);
    let base_y = bottom_y + VARIABLE_ZONE_GAP;

    let connected: Vec<usize> = (0..n)
        .filter(|&v| is_variable[v] && edges.iter().any(|e| supplies(e, v)))
        .collect();
    let rest: Vec<usize> = (0..n)
        .filter(|&v| is_variable[v] && !edges.iter().any(|e| supplies(e, v)))
        .collect();
    let variables: Vec<usize> = connected.into_iter().chain(rest).collect();
    for (i, &v) in variables.iter().enumerate() {
        let x = min_x + (i % VARIABLE_COLUMNS) as f32 * VARIABLE_CELL_X;
        let y = base_y + (i / VARIABLE_COLUMNS) as f32 * VARIABLE_CELL_Y;
        positions[v] = Some(Position::new(x, y));
    }

    // Safety row for anything still unplaced.
    let rows = variables.len().div_ceil(VARIABLE_COLUMNS);
    let orphan_y = base_y + rows as f32 * VARIABLE_CELL_Y + VARIABLE_ZONE_GAP;
    let mut orphan = 0;
    let out: Vec<Position> = positions
        .into_iter()
        .map(|p| {
            p.unwrap_or_else(|| {
                let pos = Position::new(min_x + orphan as f32 * ORPHAN_GAP_X, orphan_y);
                orphan += 1;
                pos
            })
        })
        .collect();

    tracing::debug!(nodes = n, layers = layers.len(), "layout complete");
    out
}

fn supplies(edge: &Edge, v: usize) -> bool {
    edge.kind == EdgeKind::Variable && edge.source_index as usize == v
}

/// Longest-path layering (Kahn over functional flow edges) followed by a
/// compaction sweep in topological order. Cycle members never reach zero
/// in-degree and stay at layer 0.
fn layer_functional(
    n: usize,
    is_variable: &[bool],
    parents: &[Vec<usize>],
    children: &[Vec<usize>],
) -> Vec<Vec<usize>> {
    let mut layer = vec![0usize; n];
    let mut indegree: Vec<usize> = (0..n).map(|v| parents[v].len()).collect();

    let mut queue: VecDeque<usize> = (0..n)
        .filter(|&v| !is_variable[v] && indegree[v] == 0)
        .collect();
    let mut topo = Vec::new();
    while let Some(u) = queue.pop_front() {
        topo.push(u);
        for &c in &children[u] {
            layer[c] = layer[c].max(layer[u] + 1);
            indegree[c] -= 1;
            if indegree[c] == 0 {
                queue.push_back(c);
            }
        }
    }

    // Compaction: pull floating nodes against their parents.
    for &u in &topo {
        layer[u] = parents[u]
            .iter()
            .map(|&p| layer[p] + 1)
            .max()
            .unwrap_or(0);
    }

    let functional: Vec<usize> = (0..n).filter(|&v| !is_variable[v]).collect();
    let depth = functional.iter().map(|&v| layer[v] + 1).max().unwrap_or(0);
    let mut layers = vec![Vec::new(); depth];
    for &v in &functional {
        layers[layer[v]].push(v);
    }
    layers
}

/// Split layers with more than `MAX_PER_LAYER` members into chunks,
/// shifting everything to their right. Processed right-to-left so the
/// inserted layers are never revisited.
fn split_oversized(mut layers: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    for li in (0..layers.len()).rev() {
        if layers[li].len() > MAX_PER_LAYER {
            let chunks: Vec<Vec<usize>> = layers[li]
                .chunks(MAX_PER_LAYER)
                .map(<[usize]>::to_vec)
                .collect();
            layers.splice(li..=li, chunks);
        }
    }
    layers
}

/// Eight alternating barycenter sweeps. A node's barycenter is the mean
/// rank of its neighbors in the adjacent sweep direction; nodes without
/// neighbors keep their rank. The sort must be stable so ties preserve
/// the incoming order.
fn order_by_barycenter(
    n: usize,
    mut layers: Vec<Vec<usize>>,
    parents: &[Vec<usize>],
    children: &[Vec<usize>],
) -> Vec<Vec<usize>> {
    let mut rank = vec![0.0f32; n];
    for layer in &layers {
        for (i, &v) in layer.iter().enumerate() {
            rank[v] = i as f32;
        }
    }

    for pass in 0..BARYCENTER_PASSES {
        if pass % 2 == 0 {
            for li in 1..layers.len() {
                reorder_layer(&mut layers[li], parents, &mut rank);
            }
        } else {
            for li in (0..layers.len().saturating_sub(1)).rev() {
                reorder_layer(&mut layers[li], children, &mut rank);
            }
        }
    }
    layers
}

fn reorder_layer(layer: &mut [usize], neighbors: &[Vec<usize>], rank: &mut [f32]) {
    let mut keyed: Vec<(f32, usize)> = layer
        .iter()
        .map(|&v| {
            let nbrs = &neighbors[v];
            let key = if nbrs.is_empty() {
                rank[v]
            } else {
                nbrs.iter().map(|&u| rank[u]).sum::<f32>() / nbrs.len() as f32
            };
            (key, v)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (i, &(_, v)) in keyed.iter().enumerate() {
        layer[i] = v;
        rank[v] = i as f32;
    }
}
