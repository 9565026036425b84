// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection extraction from pin datasets.
//!
//! Connections are not stored as records of their own: each descriptor
//! under a pin holds an offset into the global blob, and the u32 at that
//! offset is the peer node index. Flow descriptors live under
//! `output_pins` and point at the target; variable descriptors live under
//! `variable_pins` and point back at the supplying variable node, so their
//! direction is reversed on emission.

use crate::hash;
use crate::reader::{u32_from, Endian};
use crate::script::{DataSet, ScriptGraph};

/// Whether an edge carries execution flow or a variable binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// Execution flow, source's output pin to target
    Flow,
    /// Data supply, variable node to the consuming node's slot
    Variable,
}

/// A directed edge between two nodes, endpoints by decode index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Source node index
    pub source: u32,
    /// Pin name hash on the source
    pub source_pin: u32,
    /// Target node index
    pub target: u32,
    /// Pin name hash on the target
    pub target_pin: u32,
    /// Edge kind
    pub kind: ConnectionKind,
}

/// Extract every flow and variable connection of a graph. Malformed
/// descriptors (short values, blob offsets out of range, node indices out
/// of range) are skipped; the rest of the graph still renders.
pub fn extract(graph: &ScriptGraph, endian: Endian) -> Vec<Connection> {
    let node_count = graph.nodes.len() as u32;
    let blob = graph.blob();
    let mut connections = Vec::new();

    for node in &graph.nodes {
        if let Some(pins) = node.dataset.child(hash::OUTPUT_PINS) {
            collect_flow(node.index, pins, blob, endian, node_count, &mut connections);
        }
        if let Some(pins) = node.dataset.child(hash::VARIABLE_PINS) {
            collect_variable(node.index, pins, blob, endian, node_count, &mut connections);
        }
    }

    tracing::debug!(connections = connections.len(), "extracted connections");
    connections
}

fn collect_flow(
    source: u32,
    pins: &DataSet,
    blob: &[u8],
    endian: Endian,
    node_count: u32,
    out: &mut Vec<Connection>,
) {
    for pin in &pins.children {
        for descriptor in &pin.data {
            let Some(target) = peer_index(&descriptor.bytes, blob, endian) else {
                tracing::debug!(source, pin = pin.name_hash, "flow descriptor dropped");
                continue;
            };
            if target >= node_count {
                tracing::debug!(source, target, "flow target out of range, dropped");
                continue;
            }
            out.push(Connection {
                source,
                source_pin: pin.name_hash,
                target,
                target_pin: descriptor.name_hash,
                kind: ConnectionKind::Flow,
            });
        }
    }
}

fn collect_variable(
    consumer: u32,
    pins: &DataSet,
    blob: &[u8],
    endian: Endian,
    node_count: u32,
    out: &mut Vec<Connection>,
) {
    for pin in &pins.children {
        for descriptor in &pin.data {
            let Some(supplier) = peer_index(&descriptor.bytes, blob, endian) else {
                tracing::debug!(consumer, pin = pin.name_hash, "variable descriptor dropped");
                continue;
            };
            if supplier >= node_count {
                tracing::debug!(consumer, supplier, "variable source out of range, dropped");
                continue;
            }
            // The variable node supplies the slot, so it is the source.
            out.push(Connection {
                source: supplier,
                source_pin: pin.name_hash,
                target: consumer,
                target_pin: pin.name_hash,
                kind: ConnectionKind::Variable,
            });
        }
    }
}

/// Double deref: descriptor value → blob offset → peer node index.
fn peer_index(value: &[u8], blob: &[u8], endian: Endian) -> Option<u32> {
    let offset = u32_from(endian, value)? as usize;
    u32_from(endian, blob.get(offset..)?)
}
