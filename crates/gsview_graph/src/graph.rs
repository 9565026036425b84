// SPDX-License-Identifier: MIT OR Apache-2.0
//! View graph assembly from a decoded GraphScript payload.
//!
//! One walk over the script tree resolves every hash, formats every value,
//! splits pin groups out of each node's root dataset, extracts the
//! connections and assigns layout positions. The result owns all of its
//! data; nothing refers back to the input buffer.

use crate::connection::Edge;
use crate::layout;
use crate::node::{DataValue, Node, Pin, Position};
use gsview_adf::script::{DataRecord, DataSet, ScriptGraph, ScriptNode};
use gsview_adf::value::{self, VariableKind};
use gsview_adf::{connect, hash, Endian};
use serde::{Deserialize, Serialize};

/// The full viewer product: nodes with positions, plus typed edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewGraph {
    /// Nodes in decode order
    pub nodes: Vec<Node>,
    /// Flow and variable edges
    pub edges: Vec<Edge>,
}

impl ViewGraph {
    /// Build the view graph for a decoded script payload.
    pub fn build(script: &ScriptGraph, endian: Endian) -> Self {
        let connections = connect::extract(script, endian);
        let edges: Vec<Edge> = connections.iter().map(Edge::from_connection).collect();

        let blob = script.blob();
        let mut nodes: Vec<Node> = script
            .nodes
            .iter()
            .map(|n| build_node(n, blob, endian))
            .collect();

        let positions = layout::compute(nodes.len(), &edges);
        for (node, position) in nodes.iter_mut().zip(positions) {
            node.position = position;
        }

        tracing::info!(nodes = nodes.len(), edges = edges.len(), "assembled view graph");
        Self { nodes, edges }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn build_node(script_node: &ScriptNode, blob: &[u8], endian: Endian) -> Node {
    let class_name = hash::resolve(script_node.class_hash);
    let variable_kind = VariableKind::from_class(&class_name);
    let root = &script_node.dataset;

    let parameters = root
        .data
        .iter()
        .map(|record| build_value(record, blob, endian, variable_kind))
        .collect();

    Node {
        index: script_node.index,
        class_hash: script_node.class_hash,
        class_name,
        function_hash: script_node.function_hash,
        parameters,
        input_pins: build_pins(root, hash::INPUT_PINS, blob, endian),
        output_pins: build_pins(root, hash::OUTPUT_PINS, blob, endian),
        variable_pins: build_pins(root, hash::VARIABLE_PINS, blob, endian),
        position: Position::default(),
    }
}

fn build_pins(root: &DataSet, group_hash: u32, blob: &[u8], endian: Endian) -> Vec<Pin> {
    let Some(group) = root.child(group_hash) else {
        return Vec::new();
    };
    group
        .children
        .iter()
        .map(|pin| Pin {
            hash: pin.name_hash,
            name: hash::resolve(pin.name_hash),
            data: pin
                .data
                .iter()
                .map(|record| build_value(record, blob, endian, None))
                .collect(),
        })
        .collect()
}

/// Format one record. Variable-class nodes route their `Name` and
/// referenced `Value` records through the global blob.
fn build_value(
    record: &DataRecord,
    blob: &[u8],
    endian: Endian,
    variable_kind: Option<VariableKind>,
) -> DataValue {
    let display = match variable_kind {
        Some(_) if record.name_hash == hash::NAME => {
            value::variable_name_display(record, blob, endian)
                .unwrap_or_else(|| value::display(record, endian))
        }
        Some(kind) if record.name_hash == hash::VALUE && record.reference => {
            value::variable_value_display(kind, record, blob, endian)
        }
        _ => value::display(record, endian),
    };
    DataValue {
        name: hash::resolve(record.name_hash),
        type_name: hash::resolve(record.type_hash),
        bytes: record.bytes.clone(),
        reference: record.reference,
        display,
    }
}
