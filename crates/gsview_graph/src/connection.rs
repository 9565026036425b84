// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge definitions for the viewer graph.

use gsview_adf::{Connection, ConnectionKind};
use serde::{Deserialize, Serialize};

/// Edge kind, serialized in lowercase for consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Execution flow edge
    Flow,
    /// Variable supply edge
    Variable,
}

impl From<ConnectionKind> for EdgeKind {
    fn from(kind: ConnectionKind) -> Self {
        match kind {
            ConnectionKind::Flow => Self::Flow,
            ConnectionKind::Variable => Self::Variable,
        }
    }
}

/// A directed edge between two nodes, endpoints by node index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node index
    pub source_index: u32,
    /// Pin name hash on the source
    pub source_pin_hash: u32,
    /// Target node index
    pub target_index: u32,
    /// Pin name hash on the target
    pub target_pin_hash: u32,
    /// Edge kind
    pub kind: EdgeKind,
}

impl Edge {
    /// Convert an extracted connection.
    pub fn from_connection(connection: &Connection) -> Self {
        Self {
            source_index: connection.source,
            source_pin_hash: connection.source_pin,
            target_index: connection.target,
            target_pin_hash: connection.target_pin,
            kind: connection.kind.into(),
        }
    }

    /// Check if this edge involves a specific node.
    pub fn involves_node(&self, index: u32) -> bool {
        self.source_index == index || self.target_index == index
    }
}
