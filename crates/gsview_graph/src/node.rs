// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the viewer graph.

use serde::{Deserialize, Serialize};

/// 2-D position in graph space. The viewport frames the result, so
/// coordinates may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Position {
    /// Create a position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A leaf value with its display string already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataValue {
    /// Resolved record name
    pub name: String,
    /// Resolved primitive type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Raw value bytes
    pub bytes: Vec<u8>,
    /// Whether the value dereferences through the global blob
    pub reference: bool,
    /// Canonical display string
    pub display: String,
}

/// A named connection point on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Pin name hash
    pub hash: u32,
    /// Resolved pin name
    pub name: String,
    /// Connection descriptors or variable links carried by the pin
    pub data: Vec<DataValue>,
}

/// A graph node ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// 0-based decode index; edges refer to this
    pub index: u32,
    /// Class name hash
    pub class_hash: u32,
    /// Resolved class name (viewers map this to a category color)
    pub class_name: String,
    /// Opaque engine function hash, passed through for tooling
    pub function_hash: u32,
    /// Parameters from the root dataset
    pub parameters: Vec<DataValue>,
    /// Input pins
    pub input_pins: Vec<Pin>,
    /// Output pins
    pub output_pins: Vec<Pin>,
    /// Variable pins
    pub variable_pins: Vec<Pin>,
    /// Layout position
    pub position: Position,
}
