// SPDX-License-Identifier: MIT OR Apache-2.0
//! View model and layout for decoded GraphScript graphs.
//!
//! This crate turns the decoded script tree into the product node-editor
//! frontends consume:
//! - Output record types (`Node`, `Pin`, `DataValue`, `Edge`, `Position`)
//!   with resolved names and display strings
//! - One-pass assembly from a `ScriptGraph`
//! - A deterministic layered layout with a separate variable grid
//!
//! The viewport itself (camera, selection, coloring) lives downstream;
//! this crate exposes plain data and no callbacks.

pub mod connection;
pub mod graph;
pub mod layout;
pub mod node;

pub use connection::{Edge, EdgeKind};
pub use graph::ViewGraph;
pub use node::{DataValue, Node, Pin, Position};
