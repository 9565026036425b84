// SPDX-License-Identifier: MIT OR Apache-2.0
//! Avalanche Data Format (ADF) and GraphScript decoding.
//!
//! This crate turns an opaque byte buffer into a decoded GraphScript node
//! tree plus its connections:
//! - Jenkins `lookup3` hashing and a process-wide name registry
//! - ADF container parsing (header versions 2–4, both byte orders)
//! - GraphScript payload decoding (Graph → Node → DataSet → Data)
//! - Value interpretation, including variable-node blob dereferencing
//! - Flow and variable connection extraction
//!
//! ## Architecture
//!
//! Decoding is strictly one-way and synchronous: container first, then the
//! payload tree, then derived connections. Everything returned is owned;
//! the input buffer can be dropped immediately after decoding.

pub mod connect;
pub mod container;
pub mod error;
pub mod hash;
pub mod reader;
pub mod script;
pub mod value;

pub use connect::{Connection, ConnectionKind};
pub use container::{AdfFile, Instance, TypeDef, TypeKind, TypeMember};
pub use error::{AdfError, Result};
pub use reader::Endian;
pub use script::{DataRecord, DataSet, ScriptGraph, ScriptNode};
pub use value::VariableKind;
