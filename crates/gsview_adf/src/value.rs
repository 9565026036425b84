// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canonical display strings for data record values.
//!
//! Values stay raw byte blobs in the decoded tree; interpretation happens
//! here, keyed by the record's type hash. Variable nodes add one level of
//! indirection: their `Name`/`Value` records hold offsets into the graph's
//! global data blob, and the value type is derived from the class name.

use crate::hash::{self, hash_str};
use crate::reader::{f32_from, i32_from, i64_from, u32_from, u64_from, Endian};
use crate::script::DataRecord;

/// Type hash of `bool`.
pub const TYPE_BOOL: u32 = hash_str("bool");
/// Type hash of `int`.
pub const TYPE_INT: u32 = hash_str("int");
/// Type hash of `enum`.
pub const TYPE_ENUM: u32 = hash_str("enum");
/// Type hash of `uint32`.
pub const TYPE_UINT32: u32 = hash_str("uint32");
/// Type hash of `int64`.
pub const TYPE_INT64: u32 = hash_str("int64");
/// Type hash of `uint64`.
pub const TYPE_UINT64: u32 = hash_str("uint64");
/// Type hash of `float`.
pub const TYPE_FLOAT: u32 = hash_str("float");
/// Type hash of `vector`.
pub const TYPE_VECTOR: u32 = hash_str("vector");
/// Type hash of `string`.
pub const TYPE_STRING: u32 = hash_str("string");
/// Type hash of `string_ptr`.
pub const TYPE_STRING_PTR: u32 = hash_str("string_ptr");

/// Most bytes shown before the hex fallback elides.
const HEX_FALLBACK_LIMIT: usize = 16;

/// Canonical display string for a data record under its declared type.
/// Never panics; anything uninterpretable degrades to the hex fallback.
pub fn display(record: &DataRecord, endian: Endian) -> String {
    let bytes = &record.bytes;
    match record.type_hash {
        TYPE_BOOL => match bytes.first() {
            Some(&b) => fmt_bool(b),
            None => hex_fallback(bytes),
        },
        TYPE_INT | TYPE_ENUM => i32_from(endian, bytes)
            .map(|v| v.to_string())
            .unwrap_or_else(|| hex_fallback(bytes)),
        TYPE_UINT32 => u32_from(endian, bytes)
            .map(fmt_u32)
            .unwrap_or_else(|| hex_fallback(bytes)),
        TYPE_INT64 => i64_from(endian, bytes)
            .map(|v| v.to_string())
            .unwrap_or_else(|| hex_fallback(bytes)),
        TYPE_UINT64 => u64_from(endian, bytes)
            .map(|v| v.to_string())
            .unwrap_or_else(|| hex_fallback(bytes)),
        TYPE_FLOAT => f32_from(endian, bytes)
            .map(fmt_f32)
            .unwrap_or_else(|| hex_fallback(bytes)),
        TYPE_VECTOR => fmt_vector(endian, bytes).unwrap_or_else(|| hex_fallback(bytes)),
        TYPE_STRING | TYPE_STRING_PTR => {
            let trimmed = bytes.strip_suffix(&[0]).unwrap_or(bytes);
            String::from_utf8_lossy(trimmed).into_owned()
        }
        _ => hex_fallback(bytes),
    }
}

/// Space-separated hex of up to 16 bytes, with an ellipsis when longer.
pub fn hex_fallback(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "(empty)".to_string();
    }
    let shown: Vec<String> = bytes
        .iter()
        .take(HEX_FALLBACK_LIMIT)
        .map(|b| format!("{b:02X}"))
        .collect();
    let mut out = shown.join(" ");
    if bytes.len() > HEX_FALLBACK_LIMIT {
        out.push_str(" ...");
    }
    out
}

fn fmt_bool(b: u8) -> String {
    if b != 0 { "true" } else { "false" }.to_string()
}

fn fmt_f32(v: f32) -> String {
    format!("{v:.4}")
}

/// uint32 values double as hashes; show the resolved name when one exists.
fn fmt_u32(v: u32) -> String {
    match hash::resolve_known(v) {
        Some(name) => format!("{v} ({name})"),
        None => v.to_string(),
    }
}

fn fmt_vector(endian: Endian, bytes: &[u8]) -> Option<String> {
    let bytes = bytes.get(..16)?;
    let x = f32_from(endian, &bytes[0..])?;
    let y = f32_from(endian, &bytes[4..])?;
    let z = f32_from(endian, &bytes[8..])?;
    let w = f32_from(endian, &bytes[12..])?;
    Some(format!("({x:.2}, {y:.2}, {z:.2}, {w:.2})"))
}

/// Value type of a variable node, derived from its class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// IEEE float
    Float,
    /// Signed 32-bit
    Int,
    /// Single byte
    Bool,
    /// Unsigned 32-bit
    Uint32,
    /// Unsigned 64-bit (also object/file/graph-file/global references)
    Uint64,
    /// 32-bit name hash
    StringHash,
    /// Four floats
    Vector,
    /// Enumeration value
    Enum,
    /// Event endpoints carry no value
    Event,
}

impl VariableKind {
    /// Derive the value type from a class name, or `None` when the class
    /// is not a variable class at all.
    pub fn from_class(class_name: &str) -> Option<Self> {
        let stripped = class_name
            .strip_prefix("External")
            .or_else(|| class_name.strip_prefix("Global"))
            .unwrap_or(class_name);
        let suffix = stripped.strip_prefix("Variable")?;
        Some(match suffix {
            "EventSend" | "EventReceive" => Self::Event,
            s if s.starts_with("Float") => Self::Float,
            s if s.starts_with("Int") => Self::Int,
            s if s.starts_with("Bool") => Self::Bool,
            s if s.starts_with("Uint32") => Self::Uint32,
            s if s.starts_with("Uint64")
                || s.starts_with("Object")
                || s.starts_with("File")
                || s.starts_with("GraphFile")
                || s.starts_with("GlobalRef") =>
            {
                Self::Uint64
            }
            s if s.starts_with("String") || s.starts_with("Hash") => Self::StringHash,
            s if s.starts_with("Vector") || s.starts_with("Transform") => Self::Vector,
            s if s.starts_with("Enum") => Self::Enum,
            _ => Self::Uint32,
        })
    }

    fn width(self) -> usize {
        match self {
            Self::Bool => 1,
            Self::Float | Self::Int | Self::Uint32 | Self::StringHash | Self::Enum => 4,
            Self::Uint64 => 8,
            Self::Vector => 16,
            Self::Event => 0,
        }
    }
}

/// Whether a class name designates a variable node.
pub fn is_variable_class(class_name: &str) -> bool {
    VariableKind::from_class(class_name).is_some()
}

/// Resolve a variable node's `Name` record: the 4-byte value is an offset
/// into the global blob where the identity hash lives.
pub fn variable_name_display(record: &DataRecord, blob: &[u8], endian: Endian) -> Option<String> {
    let offset = u32_from(endian, &record.bytes)? as usize;
    let identity = u32_from(endian, blob.get(offset..)?)?;
    Some(hash::resolve(identity))
}

/// Decode a variable node's `Value` record through the global blob.
pub fn variable_value_display(
    kind: VariableKind,
    record: &DataRecord,
    blob: &[u8],
    endian: Endian,
) -> String {
    if kind == VariableKind::Event {
        return "(event)".to_string();
    }
    let Some(offset) = u32_from(endian, &record.bytes) else {
        return "??".to_string();
    };
    let offset = offset as usize;
    let slice = blob.get(offset..).unwrap_or(&[]);
    if slice.len() >= kind.width() {
        let shown = match kind {
            VariableKind::Float => f32_from(endian, slice).map(fmt_f32),
            VariableKind::Int | VariableKind::Enum => {
                i32_from(endian, slice).map(|v| v.to_string())
            }
            VariableKind::Bool => slice.first().map(|&b| fmt_bool(b)),
            VariableKind::Uint32 => u32_from(endian, slice).map(fmt_u32),
            VariableKind::Uint64 => u64_from(endian, slice).map(|v| v.to_string()),
            VariableKind::StringHash => u32_from(endian, slice).map(hash::resolve),
            VariableKind::Vector => fmt_vector(endian, slice),
            VariableKind::Event => unreachable!(),
        };
        if let Some(shown) = shown {
            return shown;
        }
    }
    // Blob too short for the typed read.
    match u32_from(endian, slice) {
        Some(raw) => format!("0x{raw:08X}"),
        None => "??".to_string(),
    }
}
