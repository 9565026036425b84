// SPDX-License-Identifier: MIT OR Apache-2.0
//! Jenkins `lookup3` hashing and the process-wide name registry.
//!
//! Every identifier in an ADF GraphScript file is stored as a 32-bit
//! `lookup3` hash with seed zero. The registry maps hashes back to the
//! strings they were computed from so the viewer can show readable names;
//! a hash with no registered string displays as `0xXXXXXXXX`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::io;
use std::path::Path;

/// Curated identifiers registered before the bulk dictionary so they win
/// any hash collision against it.
const CURATED: &[&str] = &[
    // Pin category datasets
    "input_pins",
    "output_pins",
    "variable_pins",
    // Variable record fields
    "Name",
    "Value",
    // Primitive type names
    "bool",
    "int",
    "enum",
    "uint32",
    "int64",
    "uint64",
    "float",
    "vector",
    "string",
    "string_ptr",
    // Variable classes
    "VariableFloat",
    "VariableInt",
    "VariableBool",
    "VariableUint32",
    "VariableUint64",
    "VariableObject",
    "VariableFile",
    "VariableGraphFile",
    "VariableGlobalRef",
    "VariableString",
    "VariableHash",
    "VariableStringHash",
    "VariableVector",
    "VariableTransform",
    "VariableEnum",
    "VariableEventSend",
    "VariableEventReceive",
    "ExternalVariableFloat",
    "ExternalVariableInt",
    "ExternalVariableBool",
    "ExternalVariableUint32",
    "ExternalVariableString",
    "GlobalVariableFloat",
    "GlobalVariableInt",
    "GlobalVariableBool",
    "GlobalVariableUint32",
    "GlobalVariableString",
    // Common pin names
    "in",
    "out",
    "done",
    "next",
    "true",
    "false",
    "trigger",
    "activate",
    "deactivate",
    "finished",
];

/// Bulk engine identifier dictionary, one name per line.
const DICTIONARY: &str = include_str!("../data/dictionary.txt");

const fn mix(mut a: u32, mut b: u32, mut c: u32) -> (u32, u32, u32) {
    a = a.wrapping_sub(c);
    a ^= c.rotate_left(4);
    c = c.wrapping_add(b);
    b = b.wrapping_sub(a);
    b ^= a.rotate_left(6);
    a = a.wrapping_add(c);
    c = c.wrapping_sub(b);
    c ^= b.rotate_left(8);
    b = b.wrapping_add(a);
    a = a.wrapping_sub(c);
    a ^= c.rotate_left(16);
    c = c.wrapping_add(b);
    b = b.wrapping_sub(a);
    b ^= a.rotate_left(19);
    a = a.wrapping_add(c);
    c = c.wrapping_sub(b);
    c ^= b.rotate_left(4);
    b = b.wrapping_add(a);
    (a, b, c)
}

const fn final_mix(mut a: u32, mut b: u32, mut c: u32) -> u32 {
    c ^= b;
    c = c.wrapping_sub(b.rotate_left(14));
    a ^= c;
    a = a.wrapping_sub(c.rotate_left(11));
    b ^= a;
    b = b.wrapping_sub(a.rotate_left(25));
    c ^= b;
    c = c.wrapping_sub(b.rotate_left(16));
    a ^= c;
    a = a.wrapping_sub(c.rotate_left(4));
    b ^= a;
    b = b.wrapping_sub(a.rotate_left(14));
    c ^= b;
    c = c.wrapping_sub(b.rotate_left(24));
    c
}

/// Little-endian word starting at `base`; bytes past the end contribute zero,
/// matching the tail cases of the reference implementation.
const fn le_word(data: &[u8], base: usize) -> u32 {
    let mut w = 0u32;
    let mut i = 0;
    while i < 4 && base + i < data.len() {
        w |= (data[base + i] as u32) << (8 * i);
        i += 1;
    }
    w
}

/// Jenkins `lookup3` ("hashlittle") over a byte sequence.
///
/// Matches the published self-test vectors: `hash_bytes(b"", 0)` is
/// `0xDEADBEEF` and `hash_bytes(b"Four score and seven years ago", 0)` is
/// `0x17770551`.
pub const fn hash_bytes(data: &[u8], seed: u32) -> u32 {
    let mut a = 0xdead_beef_u32
        .wrapping_add(data.len() as u32)
        .wrapping_add(seed);
    let mut b = a;
    let mut c = a;

    let mut off = 0;
    while data.len() - off > 12 {
        a = a.wrapping_add(le_word(data, off));
        b = b.wrapping_add(le_word(data, off + 4));
        c = c.wrapping_add(le_word(data, off + 8));
        let (na, nb, nc) = mix(a, b, c);
        a = na;
        b = nb;
        c = nc;
        off += 12;
    }

    // Zero-length input skips the final mix entirely.
    if data.is_empty() {
        return c;
    }

    a = a.wrapping_add(le_word(data, off));
    b = b.wrapping_add(le_word(data, off + 4));
    c = c.wrapping_add(le_word(data, off + 8));
    final_mix(a, b, c)
}

/// Hash of a name as stored in the file format (seed zero).
pub const fn hash_str(name: &str) -> u32 {
    hash_bytes(name.as_bytes(), 0)
}

/// `name_hash` of the `input_pins` role dataset.
pub const INPUT_PINS: u32 = hash_str("input_pins");
/// `name_hash` of the `output_pins` role dataset.
pub const OUTPUT_PINS: u32 = hash_str("output_pins");
/// `name_hash` of the `variable_pins` role dataset.
pub const VARIABLE_PINS: u32 = hash_str("variable_pins");
/// `name_hash` of a variable node's identity record.
pub const NAME: u32 = hash_str("Name");
/// `name_hash` of a variable node's payload record.
pub const VALUE: u32 = hash_str("Value");

/// Hash → string table. First registration for a hash wins; later entries
/// for the same hash are ignored.
#[derive(Debug, Clone)]
pub struct HashRegistry {
    names: IndexMap<u32, String>,
}

impl HashRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            names: IndexMap::new(),
        }
    }

    /// Create a registry seeded with the curated list and the bulk
    /// dictionary, in that order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for name in CURATED {
            registry.register(name);
        }
        registry.merge_lines(DICTIONARY);
        registry
    }

    /// Register a name, returning its hash. Keeps any earlier entry for
    /// the same hash.
    pub fn register(&mut self, name: &str) -> u32 {
        let hash = hash_str(name);
        self.names.entry(hash).or_insert_with(|| name.to_string());
        hash
    }

    /// Look up the registered string for a hash.
    pub fn get(&self, hash: u32) -> Option<&str> {
        self.names.get(&hash).map(String::as_str)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn merge_lines(&mut self, text: &str) {
        for line in text.lines() {
            let name = line.trim();
            if name.is_empty() || name.starts_with('#') {
                continue;
            }
            self.register(name);
        }
    }
}

impl Default for HashRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

static REGISTRY: Lazy<RwLock<HashRegistry>> =
    Lazy::new(|| RwLock::new(HashRegistry::with_defaults()));

/// Register a name in the process-wide registry, returning its hash.
pub fn register(name: &str) -> u32 {
    REGISTRY.write().register(name)
}

/// Resolve a hash to its registered string, if any.
pub fn resolve_known(hash: u32) -> Option<String> {
    REGISTRY.read().get(hash).map(str::to_string)
}

/// Resolve a hash for display: the registered string, or the canonical
/// `0xXXXXXXXX` form.
pub fn resolve(hash: u32) -> String {
    resolve_known(hash).unwrap_or_else(|| format!("0x{hash:08X}"))
}

/// Merge an external engine dictionary (one name per line, `#` comments)
/// into the registry. The merged table is built in full before it replaces
/// the live one, so concurrent readers never observe a partial load.
/// Returns the number of names added.
pub fn load_dictionary(path: &Path) -> io::Result<usize> {
    let text = std::fs::read_to_string(path)?;
    let mut guard = REGISTRY.write();
    let mut next = guard.clone();
    let before = next.len();
    next.merge_lines(&text);
    let added = next.len() - before;
    *guard = next;
    tracing::info!(added, path = %path.display(), "merged external dictionary");
    Ok(added)
}
