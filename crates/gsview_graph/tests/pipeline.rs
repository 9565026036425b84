// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end pipeline tests over synthetic ADF files.
//!
//! Builds a complete container in memory (an entry node flowing into a
//! delay node, with a float variable supplying the delay's duration) and
//! checks the assembled view graph, in both byte orders.

use gsview_adf::hash::{self, hash_str};
use gsview_adf::{script, AdfFile, Endian};
use gsview_graph::{EdgeKind, Position, ViewGraph};

fn put_u32(buf: &mut Vec<u8>, at: usize, value: u32, endian: Endian) {
    if buf.len() < at + 4 {
        buf.resize(at + 4, 0);
    }
    let bytes = match endian {
        Endian::Little => value.to_le_bytes(),
        Endian::Big => value.to_be_bytes(),
    };
    buf[at..at + 4].copy_from_slice(&bytes);
}

fn put_u64(buf: &mut Vec<u8>, at: usize, value: u64, endian: Endian) {
    if buf.len() < at + 8 {
        buf.resize(at + 8, 0);
    }
    let bytes = match endian {
        Endian::Little => value.to_le_bytes(),
        Endian::Big => value.to_be_bytes(),
    };
    buf[at..at + 8].copy_from_slice(&bytes);
}

fn put_f32(buf: &mut Vec<u8>, at: usize, value: f32, endian: Endian) {
    put_u32(buf, at, value.to_bits(), endian);
}

fn put_data(
    buf: &mut Vec<u8>,
    at: usize,
    name: u32,
    ty: u32,
    off: u64,
    count: u64,
    reference: bool,
    endian: Endian,
) {
    put_u32(buf, at, name, endian);
    put_u32(buf, at + 0x04, ty, endian);
    put_u64(buf, at + 0x08, off, endian);
    put_u64(buf, at + 0x10, count, endian);
    if buf.len() < at + 0x20 {
        buf.resize(at + 0x20, 0);
    }
    buf[at + 0x18] = u8::from(reference);
}

fn put_dataset(
    buf: &mut Vec<u8>,
    at: usize,
    name: u32,
    data_off: u64,
    data_count: u64,
    child_off: u64,
    child_count: u64,
    endian: Endian,
) {
    put_u32(buf, at, name, endian);
    put_u64(buf, at + 0x08, data_off, endian);
    put_u64(buf, at + 0x10, data_count, endian);
    put_u64(buf, at + 0x18, child_off, endian);
    put_u64(buf, at + 0x20, child_count, endian);
}

/// Entry(0) --out/in--> Delay(1), with VariableFloat(2) "HealthMult"
/// = 0.5 supplying Delay's `duration` slot.
fn build_payload(endian: Endian) -> Vec<u8> {
    let mut p = Vec::new();

    // Graph record: three nodes at 0x30, 16-byte blob at 0x290.
    put_u64(&mut p, 0x00, 0x30, endian);
    put_u64(&mut p, 0x08, 3, endian);
    put_data(&mut p, 0x10, hash_str("data"), 0, 0x290, 16, false, endian);

    // Node 0: SequenceEntry with one output pin group.
    put_u32(&mut p, 0x30, hash_str("SequenceEntry"), endian);
    put_u32(&mut p, 0x38, 1, endian);
    put_dataset(&mut p, 0x40, hash_str("n0"), 0, 0, 0x0F0, 1, endian);

    // Node 1: Delay with a float parameter and a variable pin group.
    put_u32(&mut p, 0x70, hash_str("Delay"), endian);
    put_u32(&mut p, 0x78, 2, endian);
    put_dataset(&mut p, 0x80, hash_str("n1"), 0x210, 1, 0x180, 1, endian);

    // Node 2: VariableFloat with Name/Value records.
    put_u32(&mut p, 0xB0, hash_str("VariableFloat"), endian);
    put_u32(&mut p, 0xB8, 3, endian);
    put_dataset(&mut p, 0xC0, hash_str("n2"), 0x240, 2, 0, 0, endian);

    // Node 0 output_pins → pin "out" → descriptor pointing at blob[0].
    put_dataset(&mut p, 0x0F0, hash::OUTPUT_PINS, 0, 0, 0x120, 1, endian);
    put_dataset(&mut p, 0x120, hash_str("out"), 0x150, 1, 0, 0, endian);
    put_data(&mut p, 0x150, hash_str("in"), 0, 0x170, 4, false, endian);
    put_u32(&mut p, 0x170, 0, endian);

    // Node 1 variable_pins → pin "duration" → descriptor at blob[4].
    put_dataset(&mut p, 0x180, hash::VARIABLE_PINS, 0, 0, 0x1B0, 1, endian);
    put_dataset(&mut p, 0x1B0, hash_str("duration"), 0x1E0, 1, 0, 0, endian);
    put_data(&mut p, 0x1E0, hash_str("duration"), 0, 0x200, 4, false, endian);
    put_u32(&mut p, 0x200, 4, endian);

    // Node 1 parameter: duration = 0.25.
    put_data(&mut p, 0x210, hash_str("duration"), hash_str("float"), 0x230, 4, false, endian);
    put_f32(&mut p, 0x230, 0.25, endian);

    // Node 2 records: Name → blob[8], Value (reference) → blob[12].
    put_data(&mut p, 0x240, hash_str("Name"), hash_str("uint32"), 0x280, 4, false, endian);
    put_data(&mut p, 0x260, hash_str("Value"), hash_str("float"), 0x288, 4, true, endian);
    put_u32(&mut p, 0x280, 8, endian);
    put_u32(&mut p, 0x288, 12, endian);

    // Global blob: flow target, variable source, identity hash, value.
    put_u32(&mut p, 0x290, 1, endian);
    put_u32(&mut p, 0x294, 2, endian);
    put_u32(&mut p, 0x298, hash_str("HealthMult"), endian);
    put_f32(&mut p, 0x29C, 0.5, endian);
    p
}

fn build_file(endian: Endian) -> Vec<u8> {
    let magic = match endian {
        Endian::Little => 0x4144_4620,
        Endian::Big => 0x2046_4441,
    };
    let payload = build_payload(endian);
    let mut buf = Vec::new();
    put_u32(&mut buf, 0x00, magic, Endian::Little);
    put_u32(&mut buf, 0x04, 2, endian);
    put_u32(&mut buf, 0x08, 1, endian);
    put_u32(&mut buf, 0x0C, 0x18, endian);
    put_u32(&mut buf, 0x10, 0, endian);
    put_u32(&mut buf, 0x14, 0, endian);
    put_u32(&mut buf, 0x18, 0x100, endian);
    put_u32(&mut buf, 0x1C, 0x200, endian);
    put_u32(&mut buf, 0x20, 0x48, endian);
    put_u32(&mut buf, 0x24, payload.len() as u32, endian);
    buf.resize(0x48, 0);
    buf.extend_from_slice(&payload);
    buf
}

fn decode_view(bytes: &[u8]) -> ViewGraph {
    let adf = AdfFile::parse(bytes).unwrap();
    let instance = adf.first_instance().unwrap();
    let payload = adf.payload(instance).unwrap();
    let graph = script::decode(payload, adf.endian).unwrap();
    ViewGraph::build(&graph, adf.endian)
}

#[test]
fn test_full_pipeline_little_endian() {
    hash::register("HealthMult");
    let view = decode_view(&build_file(Endian::Little));

    assert_eq!(view.node_count(), 3);
    assert_eq!(view.nodes[0].class_name, "SequenceEntry");
    assert_eq!(view.nodes[1].class_name, "Delay");
    assert_eq!(view.nodes[2].class_name, "VariableFloat");

    // Edges: one flow through blob[0], one reversed variable through blob[4].
    assert_eq!(view.edge_count(), 2);
    let flow = view.edges.iter().find(|e| e.kind == EdgeKind::Flow).unwrap();
    assert_eq!(flow.source_index, 0);
    assert_eq!(flow.source_pin_hash, hash_str("out"));
    assert_eq!(flow.target_index, 1);
    assert_eq!(flow.target_pin_hash, hash_str("in"));
    let var = view.edges.iter().find(|e| e.kind == EdgeKind::Variable).unwrap();
    assert_eq!(var.source_index, 2);
    assert_eq!(var.target_index, 1);
    assert_eq!(var.source_pin_hash, hash_str("duration"));

    // Variable node displays resolve through the global blob.
    assert_eq!(view.nodes[2].parameters[0].display, "HealthMult");
    assert_eq!(view.nodes[2].parameters[1].display, "0.5000");
    // Ordinary parameters format in place.
    assert_eq!(view.nodes[1].parameters[0].display, "0.2500");

    // Chain occupies layers 0 and 1; the variable sits on its grid below.
    assert_eq!(view.nodes[0].position, Position::new(0.0, 0.0));
    assert_eq!(view.nodes[1].position, Position::new(360.0, 0.0));
    assert_eq!(view.nodes[2].position, Position::new(0.0, 160.0));
}

#[test]
fn test_endianness_parity() {
    hash::register("HealthMult");
    let le = decode_view(&build_file(Endian::Little));
    let be = decode_view(&build_file(Endian::Big));
    assert_eq!(le, be);
}

#[test]
fn test_decode_is_idempotent() {
    hash::register("HealthMult");
    let bytes = build_file(Endian::Little);
    assert_eq!(decode_view(&bytes), decode_view(&bytes));
}

#[test]
fn test_pin_groups_surface_on_nodes() {
    let view = decode_view(&build_file(Endian::Little));
    assert_eq!(view.nodes[0].output_pins.len(), 1);
    assert_eq!(view.nodes[0].output_pins[0].name, "out");
    assert_eq!(view.nodes[1].variable_pins.len(), 1);
    assert_eq!(view.nodes[1].variable_pins[0].name, "duration");
    assert!(view.nodes[1].input_pins.is_empty());
    assert_eq!(view.nodes[1].variable_pins[0].data.len(), 1);
}
