// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Lookup maps derived from the metadata store. All three are built once and
//! read-only afterwards. They key by name or path text, which is not unique
//! in the stores; wherever two entries collide the last one in declaration
//! or traversal order wins, and the entity builders depend on exactly that.

use perfdb::meta::{ContextNode, ContextTree, MetaDb};
use rustc_hash::FxHashMap;

/// Maps each function name to the path of its declared source file.
pub fn source_files(meta: &MetaDb) -> FxHashMap<&str, &str> {
    let mut paths = FxHashMap::default();
    for function in &meta.functions {
        paths.insert(function.name.as_str(), function.file.as_str());
    }
    paths
}

/// Maps each source-file path to its position in the file list.
pub fn file_positions(meta: &MetaDb) -> FxHashMap<&str, usize> {
    let mut positions = FxHashMap::default();
    for (index, file) in meta.files.iter().enumerate() {
        positions.insert(file.path.as_str(), index);
    }
    positions
}

/// Maps each function name to a context id from the calling-context tree.
///
/// Walks depth first starting at every entry point's immediate children,
/// entry points and children both in declaration order. A node's context id
/// is recorded under its function name before its children are visited;
/// nodes without a function are traversed for their descendants only. The
/// entry points themselves are never recorded.
pub fn contexts(tree: &ContextTree) -> FxHashMap<&str, u64> {
    let mut map = FxHashMap::default();
    for entry_point in &tree.entry_points {
        for child in &entry_point.children {
            visit(child, &mut map);
        }
    }
    map
}

fn visit<'a>(node: &'a ContextNode, map: &mut FxHashMap<&'a str, u64>) {
    if let Some(function) = &node.function {
        map.insert(function.as_str(), node.ctx_id);
    }
    for child in &node.children {
        visit(child, map);
    }
}
