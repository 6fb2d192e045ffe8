// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The metadata store: program structure and the calling-context tree.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The metadata store of a recording.
///
/// Declaration order of `modules`, `functions`, and `files` is meaningful;
/// downstream consumers assign identifiers by position.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MetaDb {
    pub modules: Vec<Module>,
    pub functions: Vec<Function>,
    pub files: Vec<SourceFile>,
    pub context: ContextTree,
}

/// A load module (executable or shared object) observed in the recording.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Module {
    pub path: String,
}

/// A function observed in the recording.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Function {
    pub name: String,
    /// First line of the function's definition.
    pub line: i64,
    /// Path of the defining source file.
    pub file: String,
}

/// A source file observed in the recording.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SourceFile {
    pub path: String,
}

/// The calling-context tree as recorded, rooted at its entry points.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ContextTree {
    #[serde(default)]
    pub entry_points: Vec<ContextNode>,
}

/// One node of the calling-context tree.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ContextNode {
    pub ctx_id: u64,
    /// Name of the function this context executes, if any. Entry points
    /// commonly carry no function of their own.
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub children: Vec<ContextNode>,
}

impl MetaDb {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        crate::read_store(path.as_ref())
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_store() {
        let json = br#"{
            "modules": [{"path": "m.so"}],
            "functions": [{"name": "foo", "line": 10, "file": "f.c"}],
            "files": [{"path": "f.c"}],
            "context": {
                "entry_points": [{
                    "ctx_id": 1,
                    "children": [{"ctx_id": 7, "function": "foo"}]
                }]
            }
        }"#;
        let meta = MetaDb::from_slice(json).unwrap();

        assert_eq!(meta.modules, vec![Module { path: "m.so".into() }]);
        assert_eq!(meta.functions[0].name, "foo");
        assert_eq!(meta.functions[0].line, 10);
        assert_eq!(meta.files[0].path, "f.c");

        let entry = &meta.context.entry_points[0];
        assert_eq!(entry.function, None);
        assert_eq!(entry.children[0].ctx_id, 7);
        assert_eq!(entry.children[0].function.as_deref(), Some("foo"));
        assert!(entry.children[0].children.is_empty());
    }

    #[test]
    fn an_empty_tree_is_allowed() {
        let json = br#"{"modules": [], "functions": [], "files": [], "context": {}}"#;
        let meta = MetaDb::from_slice(json).unwrap();
        assert!(meta.context.entry_points.is_empty());
    }
}
