// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The calling-context-tree store: per-context metric breakdowns.

use crate::profile::MetricValues;
use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The calling-context-tree store of a recording.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CctDb {
    pub contexts: Vec<ContextValues>,
}

/// Measurements recorded for one calling context, keyed by metric id.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ContextValues {
    pub ctx_id: u64,
    #[serde(default)]
    pub values: BTreeMap<u32, MetricValues>,
}

impl CctDb {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        crate::read_store(path.as_ref())
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
