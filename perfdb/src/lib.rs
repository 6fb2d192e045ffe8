// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Object graphs for the perfdb stores.
//!
//! A perfdb recording is split across three stores: the metadata store
//! ([`meta::MetaDb`]) describing modules, functions, source files, and the
//! calling-context tree; the profile store ([`profile::ProfileDb`]) holding
//! measured metric values keyed by context id; and the calling-context-tree
//! store ([`cct::CctDb`]) holding per-context breakdowns. Each store is
//! materialized from its JSON form with `from_file` or `from_slice`.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod cct;
pub mod meta;
pub mod profile;

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Failed to materialize a store from its serialized form.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store file could not be read.
    #[error("failed to read store {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store contents did not match the expected object graph.
    #[error("malformed store")]
    Parse(#[from] serde_json::Error),
}

fn read_store<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let bytes = std::fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}
