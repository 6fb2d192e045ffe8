// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Translation from the perfdb stores to the profile document.
//!
//! The pipeline has three stages. First the string table is laid out: the
//! reserved head, then every module path, function name, and file path in
//! declaration order, with no deduplication. Then the lookup maps are
//! derived from the metadata: function name to source path, source path to
//! file-list position, and function name to calling-context id. Finally the
//! entity builders run over the function and file index spaces and the
//! document is assembled. Any lookup that fails aborts the conversion;
//! nothing is skipped or zero-filled.

pub mod entities;
pub mod resolve;
pub mod strings;

mod error;

pub use error::ConvertError;

use crate::protobuf::Profile;
use perfdb::meta::MetaDb;
use perfdb::profile::ProfileDb;
use strings::StringTable;

/// Translates one recording into a profile document.
///
/// `meta` describes the program and its calling-context tree; `profiles`
/// holds the measured values, of which profile 0 is consumed. The returned
/// document owns all of its data and can outlive both stores.
pub fn convert(meta: &MetaDb, profiles: &ProfileDb) -> Result<Profile, ConvertError> {
    let table = StringTable::build(meta)?;
    let source_files = resolve::source_files(meta);
    let file_positions = resolve::file_positions(meta);
    let contexts = resolve::contexts(&meta.context);

    let function = entities::functions(meta, &table);
    let mapping = entities::mappings(&table);
    let location = entities::locations(meta, &table, &source_files, &file_positions)?;
    let sample = entities::samples(profiles, &table, &contexts, &location)?;

    Ok(Profile {
        sample_type: entities::sample_types().to_vec(),
        sample,
        mapping,
        location,
        function,
        string_table: table.into_strings(),
    })
}
