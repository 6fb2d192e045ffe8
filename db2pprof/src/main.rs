// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use anyhow::Context;
use clap::{command, Arg};
use env_logger::Builder;
use log::{debug, info};
use perfdb::cct::CctDb;
use perfdb::meta::MetaDb;
use perfdb::profile::ProfileDb;
use std::env;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

fn init_logging() {
    let log_level = env::var("RUST_LOG")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());
    let level_filter = log::LevelFilter::from_str(&log_level).unwrap_or(log::LevelFilter::Info);
    Builder::new().filter_level(level_filter).init();
}

/// Writes the document bytes beside the destination and renames them into
/// place, so an interrupted run never leaves a truncated output file.
fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp_file = tempfile::NamedTempFile::new_in(dir)?;
    tmp_file.write_all(bytes)?;
    tmp_file.persist(path)?;
    Ok(())
}

#[allow(clippy::unwrap_used)]
fn main() -> anyhow::Result<()> {
    init_logging();

    let matches = command!()
        .arg(
            Arg::new("meta")
                .long("meta")
                .value_name("PATH")
                .default_value("meta.json")
                .help("the metadata store to read"),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .value_name("PATH")
                .default_value("profile.json")
                .help("the profile store to read"),
        )
        .arg(
            Arg::new("cct")
                .long("cct")
                .value_name("PATH")
                .default_value("cct.json")
                .help("the calling-context-tree store to read"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .default_value("db2pprof.pb")
                .help("the path to save the profile to"),
        )
        .get_matches();

    let meta_path = matches.get_one::<String>("meta").unwrap();
    let profile_path = matches.get_one::<String>("profile").unwrap();
    let cct_path = matches.get_one::<String>("cct").unwrap();
    let output_path = matches.get_one::<String>("output").unwrap();

    info!("reading stores {meta_path}, {profile_path}, {cct_path}");
    let meta = MetaDb::from_file(meta_path)
        .with_context(|| format!("loading metadata store {meta_path}"))?;
    let profiles = ProfileDb::from_file(profile_path)
        .with_context(|| format!("loading profile store {profile_path}"))?;
    // The cct store is validated on load; measured values come from the
    // profile store.
    let cct = CctDb::from_file(cct_path)
        .with_context(|| format!("loading calling-context-tree store {cct_path}"))?;
    debug!(
        "stores hold {} functions, {} files, {} profiles, {} context value sets",
        meta.functions.len(),
        meta.files.len(),
        profiles.profiles.len(),
        cct.contexts.len()
    );

    let document = perfdb_pprof::convert(&meta, &profiles)?;
    debug!(
        "document holds {} samples, {} locations, {} mappings, {} strings",
        document.sample.len(),
        document.location.len(),
        document.mapping.len(),
        document.string_table.len()
    );

    let bytes = document.encode_to_vec()?;
    write_output(Path::new(output_path), &bytes)
        .with_context(|| format!("writing profile to {output_path}"))?;
    info!("wrote {} bytes to {output_path}", bytes.len());

    Ok(())
}
