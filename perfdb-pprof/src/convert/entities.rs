// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Builders for the five entity lists of the output document. The four
//! positional builders iterate the function or file index space in order and
//! assign ids densely starting at 1, so an entity's id always equals its
//! one-based position in its list.

use crate::convert::strings::{StringTable, COUNT, CPU, NANOSECONDS, SAMPLES};
use crate::convert::ConvertError;
use crate::protobuf::{Function, Line, Location, Mapping, Record, Sample, ValueType};
use perfdb::meta::MetaDb;
use perfdb::profile::{MetricScope, ProfileDb};
use rustc_hash::FxHashMap;

/// Measured values arrive in seconds; samples carry nanoseconds.
pub const NANOS_PER_SECOND: f64 = 1e9;

/// The fixed pair of sample types: an occurrence count and cpu time in
/// nanoseconds. Constant for every document, independent of the input.
pub fn sample_types() -> [ValueType; 2] {
    [
        ValueType::new(SAMPLES, COUNT),
        ValueType::new(CPU, NANOSECONDS),
    ]
}

/// One function entity per metadata function. The recorded name doubles as
/// the system name since the stores carry no mangled form, and the filename
/// stays unset.
pub fn functions(meta: &MetaDb, table: &StringTable) -> Vec<Function> {
    let names = table.function_names();
    meta.functions
        .iter()
        .enumerate()
        .map(|(index, function)| Function {
            id: Record::from(index as u64 + 1),
            name: Record::from(names.offset(index)),
            system_name: Record::from(names.offset(index)),
            start_line: Record::from(function.line),
            ..Function::default()
        })
        .collect()
}

/// One mapping entity per source file. The stores carry no load addresses,
/// so the memory range and file offset stay zero.
pub fn mappings(table: &StringTable) -> Vec<Mapping> {
    let paths = table.file_paths();
    (0..paths.len())
        .map(|index| Mapping {
            id: Record::from(index as u64 + 1),
            filename: Record::from(paths.offset(index)),
            ..Mapping::default()
        })
        .collect()
}

/// One location entity per function, each with a single line record naming
/// the function's own id and first line.
///
/// The mapping id is the zero-based position of the function's source path
/// in the file list, not the one-based id of the mapping built from that
/// position; readers of these documents expect the position form, so it is
/// kept. A path that never appears in the file list falls back to 0.
pub fn locations(
    meta: &MetaDb,
    table: &StringTable,
    source_files: &FxHashMap<&str, &str>,
    file_positions: &FxHashMap<&str, usize>,
) -> Result<Vec<Location>, ConvertError> {
    let names = table.function_names();
    let mut locations = Vec::with_capacity(meta.functions.len());
    for (index, function) in meta.functions.iter().enumerate() {
        let name = table.get(names.offset(index));
        let path = source_files
            .get(name)
            .copied()
            .ok_or_else(|| ConvertError::MissingSourceFile {
                function: name.to_string(),
            })?;
        let mapping_id = file_positions.get(path).copied().unwrap_or(0) as u64;

        let id = index as u64 + 1;
        locations.push(Location {
            id: Record::from(id),
            mapping_id: Record::from(mapping_id),
            line: Record::from(Line {
                function_id: Record::from(id),
                lineno: Record::from(function.line),
            }),
            ..Location::default()
        });
    }
    Ok(locations)
}

/// One sample entity per function: the function's location id plus the fixed
/// value pair of occurrence count and cpu nanoseconds.
///
/// Values come from profile 0 of the profile store, keyed by the context id
/// the context resolver retained for the function's name. A name without a
/// context, a context without values, or an empty execution slot aborts the
/// conversion.
pub fn samples(
    profiles: &ProfileDb,
    table: &StringTable,
    contexts: &FxHashMap<&str, u64>,
    locations: &[Location],
) -> Result<Vec<Sample>, ConvertError> {
    let profile = profiles
        .profiles
        .first()
        .ok_or(ConvertError::EmptyProfileStore)?;

    let names = table.function_names();
    let mut samples = Vec::with_capacity(names.len());
    for index in 0..names.len() {
        let name = table.get(names.offset(index));
        let ctx_id = contexts
            .get(name)
            .copied()
            .ok_or_else(|| ConvertError::MissingContext {
                function: name.to_string(),
            })?;
        let values = profile
            .values
            .get(&ctx_id)
            .ok_or_else(|| ConvertError::MissingValues {
                function: name.to_string(),
                ctx_id,
            })?;
        let seconds =
            values
                .get(MetricScope::Execution)
                .ok_or_else(|| ConvertError::MissingMetric {
                    function: name.to_string(),
                    ctx_id,
                })?;

        let nanos = (seconds * NANOS_PER_SECOND) as i64;
        samples.push(Sample::new(vec![locations[index].id.value], vec![1, nanos]));
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::resolve;
    use crate::protobuf::StringOffset;
    use perfdb::meta::{ContextNode, ContextTree, Function as MetaFunction, Module, SourceFile};
    use perfdb::profile::{MetricValues, ProfileInfo};

    fn meta() -> MetaDb {
        MetaDb {
            modules: vec![Module { path: "m.so".into() }],
            functions: vec![MetaFunction {
                name: "foo".into(),
                line: 10,
                file: "f.c".into(),
            }],
            files: vec![SourceFile { path: "f.c".into() }],
            context: ContextTree {
                entry_points: vec![ContextNode {
                    ctx_id: 1,
                    function: None,
                    children: vec![ContextNode {
                        ctx_id: 7,
                        function: Some("foo".into()),
                        children: vec![],
                    }],
                }],
            },
        }
    }

    fn profile_db(ctx_id: u64, seconds: f64) -> ProfileDb {
        let mut values = MetricValues::EMPTY;
        values.set(MetricScope::Execution, seconds);
        let mut info = ProfileInfo::default();
        info.values.insert(ctx_id, values);
        ProfileDb {
            profiles: vec![info],
        }
    }

    #[test]
    fn sample_types_are_constant() {
        let [first, second] = sample_types();
        assert_eq!(first, ValueType::new(StringOffset::new(1), StringOffset::new(2)));
        assert_eq!(second, ValueType::new(StringOffset::new(3), StringOffset::new(4)));
    }

    #[test]
    fn function_reuses_its_name_as_system_name() {
        let meta = meta();
        let table = StringTable::build(&meta).unwrap();
        let functions = functions(&meta, &table);

        assert_eq!(functions.len(), 1);
        let function = &functions[0];
        assert_eq!(function.id.value, 1);
        assert_eq!(function.name.value, StringOffset::new(6));
        assert_eq!(function.system_name.value, function.name.value);
        assert_eq!(function.filename.value, StringOffset::ZERO);
        assert_eq!(function.start_line.value, 10);
    }

    #[test]
    fn mapping_carries_only_id_and_filename() {
        let meta = meta();
        let table = StringTable::build(&meta).unwrap();
        let mappings = mappings(&table);

        assert_eq!(mappings.len(), 1);
        let mapping = &mappings[0];
        assert_eq!(mapping.id.value, 1);
        assert_eq!(mapping.filename.value, StringOffset::new(7));
        assert_eq!(mapping.memory_start.value, 0);
        assert_eq!(mapping.memory_limit.value, 0);
        assert_eq!(mapping.file_offset.value, 0);
    }

    #[test]
    fn location_mapping_id_is_the_file_position() {
        let meta = meta();
        let table = StringTable::build(&meta).unwrap();
        let source_files = resolve::source_files(&meta);
        let file_positions = resolve::file_positions(&meta);

        let locations = locations(&meta, &table, &source_files, &file_positions).unwrap();
        assert_eq!(locations.len(), 1);
        let location = &locations[0];
        assert_eq!(location.id.value, 1);
        // The file sits at position 0 even though the mapping built from it
        // has id 1.
        assert_eq!(location.mapping_id.value, 0);
        assert_eq!(location.line.value.function_id.value, 1);
        assert_eq!(location.line.value.lineno.value, 10);
    }

    #[test]
    fn location_with_unlisted_path_falls_back_to_zero() {
        let mut meta = meta();
        meta.files.clear();
        let table = StringTable::build(&meta).unwrap();
        let source_files = resolve::source_files(&meta);
        let file_positions = resolve::file_positions(&meta);

        let locations = locations(&meta, &table, &source_files, &file_positions).unwrap();
        assert_eq!(locations[0].mapping_id.value, 0);
    }

    #[test]
    fn sample_scales_seconds_to_nanoseconds() {
        let meta = meta();
        let table = StringTable::build(&meta).unwrap();
        let contexts = resolve::contexts(&meta.context);
        let source_files = resolve::source_files(&meta);
        let file_positions = resolve::file_positions(&meta);
        let locations = locations(&meta, &table, &source_files, &file_positions).unwrap();

        let samples = samples(&profile_db(7, 2.5), &table, &contexts, &locations).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].location_ids.value, vec![1]);
        assert_eq!(samples[0].values.value, vec![1, 2_500_000_000]);
    }

    #[test]
    fn sample_truncates_toward_zero() {
        let meta = meta();
        let table = StringTable::build(&meta).unwrap();
        let contexts = resolve::contexts(&meta.context);
        let source_files = resolve::source_files(&meta);
        let file_positions = resolve::file_positions(&meta);
        let locations = locations(&meta, &table, &source_files, &file_positions).unwrap();

        let samples =
            samples(&profile_db(7, 0.000000001999), &table, &contexts, &locations).unwrap();
        assert_eq!(samples[0].values.value, vec![1, 1]);
    }

    #[test]
    fn missing_context_fails_the_conversion() {
        let mut meta = meta();
        meta.context.entry_points.clear();
        let table = StringTable::build(&meta).unwrap();
        let contexts = resolve::contexts(&meta.context);
        let source_files = resolve::source_files(&meta);
        let file_positions = resolve::file_positions(&meta);
        let locations = locations(&meta, &table, &source_files, &file_positions).unwrap();

        let err = samples(&profile_db(7, 2.5), &table, &contexts, &locations).unwrap_err();
        assert_eq!(
            err,
            ConvertError::MissingContext {
                function: "foo".into()
            }
        );
    }

    #[test]
    fn missing_values_fail_the_conversion() {
        let meta = meta();
        let table = StringTable::build(&meta).unwrap();
        let contexts = resolve::contexts(&meta.context);
        let source_files = resolve::source_files(&meta);
        let file_positions = resolve::file_positions(&meta);
        let locations = locations(&meta, &table, &source_files, &file_positions).unwrap();

        // Values recorded for ctx 9, but "foo" resolves to ctx 7.
        let err = samples(&profile_db(9, 2.5), &table, &contexts, &locations).unwrap_err();
        assert_eq!(
            err,
            ConvertError::MissingValues {
                function: "foo".into(),
                ctx_id: 7
            }
        );
    }

    #[test]
    fn missing_execution_slot_fails_the_conversion() {
        let meta = meta();
        let table = StringTable::build(&meta).unwrap();
        let contexts = resolve::contexts(&meta.context);
        let source_files = resolve::source_files(&meta);
        let file_positions = resolve::file_positions(&meta);
        let locations = locations(&meta, &table, &source_files, &file_positions).unwrap();

        let mut values = MetricValues::EMPTY;
        values.set(MetricScope::Point, 2.5);
        let mut info = ProfileInfo::default();
        info.values.insert(7, values);
        let profiles = ProfileDb {
            profiles: vec![info],
        };

        let err = samples(&profiles, &table, &contexts, &locations).unwrap_err();
        assert_eq!(
            err,
            ConvertError::MissingMetric {
                function: "foo".into(),
                ctx_id: 7
            }
        );
    }

    #[test]
    fn empty_profile_store_fails_the_conversion() {
        let meta = meta();
        let table = StringTable::build(&meta).unwrap();
        let contexts = resolve::contexts(&meta.context);
        let source_files = resolve::source_files(&meta);
        let file_positions = resolve::file_positions(&meta);
        let locations = locations(&meta, &table, &source_files, &file_positions).unwrap();

        let err = samples(&ProfileDb::default(), &table, &contexts, &locations).unwrap_err();
        assert_eq!(err, ConvertError::EmptyProfileStore);
    }
}
