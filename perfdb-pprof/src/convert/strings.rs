// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::convert::ConvertError;
use crate::protobuf::StringOffset;
use perfdb::meta::MetaDb;

/// The fixed head of every string table, in order. Offset 0 is the required
/// empty string; offsets 1 through 4 are the labels the sample types refer
/// to.
pub const RESERVED: [&str; 5] = ["", "samples", "count", "cpu", "nanoseconds"];

pub const SAMPLES: StringOffset = StringOffset::new(1);
pub const COUNT: StringOffset = StringOffset::new(2);
pub const CPU: StringOffset = StringOffset::new(3);
pub const NANOSECONDS: StringOffset = StringOffset::new(4);

/// A contiguous run of string-table offsets assigned to one metadata
/// category. Built once, read-only afterwards.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct IdRange {
    first: u32,
    len: u32,
}

impl IdRange {
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset of the category's index-th entry. The index must be in range;
    /// callers iterate the same metadata list the range was built from.
    pub fn offset(&self, index: usize) -> StringOffset {
        debug_assert!(index < self.len as usize);
        StringOffset::new(self.first + index as u32)
    }
}

/// The order-significant string table of one output document.
///
/// Entries are appended and never deduplicated, so the same text can occupy
/// several offsets; entities refer to entries by offset only. After the
/// reserved head come the module paths, then function names, then file
/// paths, each in metadata declaration order. Module paths are carried in
/// the table but nothing downstream refers to them by offset.
#[derive(Debug)]
pub struct StringTable {
    strings: Vec<String>,
    function_names: IdRange,
    file_paths: IdRange,
}

impl StringTable {
    pub fn build(meta: &MetaDb) -> Result<Self, ConvertError> {
        let total = RESERVED.len()
            + meta.modules.len()
            + meta.functions.len()
            + meta.files.len();
        let mut strings = Vec::with_capacity(total);
        strings.extend(RESERVED.iter().map(|s| s.to_string()));

        append(&mut strings, meta.modules.iter().map(|m| m.path.as_str()))?;
        let function_names =
            append(&mut strings, meta.functions.iter().map(|f| f.name.as_str()))?;
        let file_paths = append(&mut strings, meta.files.iter().map(|f| f.path.as_str()))?;

        Ok(Self {
            strings,
            function_names,
            file_paths,
        })
    }

    /// The text stored at an offset handed out by one of the ranges.
    pub fn get(&self, offset: StringOffset) -> &str {
        &self.strings[usize::from(offset)]
    }

    pub fn function_names(&self) -> IdRange {
        self.function_names
    }

    pub fn file_paths(&self) -> IdRange {
        self.file_paths
    }

    pub fn into_strings(self) -> Vec<String> {
        self.strings
    }
}

fn append<'a>(
    strings: &mut Vec<String>,
    items: impl Iterator<Item = &'a str>,
) -> Result<IdRange, ConvertError> {
    let first = offset_of(strings.len())?;
    strings.extend(items.map(str::to_string));
    let end = offset_of(strings.len())?;
    Ok(IdRange {
        first,
        len: end - first,
    })
}

fn offset_of(index: usize) -> Result<u32, ConvertError> {
    u32::try_from(index).map_err(|_| ConvertError::StringTableOverflow)
}
