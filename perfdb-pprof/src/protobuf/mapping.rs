// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::protobuf::{Record, StringOffset, Value, WireType, NO_OPT_ZERO, OPT_ZERO};
use std::io::{self, Write};

/// Describes the mapping of a binary in memory, including its address range,
/// file offset, and metadata like build id. The `build_id` and `has_*`
/// fields are omitted; writers that never set them emit the same bytes
/// without them.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(test, derive(bolero::generator::TypeGenerator))]
pub struct Mapping {
    /// Unique nonzero id for the mapping.
    pub id: Record<u64, 1, NO_OPT_ZERO>,
    /// Address at which the binary (or DLL) is loaded into memory.
    pub memory_start: Record<u64, 2, OPT_ZERO>,
    /// The limit of the address range occupied by this mapping.
    pub memory_limit: Record<u64, 3, OPT_ZERO>,
    /// Offset in the binary that corresponds to the first mapped address.
    pub file_offset: Record<u64, 4, OPT_ZERO>,
    /// The object this entry is loaded from.
    pub filename: Record<StringOffset, 5, OPT_ZERO>,
}

/// # Safety
/// The Default implementation will return all zero-representations.
unsafe impl Value for Mapping {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn proto_len(&self) -> u64 {
        self.id.proto_len()
            + self.memory_start.proto_len()
            + self.memory_limit.proto_len()
            + self.file_offset.proto_len()
            + self.filename.proto_len()
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.id.encode(writer)?;
        self.memory_start.encode(writer)?;
        self.memory_limit.encode(writer)?;
        self.file_offset.encode(writer)?;
        self.filename.encode(writer)
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<&Mapping> for crate::protobuf::prost_impls::Mapping {
    fn from(mapping: &Mapping) -> Self {
        // If the prost file is regenerated, this may pick up new members.
        #[allow(clippy::needless_update)]
        Self {
            id: mapping.id.value,
            memory_start: mapping.memory_start.value,
            memory_limit: mapping.memory_limit.value,
            file_offset: mapping.file_offset.value,
            filename: mapping.filename.value.into(),
            ..Self::default()
        }
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<Mapping> for crate::protobuf::prost_impls::Mapping {
    fn from(mapping: Mapping) -> Self {
        Self::from(&mapping)
    }
}
