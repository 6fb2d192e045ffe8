// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::protobuf::{Record, Value, WireType, NO_OPT_ZERO, OPT_ZERO};
use std::io::{self, Write};

/// Describes function and line table debug information. This only supports a
/// single Line, whereas protobuf supports zero or more; every location the
/// translation emits names exactly one source line.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(test, derive(bolero::generator::TypeGenerator))]
pub struct Location {
    /// Unique nonzero id for the location. A profile could use instruction
    /// addresses or any integer sequence as ids.
    pub id: Record<u64, 1, NO_OPT_ZERO>,
    /// The id of the corresponding profile.Mapping for this location.
    /// It can be unset if the mapping is unknown or not applicable for
    /// this profile type.
    pub mapping_id: Record<u64, 2, OPT_ZERO>,
    /// The instruction address for this location, if available.
    pub address: Record<u64, 3, OPT_ZERO>,
    pub line: Record<Line, 4, OPT_ZERO>,
}

/// Represents function and line number information. Omits column.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(test, derive(bolero::generator::TypeGenerator))]
pub struct Line {
    /// The id of the corresponding profile.Function for this line.
    pub function_id: Record<u64, 1, OPT_ZERO>,
    /// Line number in source code.
    pub lineno: Record<i64, 2, OPT_ZERO>,
}

/// # Safety
/// The Default implementation will return all zero-representations.
unsafe impl Value for Line {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn proto_len(&self) -> u64 {
        self.function_id.proto_len() + self.lineno.proto_len()
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.function_id.encode(writer)?;
        self.lineno.encode(writer)
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<Line> for crate::protobuf::prost_impls::Line {
    fn from(line: Line) -> Self {
        // If the prost file is regenerated, this may pick up new members,
        // such as column.
        #[allow(clippy::needless_update)]
        Self {
            function_id: line.function_id.value,
            line: line.lineno.value,
            ..Self::default()
        }
    }
}

/// # Safety
/// The Default implementation will return all zero-representations.
unsafe impl Value for Location {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn proto_len(&self) -> u64 {
        self.id.proto_len()
            + self.mapping_id.proto_len()
            + self.address.proto_len()
            + self.line.proto_len()
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.id.encode(writer)?;
        self.mapping_id.encode(writer)?;
        self.address.encode(writer)?;
        self.line.encode(writer)
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<&Location> for crate::protobuf::prost_impls::Location {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.value,
            mapping_id: location.mapping_id.value,
            address: location.address.value,
            lines: if location.line == Default::default() {
                Vec::new()
            } else {
                vec![crate::protobuf::prost_impls::Line::from(location.line.value)]
            },
            is_folded: false,
        }
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<Location> for crate::protobuf::prost_impls::Location {
    fn from(location: Location) -> Self {
        Self::from(&location)
    }
}
