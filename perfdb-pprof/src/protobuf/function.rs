// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::protobuf::{Record, StringOffset, Value, WireType, NO_OPT_ZERO, OPT_ZERO};
use std::io::{self, Write};

/// Describes a function, which can appear in any number of Lines.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(test, derive(bolero::generator::TypeGenerator))]
pub struct Function {
    /// Unique nonzero id for the function.
    pub id: Record<u64, 1, NO_OPT_ZERO>,
    /// Name of the function, in human-readable form if available.
    pub name: Record<StringOffset, 2, OPT_ZERO>,
    /// Name of the function, as identified by the system. For instance,
    /// it can be a C++ mangled name.
    pub system_name: Record<StringOffset, 3, OPT_ZERO>,
    /// Source file containing the function.
    pub filename: Record<StringOffset, 4, OPT_ZERO>,
    /// Line number in source file.
    pub start_line: Record<i64, 5, OPT_ZERO>,
}

/// # Safety
/// The Default implementation will return all zero-representations.
unsafe impl Value for Function {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn proto_len(&self) -> u64 {
        self.id.proto_len()
            + self.name.proto_len()
            + self.system_name.proto_len()
            + self.filename.proto_len()
            + self.start_line.proto_len()
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.id.encode(writer)?;
        self.name.encode(writer)?;
        self.system_name.encode(writer)?;
        self.filename.encode(writer)?;
        self.start_line.encode(writer)
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<&Function> for crate::protobuf::prost_impls::Function {
    fn from(function: &Function) -> Self {
        // If the prost file is regenerated, this may pick up new members.
        #[allow(clippy::needless_update)]
        Self {
            id: function.id.value,
            name: function.name.value.into(),
            system_name: function.system_name.value.into(),
            filename: function.filename.value.into(),
            start_line: function.start_line.value,
            ..Self::default()
        }
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<Function> for crate::protobuf::prost_impls::Function {
    fn from(function: Function) -> Self {
        Self::from(&function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protobuf::prost_impls;
    use prost::Message;

    #[track_caller]
    fn test(function: &Function) {
        let prost_function = prost_impls::Function::from(function);

        let mut buffer = Vec::with_capacity(function.proto_len() as usize);
        function.encode(&mut buffer).unwrap();
        let roundtrip = prost_impls::Function::decode(buffer.as_slice()).unwrap();
        assert_eq!(prost_function, roundtrip);

        let mut buffer2 = Vec::with_capacity(prost_function.encoded_len());
        prost_function.encode(&mut buffer2).unwrap();
        let roundtrip2 = prost_impls::Function::decode(buffer2.as_slice()).unwrap();
        assert_eq!(roundtrip, roundtrip2);
    }

    #[test]
    fn basic() {
        let function = Function {
            id: Record::from(1),
            name: Record::from(StringOffset::new(6)),
            system_name: Record::from(StringOffset::new(6)),
            filename: Record::default(),
            start_line: Record::from(10),
        };
        test(&function);
    }

    #[test]
    fn roundtrip() {
        bolero::check!().with_type::<Function>().for_each(test);
    }
}
