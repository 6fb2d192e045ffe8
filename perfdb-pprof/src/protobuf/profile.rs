// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::protobuf::{
    Function, Location, Mapping, Sample, Tag, Value, ValueType, WireType,
};
use std::io::{self, Write};

/// The whole profile document. Field names follow the profiles schema; each
/// `Vec` is a repeated field and the entry at string_table\[0\] must be the
/// empty string.
///
/// Profiles are assembled once and then encoded in one pass, so unlike the
/// entity serializers this type owns all of its data.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(test, derive(bolero::generator::TypeGenerator))]
pub struct Profile {
    pub sample_type: Vec<ValueType>,
    pub sample: Vec<Sample>,
    pub mapping: Vec<Mapping>,
    pub location: Vec<Location>,
    pub function: Vec<Function>,
    pub string_table: Vec<String>,
}

/// Length of one record with a runtime field number. Repeated fields emit
/// one record per element under the same number, which the const-generic
/// [`crate::protobuf::Record`] cannot express.
fn record_len<T: Value>(field: u32, value: &T) -> u64 {
    debug_assert!(T::WIRE_TYPE == WireType::LengthDelimited);
    let proto_len = value.proto_len();
    Tag::new(field, T::WIRE_TYPE).proto_len() + proto_len.proto_len() + proto_len
}

fn encode_record<T: Value, W: Write>(field: u32, value: &T, writer: &mut W) -> io::Result<()> {
    debug_assert!(T::WIRE_TYPE == WireType::LengthDelimited);
    Tag::new(field, T::WIRE_TYPE).encode(writer)?;
    value.proto_len().encode(writer)?;
    value.encode(writer)
}

impl Profile {
    /// The number of bytes the encoded document takes.
    pub fn proto_len(&self) -> u64 {
        let mut len = 0;
        for value_type in &self.sample_type {
            len += record_len(1, value_type);
        }
        for sample in &self.sample {
            len += record_len(2, sample);
        }
        for mapping in &self.mapping {
            len += record_len(3, mapping);
        }
        for location in &self.location {
            len += record_len(4, location);
        }
        for function in &self.function {
            len += record_len(5, function);
        }
        for string in &self.string_table {
            len += record_len(6, &string.as_str());
        }
        len
    }

    /// Encode the document to the in-wire protobuf format.
    ///
    /// Serialization often happens one byte at a time, so a buffered writer
    /// should probably be used.
    pub fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for value_type in &self.sample_type {
            encode_record(1, value_type, writer)?;
        }
        for sample in &self.sample {
            encode_record(2, sample, writer)?;
        }
        for mapping in &self.mapping {
            encode_record(3, mapping, writer)?;
        }
        for location in &self.location {
            encode_record(4, location, writer)?;
        }
        for function in &self.function {
            encode_record(5, function, writer)?;
        }
        for string in &self.string_table {
            encode_record(6, &string.as_str(), writer)?;
        }
        Ok(())
    }

    /// Encode the document into a freshly sized buffer.
    pub fn encode_to_vec(&self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(self.proto_len() as usize);
        self.encode(&mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<&Profile> for crate::protobuf::prost_impls::Profile {
    fn from(profile: &Profile) -> Self {
        // If the prost file is regenerated, this may pick up new members.
        #[allow(clippy::needless_update)]
        Self {
            sample_types: profile.sample_type.iter().map(Into::into).collect(),
            samples: profile.sample.iter().map(Into::into).collect(),
            mappings: profile.mapping.iter().map(Into::into).collect(),
            locations: profile.location.iter().map(Into::into).collect(),
            functions: profile.function.iter().map(Into::into).collect(),
            string_table: profile.string_table.clone(),
            ..Self::default()
        }
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<Profile> for crate::protobuf::prost_impls::Profile {
    fn from(profile: Profile) -> Self {
        Self::from(&profile)
    }
}
