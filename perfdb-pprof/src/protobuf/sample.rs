// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::protobuf::{Record, Value, WireType, NO_OPT_ZERO};
use std::io::{self, Write};

/// Each Sample records values encountered in some program context. The
/// program context is typically a stack trace, perhaps augmented with
/// auxiliary information like the thread-id, some indicator of a higher level
/// request being handled, etc.
///
/// It owns its data so the assembled document can outlive the stores it was
/// translated from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(test, derive(bolero::generator::TypeGenerator))]
pub struct Sample {
    /// The ids recorded here correspond to a Profile.location.id.
    /// The leaf is at location_id\[0\].
    pub location_ids: Record<Vec<u64>, 1, NO_OPT_ZERO>,
    /// The type and unit of each value is defined by the corresponding entry
    /// in Profile.sample_type. All samples must have the same number of
    /// values, the same as the length of Profile.sample_type. When
    /// aggregating multiple samples into a single sample, the result has a
    /// list of values that is the element-wise sum of the original lists.
    pub values: Record<Vec<i64>, 2, NO_OPT_ZERO>,
}

impl Sample {
    pub fn new(location_ids: Vec<u64>, values: Vec<i64>) -> Self {
        Self {
            location_ids: Record::from(location_ids),
            values: Record::from(values),
        }
    }
}

/// # Safety
/// The Default implementation will return all zero-representations.
unsafe impl Value for Sample {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn proto_len(&self) -> u64 {
        self.location_ids.proto_len() + self.values.proto_len()
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.location_ids.encode(writer)?;
        self.values.encode(writer)
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<&Sample> for crate::protobuf::prost_impls::Sample {
    fn from(sample: &Sample) -> Self {
        // If the prost file is regenerated, this may pick up new members.
        #[allow(clippy::needless_update)]
        Self {
            location_ids: sample.location_ids.value.clone(),
            values: sample.values.value.clone(),
            ..Self::default()
        }
    }
}

#[cfg(any(test, feature = "prost_impls"))]
impl From<Sample> for crate::protobuf::prost_impls::Sample {
    fn from(sample: Sample) -> Self {
        Self::from(&sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protobuf::prost_impls;
    use prost::Message;

    #[track_caller]
    fn test(sample: &Sample) {
        let prost_sample = prost_impls::Sample::from(sample);

        let mut buffer = Vec::with_capacity(sample.proto_len() as usize);
        sample.encode(&mut buffer).unwrap();
        let roundtrip = prost_impls::Sample::decode(buffer.as_slice()).unwrap();
        assert_eq!(prost_sample, roundtrip);

        let mut buffer2 = Vec::with_capacity(prost_sample.encoded_len());
        prost_sample.encode(&mut buffer2).unwrap();
        let roundtrip2 = prost_impls::Sample::decode(buffer2.as_slice()).unwrap();
        assert_eq!(roundtrip, roundtrip2);
    }

    #[test]
    fn empty() {
        let sample = Sample::new(Vec::new(), Vec::new());
        let prost_sample = prost_impls::Sample {
            location_ids: vec![],
            values: vec![],
        };

        let mut buffer = Vec::with_capacity(sample.proto_len() as usize);
        sample.encode(&mut buffer).unwrap();
        let roundtrip = prost_impls::Sample::decode(buffer.as_slice()).unwrap();
        assert_eq!(prost_sample, roundtrip);
    }

    #[test]
    fn roundtrip() {
        bolero::check!().with_type::<Sample>().for_each(test);
    }
}
