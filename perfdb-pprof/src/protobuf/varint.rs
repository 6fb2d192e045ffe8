// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::protobuf::{StringOffset, Value, Varint, WireType};
use std::io::{self, Write};

/// # Safety
/// The Default implementation will return all zero-representations.
unsafe impl Value for u64 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn proto_len(&self) -> u64 {
        // https://github.com/google/protobuf/blob/3.3.x/src/google/protobuf/io/coded_stream.h#L1301-L1309
        ((((self | 1).leading_zeros() ^ 63) * 9 + 73) / 64) as u64
    }

    /// Encodes a [`varint`] according to protobuf semantics.
    ///
    /// Serialization happens one byte at a time; use a buffered writer.
    ///
    /// [`varint`]: https://protobuf.dev/programming-guides/encoding/#varints
    #[inline]
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut value = *self;
        loop {
            let byte = if value < 0x80 {
                value as u8
            } else {
                ((value & 0x7F) | 0x80) as u8
            };
            writer.write_all(&[byte])?;
            if value < 0x80 {
                return Ok(());
            }
            value >>= 7;
        }
    }
}

/// # Safety
/// The Default implementation will return all zero-representations.
unsafe impl Value for i64 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn proto_len(&self) -> u64 {
        (*self as u64).proto_len()
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        (*self as u64).encode(writer)
    }
}

unsafe impl Varint for u64 {}
unsafe impl Varint for i64 {}
unsafe impl Varint for StringOffset {}

/// Packed encoding for repeated varint fields.
///
/// # Safety
/// The Default implementation is the empty slice, which encodes to nothing.
unsafe impl<T: Varint> Value for &'_ [T] {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn proto_len(&self) -> u64 {
        self.iter().map(Value::proto_len).sum()
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for value in self.iter() {
            value.encode(writer)?;
        }
        Ok(())
    }
}

/// # Safety
/// The Default implementation is the empty vector, which encodes to nothing.
unsafe impl<T: Varint> Value for Vec<T> {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn proto_len(&self) -> u64 {
        self.as_slice().proto_len()
    }

    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.as_slice().encode(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_range() {
        assert_eq!(0u64.proto_len(), 1);
        assert_eq!(0x7Fu64.proto_len(), 1);
        assert_eq!(0x80u64.proto_len(), 2);
        assert_eq!(u64::MAX.proto_len(), 10);
    }

    #[test]
    fn test_negative_sticks_to_ten_bytes() {
        assert_eq!((-1i64).proto_len(), 10);
    }

    #[test]
    fn test_packed_matches_elementwise() {
        let values = vec![0u64, 1, 127, 128, u64::MAX];
        let mut packed = Vec::new();
        values.encode(&mut packed).unwrap();

        let mut elementwise = Vec::new();
        for value in &values {
            value.encode(&mut elementwise).unwrap();
        }
        assert_eq!(packed, elementwise);
        assert_eq!(values.proto_len(), packed.len() as u64);
    }
}
