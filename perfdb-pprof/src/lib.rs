// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! Translates a perfdb recording into a [`pprof`]-shaped profile.
//!
//! The entry point is [`convert::convert`], which takes the materialized
//! metadata and profile stores and produces a [`protobuf::Profile`] document
//! holding the string table, functions, locations, mappings, samples, and
//! sample types. The document owns all of its data and is encoded to the
//! in-wire protobuf format with [`protobuf::Profile::encode`].
//!
//! [`pprof`]: https://github.com/google/pprof/blob/main/proto/profile.proto

pub mod convert;
pub mod protobuf;

pub use convert::{convert, ConvertError};
