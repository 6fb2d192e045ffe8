// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// A conversion failure. Every variant aborts the whole conversion; there is
/// no partial output.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The profile store exposes no profile at index 0.
    #[error("profile store holds no profiles")]
    EmptyProfileStore,

    /// A function name has no entry in the name to source-path map.
    #[error("no source file recorded for function {function}")]
    MissingSourceFile { function: String },

    /// A function name never appears in the calling-context tree.
    #[error("no calling context recorded for function {function}")]
    MissingContext { function: String },

    /// The profile store has no value record for a resolved context id.
    #[error("no values recorded for context {ctx_id} of function {function}")]
    MissingValues { function: String, ctx_id: u64 },

    /// The value record exists but its execution slot is empty.
    #[error("no execution measurement for context {ctx_id} of function {function}")]
    MissingMetric { function: String, ctx_id: u64 },

    /// More strings than a string offset can address.
    #[error("string table outgrew the offset range")]
    StringTableOverflow,
}
