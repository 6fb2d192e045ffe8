// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The profile store: measured metric values keyed by calling context.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The profile store of a recording.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ProfileDb {
    pub profiles: Vec<ProfileInfo>,
}

/// One measured profile: metric values keyed by calling-context id.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ProfileInfo {
    pub values: BTreeMap<u64, MetricValues>,
}

/// Which program construct a measured value is attributed to.
///
/// The variants double as slot indices into a [`MetricValues`] record, so
/// their discriminants are part of the store format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MetricScope {
    Point = 0,
    Function = 1,
    LexAware = 2,
    Execution = 3,
}

impl MetricScope {
    /// Number of slots in a [`MetricValues`] record.
    pub const COUNT: usize = 4;

    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// A fixed-size record of per-scope measurements. Slots with no measurement
/// hold nothing rather than zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MetricValues([Option<f64>; MetricScope::COUNT]);

impl MetricValues {
    pub const EMPTY: Self = Self([None; MetricScope::COUNT]);

    pub fn get(&self, scope: MetricScope) -> Option<f64> {
        self.0[scope.slot()]
    }

    pub fn set(&mut self, scope: MetricScope, value: f64) {
        self.0[scope.slot()] = Some(value);
    }
}

impl From<[Option<f64>; MetricScope::COUNT]> for MetricValues {
    fn from(slots: [Option<f64>; MetricScope::COUNT]) -> Self {
        Self(slots)
    }
}

impl ProfileDb {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        crate::read_store(path.as_ref())
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_store() {
        let json = br#"{"profiles": [{"values": {"7": [null, null, null, 2.5]}}]}"#;
        let db = ProfileDb::from_slice(json).unwrap();

        let values = db.profiles[0].values[&7];
        assert_eq!(values.get(MetricScope::Execution), Some(2.5));
        assert_eq!(values.get(MetricScope::Point), None);
    }

    #[test]
    fn slots_are_independent() {
        let mut values = MetricValues::EMPTY;
        values.set(MetricScope::Function, 1.25);

        assert_eq!(values.get(MetricScope::Function), Some(1.25));
        for scope in [
            MetricScope::Point,
            MetricScope::LexAware,
            MetricScope::Execution,
        ] {
            assert_eq!(values.get(scope), None);
        }
    }

    #[test]
    fn records_serialize_as_bare_slots() {
        let values = MetricValues::from([None, None, None, Some(2.5)]);
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, "[null,null,null,2.5]");
    }
}
