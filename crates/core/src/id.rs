// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Integer identifier newtypes.
//!
//! Records are keyed by store-assigned integers. A record that has not been
//! persisted yet carries the `-1` sentinel.

/// Raw value of an identifier that has not been assigned by the store.
pub const INVALID_ID: i64 = -1;

/// Define a newtype ID wrapper around `i64`.
///
/// Generates `new()`, `get()`, `is_valid()`, `INVALID`, `Default` (the
/// sentinel), `Display`, `From<i64>` and `PartialEq<i64>` implementations.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct MyId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Identifier of a record that has not been persisted yet.
            pub const INVALID: Self = Self($crate::id::INVALID_ID);

            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn get(&self) -> i64 {
                self.0
            }

            /// Whether the store has assigned this identifier.
            pub fn is_valid(&self) -> bool {
                self.0 != $crate::id::INVALID_ID
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl PartialEq<i64> for $name {
            fn eq(&self, other: &i64) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id! {
    /// Identifier of an alarm definition.
    pub struct AlarmId;
}

define_id! {
    /// Identifier of one materialized firing of an alarm.
    pub struct InstanceId;
}

define_id! {
    /// Identifier of a countdown timer.
    pub struct TimerId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
