//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all identifiers in the TEM Stack. These prevent
//! accidental identifier confusion — you cannot pass a `LandingId` where
//! a `VesselId` is expected, even though both wrap UUIDs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fishing vessel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VesselId(Uuid);

/// Unique identifier for one recorded landing (a single trip's delivery).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LandingId(Uuid);

/// Unique identifier for an inter-vessel quota transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferId(Uuid);

/// Unique identifier for an immutable penalty assessment record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(Uuid);

macro_rules! impl_uuid_id {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $ty {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::from_str(s).map(Self)
            }
        }
    };
}

impl_uuid_id!(VesselId, "vessel");
impl_uuid_id!(LandingId, "landing");
impl_uuid_id!(TransferId, "transfer");
impl_uuid_id!(AssessmentId, "assessment");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_ids_are_distinct() {
        assert_ne!(VesselId::new(), VesselId::new());
        assert_ne!(LandingId::new(), LandingId::new());
    }

    #[test]
    fn test_display_carries_namespace_prefix() {
        let id = VesselId::new();
        assert!(id.to_string().starts_with("vessel:"));
        let id = TransferId::new();
        assert!(id.to_string().starts_with("transfer:"));
    }

    #[test]
    fn test_from_str_round_trip() {
        let id = LandingId::new();
        let parsed = LandingId::from_str(&id.as_uuid().to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(VesselId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let id = AssessmentId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: AssessmentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
