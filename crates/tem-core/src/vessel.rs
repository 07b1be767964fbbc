//! # Vessel Record
//!
//! A registered fishing vessel. Vessels are created and maintained by the
//! registration surface (API/CLI); the compliance engine only reads them,
//! and only the hull length matters to it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::VesselId;

/// A fishing vessel registered with the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    /// Unique vessel identifier.
    pub id: VesselId,
    /// Vessel name (e.g., "F/V Pacific Star").
    pub name: String,
    /// State or federal registration number, when known.
    pub registration_number: Option<String>,
    /// Hull length in feet. Vessels under the program cutoff are exempt
    /// from four-trip averaging.
    pub hull_length_ft: f64,
    /// Whether the vessel is currently active in the program.
    pub active: bool,
}

impl Vessel {
    /// Create a new vessel record with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Rejects an empty name or a non-positive/non-finite hull length.
    pub fn new(name: impl Into<String>, hull_length_ft: f64) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if !hull_length_ft.is_finite() || hull_length_ft <= 0.0 {
            return Err(ValidationError::new(
                "hull_length_ft",
                format!("must be a positive length in feet, got {hull_length_ft}"),
            ));
        }
        Ok(Self {
            id: VesselId::new(),
            name,
            registration_number: None,
            hull_length_ft,
            active: true,
        })
    }

    /// Attach a registration number.
    pub fn with_registration(mut self, registration_number: impl Into<String>) -> Self {
        self.registration_number = Some(registration_number.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vessel() {
        let vessel = Vessel::new("F/V Pacific Star", 85.0).unwrap();
        assert_eq!(vessel.name, "F/V Pacific Star");
        assert_eq!(vessel.hull_length_ft, 85.0);
        assert!(vessel.active);
        assert!(vessel.registration_number.is_none());
    }

    #[test]
    fn test_with_registration() {
        let vessel = Vessel::new("F/V Arctic Dawn", 72.0)
            .unwrap()
            .with_registration("AK-4471");
        assert_eq!(vessel.registration_number.as_deref(), Some("AK-4471"));
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(Vessel::new("", 85.0).is_err());
        assert!(Vessel::new("   ", 85.0).is_err());
    }

    #[test]
    fn test_rejects_bad_hull_length() {
        assert!(Vessel::new("F/V Test", 0.0).is_err());
        assert!(Vessel::new("F/V Test", -60.0).is_err());
        assert!(Vessel::new("F/V Test", f64::NAN).is_err());
    }
}
