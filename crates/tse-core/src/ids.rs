use core::fmt;
use serde::{Deserialize, Serialize};

/// A substance/species/equipment identifier.
///
/// Data-driven catalogs key everything by string id rather than a
/// compact integer index: substances, burners, AC units and air
/// handlers are all loaded from independent JSON files and referenced
/// by the id declared in the file, not by load order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id(String);

impl Id {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Domain-specific id aliases for clarity (no runtime cost).
pub type SpeciesId = Id;
pub type SubstanceId = Id;
pub type BurnerId = Id;
pub type AcUnitId = Id;
pub type AirHandlerId = Id;
pub type ExperimentId = Id;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        let id = Id::new("water");
        assert_eq!(id.as_str(), "water");
        assert_eq!(id.to_string(), "water");
    }

    #[test]
    fn ids_compare_by_value() {
        assert_eq!(Id::new("water"), Id::from("water"));
        assert_ne!(Id::new("water"), Id::new("ethanol"));
    }
}
