//! The eight life dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownDimension;

/// One of the eight fixed life-tracking categories.
///
/// Declaration order is significant: it is the iteration order of
/// [`Dimension::ALL`] and the tie-break order for most/least active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Transact,
    Invest,
    Assist,
    Learn,
    Health,
    Family,
    Relationships,
    Ego,
}

/// Static display metadata for a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionInfo {
    /// Display name.
    pub name: &'static str,
    /// Accent color as a hex string.
    pub color: &'static str,
    /// One-sentence description shown on the detail screen.
    pub description: &'static str,
    /// Material icon name.
    pub icon: &'static str,
}

const TRANSACT: DimensionInfo = DimensionInfo {
    name: "Transact",
    color: "#2D9CDB",
    description: "Maintaining stable income through jobs or advisory work to support yourself and your family financially.",
    icon: "attach-money",
};

const INVEST: DimensionInfo = DimensionInfo {
    name: "Invest",
    color: "#30837D",
    description: "Putting time, money, or effort into activities that will grow and compound in value over time.",
    icon: "trending-up",
};

const ASSIST: DimensionInfo = DimensionInfo {
    name: "Assist",
    color: "#F5A623",
    description: "Intentionally helping people through mentoring, feedback, writing, or other forms of support.",
    icon: "volunteer-activism",
};

const LEARN: DimensionInfo = DimensionInfo {
    name: "Learn",
    color: "#8B5CF6",
    description: "Actively learning new skills and knowledge needed to improve your output and stay relevant.",
    icon: "school",
};

const HEALTH: DimensionInfo = DimensionInfo {
    name: "Health",
    color: "#EB5757",
    description: "Maintaining physical and mental health through exercise, meditation, and constant wellness experimentation.",
    icon: "fitness-center",
};

const FAMILY: DimensionInfo = DimensionInfo {
    name: "Family",
    color: "#F5A623",
    description: "Being purposeful about carving out meaningful time with your partner and children.",
    icon: "family-restroom",
};

const RELATIONSHIPS: DimensionInfo = DimensionInfo {
    name: "Relationships",
    color: "#E91E63",
    description: "Consciously investing effort in building and maintaining relationships with interesting people.",
    icon: "group",
};

const EGO: DimensionInfo = DimensionInfo {
    name: "Ego / Self",
    color: "#30837D",
    description: "Creating micro-moments of happiness through gratitude practices and activities that bring you joy.",
    icon: "face",
};

impl Dimension {
    /// All dimensions in declaration order.
    pub const ALL: [Dimension; 8] = [
        Dimension::Transact,
        Dimension::Invest,
        Dimension::Assist,
        Dimension::Learn,
        Dimension::Health,
        Dimension::Family,
        Dimension::Relationships,
        Dimension::Ego,
    ];

    /// Number of dimensions.
    pub const COUNT: usize = 8;

    /// Lowercase key used on the wire and in storage.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Transact => "transact",
            Dimension::Invest => "invest",
            Dimension::Assist => "assist",
            Dimension::Learn => "learn",
            Dimension::Health => "health",
            Dimension::Family => "family",
            Dimension::Relationships => "relationships",
            Dimension::Ego => "ego",
        }
    }

    /// Display metadata.
    pub fn info(self) -> &'static DimensionInfo {
        match self {
            Dimension::Transact => &TRANSACT,
            Dimension::Invest => &INVEST,
            Dimension::Assist => &ASSIST,
            Dimension::Learn => &LEARN,
            Dimension::Health => &HEALTH,
            Dimension::Family => &FAMILY,
            Dimension::Relationships => &RELATIONSHIPS,
            Dimension::Ego => &EGO,
        }
    }

    /// Position in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a dimension by its exact storage key.
    ///
    /// Unlike [`FromStr`], this does not trim or fold case.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::from_key(&normalized).ok_or_else(|| UnknownDimension(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for dimension in Dimension::ALL {
            assert_eq!(dimension.key().parse::<Dimension>(), Ok(dimension));
        }
    }

    #[test]
    fn test_from_str_is_lenient_about_case_and_whitespace() {
        assert_eq!(" Health ".parse::<Dimension>(), Ok(Dimension::Health));
        assert_eq!("EGO".parse::<Dimension>(), Ok(Dimension::Ego));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "wealth".parse::<Dimension>().unwrap_err();
        assert_eq!(err, UnknownDimension("wealth".to_string()));
        assert_eq!(err.to_string(), "unknown dimension: wealth");
    }

    #[test]
    fn test_from_key_is_exact() {
        assert_eq!(Dimension::from_key("family"), Some(Dimension::Family));
        assert_eq!(Dimension::from_key("Family"), None);
    }

    #[test]
    fn test_index_follows_declaration_order() {
        for (i, dimension) in Dimension::ALL.iter().enumerate() {
            assert_eq!(dimension.index(), i);
        }
    }

    #[test]
    fn test_info() {
        assert_eq!(Dimension::Ego.info().name, "Ego / Self");
        assert_eq!(Dimension::Health.info().color, "#EB5757");
        assert_eq!(Dimension::Learn.info().icon, "school");
    }

    #[test]
    fn test_serde_uses_lowercase_key() {
        let json = serde_json::to_string(&Dimension::Relationships).unwrap();
        assert_eq!(json, "\"relationships\"");
        let parsed: Dimension = serde_json::from_str("\"invest\"").unwrap();
        assert_eq!(parsed, Dimension::Invest);
    }
}
