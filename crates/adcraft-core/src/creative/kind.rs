//! The closed set of creative artifacts the generator can produce.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Category of creative being generated.
///
/// Serialized in lowercase (`"copy"`, `"visual"`, `"campaign"`) both in storage
/// and on the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CreativeKind {
    /// Ad copy: headlines and body text.
    Copy,
    /// Visual concept descriptions for designers.
    Visual,
    /// A multi-channel campaign strategy.
    Campaign,
}

impl CreativeKind {
    /// Label used in record titles, e.g. `"Ad Copy for Running Shoes"`.
    pub fn title_label(self) -> &'static str {
        match self {
            Self::Copy => "Ad Copy",
            Self::Visual => "Visual Concepts",
            Self::Campaign => "Campaign Strategy",
        }
    }

    /// Human-readable label shown when a generation succeeds.
    pub fn success_label(self) -> &'static str {
        match self {
            Self::Copy => "Ad copy generated",
            Self::Visual => "Visual concepts generated",
            Self::Campaign => "Campaign strategy generated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_round_trips_through_strings() {
        for kind in CreativeKind::iter() {
            let parsed = CreativeKind::from_str(&kind.to_string()).unwrap();
            assert_eq!(parsed, kind);
        }
        assert!(CreativeKind::from_str("banner").is_err());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&CreativeKind::Campaign).unwrap();
        assert_eq!(json, "\"campaign\"");
    }
}
