// crates/tilesets-core/src/precision.rs

use crate::error::TilesetsError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// User-facing granularity label for area estimation.
///
/// Each level maps to a fixed zoom; the table is a lookup, not a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Precision {
    TenMeters,
    OneMeter,
    ThirtyCentimeters,
    OneCentimeter,
}

impl Precision {
    pub const ALL: [Precision; 4] = [
        Precision::TenMeters,
        Precision::OneMeter,
        Precision::ThirtyCentimeters,
        Precision::OneCentimeter,
    ];

    /// Zoom level the tiles are burned at.
    pub const fn zoom(self) -> u8 {
        match self {
            Precision::TenMeters => 6,
            Precision::OneMeter => 11,
            Precision::ThirtyCentimeters => 14,
            Precision::OneCentimeter => 17,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Precision::TenMeters => "10m",
            Precision::OneMeter => "1m",
            Precision::ThirtyCentimeters => "30cm",
            Precision::OneCentimeter => "1cm",
        }
    }
}

impl FromStr for Precision {
    type Err = TilesetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Precision::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| TilesetsError::PrecisionRange(s.to_string()))
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Precision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_table() {
        assert_eq!("10m".parse::<Precision>().unwrap().zoom(), 6);
        assert_eq!("1m".parse::<Precision>().unwrap().zoom(), 11);
        assert_eq!("30cm".parse::<Precision>().unwrap().zoom(), 14);
        assert_eq!("1cm".parse::<Precision>().unwrap().zoom(), 17);
    }

    #[test]
    fn rejects_unknown_labels() {
        for bad in ["100m", "", "10M", "1 m"] {
            let err = bad.parse::<Precision>().unwrap_err();
            assert!(matches!(err, TilesetsError::PrecisionRange(ref s) if s == bad));
        }
    }

    #[test]
    fn label_round_trips_through_display() {
        for p in Precision::ALL {
            assert_eq!(p.to_string().parse::<Precision>().unwrap(), p);
        }
    }
}
