use serde::{Deserialize, Serialize};

/// Normalized transport mode for a hydrated segment (§4.H, final paragraph).
/// Matches case-insensitively against both the Russian and English forms the
/// underlying edge metadata can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportTypeTag {
    Airplane,
    Bus,
    Train,
    Ferry,
    Taxi,
    Unknown,
}

impl TransportTypeTag {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "самолет" | "plane" | "airplane" => TransportTypeTag::Airplane,
            "автобус" | "bus" => TransportTypeTag::Bus,
            "поезд" | "train" => TransportTypeTag::Train,
            "паром" | "ferry" => TransportTypeTag::Ferry,
            "такси" | "taxi" => TransportTypeTag::Taxi,
            _ => TransportTypeTag::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_russian_and_english_forms() {
        assert_eq!(TransportTypeTag::from_tag("PLANE"), TransportTypeTag::Airplane);
        assert_eq!(TransportTypeTag::from_tag("самолет"), TransportTypeTag::Airplane);
        assert_eq!(TransportTypeTag::from_tag("Bus"), TransportTypeTag::Bus);
        assert_eq!(TransportTypeTag::from_tag("паром"), TransportTypeTag::Ferry);
    }

    #[test]
    fn unrecognized_tag_is_unknown() {
        assert_eq!(TransportTypeTag::from_tag("rocket"), TransportTypeTag::Unknown);
    }
}
