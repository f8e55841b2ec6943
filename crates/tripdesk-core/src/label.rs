//! Entity label inventory for the quotation NER model
//!
//! The model classifies each sub-word token into one of 31 labels: the
//! outside label `O` plus `B-`/`I-` pairs for 15 entity categories. The
//! id ordering here must match the label list the model was trained
//! with; changing it silently mislabels every prediction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Total number of labels the token-classification head predicts over
pub const LABEL_COUNT: usize = 1 + CATEGORY_ORDER.len() * 2;

/// Entity categories recognized in quotation documents
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityCategory {
    HotelName,
    HotelGrade,
    HotelLoc,
    GolfName,
    GolfOp,
    FlightName,
    FlightNum,
    DepartTime,
    Price,
    Inclusion,
    Exclusion,
    Refund,
    Date,
    City,
    Note,
}

/// Categories in training order; id assignment depends on this ordering
const CATEGORY_ORDER: [EntityCategory; 15] = [
    EntityCategory::HotelName,
    EntityCategory::HotelGrade,
    EntityCategory::HotelLoc,
    EntityCategory::GolfName,
    EntityCategory::GolfOp,
    EntityCategory::FlightName,
    EntityCategory::FlightNum,
    EntityCategory::DepartTime,
    EntityCategory::Price,
    EntityCategory::Inclusion,
    EntityCategory::Exclusion,
    EntityCategory::Refund,
    EntityCategory::Date,
    EntityCategory::City,
    EntityCategory::Note,
];

impl EntityCategory {
    /// Canonical tag-name form (e.g. `HOTEL_NAME`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HotelName => "HOTEL_NAME",
            Self::HotelGrade => "HOTEL_GRADE",
            Self::HotelLoc => "HOTEL_LOC",
            Self::GolfName => "GOLF_NAME",
            Self::GolfOp => "GOLF_OP",
            Self::FlightName => "FLIGHT_NAME",
            Self::FlightNum => "FLIGHT_NUM",
            Self::DepartTime => "DEPART_TIME",
            Self::Price => "PRICE",
            Self::Inclusion => "INCLUSION",
            Self::Exclusion => "EXCLUSION",
            Self::Refund => "REFUND",
            Self::Date => "DATE",
            Self::City => "CITY",
            Self::Note => "NOTE",
        }
    }

    /// Parse a canonical tag name back into a category
    pub fn from_str_opt(s: &str) -> Option<Self> {
        CATEGORY_ORDER.iter().copied().find(|c| c.as_str() == s)
    }

    /// All categories in training order
    pub fn all() -> &'static [EntityCategory] {
        &CATEGORY_ORDER
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A BIO-scheme label as predicted per token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioLabel {
    /// Non-entity token
    Outside,
    /// First token of an entity span
    Begin(EntityCategory),
    /// Continuation token of an entity span
    Inside(EntityCategory),
}

impl BioLabel {
    /// Map a model output id to its label.
    ///
    /// Id 0 is `O`; ids 1..31 are `B-`/`I-` pairs in training order.
    /// Ids outside the table return `None` (callers treat as `O`).
    pub fn from_id(id: usize) -> Option<Self> {
        if id == 0 {
            return Some(Self::Outside);
        }
        if id >= LABEL_COUNT {
            return None;
        }
        let category = CATEGORY_ORDER[(id - 1) / 2];
        if (id - 1) % 2 == 0 {
            Some(Self::Begin(category))
        } else {
            Some(Self::Inside(category))
        }
    }

    /// Inverse of [`from_id`](Self::from_id)
    pub fn to_id(&self) -> usize {
        match self {
            Self::Outside => 0,
            Self::Begin(cat) | Self::Inside(cat) => {
                let idx = CATEGORY_ORDER
                    .iter()
                    .position(|c| c == cat)
                    .unwrap_or_default();
                let offset = if matches!(self, Self::Begin(_)) { 0 } else { 1 };
                1 + idx * 2 + offset
            }
        }
    }

    /// Parse the string form (`O`, `B-HOTEL_NAME`, `I-PRICE`, ...)
    pub fn parse(s: &str) -> Option<Self> {
        if s == "O" {
            return Some(Self::Outside);
        }
        if let Some(cat) = s.strip_prefix("B-") {
            return EntityCategory::from_str_opt(cat).map(Self::Begin);
        }
        if let Some(cat) = s.strip_prefix("I-") {
            return EntityCategory::from_str_opt(cat).map(Self::Inside);
        }
        None
    }
}

impl std::fmt::Display for BioLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outside => write!(f, "O"),
            Self::Begin(cat) => write!(f, "B-{cat}"),
            Self::Inside(cat) => write!(f, "I-{cat}"),
        }
    }
}

/// Mapping from entity category to its span texts, in document order.
///
/// Spans of the same category are accumulated, never deduplicated.
pub type TagMap = BTreeMap<EntityCategory, Vec<String>>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_count_matches_training_inventory() {
        assert_eq!(LABEL_COUNT, 31);
    }

    #[test]
    fn test_id_table_training_order() {
        assert_eq!(BioLabel::from_id(0), Some(BioLabel::Outside));
        assert_eq!(
            BioLabel::from_id(1),
            Some(BioLabel::Begin(EntityCategory::HotelName))
        );
        assert_eq!(
            BioLabel::from_id(2),
            Some(BioLabel::Inside(EntityCategory::HotelName))
        );
        assert_eq!(
            BioLabel::from_id(30),
            Some(BioLabel::Inside(EntityCategory::Note))
        );
        assert_eq!(BioLabel::from_id(31), None);
    }

    #[test]
    fn test_id_round_trip_all_labels() {
        for id in 0..LABEL_COUNT {
            let label = BioLabel::from_id(id).unwrap();
            assert_eq!(label.to_id(), id);
        }
    }

    #[test]
    fn test_string_round_trip() {
        for id in 0..LABEL_COUNT {
            let label = BioLabel::from_id(id).unwrap();
            assert_eq!(BioLabel::parse(&label.to_string()), Some(label));
        }
        assert_eq!(BioLabel::parse("B-NOPE"), None);
        assert_eq!(BioLabel::parse("X-CITY"), None);
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&EntityCategory::HotelName).unwrap();
        assert_eq!(json, "\"HOTEL_NAME\"");
        let json = serde_json::to_string(&EntityCategory::GolfOp).unwrap();
        assert_eq!(json, "\"GOLF_OP\"");
    }

    #[test]
    fn test_tag_map_keys_serialize_as_category_names() {
        let mut map = TagMap::new();
        map.insert(EntityCategory::City, vec!["서울".to_string()]);
        let json = serde_json::to_value(&map).unwrap();
        assert!(json.get("CITY").is_some());
    }
}
