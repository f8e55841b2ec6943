//! BIO tag aggregation
//!
//! Reconstructs contiguous entity spans from the per-token label
//! sequence with a single left-to-right scan. The scan state is an
//! explicit enum so the edge cases (orphan `I-`, end-of-sequence flush)
//! stay auditable:
//!
//! - `B-<cat>` flushes any open span and opens a new one.
//! - `I-<cat>` of the open category appends the de-sub-worded surface
//!   form with no separator.
//! - `O`, or an `I-` that does not match the open category, flushes.
//!   An orphan `I-` never opens a span and never raises.

use tripdesk_core::{BioLabel, EntityCategory, TagMap};

use crate::TaggedToken;

/// Scan state: either outside any entity, or inside an open span
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Outside,
    Open {
        category: EntityCategory,
        text: String,
    },
}

impl ScanState {
    /// Move an open span into the map, leaving the state `Outside`
    fn flush_into(&mut self, map: &mut TagMap) {
        if let ScanState::Open { category, text } = std::mem::replace(self, ScanState::Outside) {
            map.entry(category).or_default().push(text);
        }
    }
}

/// Aggregate a token/label sequence into per-category span lists.
///
/// Span order follows document order; same-category spans accumulate
/// and are never merged or deduplicated.
pub fn aggregate(tokens: &[TaggedToken]) -> TagMap {
    let mut map = TagMap::new();
    let mut state = ScanState::Outside;

    for token in tokens {
        match token.label {
            BioLabel::Begin(category) => {
                state.flush_into(&mut map);
                state = ScanState::Open {
                    category,
                    text: token.surface().to_string(),
                };
            }
            BioLabel::Inside(category) => match &mut state {
                ScanState::Open {
                    category: open,
                    text,
                } if *open == category => {
                    text.push_str(token.surface());
                }
                // Orphan I- or category mismatch: treated like O
                _ => state.flush_into(&mut map),
            },
            BioLabel::Outside => state.flush_into(&mut map),
        }
    }

    state.flush_into(&mut map);
    map
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tok(text: &str, label: &str) -> TaggedToken {
        TaggedToken::new(text, BioLabel::parse(label).unwrap())
    }

    #[test]
    fn test_subword_continuation_joins_without_separator() {
        let tokens = vec![
            tok("Seoul", "B-CITY"),
            tok("trip", "O"),
            tok("Lotte", "B-HOTEL_NAME"),
            tok("##Hotel", "I-HOTEL_NAME"),
        ];

        let map = aggregate(&tokens);
        assert_eq!(map[&EntityCategory::City], vec!["Seoul"]);
        assert_eq!(map[&EntityCategory::HotelName], vec!["LotteHotel"]);
    }

    #[test]
    fn test_orphan_inside_is_dropped() {
        let tokens = vec![tok("유령", "I-PRICE"), tok("끝", "O")];
        assert!(aggregate(&tokens).is_empty());
    }

    #[test]
    fn test_inside_of_other_category_flushes_open_span() {
        let tokens = vec![
            tok("롯데", "B-HOTEL_NAME"),
            tok("##호텔", "I-HOTEL_NAME"),
            tok("##소풍", "I-CITY"),
            tok("서울", "B-CITY"),
        ];

        let map = aggregate(&tokens);
        assert_eq!(map[&EntityCategory::HotelName], vec!["롯데호텔"]);
        // The mismatched I-CITY opened nothing; only the B-CITY span exists
        assert_eq!(map[&EntityCategory::City], vec!["서울"]);
    }

    #[test]
    fn test_adjacent_begins_both_emitted() {
        let tokens = vec![tok("다낭", "B-CITY"), tok("서울", "B-CITY")];
        let map = aggregate(&tokens);
        assert_eq!(map[&EntityCategory::City], vec!["다낭", "서울"]);
    }

    #[test]
    fn test_open_span_flushed_at_end_of_sequence() {
        let tokens = vec![tok("1,500,000", "B-PRICE"), tok("##원", "I-PRICE")];
        let map = aggregate(&tokens);
        assert_eq!(map[&EntityCategory::Price], vec!["1,500,000원"]);
    }

    #[test]
    fn test_duplicate_spans_not_deduplicated() {
        let tokens = vec![
            tok("조식", "B-INCLUSION"),
            tok("x", "O"),
            tok("조식", "B-INCLUSION"),
        ];
        let map = aggregate(&tokens);
        assert_eq!(map[&EntityCategory::Inclusion], vec!["조식", "조식"]);
    }

    // ------------------------------------------------------------------
    // Property tests
    // ------------------------------------------------------------------

    fn arb_label() -> impl Strategy<Value = BioLabel> {
        (0..tripdesk_core::LABEL_COUNT).prop_map(|id| BioLabel::from_id(id).unwrap())
    }

    fn arb_tokens() -> impl Strategy<Value = Vec<TaggedToken>> {
        prop::collection::vec(("[a-z가-힣]{1,4}", arb_label()), 0..40)
            .prop_map(|pairs| {
                pairs
                    .into_iter()
                    .map(|(text, label)| TaggedToken::new(text, label))
                    .collect()
            })
    }

    proptest! {
        /// A category appears in the map only if some B- of it appeared
        #[test]
        fn prop_every_span_has_a_begin(tokens in arb_tokens()) {
            let map = aggregate(&tokens);
            for category in map.keys() {
                let has_begin = tokens
                    .iter()
                    .any(|t| t.label == BioLabel::Begin(*category));
                prop_assert!(has_begin, "span without B- for {category}");
            }
        }

        /// Re-tagging the flattened spans as all-B- and aggregating
        /// again reproduces the same map
        #[test]
        fn prop_aggregation_idempotent(tokens in arb_tokens()) {
            let map = aggregate(&tokens);

            let retagged: Vec<TaggedToken> = map
                .iter()
                .flat_map(|(category, spans)| {
                    spans.iter().map(|span| {
                        TaggedToken::new(span.clone(), BioLabel::Begin(*category))
                    })
                })
                .collect();

            prop_assert_eq!(aggregate(&retagged), map);
        }
    }
}
