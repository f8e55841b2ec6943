//! Tag-map to ERP form mapping
//!
//! A pure function from the aggregated entity spans onto a freshly
//! defaulted [`FormDocument`]. Scalar fields take the first span of
//! their category (document order); list-like fields take every span;
//! a few fields join multiple spans with a fixed separator. Values are
//! copied as-is, no validation of dates or prices happens here.

use tripdesk_core::{EntityCategory, FormDocument, TagMap};

/// Fixed suffix appended to the hotel name to build the product name
pub const PRODUCT_NAME_SUFFIX: &str = " 프리미엄 패키지";

/// Label prefixing the price note written into `details.others`
pub const PRICE_NOTE_LABEL: &str = "가격 정보: ";

/// Populate the fixed ERP schema from an aggregated tag map.
///
/// Categories absent from the map leave their fields at schema default.
pub fn map_to_form(tags: &TagMap) -> FormDocument {
    let mut form = FormDocument::default();

    if let Some(city) = first(tags, EntityCategory::City) {
        form.location_info.city = city.clone();
    }

    if let Some(name) = first(tags, EntityCategory::HotelName) {
        form.hotels[0].name_kr = name.clone();
        form.product_info.product_name = format!("{name}{PRODUCT_NAME_SUFFIX}");
    }
    if let Some(grade) = first(tags, EntityCategory::HotelGrade) {
        form.hotels[0].grade = grade.clone();
    }
    if let Some(location) = first(tags, EntityCategory::HotelLoc) {
        form.hotels[0].location = location.clone();
    }

    if let Some(name) = first(tags, EntityCategory::GolfName) {
        form.golf_courses[0].name_kr = name.clone();
    }
    if let Some(ops) = tags.get(&EntityCategory::GolfOp) {
        form.golf_courses[0].operation_info = ops.join(", ");
    }

    if let Some(airline) = first(tags, EntityCategory::FlightName) {
        form.flight_info.airline = airline.clone();
    }
    if let Some(number) = first(tags, EntityCategory::FlightNum) {
        form.flight_info.flight_number = number.clone();
    }
    if let Some(time) = first(tags, EntityCategory::DepartTime) {
        form.flight_info.departure_time = time.clone();
    }

    if let Some(date) = first(tags, EntityCategory::Date) {
        form.product_info.event_period.start_date = date.clone();
    }

    if let Some(inclusions) = tags.get(&EntityCategory::Inclusion) {
        form.details.inclusions = inclusions.clone();
    }
    if let Some(exclusions) = tags.get(&EntityCategory::Exclusion) {
        form.details.exclusions = exclusions.clone();
    }

    if let Some(refunds) = tags.get(&EntityCategory::Refund) {
        form.policies.cancellation_refund = refunds.join(" ");
    }

    if let Some(prices) = tags.get(&EntityCategory::Price) {
        form.details.others = format!("{PRICE_NOTE_LABEL}{}", prices.join(", "));
    }

    form
}

/// First span of a category, when present
fn first(tags: &TagMap, category: EntityCategory) -> Option<&String> {
    tags.get(&category).and_then(|spans| spans.first())
}

// ============================================================================
// Tests
// ============================================================================
