//! The fixed ERP form schema for a travel product entry
//!
//! The downstream business system expects this exact nested shape, so
//! defaults are centralized here rather than assembled inline at the
//! mapping site. Exactly one hotel slot and one golf-course slot are
//! pre-allocated; the mapper only ever fills the first slot of each.

use serde::{Deserialize, Serialize};

/// The complete travel-product form as consumed by the ERP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    pub basic_info: BasicInfo,
    pub location_info: LocationInfo,
    pub product_info: ProductInfo,
    pub hotels: Vec<Hotel>,
    pub golf_courses: Vec<GolfCourse>,
    pub tourist_spots: Vec<TouristSpot>,
    pub policies: Policies,
    pub details: Details,
    pub ai_content: AiContent,
    pub flight_info: FlightInfo,
    pub images: Vec<String>,
}

impl Default for FormDocument {
    fn default() -> Self {
        Self {
            basic_info: BasicInfo::default(),
            location_info: LocationInfo::default(),
            product_info: ProductInfo::default(),
            // One slot each, regardless of how many entities were found
            hotels: vec![Hotel::default()],
            golf_courses: vec![GolfCourse::default()],
            tourist_spots: Vec::new(),
            policies: Policies::default(),
            details: Details::default(),
            ai_content: AiContent::default(),
            flight_info: FlightInfo::default(),
            images: Vec::new(),
        }
    }
}

/// Administrative fields filled by back-office staff, not by extraction
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BasicInfo {
    pub product_code: String,
    pub manager: String,
    pub category: String,
    pub partner_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationInfo {
    pub country: String,
    pub city: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductInfo {
    pub product_name: String,
    pub summary: String,
    pub duration: String,
    pub event_period: EventPeriod,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventPeriod {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hotel {
    pub name_kr: String,
    pub name_en: String,
    pub grade: String,
    pub location: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GolfCourse {
    pub name_kr: String,
    pub name_en: String,
    pub holes: String,
    pub operation_info: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TouristSpot {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Policies {
    pub cancellation_refund: String,
    pub deposit: String,
    pub terms: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Details {
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub others: String,
}

/// AI-assisted marketing copy; `auto_generated` stays true so staff can
/// tell machine-filled forms from hand-written ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiContent {
    pub description: String,
    pub keywords: Vec<String>,
    pub auto_generated: bool,
}

impl Default for AiContent {
    fn default() -> Self {
        Self {
            description: String::new(),
            keywords: Vec::new(),
            auto_generated: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlightInfo {
    pub airline: String,
    pub flight_number: String,
    pub departure_time: String,
    pub arrival_time: String,
}

// ============================================================================
// Tests
// ============================================================================
