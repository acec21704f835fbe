//! Crop profiles
//!
//! Static agronomic facts shown next to a crop recommendation: how long the
//! crop occupies the field, what else grows under similar conditions, and the
//! usual sowing/harvest windows.

use serde::Serialize;

/// Days assumed for crops missing from the duration table
pub const DEFAULT_DURATION_DAYS: u32 = 90;

const DEFAULT_ALTERNATIVES: &str = "Similar seasonal crops";
const DEFAULT_WINDOW: &str = "Seasonal";

/// Everything known about one crop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropProfile {
    pub crop: String,
    pub duration_days: u32,
    pub duration_display: String,
    pub alternatives: String,
    pub sowing_window: String,
    pub harvest_window: String,
}

// ============================================================================
// CROP DURATION (days in field)
// ============================================================================

static DURATIONS: &[(&str, u32)] = &[
    // Cereals & grains
    ("rice", 120), ("maize", 90), ("wheat", 120), ("barley", 90), ("millets", 75),
    ("sorghum", 100), ("oats", 90), ("rye", 110),
    // Pulses & legumes
    ("chickpea", 100), ("kidneybeans", 95), ("pigeonpeas", 150), ("mothbeans", 85),
    ("mungbean", 75), ("blackgram", 80), ("lentil", 110), ("pulses", 95),
    ("soybean", 100), ("groundnut", 110), ("peanut", 110),
    // Fruits
    ("pomegranate", 365), ("banana", 365), ("mango", 365), ("grapes", 180),
    ("watermelon", 90), ("muskmelon", 85), ("apple", 365), ("orange", 365),
    ("papaya", 270), ("coconut", 365), ("pineapple", 365), ("guava", 365),
    ("lemon", 365), ("lime", 365), ("strawberry", 120),
    // Cash crops
    ("cotton", 150), ("jute", 120), ("coffee", 365), ("tea", 365),
    ("sugarcane", 365), ("tobacco", 120), ("rubber", 365),
    // Vegetables
    ("tomato", 75), ("potato", 90), ("onion", 100), ("carrot", 70),
    ("cabbage", 90), ("cauliflower", 80), ("brinjal", 120), ("okra", 60),
    ("beans", 70), ("peas", 65), ("cucumber", 60), ("pumpkin", 90),
    // Spices
    ("turmeric", 270), ("ginger", 240), ("garlic", 150), ("chilli", 120),
    ("pepper", 365), ("cardamom", 365), ("coriander", 90),
];

// ============================================================================
// ALTERNATIVE CROPS (similar growing conditions)
// ============================================================================

static ALTERNATIVES: &[(&str, &str)] = &[
    ("rice", "Jute, Maize"),
    ("maize", "Cotton, Soybean"),
    ("wheat", "Rice, Maize"),
    ("chickpea", "Kidneybeans, Mothbeans"),
    ("kidneybeans", "Chickpea, Pigeonpeas"),
    ("pigeonpeas", "Blackgram, Mothbeans"),
    ("mothbeans", "Mungbean, Lentil"),
    ("mungbean", "Mothbeans, Lentil"),
    ("blackgram", "Pigeonpeas, Mothbeans"),
    ("lentil", "Mungbean, Peas"),
    ("peas", "Lentil, Chickpea"),
    ("pomegranate", "Orange, Papaya"),
    ("banana", "Coconut, Mango"),
    ("mango", "Banana, Coconut"),
    ("grapes", "Pomegranate, Orange"),
    ("watermelon", "Muskmelon, Cucumber"),
    ("muskmelon", "Watermelon, Cucumber"),
    ("apple", "Grapes, Pear"),
    ("orange", "Pomegranate, Papaya"),
    ("papaya", "Banana, Coconut"),
    ("coconut", "Banana, Mango"),
    ("cotton", "Maize, Soybean"),
    ("jute", "Rice, Maize"),
    ("coffee", "Tea, Rubber"),
    ("soybean", "Maize, Cotton"),
    ("sugarcane", "Rice, Cotton"),
];

// ============================================================================
// CROP CALENDAR (sowing, harvest)
// ============================================================================

static CALENDAR: &[(&str, &str, &str)] = &[
    ("rice", "Jun - Jul", "Nov - Dec"),
    ("maize", "Jun - Jul", "Oct - Nov"),
    ("soybean", "Jun - Jul", "Oct - Nov"),
    ("cotton", "May - Jun", "Oct - Nov"),
    ("chickpea", "Oct - Nov", "Mar - Apr"),
    ("wheat", "Oct - Nov", "Mar - Apr"),
];

/// Duration string, e.g. "120 days (~4 months)"
pub fn duration_display(days: u32) -> String {
    // Half-to-even, so 75 days reads as ~2 months
    let months = (days as f64 / 30.0).round_ties_even() as u32;
    if days >= 365 {
        format!("{} days (Perennial/~12 months)", days)
    } else if months > 0 {
        format!("{} days (~{} months)", days, months)
    } else {
        format!("{} days", days)
    }
}

/// Look up a crop (case-insensitive); unknown crops get defaults
pub fn crop_profile(crop: &str) -> CropProfile {
    let key = crop.trim().to_lowercase();

    let duration_days = DURATIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, d)| *d)
        .unwrap_or(DEFAULT_DURATION_DAYS);

    let alternatives = ALTERNATIVES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, a)| *a)
        .unwrap_or(DEFAULT_ALTERNATIVES);

    let (sowing, harvest) = CALENDAR
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|(_, s, h)| (*s, *h))
        .unwrap_or((DEFAULT_WINDOW, DEFAULT_WINDOW));

    CropProfile {
        crop: crop.trim().to_string(),
        duration_days,
        duration_display: duration_display(duration_days),
        alternatives: alternatives.to_string(),
        sowing_window: sowing.to_string(),
        harvest_window: harvest.to_string(),
    }
}
