use serde::{Deserialize, Serialize};

/// One close approach of one object, flattened out of the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoRecord {
    pub name: String,
    pub is_potentially_hazardous: bool,
    /// Upper bound of the estimated diameter, in meters.
    pub estimated_diameter_meters: f64,
    /// Full date-time string as supplied by the feed, e.g. "2023-Jan-01 05:12".
    pub close_approach_date: String,
    pub miss_distance_km: f64,
    pub relative_velocity_kmh: f64,
}
