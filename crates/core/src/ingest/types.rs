use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    /// Date key -> objects approaching on that date. Kept as raw values so
    /// the key order of the response body survives deserialization.
    pub near_earth_objects: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedObject {
    pub name: String,
    pub is_potentially_hazardous_asteroid: bool,
    pub estimated_diameter: EstimatedDiameter,
    pub close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: DiameterRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseApproach {
    pub close_approach_date_full: String,
    pub miss_distance: MissDistance,
    pub relative_velocity: RelativeVelocity,
}

// The feed sends distances and speeds as decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissDistance {
    pub kilometers: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_hour: String,
}
