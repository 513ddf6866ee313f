use crate::domain::neo::NeoRecord;
use crate::ingest::types::{FeedObject, FeedResponse};
use anyhow::{Context, Result};
use serde_json::Value;

/// Flattens a feed body into one record per (date, object), in the order the
/// feed lists them. Any missing or malformed field fails the whole body.
pub fn map_records(body: Value) -> Result<Vec<NeoRecord>> {
    let feed = serde_json::from_value::<FeedResponse>(body)
        .context("feed response is missing near_earth_objects")?;

    let mut out = Vec::new();
    for (date, objects) in feed.near_earth_objects {
        let objects = serde_json::from_value::<Vec<FeedObject>>(objects)
            .with_context(|| format!("malformed object list for {date}"))?;

        for (idx, object) in objects.into_iter().enumerate() {
            let record = map_object(object)
                .with_context(|| format!("malformed object {idx} for {date}"))?;
            out.push(record);
        }
    }
    Ok(out)
}

fn map_object(object: FeedObject) -> Result<NeoRecord> {
    let approach = object
        .close_approach_data
        .into_iter()
        .next()
        .with_context(|| format!("{} has no close approach data", object.name))?;

    let miss_distance_km = parse_num(&approach.miss_distance.kilometers)
        .context("miss_distance.kilometers is not a number")?;
    let relative_velocity_kmh = parse_num(&approach.relative_velocity.kilometers_per_hour)
        .context("relative_velocity.kilometers_per_hour is not a number")?;

    Ok(NeoRecord {
        name: object.name,
        is_potentially_hazardous: object.is_potentially_hazardous_asteroid,
        estimated_diameter_meters: object.estimated_diameter.meters.estimated_diameter_max,
        close_approach_date: approach.close_approach_date_full,
        miss_distance_km,
        relative_velocity_kmh,
    })
}

fn parse_num(s: &str) -> Result<f64> {
    let t = s.trim();
    t.parse::<f64>()
        .with_context(|| format!("cannot parse {t:?} as a number"))
}
