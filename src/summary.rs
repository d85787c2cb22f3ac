use chrono::{DateTime, SecondsFormat, Utc};
use geojson::{Feature, Geometry, Value};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::{GpxError, Result};
use crate::gpx_types::{GeoPoint, Gpx, GpxPoint, GpxTrack, Pace};
use crate::options::{DistanceUnit, SummaryOptions};

/// All metrics of the first track segment of a document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub creator: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// RFC 3339, only when the first point has a valid timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    pub duration_seconds: f64,
    pub distance: f64,
    pub unit: DistanceUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<Pace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<ElevationExtent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Feature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElevationExtent {
    pub min: f64,
    pub max: f64,
}

/// Summarize `gpx`, checking the preconditions the metric methods panic on.
pub fn summarize(gpx: &Gpx, opts: &SummaryOptions) -> Result<Summary> {
    let track = gpx.tracks.first().ok_or(GpxError::NoTrack)?;
    let segment = track.segments.first().ok_or(GpxError::NoSegment)?;
    let first = segment.points.first().ok_or(GpxError::NoPoints)?;

    let distance_km = gpx.distance();
    let duration = gpx.duration();

    let pace = (distance_km > 0.0).then(|| match opts.unit {
        DistanceUnit::Kilometers => gpx.pace_in_km(),
        DistanceUnit::Miles => gpx.pace_in_mile(),
    });

    let elevation = if opts.include_elevation {
        recorded_elevation_extent(&segment.points)
    } else {
        None
    };

    let start_time = Some(first.timestamp())
        .filter(|t| *t != DateTime::<Utc>::UNIX_EPOCH)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true));

    let route = opts
        .include_route
        .then(|| route_feature(track, &gpx.coordinates()));

    tracing::debug!(
        distance_km,
        duration_seconds = duration,
        unit = ?opts.unit,
        "Computed GPX summary"
    );

    Ok(Summary {
        creator: gpx.creator.clone(),
        version: gpx.version.clone(),
        name: track.name.clone(),
        start_time,
        duration_seconds: duration,
        distance: opts.unit.convert(distance_km),
        unit: opts.unit,
        pace,
        elevation,
        route,
    })
}

/// Range over the points that recorded an elevation; `None` if none did.
fn recorded_elevation_extent(points: &[GpxPoint]) -> Option<ElevationExtent> {
    points.iter().filter_map(|pt| pt.ele).fold(None, |extent, ele| {
        Some(match extent {
            None => ElevationExtent { min: ele, max: ele },
            Some(ElevationExtent { min, max }) => ElevationExtent {
                min: min.min(ele),
                max: max.max(ele),
            },
        })
    })
}

/// LineString of the coordinates, or a Point for a single sample.
fn route_feature(track: &GpxTrack, coordinates: &[GeoPoint]) -> Feature {
    let mut positions: Vec<Vec<f64>> = coordinates.iter().map(|c| vec![c.lon, c.lat]).collect();

    let value = if positions.len() == 1 {
        Value::Point(positions.remove(0))
    } else {
        Value::LineString(positions)
    };

    let mut props = Map::new();
    props.insert(
        "gpxType".to_string(),
        JsonValue::String("track".to_string()),
    );
    insert_optional(&mut props, "name", &track.name);
    insert_optional(&mut props, "type", &track.track_type);

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn insert_optional(props: &mut Map<String, JsonValue>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        props.insert(key.to_string(), JsonValue::String(v.clone()));
    }
}
