//! Running metrics over a decoded [`Gpx`].
//!
//! Aggregates look at the first segment of the first track only. Calling them
//! on a document without one is a programming error and panics; use
//! [`crate::summary::summarize`] for a checked variant.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};

use crate::gpx_types::{GeoPoint, Gpx, GpxPoint, Pace};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers in one international mile.
pub const KM_PER_MILE: f64 = 1.609344;

impl GpxPoint {
    /// Parsed `<time>`, or the Unix epoch when it is missing or not RFC 3339.
    ///
    /// The date and time must be joined by `T`; the space separator chrono
    /// also accepts is rejected. The epoch means "unknown", not a real
    /// sample time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.time
            .as_deref()
            .map(str::trim)
            .filter(|t| t.as_bytes().get(10) == Some(&b'T'))
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default()
    }

    /// Great-circle (haversine) distance to `other` in kilometers.
    pub fn distance_to(&self, other: &GpxPoint) -> f64 {
        let lat1 = to_radians(self.lat);
        let lat2 = to_radians(other.lat);
        let d_lat = to_radians(other.lat - self.lat);
        let d_lon = to_radians(other.lon - self.lon);

        let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin() * (d_lon / 2.0).sin();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl Gpx {
    fn first_segment(&self) -> &[GpxPoint] {
        match self.tracks.first().and_then(|t| t.segments.first()) {
            Some(segment) => &segment.points,
            None => panic!("GPX metrics need at least one track with one segment"),
        }
    }

    /// Seconds between the first and last point. Zero unless the last
    /// timestamp is strictly after the first.
    pub fn duration(&self) -> f64 {
        let points = self.first_segment();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            panic!("GPX duration needs at least one track point");
        };

        let start = first.timestamp();
        let end = last.timestamp();
        if end <= start {
            return 0.0;
        }
        (end - start).to_std().map_or(0.0, |d| d.as_secs_f64())
    }

    /// Sum of the distances between consecutive points, in kilometers.
    pub fn distance(&self) -> f64 {
        self.first_segment()
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    /// Time per kilometer, truncated to whole seconds.
    pub fn pace_in_km(&self) -> Pace {
        self.pace_over(self.distance())
    }

    /// Time per mile, truncated to whole seconds.
    pub fn pace_in_mile(&self) -> Pace {
        self.pace_over(self.distance() / KM_PER_MILE)
    }

    fn pace_over(&self, distance: f64) -> Pace {
        assert!(distance > 0.0, "pace needs a non-zero distance");
        Pace::from_seconds((self.duration() / distance) as u64)
    }

    /// Elevation of every point in meters. Points without `<ele>` count as 0.
    pub fn elevations(&self) -> Vec<f64> {
        self.first_segment()
            .iter()
            .map(|pt| pt.ele.unwrap_or_default())
            .collect()
    }

    /// `(min, max)` of [`Gpx::elevations`].
    pub fn elevation_extent(&self) -> (f64, f64) {
        let elevations = self.elevations();
        let Some(&first) = elevations.first() else {
            panic!("GPX elevation extent needs at least one track point");
        };

        elevations
            .iter()
            .fold((first, first), |(min, max), &e| (min.min(e), max.max(e)))
    }

    pub fn coordinates(&self) -> Vec<GeoPoint> {
        self.first_segment()
            .iter()
            .map(|pt| GeoPoint {
                lat: pt.lat,
                lon: pt.lon,
            })
            .collect()
    }
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}
