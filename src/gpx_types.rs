//! GPX 1.1 document model.
//!
//! Field names follow the GPX element and attribute names; the serde renames
//! are what the decoder matches against. Elements without a field here are
//! skipped.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Parsed GPX document (`<gpx>`).
#[derive(Debug, Default, Deserialize)]
pub struct Gpx {
    #[serde(rename = "@creator", default)]
    pub creator: String,
    #[serde(rename = "@version", default)]
    pub version: String,
    pub metadata: Option<GpxMetadata>,
    #[serde(rename = "trk", default)]
    pub tracks: Vec<GpxTrack>,
}

/// Document-level `<metadata>`.
#[derive(Debug, Default, Deserialize)]
pub struct GpxMetadata {
    /// Raw `<time>` text, not parsed.
    pub time: Option<String>,
}

/// A GPX link element.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GpxLink {
    #[serde(rename = "@href", default)]
    pub href: String,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub link_type: Option<String>,
}

/// A GPX track (`<trk>`).
#[derive(Debug, Default, Deserialize)]
pub struct GpxTrack {
    pub name: Option<String>,
    pub cmt: Option<String>,
    pub desc: Option<String>,
    pub src: Option<String>,
    #[serde(rename = "link", default)]
    pub links: Vec<GpxLink>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub number: Option<u32>,
    #[serde(rename = "type")]
    pub track_type: Option<String>,
    /// Filled by the decoder from the raw markup, not by serde.
    #[serde(skip)]
    pub extensions: Option<Extensions>,
    #[serde(rename = "trkseg", default)]
    pub segments: Vec<GpxSegment>,
}

/// A GPX track segment (`<trkseg>`).
#[derive(Debug, Default, Deserialize)]
pub struct GpxSegment {
    #[serde(rename = "trkpt", default)]
    pub points: Vec<GpxPoint>,
    #[serde(skip)]
    pub extensions: Option<Extensions>,
}

/// Inner markup of an `<extensions>` element, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extensions {
    pub xml: String,
}

/// A track point (`<trkpt>`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GpxPoint {
    #[serde(rename = "@lat")]
    pub lat: f64,
    #[serde(rename = "@lon")]
    pub lon: f64,
    /// Meters.
    #[serde(default, deserialize_with = "deserialize_number")]
    pub ele: Option<f64>,
    /// Raw `<time>` text, expected to be RFC 3339.
    pub time: Option<String>,
    /// Magnetic variation in degrees, 0 <= value < 360.
    #[serde(default, deserialize_with = "deserialize_number")]
    pub magvar: Option<f64>,
    #[serde(rename = "geoidheight", default, deserialize_with = "deserialize_number")]
    pub geoid_height: Option<f64>,
    pub name: Option<String>,
    pub cmt: Option<String>,
    pub desc: Option<String>,
    pub src: Option<String>,
    #[serde(rename = "link", default)]
    pub links: Vec<GpxLink>,
    pub sym: Option<String>,
    #[serde(rename = "type")]
    pub point_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_fix")]
    pub fix: Option<Fix>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub sat: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub hdop: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub vdop: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub pdop: Option<f64>,
    #[serde(rename = "ageofgpsdata", default, deserialize_with = "deserialize_number")]
    pub age_of_gps_data: Option<f64>,
    /// Differential GPS station id, 0..=1023.
    #[serde(rename = "dgpsid", default, deserialize_with = "deserialize_number")]
    pub dgps_id: Option<u16>,
    pub extensions: Option<PointExtensions>,
}

impl GpxPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ..Self::default()
        }
    }

    /// The device telemetry block, if the point carries one.
    pub fn device(&self) -> Option<&TrackPointExtension> {
        self.extensions.as_ref()?.track_point.as_ref()
    }
}

/// Structured `<extensions>` of a track point.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointExtensions {
    #[serde(rename = "TrackPointExtension")]
    pub track_point: Option<TrackPointExtension>,
}

/// Garmin `TrackPointExtension` telemetry. Missing values were not recorded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrackPointExtension {
    #[serde(rename = "atemp", default, deserialize_with = "deserialize_number")]
    pub temperature: Option<f64>,
    #[serde(rename = "wtemp", default, deserialize_with = "deserialize_number")]
    pub water_temperature: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub depth: Option<f64>,
    #[serde(rename = "hr", default, deserialize_with = "deserialize_number")]
    pub heart_rate: Option<u32>,
    #[serde(rename = "cad", default, deserialize_with = "deserialize_number")]
    pub cadence: Option<u32>,
}

/// GPS fix type. An absent `<fix>` means the fix is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fix {
    None,
    TwoD,
    ThreeD,
    Dgps,
    /// Military signal.
    Pps,
}

impl Fix {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "none" => Some(Self::None),
            "2d" => Some(Self::TwoD),
            "3d" => Some(Self::ThreeD),
            "dgps" => Some(Self::Dgps),
            "pps" => Some(Self::Pps),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TwoD => "2d",
            Self::ThreeD => "3d",
            Self::Dgps => "dgps",
            Self::Pps => "pps",
        }
    }
}

// Unrecognized fix text is treated like a missing element.
fn deserialize_fix<'de, D>(deserializer: D) -> Result<Option<Fix>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim).and_then(Fix::from_label))
}

// Empty or whitespace-only text means the value was not recorded.
fn deserialize_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(D::Error::custom),
    }
}

/// Time per distance unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pace {
    pub minutes: u64,
    pub seconds: u64,
}

impl Pace {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

/// A bare coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}
