pub mod charset;
pub mod error;
pub mod gpx_types;
pub mod metrics;
pub mod options;
pub mod parser;
pub mod summary;

use js_sys::Uint8Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use crate::error::GpxError;
pub use crate::gpx_types::*;
pub use crate::metrics::{EARTH_RADIUS_KM, KM_PER_MILE};
pub use crate::options::{DistanceUnit, SummaryOptions};
pub use crate::parser::{parse_gpx, read_gpx};
pub use crate::summary::{summarize, ElevationExtent, Summary};

/// Decode GPX bytes and summarize the first track, returned as a JS object.
#[wasm_bindgen(js_name = gpxSummary)]
pub fn gpx_summary(gpx_bytes: &Uint8Array, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let summary = build_summary(gpx_bytes, options)?;
    summary
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode GPX bytes and summarize the first track, returned as a JSON string.
#[wasm_bindgen(js_name = gpxSummaryString)]
pub fn gpx_summary_string(gpx_bytes: &Uint8Array, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let summary = build_summary(gpx_bytes, options)?;
    serde_json::to_string(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn build_summary(gpx_bytes: &Uint8Array, options: JsValue) -> Result<Summary, JsValue> {
    let opts = parse_options(options)?;
    let gpx = parse_gpx(&gpx_bytes.to_vec())?;
    Ok(summarize(&gpx, &opts)?)
}

fn parse_options(options: JsValue) -> Result<SummaryOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(SummaryOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
