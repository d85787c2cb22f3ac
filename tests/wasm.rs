#![cfg(target_arch = "wasm32")]

use gpx_metrics_wasm::{gpx_summary, gpx_summary_string};
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

const SAMPLE: &[u8] = include_bytes!("fixtures/strava-running-sample.gpx");

fn sample_bytes() -> Uint8Array {
    Uint8Array::from(SAMPLE)
}

#[wasm_bindgen_test]
fn summary_string_with_default_options() {
    let json = gpx_summary_string(&sample_bytes(), JsValue::UNDEFINED).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["creator"], "StravaGPX");
    assert_eq!(value["unit"], "kilometers");
    assert_eq!(value["pace"]["minutes"], 4);
    assert_eq!(value["pace"]["seconds"], 49);
    assert_eq!(value["route"]["geometry"]["type"], "LineString");
}

#[wasm_bindgen_test]
fn summary_object_in_miles() {
    let options = js_sys::Object::new();
    Reflect::set(&options, &"unit".into(), &"miles".into()).unwrap();
    Reflect::set(&options, &"includeRoute".into(), &JsValue::FALSE).unwrap();

    let summary = gpx_summary(&sample_bytes(), options.into()).unwrap();
    let pace = Reflect::get(&summary, &"pace".into()).unwrap();
    let minutes = Reflect::get(&pace, &"minutes".into()).unwrap();

    assert_eq!(minutes.as_f64(), Some(7.0));
    assert!(Reflect::get(&summary, &"route".into()).unwrap().is_undefined());
}

#[wasm_bindgen_test]
fn malformed_input_is_an_error() {
    let bytes = Uint8Array::from(&b"not xml"[..]);
    assert!(gpx_summary_string(&bytes, JsValue::NULL).is_err());
}
