use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum GpxError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("GPX structure error: {0}")]
    Deserialize(#[from] quick_xml::de::DeError),

    #[error("Root element is <{0}>, not <gpx>")]
    NotGpx(String),

    #[error("Unsupported character encoding '{0}'")]
    UnsupportedEncoding(String),

    #[error("Input is not valid {encoding} text")]
    MalformedText { encoding: &'static str },

    #[error("Failed to read GPX input: {0}")]
    Io(#[from] std::io::Error),

    #[error("GPX document has no track")]
    NoTrack,

    #[error("Track has no segment")]
    NoSegment,

    #[error("Track segment has no points")]
    NoPoints,
}

impl From<GpxError> for JsValue {
    fn from(e: GpxError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GpxError>;
