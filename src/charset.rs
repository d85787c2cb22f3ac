//! Character encoding normalization.
//!
//! GPS vendor tools still export Latin-1 and Windows code pages, so input
//! bytes are transcoded to UTF-8 before any structural parsing.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{GpxError, Result};

/// Decode `bytes` to UTF-8 text.
///
/// A byte-order mark takes precedence over the XML declaration; without
/// either the input is taken as UTF-8.
pub fn decode_to_utf8(bytes: &[u8]) -> Result<(Cow<'_, str>, &'static Encoding)> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes)?.unwrap_or(UTF_8), bytes),
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        tracing::warn!(encoding = encoding.name(), "Malformed byte sequence in GPX input");
        return Err(GpxError::MalformedText {
            encoding: encoding.name(),
        });
    }

    Ok((text, encoding))
}

/// Encoding named by the `encoding` pseudo-attribute of the XML declaration.
fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>> {
    let mut reader = Reader::from_reader(bytes);

    let decl = match reader.read_event()? {
        Event::Decl(decl) => decl,
        _ => return Ok(None),
    };
    let label = match decl.encoding() {
        Some(label) => label.map_err(quick_xml::Error::from)?,
        None => return Ok(None),
    };

    match Encoding::for_label(&label) {
        // The prolog was readable as ASCII, so a UTF-16 label cannot be right;
        // output_encoding() maps it to UTF-8.
        Some(encoding) => Ok(Some(encoding.output_encoding())),
        None => {
            let label = String::from_utf8_lossy(&label).into_owned();
            tracing::warn!(label = %label, "Unknown encoding in XML declaration");
            Err(GpxError::UnsupportedEncoding(label))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undeclared_is_utf8() {
        let (text, encoding) = decode_to_utf8("<gpx><trk/></gpx>".as_bytes()).unwrap();
        assert_eq!(encoding, UTF_8);
        assert_eq!(text, "<gpx><trk/></gpx>");
    }

    #[test]
    fn test_declared_latin1() {
        let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><gpx><trk><name>Caf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"</name></trk></gpx>");

        let (text, encoding) = decode_to_utf8(&bytes).unwrap();
        assert_eq!(encoding.name(), "windows-1252");
        assert!(text.contains("<name>Café</name>"));
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"<gpx/>");
        let (text, encoding) = decode_to_utf8(&bytes).unwrap();
        assert_eq!(encoding, UTF_8);
        assert_eq!(text, "<gpx/>");
    }

    #[test]
    fn test_utf16_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<gpx/>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (text, encoding) = decode_to_utf8(&bytes).unwrap();
        assert_eq!(encoding.name(), "UTF-16LE");
        assert_eq!(text, "<gpx/>");
    }

    #[test]
    fn test_utf16_label_without_bom_is_utf8() {
        let xml = r#"<?xml version="1.0" encoding="UTF-16"?><gpx/>"#;
        let (_, encoding) = decode_to_utf8(xml.as_bytes()).unwrap();
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn test_unknown_label() {
        let xml = r#"<?xml version="1.0" encoding="x-no-such-charset"?><gpx/>"#;
        let err = decode_to_utf8(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, GpxError::UnsupportedEncoding(ref label) if label == "x-no-such-charset"));
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes = b"<gpx creator=\"\xFF\xFE\xFD\"/>";
        let err = decode_to_utf8(bytes).unwrap_err();
        assert!(matches!(err, GpxError::MalformedText { encoding: "UTF-8" }));
    }
}
