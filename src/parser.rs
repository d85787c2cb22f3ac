use std::io::Read;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::charset::decode_to_utf8;
use crate::error::{GpxError, Result};
use crate::gpx_types::{Extensions, Gpx};

/// Read a whole GPX document from `reader` and decode it.
pub fn read_gpx<R: Read>(mut reader: R) -> Result<Gpx> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_gpx(&bytes)
}

/// Decode GPX bytes into a [`Gpx`].
///
/// The character encoding comes from the byte-order mark or the XML
/// declaration. Unknown elements are ignored; track and segment
/// `<extensions>` are kept as raw markup.
///
/// Any failure returns the error alone, never a partially filled document.
pub fn parse_gpx(bytes: &[u8]) -> Result<Gpx> {
    let (xml, encoding) = decode_to_utf8(bytes)?;

    let extensions = collect_extensions(&xml)?;
    let mut gpx: Gpx = quick_xml::de::from_str(&xml)?;

    for (track, raw) in gpx.tracks.iter_mut().zip(extensions) {
        track.extensions = raw.track;
        for (segment, ext) in track.segments.iter_mut().zip(raw.segments) {
            segment.extensions = ext;
        }
    }

    tracing::debug!(
        encoding = encoding.name(),
        bytes = bytes.len(),
        tracks = gpx.tracks.len(),
        "Decoded GPX document"
    );

    Ok(gpx)
}

/// Raw `<extensions>` of one `<trk>` and of each of its `<trkseg>`s.
#[derive(Debug, Default)]
struct TrackExtensions {
    track: Option<Extensions>,
    segments: Vec<Option<Extensions>>,
}

/// Where an element sits relative to the tracks of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Track,
    Segment,
    TrackExtensions,
    SegmentExtensions,
    Other,
}

fn slot(path: &[Vec<u8>], name: &[u8]) -> Slot {
    let parents: Vec<&[u8]> = path.iter().map(Vec::as_slice).collect();
    match (parents.as_slice(), name) {
        ([_], b"trk") => Slot::Track,
        ([_, b"trk"], b"trkseg") => Slot::Segment,
        ([_, b"trk"], b"extensions") => Slot::TrackExtensions,
        ([_, b"trk", b"trkseg"], b"extensions") => Slot::SegmentExtensions,
        _ => Slot::Other,
    }
}

/// Walk the document once, check the root is `<gpx>` and capture the inner markup of every track and
/// segment `<extensions>`, in document order.
fn collect_extensions(xml: &str) -> Result<Vec<TrackExtensions>> {
    let mut reader = Reader::from_str(xml);
    let mut tracks: Vec<TrackExtensions> = Vec::new();
    // Local names of the open elements, root first.
    let mut path: Vec<Vec<u8>> = Vec::new();

    loop {
        let (start, empty) = match reader.read_event()? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(_) => {
                path.pop();
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        let name = start.local_name().as_ref().to_vec();
        if path.is_empty() && name != b"gpx" {
            return Err(GpxError::NotGpx(String::from_utf8_lossy(&name).into_owned()));
        }
        match slot(&path, &name) {
            Slot::Track => tracks.push(TrackExtensions::default()),
            Slot::Segment => {
                if let Some(track) = tracks.last_mut() {
                    track.segments.push(None);
                }
            }
            kind @ (Slot::TrackExtensions | Slot::SegmentExtensions) => {
                let xml = if empty {
                    String::new()
                } else {
                    reader.read_text(start.name())?.to_string()
                };
                let target = match kind {
                    Slot::TrackExtensions => tracks.last_mut().map(|t| &mut t.track),
                    _ => tracks
                        .last_mut()
                        .and_then(|t| t.segments.last_mut()),
                };
                if let Some(target) = target {
                    *target = Some(Extensions { xml });
                }
                // read_text consumed the closing tag.
                continue;
            }
            Slot::Other => {}
        }

        if !empty {
            path.push(name);
        }
    }

    Ok(tracks)
}
