//! GPX track documents. Used to synthesize a placeholder when a route's
//! waypoint file cannot be downloaded.

use crate::domain::{DomainError, RouteInfo};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

pub const GPX_MIME_TYPE: &str = "application/gpx+xml";
const GPX_CREATOR: &str = "Cyclo Club de Bohars";
const GPX_NS: &str = "http://www.topografix.com/GPX/1/1";

/// Start of every club ride (Mairie de Bohars).
pub const CLUB_START_POINT: TrackPoint = TrackPoint {
    lat: 48.4062,
    lon: -4.5292,
    ele: 50.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    pub ele: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackDocument {
    pub name: String,
    pub description: String,
    pub points: Vec<TrackPoint>,
}

impl TrackDocument {
    /// Minimal single-point track carrying the route's name and description.
    pub fn placeholder(route: &RouteInfo) -> Self {
        Self {
            name: route.name.clone(),
            description: route.description.clone(),
            points: vec![CLUB_START_POINT],
        }
    }

    /// Render as GPX 1.1. Text and attribute values are escaped by the writer.
    pub fn to_gpx(&self) -> Result<String, DomainError> {
        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
        emit(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("gpx");
        root.push_attribute(("version", "1.1"));
        root.push_attribute(("creator", GPX_CREATOR));
        root.push_attribute(("xmlns", GPX_NS));
        emit(&mut xml, Event::Start(root))?;

        emit(&mut xml, Event::Start(BytesStart::new("metadata")))?;
        text_element(&mut xml, "name", &self.name)?;
        text_element(&mut xml, "desc", &self.description)?;
        emit(&mut xml, Event::End(BytesEnd::new("metadata")))?;

        emit(&mut xml, Event::Start(BytesStart::new("trk")))?;
        text_element(&mut xml, "name", &self.name)?;
        emit(&mut xml, Event::Start(BytesStart::new("trkseg")))?;
        for p in &self.points {
            let (lat, lon) = (p.lat.to_string(), p.lon.to_string());
            let mut point = BytesStart::new("trkpt");
            point.push_attribute(("lat", lat.as_str()));
            point.push_attribute(("lon", lon.as_str()));
            emit(&mut xml, Event::Start(point))?;
            text_element(&mut xml, "ele", &p.ele.to_string())?;
            emit(&mut xml, Event::End(BytesEnd::new("trkpt")))?;
        }
        emit(&mut xml, Event::End(BytesEnd::new("trkseg")))?;
        emit(&mut xml, Event::End(BytesEnd::new("trk")))?;
        emit(&mut xml, Event::End(BytesEnd::new("gpx")))?;

        let mut out = String::from_utf8(xml.into_inner())
            .map_err(|e| DomainError::Io(format!("GPX is not UTF-8: {}", e)))?;
        out.push('\n');
        Ok(out)
    }
}

fn emit(xml: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), DomainError> {
    xml.write_event(event)
        .map_err(|e| DomainError::Io(format!("GPX write failed: {}", e)))
}

fn text_element(xml: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), DomainError> {
    emit(xml, Event::Start(BytesStart::new(name)))?;
    emit(xml, Event::Text(BytesText::new(text)))?;
    emit(xml, Event::End(BytesEnd::new(name)))
}

/// File name offered for a route's download, e.g. "Circuit des Abers.gpx".
pub fn download_file_name(route: &RouteInfo) -> String {
    let cleaned: String = route
        .name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    format!("{}.gpx", cleaned.trim())
}
