//! Maps CalDAV `calendar-data` (iCalendar VEVENTs inside a WebDAV multistatus
//! body) into schedule entries.
//!
//! Only the properties the club uses are read. UTC stamps (trailing `Z`) are
//! converted to local time; stamps with a TZID or none are taken as wall-clock time.

use crate::domain::{Difficulty, DomainError, EventCategory, ScheduleEntry};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use std::collections::HashMap;

const CALENDAR_DATA: &[u8] = b"calendar-data";

/// One content line: name, parameters, raw value.
struct Property {
    params: HashMap<String, String>,
    value: String,
}

/// Schedule entries from a PROPFIND multistatus body.
pub fn parse_multistatus(body: &str) -> Result<Vec<ScheduleEntry>, DomainError> {
    let mut entries = Vec::new();
    for ics in calendar_data_blocks(body)? {
        entries.extend(parse_calendar_events(&ics)?);
    }
    Ok(entries)
}

/// Text content of every `calendar-data` element, entities resolved.
fn calendar_data_blocks(body: &str) -> Result<Vec<String>, DomainError> {
    let mut reader = Reader::from_str(body);
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            DomainError::ShapeValidation(format!(
                "malformed multistatus at byte {}: {}",
                reader.error_position(),
                e
            ))
        })?;
        match event {
            Event::Start(e) if e.local_name().as_ref() == CALENDAR_DATA => {
                current = Some(String::new());
            }
            Event::End(e) if e.local_name().as_ref() == CALENDAR_DATA => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            Event::Text(t) => {
                if let Some(block) = current.as_mut() {
                    block.push_str(&unescape_fragment(&String::from_utf8_lossy(&t))?);
                }
            }
            Event::GeneralRef(r) => {
                if let Some(block) = current.as_mut() {
                    let reference = format!("&{};", String::from_utf8_lossy(&r));
                    block.push_str(&unescape_fragment(&reference)?);
                }
            }
            Event::CData(c) => {
                if let Some(block) = current.as_mut() {
                    block.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(blocks)
}

fn unescape_fragment(raw: &str) -> Result<String, DomainError> {
    unescape(raw)
        .map(|text| text.into_owned())
        .map_err(|e| DomainError::ShapeValidation(format!("bad XML escape: {}", e)))
}

/// Extract every top-level VEVENT from an iCalendar document.
///
/// Recurrence overrides (events carrying RECURRENCE-ID) are skipped so that a
/// recurring event yields one entry per UID.
pub fn parse_calendar_events(ics: &str) -> Result<Vec<ScheduleEntry>, DomainError> {
    let text = ics.replace("\r\n", "\n").replace('\r', "\n");
    let mut entries = Vec::new();
    let mut current: Option<HashMap<String, Property>> = None;
    let mut nested_depth = 0usize;

    for line in unfold_lines(&text) {
        let line = line.trim_start();
        if let Some(component) = line.strip_prefix("BEGIN:") {
            if component.trim() == "VEVENT" && current.is_none() {
                current = Some(HashMap::new());
            } else if current.is_some() {
                nested_depth += 1;
            }
            continue;
        }
        if let Some(component) = line.strip_prefix("END:") {
            if current.is_some() {
                if nested_depth > 0 {
                    nested_depth -= 1;
                } else if component.trim() == "VEVENT" {
                    if let Some(props) = current.take() {
                        if !props.contains_key("RECURRENCE-ID") {
                            entries.push(event_to_entry(&props)?);
                        }
                    }
                }
            }
            continue;
        }
        if nested_depth > 0 {
            continue;
        }
        if let Some(props) = current.as_mut() {
            if let Some((name, prop)) = parse_property(line) {
                props.entry(name).or_insert(prop);
            }
        }
    }

    Ok(entries)
}

fn event_to_entry(props: &HashMap<String, Property>) -> Result<ScheduleEntry, DomainError> {
    let text = |name: &str| props.get(name).map(|p| unescape_text(&p.value));
    let id = text("UID").unwrap_or_default();

    let dtstart = props
        .get("DTSTART")
        .ok_or_else(|| DomainError::ShapeValidation(format!("event '{}' has no DTSTART", id)))?;
    let (date, meeting_time) = parse_dtstart(&dtstart.value)
        .ok_or_else(|| DomainError::ShapeValidation(format!("event '{}': bad DTSTART '{}'", id, dtstart.value)))?;

    let category = text("CATEGORIES")
        .and_then(|c| c.split(',').find_map(EventCategory::from_label))
        .unwrap_or(EventCategory::Ride);

    let leader = props.get("ORGANIZER").and_then(|p| {
        p.params
            .get("CN")
            .map(|cn| cn.trim_matches('"').to_string())
            .or_else(|| {
                let v = p.value.trim();
                let v = v.strip_prefix("mailto:").unwrap_or(v);
                (!v.is_empty()).then(|| v.to_string())
            })
    });

    Ok(ScheduleEntry {
        id,
        date,
        title: text("SUMMARY").unwrap_or_default(),
        description: text("DESCRIPTION").unwrap_or_default(),
        category,
        meeting_time,
        meeting_point: text("LOCATION").filter(|s| !s.trim().is_empty()),
        leader,
        requires_registration: text("X-CCB-REGISTRATION")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("TRUE")),
        level: text("X-CCB-LEVEL").and_then(|v| Difficulty::from_label(&v)),
    })
}

/// "20250803" (all-day) or "20250803T133000[Z]", seen from the local time zone.
fn parse_dtstart(value: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    parse_dtstart_in(value, &Local)
}

/// As `parse_dtstart`, with UTC stamps shifted into `tz`.
fn parse_dtstart_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<(NaiveDate, Option<NaiveTime>)> {
    let value = value.trim();
    if value.len() == 8 {
        return NaiveDate::parse_from_str(value, "%Y%m%d").ok().map(|d| (d, None));
    }
    let (stamp, is_utc) = match value.strip_suffix('Z') {
        Some(stamp) => (stamp, true),
        None => (value, false),
    };
    let mut dt = NaiveDateTime::parse_from_str(stamp, "%Y%m%dT%H%M%S").ok()?;
    if is_utc {
        dt = Utc.from_utc_datetime(&dt).with_timezone(tz).naive_local();
    }
    Some((dt.date(), Some(dt.time())))
}

/// RFC 5545 unfolding: a line starting with a space or tab continues the previous one.
fn unfold_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.split('\n') {
        if let Some(rest) = raw.strip_prefix(' ').or_else(|| raw.strip_prefix('\t')) {
            if let Some(last) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        lines.push(raw.to_string());
    }
    lines
}

/// "NAME;P1=a;P2=\"b:c\":value" -> (NAME, params, value).
fn parse_property(line: &str) -> Option<(String, Property)> {
    let mut in_quotes = false;
    let mut split_at = None;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => {
                split_at = Some(i);
                break;
            }
            _ => {}
        }
    }
    let split_at = split_at?;
    let (head, value) = (&line[..split_at], &line[split_at + 1..]);

    let mut parts = head.split(';');
    let name = parts.next()?.trim().to_ascii_uppercase();
    if name.is_empty() {
        return None;
    }
    let params = parts
        .filter_map(|p| p.split_once('='))
        .map(|(k, v)| (k.trim().to_ascii_uppercase(), v.to_string()))
        .collect();

    Some((
        name,
        Property {
            params,
            value: value.to_string(),
        },
    ))
}

/// iCalendar TEXT escapes: \n, \, \; \\.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out.trim().to_string()
}
