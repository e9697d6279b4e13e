use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::StoreOptions;
use crate::track::{TimePrecision, Track, TrackPoint};

const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
const CREATOR: &str = "gpx_pacer";

/// Loads the first segment of the first track.
pub fn read_gpx<R: Read>(reader: R, options: &StoreOptions) -> Result<Track> {
    let gpx_data = gpx::read(reader)?;
    let gpx_track = gpx_data
        .tracks
        .first()
        .ok_or_else(|| anyhow!("no track in GPX data"))?;
    let segment = gpx_track
        .segments
        .first()
        .ok_or_else(|| anyhow!("track has no segment"))?;

    let mut missing_elevation = 0;
    let points = segment
        .points
        .iter()
        .enumerate()
        .map(|(idx, point)| -> Result<TrackPoint> {
            let time = match &point.time {
                Some(time) => DateTime::<Utc>::from(DateTime::parse_from_rfc3339(&time.format()?)?),
                None => bail!("track point {idx} has no time"),
            };
            let elevation = point.elevation.unwrap_or_else(|| {
                missing_elevation += 1;
                0.
            });
            Ok(TrackPoint::new(
                point.point().y(),
                point.point().x(),
                elevation,
                time,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    if missing_elevation > 0 {
        warn!("{missing_elevation} track points have no elevation, using 0");
    }

    let precision = options
        .precision
        .unwrap_or_else(|| TimePrecision::infer(&points));
    let mut track = Track::new(points, precision)?;
    track.name = gpx_track.name.clone();
    info!(
        "loaded {} track points ({:?} precision)",
        track.len(),
        track.precision()
    );
    Ok(track)
}

pub fn load_gpx(file_path: impl AsRef<Path>, options: &StoreOptions) -> Result<Track> {
    let file_path = file_path.as_ref();
    let file = File::open(file_path)
        .with_context(|| format!("failed to open {}", file_path.display()))?;
    read_gpx(BufReader::new(file), options)
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Serializes `track` as a single-segment GPX 1.1 document. Coordinates and
/// elevation are rounded to the configured decimals, time is written at the
/// track's precision.
pub fn write_gpx<W: Write>(track: &Track, out: W, options: &StoreOptions) -> Result<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("gpx");
    root.push_attribute(("version", "1.1"));
    root.push_attribute(("creator", CREATOR));
    root.push_attribute(("xmlns", GPX_NAMESPACE));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("trk")))?;
    if let Some(name) = &track.name {
        write_text_element(&mut writer, "name", name)?;
    }
    writer.write_event(Event::Start(BytesStart::new("trkseg")))?;

    let precision = track.precision();
    for point in track.points() {
        let lat = format!("{:.*}", options.coordinate_decimals, point.latitude);
        let lon = format!("{:.*}", options.coordinate_decimals, point.longitude);
        let mut trkpt = BytesStart::new("trkpt");
        trkpt.push_attribute(("lat", lat.as_str()));
        trkpt.push_attribute(("lon", lon.as_str()));
        writer.write_event(Event::Start(trkpt))?;
        write_text_element(
            &mut writer,
            "ele",
            &format!("{:.*}", options.elevation_decimals, point.elevation),
        )?;
        write_text_element(&mut writer, "time", &precision.format(&point.time))?;
        writer.write_event(Event::End(BytesEnd::new("trkpt")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("trkseg")))?;
    writer.write_event(Event::End(BytesEnd::new("trk")))?;
    writer.write_event(Event::End(BytesEnd::new("gpx")))?;
    writer.into_inner().flush()?;
    Ok(())
}

pub fn save_gpx(track: &Track, file_path: impl AsRef<Path>, options: &StoreOptions) -> Result<()> {
    let file_path = file_path.as_ref();
    let file = File::create(file_path)
        .with_context(|| format!("failed to create {}", file_path.display()))?;
    write_gpx(track, BufWriter::new(file), options)?;
    info!("wrote {} track points to {}", track.len(), file_path.display());
    Ok(())
}
