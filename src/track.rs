use std::ops::Range;

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrackError;

// Mean earth radius used by the haversine formula, unit: meter.
pub const EARTH_RADIUS: f64 = 6_371_008.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    // unit: meter
    pub elevation: f64,
    pub time: DateTime<Utc>,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64, elevation: f64, time: DateTime<Utc>) -> Self {
        TrackPoint {
            latitude,
            longitude,
            elevation,
            time,
        }
    }

    /// Great-circle distance in meters.
    pub fn haversine_distance(&self, other: &TrackPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = other.longitude.to_radians() - self.longitude.to_radians();
        let d = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
        2. * EARTH_RADIUS * d.sqrt().asin()
    }

    pub fn shift_time(&mut self, delta: TimeDelta) {
        self.time += delta;
    }
}

pub fn shift_points_time(points: &mut [TrackPoint], delta: TimeDelta) {
    points.iter_mut().for_each(|point| point.shift_time(delta));
}

/// How timestamps of a track are written out. Chosen once per track at load
/// time, every point of the track is formatted the same way.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePrecision {
    /// `2021-03-29T23:06:10Z`
    Seconds,
    /// `2021-03-29T23:06:10.000Z`
    Millis,
}

impl TimePrecision {
    const SECONDS_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%SZ";
    const MILLIS_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    pub fn format(&self, time: &DateTime<Utc>) -> String {
        match self {
            TimePrecision::Seconds => time.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimePrecision::Millis => time.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn parse(&self, input: &str) -> Result<DateTime<Utc>> {
        let fmt = match self {
            TimePrecision::Seconds => Self::SECONDS_FORMAT,
            TimePrecision::Millis => Self::MILLIS_FORMAT,
        };
        let naive = NaiveDateTime::parse_from_str(input.trim(), fmt)?;
        Ok(naive.and_utc())
    }

    /// `Millis` as soon as one point carries a sub-second part.
    pub fn infer(points: &[TrackPoint]) -> Self {
        if points.iter().any(|p| p.time.nanosecond() != 0) {
            TimePrecision::Millis
        } else {
            TimePrecision::Seconds
        }
    }
}

/// Checks that timestamps never go backwards. `offset` is added to reported
/// indices so callers validating a sub-slice get track-level positions.
pub fn check_chronological(points: &[TrackPoint], offset: usize) -> Result<(), TrackError> {
    for (i, pair) in points.windows(2).enumerate() {
        if pair[1].time < pair[0].time {
            return Err(TrackError::InvariantViolation {
                index: offset + i + 1,
                previous: pair[0].time,
                current: pair[1].time,
            });
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub name: Option<String>,
    precision: TimePrecision,
    points: Vec<TrackPoint>,
}

impl Track {
    pub fn new(points: Vec<TrackPoint>, precision: TimePrecision) -> Result<Self, TrackError> {
        check_chronological(&points, 0)?;
        Ok(Track {
            name: None,
            precision,
            points,
        })
    }

    pub fn precision(&self) -> TimePrecision {
        self.precision
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // Validates `new` as if it replaced `range`, looking one point past each
    // side of the seam.
    fn check_seams(&self, range: &Range<usize>, new: &[TrackPoint]) -> Result<(), TrackError> {
        let before = range.start.checked_sub(1).map(|i| &self.points[i]);
        let after = self.points.get(range.end);
        let start_index = range.start.saturating_sub(1);
        let joined: Vec<TrackPoint> = before
            .into_iter()
            .chain(new.iter())
            .chain(after)
            .copied()
            .collect();
        check_chronological(&joined, start_index)
    }

    pub fn append(&mut self, points: Vec<TrackPoint>) -> Result<(), TrackError> {
        let end = self.points.len();
        self.check_seams(&(end..end), &points)?;
        self.points.extend(points);
        Ok(())
    }

    pub fn insert(&mut self, index: usize, points: Vec<TrackPoint>) -> Result<(), TrackError> {
        let index = index.min(self.points.len());
        self.check_seams(&(index..index), &points)?;
        self.points.splice(index..index, points);
        Ok(())
    }

    pub fn replace_range(
        &mut self,
        range: Range<usize>,
        points: Vec<TrackPoint>,
    ) -> Result<(), TrackError> {
        let range = range.start.min(self.points.len())..range.end.min(self.points.len());
        self.check_seams(&range, &points)?;
        self.points.splice(range, points);
        Ok(())
    }

    pub fn remove_range(&mut self, range: Range<usize>) -> Vec<TrackPoint> {
        let range = range.start.min(self.points.len())..range.end.min(self.points.len());
        self.points.drain(range).collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// The closed range resolved by [`crate::time_range::range_indices`].
    pub fn points_between(
        &self,
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
    ) -> Result<&[TrackPoint], TrackError> {
        let (first, last) = crate::time_range::range_indices(&self.points, earliest, latest)?;
        Ok(&self.points[first..=last])
    }

    pub fn shift_time(&mut self, delta: TimeDelta) {
        shift_points_time(&mut self.points, delta);
    }
}
