//! Aggregations over a time-ordered point sequence.
//!
//! Distances and elevations are in meters, durations in seconds. The derived
//! rates refuse to divide by a zero duration or distance instead of returning
//! `inf`/`NaN`.

use itertools::Itertools;

use crate::error::TrackError;
use crate::track::TrackPoint;

// Consecutive pairs are sampled with this stride.
pub const SAMPLE_STRIDE: usize = 1;

fn sampled_pairs(points: &[TrackPoint]) -> impl Iterator<Item = (&TrackPoint, &TrackPoint)> {
    points.iter().step_by(SAMPLE_STRIDE).tuple_windows()
}

pub fn distance_between(a: &TrackPoint, b: &TrackPoint) -> f64 {
    a.haversine_distance(b)
}

pub fn distance_of(points: &[TrackPoint]) -> f64 {
    sampled_pairs(points)
        .map(|(a, b)| distance_between(a, b))
        .sum()
}

pub fn elevation_gain(points: &[TrackPoint]) -> f64 {
    sampled_pairs(points)
        .map(|(a, b)| b.elevation - a.elevation)
        .filter(|diff| *diff > 0.)
        .sum()
}

pub fn elevation_loss(points: &[TrackPoint]) -> f64 {
    sampled_pairs(points)
        .map(|(a, b)| b.elevation - a.elevation)
        .filter(|diff| *diff < 0.)
        .map(f64::abs)
        .sum()
}

/// Seconds between the first and the last point, 0 for fewer than 2 points.
pub fn time_spent(points: &[TrackPoint]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            (last.time.timestamp_micros() - first.time.timestamp_micros()) as f64 / 1_000_000.
        }
        _ => 0.,
    }
}

fn hours_spent(points: &[TrackPoint]) -> Result<f64, TrackError> {
    let seconds = time_spent(points);
    if seconds == 0. {
        return Err(TrackError::DivisionByZero {
            what: "elapsed time",
        });
    }
    Ok(seconds / 3600.)
}

/// Kilometers plus climbed hundreds of meters.
pub fn effort_points(points: &[TrackPoint]) -> f64 {
    distance_of(points) / 1000. + elevation_gain(points) / 100.
}

pub fn effort_per_hour(points: &[TrackPoint]) -> Result<f64, TrackError> {
    let hours = hours_spent(points)?;
    Ok(effort_points(points) / hours)
}

/// km/h
pub fn speed_of(points: &[TrackPoint]) -> Result<f64, TrackError> {
    let hours = hours_spent(points)?;
    Ok((distance_of(points) / 1000.) / hours)
}

/// Minutes per kilometer.
pub fn pace_of(points: &[TrackPoint]) -> Result<f64, TrackError> {
    let distance = distance_of(points);
    if distance == 0. {
        return Err(TrackError::DivisionByZero { what: "distance" });
    }
    Ok((time_spent(points) / 60.) / (distance / 1000.))
}
