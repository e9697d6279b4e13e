use chrono::{DateTime, Utc};

use crate::error::TrackError;
use crate::track::TrackPoint;

/// Resolves the closed range `[first, last]` where `first` is the first point
/// at or after `earliest` and `last` the first point at or after `latest`.
/// `last` falls back to the final index when no point reaches `latest`.
pub fn range_indices(
    points: &[TrackPoint],
    earliest: DateTime<Utc>,
    latest: DateTime<Utc>,
) -> Result<(usize, usize), TrackError> {
    // TODO: binary search, the scan is linear in the track length.
    let mut earliest_idx = None;
    let mut latest_idx = None;

    for (idx, point) in points.iter().enumerate() {
        if earliest_idx.is_none() && point.time >= earliest {
            earliest_idx = Some(idx);
        }
        if latest_idx.is_none() && point.time >= latest {
            latest_idx = Some(idx);
        }
        if earliest_idx.is_some() && latest_idx.is_some() {
            break;
        }
    }

    let earliest_idx = earliest_idx.ok_or_else(|| {
        TrackError::LookupFailure(format!("no point at or after {}", earliest.to_rfc3339()))
    })?;
    let latest_idx = latest_idx.unwrap_or(points.len() - 1);
    Ok((earliest_idx, latest_idx))
}

/// Points after the last one, scanning back from the tail, that is earlier
/// than `earliest`.
pub fn suffix_after_gap(
    points: &[TrackPoint],
    earliest: DateTime<Utc>,
) -> Result<&[TrackPoint], TrackError> {
    points
        .iter()
        .rposition(|point| point.time < earliest)
        .map(|idx| &points[idx + 1..])
        .ok_or_else(|| {
            TrackError::LookupFailure(format!(
                "every point is at or after {}, no gap boundary",
                earliest.to_rfc3339()
            ))
        })
}
