use std::ops::RangeInclusive;

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

use crate::config::{SpeedEditOptions, TrailingShift};
use crate::error::TrackError;
use crate::metrics::time_spent;
use crate::resample::resample;
use crate::thinning::thin;
use crate::time_range::range_indices;
use crate::track::{check_chronological, shift_points_time, Track, TrackPoint};

#[derive(Clone, Debug, PartialEq)]
pub struct SpeedEditReport {
    /// Indices of the regenerated section in the edited track.
    pub replaced: RangeInclusive<usize>,
    pub original_points: usize,
    pub new_points: usize,
    pub original_duration: TimeDelta,
    pub new_duration: TimeDelta,
    /// `new_duration - original_duration`, negative when the section got faster.
    pub duration_delta: TimeDelta,
    pub trailing_shift_applied: bool,
}

fn section_duration(points: &[TrackPoint]) -> TimeDelta {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => last.time - first.time,
        _ => TimeDelta::zero(),
    }
}

/// Rewrites the part of `track` between `start` and `end` (or the end of the
/// track) so that it averages `target_speed` km/h. The track is only touched
/// once the new sequence is complete and ordered.
pub fn set_by_speed<R: Rng + ?Sized>(
    track: &mut Track,
    target_speed: f64,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    options: &SpeedEditOptions,
    rng: &mut R,
) -> Result<SpeedEditReport, TrackError> {
    let points = track.points();
    let (h, t) = match end {
        Some(end) => range_indices(points, start, end)?,
        None => (range_indices(points, start, start)?.0, points.len() - 1),
    };
    if t < h {
        return Err(TrackError::LookupFailure(format!(
            "section end (index {t}) precedes its start (index {h})"
        )));
    }

    let former = &points[..h];
    let target = &points[h..=t];
    let mut latter = points[t + 1..].to_vec();

    let mut new_target = resample(target, target_speed, &options.resample, rng)?;
    if options.thin {
        thin(&mut new_target, rng);
    }

    let original_duration = section_duration(target);
    let new_duration = section_duration(&new_target);
    let duration_delta = new_duration - original_duration;
    let trailing_shift_applied = match options.trailing_shift {
        TrailingShift::Propagate => {
            shift_points_time(&mut latter, duration_delta);
            true
        }
        TrailingShift::Keep => false,
    };

    let report = SpeedEditReport {
        replaced: h..=h + new_target.len() - 1,
        original_points: target.len(),
        new_points: new_target.len(),
        original_duration,
        new_duration,
        duration_delta,
        trailing_shift_applied,
    };

    let mut assembled = Vec::with_capacity(former.len() + new_target.len() + latter.len());
    assembled.extend_from_slice(former);
    assembled.extend(new_target);
    assembled.extend(latter);
    check_chronological(&assembled, 0)?;

    info!(
        "set section [{h}, {t}] to {target_speed} km/h: {} -> {} points, {:.1}s -> {:.1}s (delta {}s, {})",
        report.original_points,
        report.new_points,
        time_spent(target),
        time_spent(&assembled[report.replaced.clone()]),
        duration_delta.num_seconds(),
        if trailing_shift_applied { "propagated" } else { "not propagated" },
    );

    track.clear();
    track.append(assembled)?;
    Ok(report)
}
