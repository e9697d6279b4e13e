use chrono::TimeDelta;
use rand::Rng;

use crate::config::ResampleOptions;
use crate::error::TrackError;
use crate::metrics::{distance_between, speed_of};
use crate::noise::random_target_speeds;
use crate::track::{check_chronological, TrackPoint};

const KMH_PER_MPS: f64 = 3.6;
// Longest profile allowed, in steps per source point.
const MAX_PROFILE_FACTOR: usize = 100;

/// Linear interpolation from `(ax, ay)` towards `(bx, by)`.
pub fn find_mid_point(ax: f64, ay: f64, bx: f64, by: f64, percentile: f64) -> (f64, f64) {
    let x = ax + (bx - ax) * percentile;
    let y = ay + (by - ay) * percentile;
    (x, y)
}

// Source points accumulated since the last emitted point. Only the running
// distance and the newest point are needed to place the next one.
struct CrossingWindow {
    last: TrackPoint,
    distance: f64,
}

impl CrossingWindow {
    fn starting_at(point: TrackPoint) -> Self {
        CrossingWindow {
            last: point,
            distance: 0.,
        }
    }
}

/// Regenerates `track` so that it appears travelled at `target_speed` km/h,
/// one point per second, with the local pace following a random profile.
pub fn resample<R: Rng + ?Sized>(
    track: &[TrackPoint],
    target_speed: f64,
    options: &ResampleOptions,
    rng: &mut R,
) -> Result<Vec<TrackPoint>, TrackError> {
    if !target_speed.is_finite() || target_speed <= 0. {
        return Err(TrackError::InvalidSpeed(target_speed));
    }
    check_chronological(track, 0)?;
    let actual_speed = speed_of(track)?;

    let requested =
        (track.len() as f64 * (actual_speed / target_speed + options.widen_factor)).round();
    let limit = track.len().saturating_mul(MAX_PROFILE_FACTOR);
    if !requested.is_finite() || requested < 0. || requested > limit as f64 {
        return Err(TrackError::ProfileTooLong { requested, limit });
    }
    let n = requested as usize;
    let target_distances: Vec<f64> = random_target_speeds(n, target_speed, options, rng)
        .into_iter()
        .map(|speed| speed / KMH_PER_MPS)
        .collect();

    debug!(
        "resampling {} points from {:.3} km/h to {:.3} km/h with a profile of {} steps",
        track.len(),
        actual_speed,
        target_speed,
        n
    );
    walk(track, &target_distances)
}

// Every threshold is compared against the distance covered since the last
// emitted point, not against a cumulative curve.
fn walk(track: &[TrackPoint], target_distances: &[f64]) -> Result<Vec<TrackPoint>, TrackError> {
    let Some(first) = track.first() else {
        return Ok(Vec::new());
    };
    let mut new_points = vec![*first];
    let mut window = CrossingWindow::starting_at(*first);
    let mut distance_idx = 0;
    let mut track_idx = 1;

    while track_idx < track.len() {
        let next = track[track_idx];
        let step = distance_between(&window.last, &next);
        let current_distance = window.distance + step;
        let threshold = *target_distances
            .get(distance_idx)
            .ok_or(TrackError::ExhaustedProfile {
                consumed: distance_idx,
                emitted: new_points.len(),
            })?;
        let previous_time = new_points[new_points.len() - 1].time;

        if current_distance == threshold {
            // Restamped rather than copied verbatim so the output keeps its 1 s cadence.
            let accepted = TrackPoint {
                time: previous_time + TimeDelta::seconds(1),
                ..next
            };
            new_points.push(accepted);
            window = CrossingWindow::starting_at(accepted);
            track_idx += 1;
        } else if current_distance < threshold {
            window = CrossingWindow {
                last: next,
                distance: current_distance,
            };
            track_idx += 1;
        } else {
            // Step back from `next` towards the previous point by the overshoot.
            let percentile = if step > 0. {
                (current_distance - threshold) / step
            } else {
                0.
            };
            let (longitude, latitude) = find_mid_point(
                next.longitude,
                next.latitude,
                window.last.longitude,
                window.last.latitude,
                percentile,
            );
            let synthesized = TrackPoint {
                latitude,
                longitude,
                elevation: window.last.elevation,
                time: previous_time + TimeDelta::seconds(1),
            };
            new_points.push(synthesized);
            window = CrossingWindow::starting_at(synthesized);
            distance_idx += 1;
        }
    }

    debug!(
        "emitted {} points, consumed {} of {} thresholds",
        new_points.len(),
        distance_idx,
        target_distances.len()
    );
    Ok(new_points)
}
