pub mod test_utils;

use chrono::TimeDelta;
use gpx_pacer::time_range::{range_indices, suffix_after_gap};
use gpx_pacer::{TrackError, TrackPoint};
use test_utils::{at, synthetic_points, synthetic_track};

#[test]
fn closed_range() {
    let points = synthetic_points(100, 6., 1);
    assert_eq!(range_indices(&points, at(10), at(15)).unwrap(), (10, 15));

    let track = synthetic_track(100, 6.);
    let between = track.points_between(at(25), at(30)).unwrap();
    assert_eq!(between.len(), 6);
    assert_eq!(between[0].time, at(25));
    assert_eq!(between[5].time, at(30));
}

#[test]
fn bounds_between_samples() {
    // one point every 5 seconds
    let points = synthetic_points(20, 6., 5);
    let (first, last) = range_indices(&points, at(12), at(33)).unwrap();
    assert_eq!((first, last), (3, 7));
    assert!(points[first].time >= at(12));
    assert!(points[first - 1].time < at(12));
    assert!(points[last].time >= at(33));
    assert!(points[last - 1].time < at(33));
}

#[test]
fn latest_past_the_end() {
    let points = synthetic_points(30, 6., 1);
    assert_eq!(range_indices(&points, at(20), at(500)).unwrap(), (20, 29));
}

#[test]
fn earliest_before_the_start() {
    let points = synthetic_points(30, 6., 1);
    assert_eq!(range_indices(&points, at(-60), at(3)).unwrap(), (0, 3));
}

#[test]
fn earliest_past_the_end() {
    let points = synthetic_points(30, 6., 1);
    assert!(matches!(
        range_indices(&points, at(31), at(40)),
        Err(TrackError::LookupFailure(_))
    ));
    assert!(matches!(
        range_indices(&[], at(0), at(40)),
        Err(TrackError::LookupFailure(_))
    ));
}

#[test]
fn suffix_after_rest() {
    let mut points: Vec<TrackPoint> = synthetic_points(40, 6., 1);
    // a 10 minute rest before the last 14 points
    for point in &mut points[26..] {
        point.shift_time(TimeDelta::minutes(10));
    }
    let suffix = suffix_after_gap(&points, at(300)).unwrap();
    assert_eq!(suffix.len(), 14);
    assert_eq!(suffix[0], points[26]);

    let suffix = suffix_after_gap(&points, points[39].time).unwrap();
    assert_eq!(suffix.len(), 1);

    // nothing is earlier than the start
    assert!(matches!(
        suffix_after_gap(&points, at(0)),
        Err(TrackError::LookupFailure(_))
    ));
}
