pub mod test_utils;

use chrono::TimeDelta;
use gpx_pacer::config::{SpeedEditOptions, TrailingShift};
use gpx_pacer::metrics::speed_of;
use gpx_pacer::{set_by_speed, TrackError};
use rand::{rngs::StdRng, SeedableRng};
use test_utils::{at, init_logger, synthetic_track};

#[test]
fn section_reaches_target_speed() {
    init_logger();
    for seed in 0..5 {
        let mut track = synthetic_track(3600, 6.19);
        let original = track.clone();
        let section = track.points_between(at(300), at(1140)).unwrap();
        let before = speed_of(section).unwrap();
        assert!((before - 6.19).abs() < 0.1, "{before}");

        let mut rng = StdRng::seed_from_u64(seed);
        let report = set_by_speed(
            &mut track,
            10.,
            at(300),
            Some(at(1140)),
            &SpeedEditOptions::default(),
            &mut rng,
        )
        .unwrap();

        let got = speed_of(&track.points()[report.replaced.clone()]).unwrap();
        assert!((9. ..=11.).contains(&got), "seed {seed}: {got} km/h");

        assert_eq!(report.original_points, 841);
        assert_eq!(track.len(), 300 + report.new_points + (3600 - 1141));
        assert_eq!(*report.replaced.start(), 300);
        // untouched around the section
        assert_eq!(track.points()[..300], original.points()[..300]);
        assert_eq!(
            track.points()[report.replaced.end() + 1..],
            original.points()[1141..]
        );
        assert!(!report.trailing_shift_applied);
        assert!(report.duration_delta < TimeDelta::zero());
        assert_eq!(
            report.duration_delta,
            report.new_duration - report.original_duration
        );
    }
}

#[test]
fn propagate_keeps_the_gap_after_the_section() {
    let mut track = synthetic_track(2000, 6.);
    let options = SpeedEditOptions {
        trailing_shift: TrailingShift::Propagate,
        ..SpeedEditOptions::default()
    };
    let mut rng = StdRng::seed_from_u64(3);
    let report = set_by_speed(&mut track, 9., at(100), Some(at(700)), &options, &mut rng).unwrap();
    assert!(report.trailing_shift_applied);

    let points = track.points();
    let end = *report.replaced.end();
    assert_eq!(points[end + 1].time - points[end].time, TimeDelta::seconds(1));
    assert_eq!(
        points.last().unwrap().time,
        at(1999) + report.duration_delta
    );
}

#[test]
fn slower_section_needs_propagation() {
    let mut track = synthetic_track(1500, 8.);
    let original = track.clone();
    let options = SpeedEditOptions {
        thin: false,
        ..SpeedEditOptions::default()
    };

    let mut rng = StdRng::seed_from_u64(1);
    let err = set_by_speed(&mut track, 4., at(200), Some(at(800)), &options, &mut rng).unwrap_err();
    assert!(matches!(err, TrackError::InvariantViolation { .. }));
    assert_eq!(track, original);

    let options = SpeedEditOptions {
        trailing_shift: TrailingShift::Propagate,
        ..options
    };
    let report = set_by_speed(&mut track, 4., at(200), Some(at(800)), &options, &mut rng).unwrap();
    assert!(report.duration_delta > TimeDelta::zero());
    let got = speed_of(&track.points()[report.replaced.clone()]).unwrap();
    assert!((got - 4.).abs() / 4. < 0.25, "{got} km/h");
}

#[test]
fn open_ended_section() {
    let mut track = synthetic_track(1200, 6.);
    let mut rng = StdRng::seed_from_u64(8);
    let report = set_by_speed(
        &mut track,
        11.,
        at(600),
        None,
        &SpeedEditOptions::default(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(report.original_points, 600);
    assert_eq!(*report.replaced.end(), track.len() - 1);
}

#[test]
fn start_after_the_track() {
    let mut track = synthetic_track(100, 6.);
    let mut rng = StdRng::seed_from_u64(0);
    let err = set_by_speed(
        &mut track,
        10.,
        at(500),
        Some(at(600)),
        &SpeedEditOptions::default(),
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, TrackError::LookupFailure(_)));
    assert_eq!(track.len(), 100);
}
