#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use gpx_pacer::{TimePrecision, Track, TrackPoint};

// Meters per degree of latitude for the haversine earth radius.
const METERS_PER_DEGREE: f64 = 6_371_008.8 * std::f64::consts::PI / 180.;

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 3, 7, 9, 40, 0).unwrap()
}

/// A walk heading roughly north-east at `speed_kmh`, one point every
/// `interval_sec`, with a gentle heading wobble and rolling elevation.
pub fn synthetic_points(len: usize, speed_kmh: f64, interval_sec: i64) -> Vec<TrackPoint> {
    let step = speed_kmh / 3.6 * interval_sec as f64;
    let mut latitude = 22.349095;
    let mut longitude = 114.194624;
    (0..len)
        .map(|i| {
            let heading = 0.8 + 0.05 * (i as f64 / 40.).sin();
            let point = TrackPoint::new(
                latitude,
                longitude,
                120. + 15. * (i as f64 / 60.).sin(),
                start_time() + TimeDelta::seconds(i as i64 * interval_sec),
            );
            latitude += step * heading.cos() / METERS_PER_DEGREE;
            longitude += step * heading.sin() / (METERS_PER_DEGREE * latitude.to_radians().cos());
            point
        })
        .collect()
}

pub fn synthetic_track(len: usize, speed_kmh: f64) -> Track {
    Track::new(synthetic_points(len, speed_kmh, 1), TimePrecision::Seconds).unwrap()
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    start_time() + TimeDelta::seconds(seconds)
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
