use rand::Rng;

use crate::track::TrackPoint;

// Out of `LOTTERY_SIZE` draws: 1 starts a long dropout, the next 9 a short
// one and the next 90 drop a single point.
const LOTTERY_SIZE: u32 = 1200;
const LONG_DROPOUT: std::ops::RangeInclusive<usize> = 6..=10;
const SHORT_DROPOUT: std::ops::RangeInclusive<usize> = 2..=5;

fn dropout_after_draw<R: Rng + ?Sized>(rng: &mut R) -> usize {
    match rng.random_range(1..=LOTTERY_SIZE) {
        1 => rng.random_range(LONG_DROPOUT),
        2..=10 => rng.random_range(SHORT_DROPOUT),
        11..=100 => 1,
        _ => 0,
    }
}

/// Emulates sensor dropout by removing runs of points in place. Every kept
/// point draws how many of the following points to drop.
pub fn thin<R: Rng + ?Sized>(points: &mut Vec<TrackPoint>, rng: &mut R) {
    let before = points.len();
    let mut pt_to_remove: usize = 0;
    points.retain(|_| {
        if pt_to_remove > 0 {
            pt_to_remove -= 1;
            false
        } else {
            pt_to_remove += dropout_after_draw(rng);
            true
        }
    });
    debug!("thinning removed {} of {} points", before - points.len(), before);
}
