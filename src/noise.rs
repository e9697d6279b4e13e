use std::f64::consts::PI;

use rand::Rng;

use crate::config::ResampleOptions;

/// One scale of perturbation: `count` upward and `count` downward half-sine
/// bumps, each `width` samples wide and `height` high.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NoiseBand {
    pub width: usize,
    pub height: f64,
    pub count: usize,
}

impl NoiseBand {
    // (width divisor, height factor, count) for the fine, medium and coarse bands.
    const BANDS: [(f64, f64, usize); 3] = [(100., 0.1, 1000), (20., 0.15, 100), (5., 0.2, 10)];

    pub fn standard_bands(n: usize, width_scale: f64, height_scale: f64) -> [NoiseBand; 3] {
        Self::BANDS.map(|(divisor, height, count)| NoiseBand {
            width: (n as f64 / divisor * width_scale) as usize,
            height: height * height_scale,
            count,
        })
    }
}

// `width` samples of `sin` evenly spaced over `[from, to]`, both ends included.
fn half_wave(width: usize, height: f64, from: f64, to: f64) -> Vec<f64> {
    if width == 1 {
        return vec![from.sin() * height];
    }
    let step = (to - from) / (width - 1) as f64;
    (0..width)
        .map(|i| (from + step * i as f64).sin() * height)
        .collect()
}

fn add_at<R: Rng + ?Sized>(buffer: &mut [f64], wave: &[f64], rng: &mut R) {
    let position = rng.random_range(0..=buffer.len() - wave.len());
    buffer[position..position + wave.len()]
        .iter_mut()
        .zip(wave)
        .for_each(|(value, delta)| *value += delta);
}

/// A length-`n` buffer of accumulated bumps for one band. Bumps are placed
/// independently, overlaps add up.
pub fn flustrate<R: Rng + ?Sized>(n: usize, band: &NoiseBand, rng: &mut R) -> Vec<f64> {
    let mut results = vec![0.; n];
    if band.width == 0 || band.width > n {
        return results;
    }

    let upward = half_wave(band.width, band.height, 0., PI);
    for _ in 0..band.count {
        add_at(&mut results, &upward, rng);
    }

    let downward = half_wave(band.width, band.height, PI, 2. * PI);
    for _ in 0..band.count {
        add_at(&mut results, &downward, rng);
    }

    results
}

/// `n` values around `base`, perturbed by the fine, medium and coarse bands.
pub fn random_target_speeds<R: Rng + ?Sized>(
    n: usize,
    base: f64,
    options: &ResampleOptions,
    rng: &mut R,
) -> Vec<f64> {
    let mut results = vec![base; n];
    for band in NoiseBand::standard_bands(n, options.width_scale, options.height_scale) {
        let noise = flustrate(n, &band, rng);
        results
            .iter_mut()
            .zip(noise)
            .for_each(|(value, delta)| *value += delta);
    }
    results
}
