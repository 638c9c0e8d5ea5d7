// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Statistics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Small descriptive statistics used by the fits and toy simulations.

use ndarray::ArrayView1;

pub fn mean(x: ArrayView1<f64>) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.sum() / x.len() as f64
}

/// Root-mean-square of `a − b`.
pub fn rms_residual(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return f64::NAN;
    }
    let ss: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();
    (ss / n as f64).sqrt()
}

/// χ²/N with per-point errors floored at `min_error`.
pub fn reduced_chi_square(
    observed: ArrayView1<f64>,
    model: ArrayView1<f64>,
    error: ArrayView1<f64>,
    min_error: f64,
) -> f64 {
    let n = observed.len().min(model.len()).min(error.len());
    if n == 0 {
        return f64::NAN;
    }
    let chi2: f64 = (0..n)
        .map(|i| {
            let sigma = error[i].abs().max(min_error);
            ((observed[i] - model[i]) / sigma).powi(2)
        })
        .sum();
    chi2 / n as f64
}

/// Equal-width histogram on `[lo, hi)`; values outside are dropped.
pub fn histogram(values: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    if bins == 0 || !(hi > lo) {
        return counts;
    }
    let width = (hi - lo) / bins as f64;
    for &v in values {
        if v.is_finite() && v >= lo && v < hi {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
    }
    counts
}

/// Times of upward zero crossings, linearly interpolated between samples.
pub fn upward_zero_crossings(series: &[f64], dt: f64) -> Vec<f64> {
    series
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] < 0.0 && w[1] >= 0.0)
        .map(|(i, w)| (i as f64 + w[0] / (w[0] - w[1])) * dt)
        .collect()
}

/// Mean spacing of upward zero crossings, `None` with fewer than two.
pub fn mean_period(series: &[f64], dt: f64) -> Option<f64> {
    let crossings = upward_zero_crossings(series, dt);
    if crossings.len() < 2 {
        return None;
    }
    let span = crossings[crossings.len() - 1] - crossings[0];
    Some(span / (crossings.len() - 1) as f64)
}
