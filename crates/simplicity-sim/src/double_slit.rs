// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Double-Slit Toy Simulation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fraunhofer double slit with partial decoherence and single-particle
//! detection by rejection sampling.
//!
//! Each slit contributes `ψ± = sinc(π w sinθ/λ) · e^{±iπ d sinθ/λ}`; the
//! cross term is damped by `1 − γ`:
//! `I = |ψ+|² + |ψ−|² + 2(1 − γ) Re(ψ+ ψ−*)`.

use ndarray::Array1;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use simplicity_math::stats::histogram;
use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::f64::consts::PI;
use tracing::{debug, info};

/// Rejection-sampling budget per requested particle.
const MAX_ATTEMPTS_PER_PARTICLE: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubleSlitParams {
    #[serde(default = "default_wavelength")]
    pub wavelength_m: f64,
    #[serde(default = "default_separation")]
    pub slit_separation_m: f64,
    #[serde(default = "default_width")]
    pub slit_width_m: f64,
    #[serde(default = "default_screen_distance")]
    pub screen_distance_m: f64,
    #[serde(default = "default_half_width")]
    pub screen_half_width_m: f64,
    /// Screen grid points for the analytic curve.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// γ ∈ [0, 1]; 0 is fully coherent.
    #[serde(default)]
    pub decoherence: f64,
    #[serde(default = "default_particles")]
    pub particles: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Gaussian detector resolution, 0 disables smearing.
    #[serde(default)]
    pub detector_sigma_m: f64,
    #[serde(default = "default_bins")]
    pub bins: usize,
}

fn default_wavelength() -> f64 {
    500e-9
}
fn default_separation() -> f64 {
    50e-6
}
fn default_width() -> f64 {
    10e-6
}
fn default_screen_distance() -> f64 {
    1.0
}
fn default_half_width() -> f64 {
    0.05
}
fn default_samples() -> usize {
    1000
}
fn default_particles() -> usize {
    10_000
}
fn default_seed() -> u64 {
    42
}
fn default_bins() -> usize {
    100
}

impl Default for DoubleSlitParams {
    fn default() -> Self {
        DoubleSlitParams {
            wavelength_m: default_wavelength(),
            slit_separation_m: default_separation(),
            slit_width_m: default_width(),
            screen_distance_m: default_screen_distance(),
            screen_half_width_m: default_half_width(),
            samples: default_samples(),
            decoherence: 0.0,
            particles: default_particles(),
            seed: default_seed(),
            detector_sigma_m: 0.0,
            bins: default_bins(),
        }
    }
}

impl DoubleSlitParams {
    pub fn validate(&self) -> SimplicityResult<()> {
        let lengths = [
            ("wavelength", self.wavelength_m),
            ("slit separation", self.slit_separation_m),
            ("slit width", self.slit_width_m),
            ("screen distance", self.screen_distance_m),
            ("screen half-width", self.screen_half_width_m),
        ];
        for (name, v) in lengths {
            if !v.is_finite() || v <= 0.0 {
                return Err(SimplicityError::InvalidParameter(format!(
                    "{name} must be positive and finite, got {v}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.decoherence) {
            return Err(SimplicityError::InvalidParameter(format!(
                "decoherence must lie in [0, 1], got {}",
                self.decoherence
            )));
        }
        if self.samples < 2 {
            return Err(SimplicityError::InvalidParameter(
                "need at least two screen samples".to_string(),
            ));
        }
        if self.bins == 0 {
            return Err(SimplicityError::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        if !self.detector_sigma_m.is_finite() || self.detector_sigma_m < 0.0 {
            return Err(SimplicityError::InvalidParameter(format!(
                "detector sigma must be non-negative, got {}",
                self.detector_sigma_m
            )));
        }
        Ok(())
    }

    fn sin_theta(&self, y: f64) -> f64 {
        y / (y * y + self.screen_distance_m * self.screen_distance_m).sqrt()
    }

    /// Screen position of the first interference minimum.
    pub fn first_minimum_m(&self) -> f64 {
        let s = (self.wavelength_m / (2.0 * self.slit_separation_m)).min(1.0);
        self.screen_distance_m * s / (1.0 - s * s).sqrt()
    }
}

/// `sin(x)/x` with the removable singularity filled.
pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        x.sin() / x
    }
}

/// Amplitudes `(ψ+, ψ−)` of the two slits at screen position `y`.
pub fn slit_amplitudes(y: f64, params: &DoubleSlitParams) -> (Complex64, Complex64) {
    let s = params.sin_theta(y);
    let envelope = sinc(PI * params.slit_width_m * s / params.wavelength_m);
    let phase = PI * params.slit_separation_m * s / params.wavelength_m;
    (
        Complex64::from_polar(envelope, phase),
        Complex64::from_polar(envelope, -phase),
    )
}

fn raw_intensity(y: f64, params: &DoubleSlitParams) -> f64 {
    let (a, b) = slit_amplitudes(y, params);
    a.norm_sqr() + b.norm_sqr() + 2.0 * (1.0 - params.decoherence) * (a * b.conj()).re
}

/// Intensity normalised to 1 at the screen centre.
pub fn intensity_at(y: f64, params: &DoubleSlitParams) -> f64 {
    raw_intensity(y, params) / raw_intensity(0.0, params)
}

/// Draw particle hits from the normalised intensity.
pub fn sample_hits_with_rng<R: Rng + ?Sized>(
    params: &DoubleSlitParams,
    rng: &mut R,
) -> SimplicityResult<Vec<f64>> {
    let h = params.screen_half_width_m;
    let smear = if params.detector_sigma_m > 0.0 {
        Some(
            Normal::new(0.0, params.detector_sigma_m)
                .map_err(|e| SimplicityError::InvalidParameter(format!("detector sigma: {e}")))?,
        )
    } else {
        None
    };

    let budget = params.particles.saturating_mul(MAX_ATTEMPTS_PER_PARTICLE).max(1);
    let mut hits = Vec::with_capacity(params.particles);
    let mut attempts = 0usize;
    while hits.len() < params.particles {
        if attempts >= budget {
            return Err(SimplicityError::InvalidParameter(format!(
                "rejection sampling accepted only {} of {} particles",
                hits.len(),
                params.particles
            )));
        }
        attempts += 1;
        let y = rng.gen_range(-h..h);
        if rng.gen::<f64>() < intensity_at(y, params) {
            hits.push(match &smear {
                Some(normal) => y + normal.sample(rng),
                None => y,
            });
        }
    }
    debug!(accepted = hits.len(), attempts, "double-slit rejection sampling");
    Ok(hits)
}

/// Analytic curve, detected hits and their histogram.
#[derive(Debug, Clone)]
pub struct DoubleSlitPattern {
    pub screen_m: Array1<f64>,
    pub intensity: Array1<f64>,
    pub hits_m: Vec<f64>,
    pub bin_centers_m: Vec<f64>,
    pub counts: Vec<usize>,
    pub visibility: f64,
}

/// `(Imax − Imin)/(Imax + Imin)` over the central fringe pair of a
/// sampled curve; `None` when the curve does not resolve it.
pub fn fringe_visibility(screen: &Array1<f64>, intensity: &Array1<f64>, first_minimum: f64) -> Option<f64> {
    let window = |limit: f64| {
        screen
            .iter()
            .zip(intensity.iter())
            .filter(move |(y, _)| y.abs() <= limit)
            .map(|(_, i)| *i)
    };
    let i_max = window(0.5 * first_minimum).fold(f64::NEG_INFINITY, f64::max);
    let i_min = window(1.5 * first_minimum).fold(f64::INFINITY, f64::min);
    if !i_max.is_finite() || !i_min.is_finite() || i_max + i_min <= 0.0 {
        return None;
    }
    Some((i_max - i_min) / (i_max + i_min))
}

pub fn simulate(params: &DoubleSlitParams) -> SimplicityResult<DoubleSlitPattern> {
    params.validate()?;
    let h = params.screen_half_width_m;
    let screen_m = Array1::linspace(-h, h, params.samples);
    let intensity = screen_m.mapv(|y| intensity_at(y, params));
    let visibility = fringe_visibility(&screen_m, &intensity, params.first_minimum_m()).unwrap_or(f64::NAN);

    let mut rng = StdRng::seed_from_u64(params.seed);
    let hits_m = sample_hits_with_rng(params, &mut rng)?;
    let counts = histogram(&hits_m, -h, h, params.bins);
    let width = 2.0 * h / params.bins as f64;
    let bin_centers_m = (0..params.bins).map(|i| -h + (i as f64 + 0.5) * width).collect();

    info!(
        particles = hits_m.len(),
        gamma = params.decoherence,
        visibility,
        "simulated double slit"
    );
    Ok(DoubleSlitPattern {
        screen_m,
        intensity,
        hits_m,
        bin_centers_m,
        counts,
        visibility,
    })
}
