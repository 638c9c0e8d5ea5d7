// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Critical Surface Density
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Critical surface density Σ*crit from the Hubble constant.
//!
//! `a0 = c·H0/(2π)`, `Σ* = a0/(2πG)`.

use simplicity_types::config::AnalysisConfig;
use simplicity_types::constants::{C_LIGHT, G_NEWTON, M_SUN, PARSEC};
use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::f64::consts::PI;
use std::fmt;

/// Σ*crit together with the intermediate quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaCrit {
    /// Hubble constant [km/s/Mpc].
    pub h0_km_s_mpc: f64,
    /// Hubble constant [1/s].
    pub h0_si: f64,
    /// Characteristic acceleration [m/s²].
    pub a0: f64,
    /// Σ*crit [kg/m²].
    pub sigma_kg_m2: f64,
    /// Σ*crit [M☉/pc²].
    pub sigma_msun_pc2: f64,
}

/// Convert km/s/Mpc to 1/s.
pub fn hubble_to_si(h0_km_s_mpc: f64) -> f64 {
    h0_km_s_mpc * 1e3 / (1e6 * PARSEC)
}

pub fn sigma_crit(h0_km_s_mpc: f64) -> SimplicityResult<SigmaCrit> {
    if !h0_km_s_mpc.is_finite() || h0_km_s_mpc <= 0.0 {
        return Err(SimplicityError::InvalidParameter(format!(
            "H0 must be positive and finite, got {h0_km_s_mpc}"
        )));
    }
    let h0_si = hubble_to_si(h0_km_s_mpc);
    let a0 = C_LIGHT * h0_si / (2.0 * PI);
    let sigma_kg_m2 = a0 / (2.0 * PI * G_NEWTON);
    let sigma_msun_pc2 = sigma_kg_m2 * PARSEC * PARSEC / M_SUN;
    Ok(SigmaCrit {
        h0_km_s_mpc,
        h0_si,
        a0,
        sigma_kg_m2,
        sigma_msun_pc2,
    })
}

/// Σ* to use for an analysis: the configured value, otherwise derived from H0.
pub fn effective_sigma_star(config: &AnalysisConfig) -> SimplicityResult<f64> {
    match config.sigma_star {
        Some(sigma) => Ok(sigma),
        None => Ok(sigma_crit(config.h0_km_s_mpc)?.sigma_msun_pc2),
    }
}

impl fmt::Display for SigmaCrit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "H0        = {:.2}  km/s/Mpc", self.h0_km_s_mpc)?;
        writeln!(f, "a0        = {:.3e}  m/s²", self.a0)?;
        writeln!(f, "Sigma*    = {:.3}  kg/m²", self.sigma_kg_m2)?;
        write!(f, "Sigma*    = {:.1}  Msol/pc²", self.sigma_msun_pc2)
    }
}
