// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — FCC Lattice Dynamics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Continuum coefficients of the FCC node lattice.
//!
//! With `R = a/√2` every coefficient follows from `ρ*` and `a`:
//!
//! * `m_eff = ⅓ ρ* V_full`, `ρ = m_eff / a³ = √2/9 · π ρ*`
//! * `E0 = ρ* V_eig`, `K0 = (16/15)/π · E0/R`, `k = 12 K0`
//! * `E = k/a²`, `c0² = E/ρ = 64√2/(5π)`; `a` cancels
//! * `λ = μ = E/3`
//!
//! Calibrating `E0 = m_e c²` fixes `ρ* = 9/(√2 π) · m_e c² / a³`.

use num_rational::Rational64;
use simplicity_math::monomial::Monomial;
use simplicity_types::constants::{C_LIGHT, M_ELECTRON};
use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::fmt;
use tracing::debug;

use crate::eigen_volume::pi_lock_in;
use crate::overlap::sphere_volume;
use crate::{LATTICE_CONSTANT, RADIUS, RHO_STAR};

const ELECTRON_MASS: &str = "m_e";
const LIGHT_SPEED: &str = "c";

fn r(n: i64, d: i64) -> Rational64 {
    Rational64::new(n, d)
}

/// `R = a/√2`.
pub fn radius_in_lattice_units() -> SimplicityResult<Monomial> {
    Ok(Monomial::symbol(LATTICE_CONSTANT) * Monomial::integer(2).pow(r(-1, 2))?)
}

/// Exact continuum coefficients, all in terms of `ρ*` and `a`.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeDynamics {
    pub m_eff: Monomial,
    pub rho: Monomial,
    pub e0: Monomial,
    pub k0: Monomial,
    pub k_total: Monomial,
    pub young_modulus: Monomial,
    pub c0_squared: Monomial,
    pub c0: Monomial,
    /// Lamé coefficients, `λ = μ`.
    pub lame: Monomial,
}

pub fn derive_lattice_dynamics() -> SimplicityResult<LatticeDynamics> {
    let radius = radius_in_lattice_units()?;
    let a = Monomial::symbol(LATTICE_CONSTANT);
    let rho_star = Monomial::symbol(RHO_STAR);
    let in_a = |m: Monomial| m.subs(RADIUS, &radius);

    let v_full = sphere_volume();
    let m_eff = in_a(rho_star.clone() * v_full.scale(r(1, 3)))?;
    let rho = (&m_eff / &a.pow(r(3, 1))?)?;

    let e0_r = rho_star.clone() * pi_lock_in()?.v_eig;
    let k0_r = (&(Monomial::rational(r(16, 15)) * (&e0_r / &Monomial::pi())?) / &Monomial::symbol(RADIUS))?;
    let e0 = in_a(e0_r)?;
    let k0 = in_a(k0_r)?;
    let k_total = k0.scale(r(12, 1));

    let young_modulus = (&k_total / &a.pow(r(2, 1))?)?;
    let c0_squared = (&young_modulus / &rho)?;
    let c0 = c0_squared.sqrt()?;
    if c0.contains_symbol(LATTICE_CONSTANT) || c0.contains_symbol(RHO_STAR) {
        return Err(SimplicityError::Algebra(format!("wave speed {c0} is not scale free")));
    }
    let lame = young_modulus.scale(r(1, 3));
    debug!(%c0, "derived FCC lattice wave speed");

    Ok(LatticeDynamics {
        m_eff,
        rho,
        e0,
        k0,
        k_total,
        young_modulus,
        c0_squared,
        c0,
        lame,
    })
}

impl LatticeDynamics {
    /// `c0` in lattice units.
    pub fn wave_speed(&self) -> SimplicityResult<f64> {
        self.c0.to_f64()
    }

    /// Node mass for numeric `a` and `ρ*`.
    pub fn node_mass(&self, a: f64, rho_star: f64) -> SimplicityResult<f64> {
        self.m_eff.eval(&[(LATTICE_CONSTANT, a), (RHO_STAR, rho_star)])
    }

    /// Total neighbour stiffness of one node for numeric `a` and `ρ*`.
    pub fn node_stiffness(&self, a: f64, rho_star: f64) -> SimplicityResult<f64> {
        self.k_total.eval(&[(LATTICE_CONSTANT, a), (RHO_STAR, rho_star)])
    }
}

/// `ρ*` from `E0 = m_e c²`, still symbolic in `a`.
pub fn calibrated_rho_star(dynamics: &LatticeDynamics) -> SimplicityResult<Monomial> {
    let e0_per_rho = (&dynamics.e0 / &Monomial::symbol(RHO_STAR))?;
    let rest_energy = Monomial::symbol(ELECTRON_MASS) * Monomial::symbol(LIGHT_SPEED).pow(r(2, 1))?;
    &rest_energy / &e0_per_rho
}

/// `ρ*` [J/m³] for a lattice constant in metres.
pub fn rho_star_for_lattice_constant(dynamics: &LatticeDynamics, a_m: f64) -> SimplicityResult<f64> {
    if !a_m.is_finite() || a_m <= 0.0 {
        return Err(SimplicityError::InvalidParameter(format!(
            "lattice constant must be positive, got {a_m}"
        )));
    }
    calibrated_rho_star(dynamics)?.eval(&[
        (LATTICE_CONSTANT, a_m),
        (ELECTRON_MASS, M_ELECTRON),
        (LIGHT_SPEED, C_LIGHT),
    ])
}

impl fmt::Display for LatticeDynamics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "m_eff           = {}", self.m_eff)?;
        writeln!(f, "rho             = {}", self.rho)?;
        writeln!(f, "E0              = {}", self.e0)?;
        writeln!(f, "K0              = {}", self.k0)?;
        writeln!(f, "k_total         = {}", self.k_total)?;
        writeln!(f, "E = k/a^2       = {}", self.young_modulus)?;
        writeln!(f, "c0^2            = {}", self.c0_squared)?;
        match self.c0.to_f64() {
            Ok(v) => writeln!(f, "c0              = {} ≈ {v:.5}", self.c0)?,
            Err(_) => writeln!(f, "c0              = {}", self.c0)?,
        }
        write!(f, "lambda = mu     = {}", self.lame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_and_stiffness() {
        let d = derive_lattice_dynamics().unwrap();
        assert_eq!(d.rho.to_string(), "2^(1/2)·π·ρ*/9");
        assert_eq!(d.k_total.to_string(), "128·a^2·ρ*/45");
        assert_eq!(d.young_modulus.to_string(), "128·ρ*/45");
        assert_eq!(d.lame.to_string(), "128·ρ*/135");
    }

    #[test]
    fn test_wave_speed_is_scale_free() {
        let d = derive_lattice_dynamics().unwrap();
        assert_eq!(d.c0_squared.to_string(), "64·2^(1/2)/(5·π)");
        assert!(!d.c0.contains_symbol("a"));
        let expected = 8.0 * 2f64.powf(0.25) / (5.0 * std::f64::consts::PI).sqrt();
        let c0 = d.wave_speed().unwrap();
        assert!((c0 - expected).abs() < 1e-12);
        assert!((c0 - 2.40042).abs() < 1e-5);
    }

    #[test]
    fn test_chain_parameters_reproduce_wave_speed() {
        let d = derive_lattice_dynamics().unwrap();
        for a in [0.5, 1.0, 3.0] {
            let m = d.node_mass(a, 1.0).unwrap();
            let k = d.node_stiffness(a, 1.0).unwrap() / a;
            let c = a * (k / m).sqrt();
            assert!((c - d.wave_speed().unwrap()).abs() < 1e-12, "a = {a}");
        }
    }

    #[test]
    fn test_calibration() {
        let d = derive_lattice_dynamics().unwrap();
        let rho_star = calibrated_rho_star(&d).unwrap();
        assert_eq!(rho_star.symbol_exponent("a"), r(-3, 1));
        assert_eq!(rho_star.symbol_exponent("c"), r(2, 1));
        assert_eq!(rho_star.pi_exponent(), r(-1, 1));

        let a = 1e-15;
        let value = rho_star_for_lattice_constant(&d, a).unwrap();
        let expected = 9.0 / (2f64.sqrt() * std::f64::consts::PI) * M_ELECTRON * C_LIGHT * C_LIGHT / a.powi(3);
        assert!((value / expected - 1.0).abs() < 1e-12);
        assert!(rho_star_for_lattice_constant(&d, 0.0).is_err());
    }
}
