// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Property-Based Tests (proptest) for simplicity-geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for simplicity-geometry using proptest.
//!
//! Covers: eigen-volume fraction, lattice wave speed invariance,
//! calibration scaling.

use proptest::prelude::*;
use simplicity_geometry::eigen_volume::pi_lock_in;
use simplicity_geometry::lattice::{derive_lattice_dynamics, rho_star_for_lattice_constant};

proptest! {
    /// V_eig / V_full = 1/3 at any radius.
    #[test]
    fn eigen_volume_third_of_sphere(radius in 1e-3f64..1e3) {
        let r = pi_lock_in().unwrap();
        let full = r.v_full.eval(&[("R", radius)]).unwrap();
        let eig = r.v_eig.eval(&[("R", radius)]).unwrap();
        prop_assert!((eig / full - 1.0 / 3.0).abs() < 1e-12);
    }

    /// Discrete chain speed a·√(k/(a m)) equals c0 for any a and ρ*.
    #[test]
    fn chain_speed_independent_of_scale(a in 1e-3f64..1e3, rho_star in 1e-3f64..1e3) {
        let d = derive_lattice_dynamics().unwrap();
        let m = d.node_mass(a, rho_star).unwrap();
        let k = d.node_stiffness(a, rho_star).unwrap() / a;
        let c = a * (k / m).sqrt();
        prop_assert!((c / d.wave_speed().unwrap() - 1.0).abs() < 1e-10);
    }

    /// ρ* ∝ a⁻³.
    #[test]
    fn calibration_cubic_scaling(a in 1e-16f64..1e-12, k in 1.5f64..4.0) {
        let d = derive_lattice_dynamics().unwrap();
        let r1 = rho_star_for_lattice_constant(&d, a).unwrap();
        let r2 = rho_star_for_lattice_constant(&d, a * k).unwrap();
        prop_assert!((r1 / r2 / k.powi(3) - 1.0).abs() < 1e-9);
    }
}
